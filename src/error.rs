use std::path::PathBuf;

/// Every error navto can surface. The navigate-to engine itself never
/// fails; these come from the host layer (discovery, config, I/O).
#[derive(Debug)]
pub enum NavtoError {
    NotFound {
        path: PathBuf,
    },
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    Config {
        path: PathBuf,
        reason: String,
    },
    InvalidGlob {
        pattern: String,
        reason: String,
    },
}

impl std::fmt::Display for NavtoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { path } => write!(f, "not found: {}", path.display()),
            Self::IoError { path, source } => {
                write!(f, "{}: {source}", path.display())
            }
            Self::Config { path, reason } => {
                write!(f, "invalid config {}: {reason}", path.display())
            }
            Self::InvalidGlob { pattern, reason } => {
                write!(f, "invalid glob \"{pattern}\": {reason}")
            }
        }
    }
}

impl std::error::Error for NavtoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl NavtoError {
    /// Process exit code for the CLI.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } | Self::IoError { .. } => 2,
            Self::Config { .. } | Self::InvalidGlob { .. } => 3,
        }
    }
}
