use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::NavtoError;
use crate::types::{Lang, SymbolScope};

/// File name looked up in the first search path.
pub const CONFIG_FILE: &str = ".navto.toml";

/// Navigation settings. Every key is optional; CLI flags override them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub max_results: usize,
    pub case_sensitive: bool,
    /// Grammar for files with an unrecognised extension.
    pub default_lang: Option<Lang>,
    pub symbols: SymbolScope,
    /// Include globs; empty means every file with a grammar.
    pub globs: Vec<String>,
    /// Directory names skipped in addition to the built-in list.
    pub skip_dirs: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_results: 100,
            case_sensitive: false,
            default_lang: Some(Lang::TypeScript),
            symbols: SymbolScope::default(),
            globs: Vec::new(),
            skip_dirs: Vec::new(),
        }
    }
}

impl Config {
    /// Parse a config file. A missing file is an error here; use
    /// [`discover`](Self::discover) for optional lookup.
    pub fn load(path: &Path) -> Result<Self, NavtoError> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => NavtoError::NotFound {
                path: path.to_path_buf(),
            },
            _ => NavtoError::IoError {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        let config = Self::from_toml(&content).map_err(|reason| NavtoError::Config {
            path: path.to_path_buf(),
            reason,
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// `.navto.toml` in `dir` if present, defaults otherwise.
    pub fn discover(dir: &Path) -> Result<Self, NavtoError> {
        let candidate: PathBuf = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.message().to_string())
    }
}
