use serde::{Deserialize, Serialize};

/// Programming language, carried through the type system so downstream
/// code never re-detects. Adding a language means adding an arm here
/// and the compiler tells you everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Rust,
    TypeScript,
    Tsx,
    JavaScript,
    Python,
    Go,
    Java,
    C,
    Cpp,
    Ruby,
    Swift,
    Zig,
}

/// Which identifiers the symbol walker reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolScope {
    /// Every identifier node in the file, references included.
    #[default]
    #[serde(rename = "all")]
    AllIdentifiers,
    /// Only identifiers that are the declared name of their parent node.
    Declarations,
}

/// Strength of a match between a candidate identifier and the search pattern.
///
/// Variants are declared weakest first so the derived `Ord` ranks them:
/// `Exact > Prefix > Substring > None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    None,
    Substring,
    Prefix,
    Exact,
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Substring => write!(f, "substring"),
            Self::Prefix => write!(f, "prefix"),
            Self::Exact => write!(f, "exact"),
        }
    }
}

/// Byte range of a node in its source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextSpan {
    pub start: usize,
    pub length: usize,
}

impl TextSpan {
    #[must_use]
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

/// One input file: the caller's path string plus the text to parse.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub file_path: String,
    pub source: String,
}

impl SourceFile {
    pub fn new(file_path: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            source: source.into(),
        }
    }
}

/// One navigate-to result. Produced fresh per match, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigateToItem {
    pub name: String,
    /// Syntax node kind of the construct carrying the identifier.
    pub kind: String,
    pub match_kind: MatchKind,
    pub is_case_sensitive: bool,
    pub file_name: String,
    /// Nearest enclosing named scope; empty at file top level.
    pub container_name: String,
    pub container_kind: String,
    pub text_span: TextSpan,
}

/// UTF-8 safe string truncation. Never panics on multi-byte characters.
#[must_use]
pub fn truncate_str(s: &str, max: usize) -> &str {
    if s.len() <= max {
        s
    } else {
        &s[..s.floor_char_boundary(max)]
    }
}
