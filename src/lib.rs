#![warn(clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,   // Rust naming conventions
    clippy::similar_names,             // common in parser/search code
    clippy::missing_errors_doc,        // internal pub(crate) fns don't need error docs
    clippy::missing_panics_doc,        // same
    clippy::must_use_candidate,        // builder-style context setters
)]

pub(crate) mod budget;
pub mod cache;
pub(crate) mod classify;
pub mod config;
pub mod context;
pub mod error;
pub mod format;
pub mod search;
pub(crate) mod session;
pub mod types;

pub use classify::determine_match_kind;
pub use config::Config;
pub use context::CompilationContext;
pub use error::NavtoError;
pub use search::pattern::PatternMatcher;
pub use search::{discover_files, get_navigate_to_items, load_sources, navigate_paths};
pub use session::QuotaLedger;
pub use types::{Lang, MatchKind, NavigateToItem, SourceFile, SymbolScope, TextSpan};

/// Build a context from config: grammar fallback and symbol scope.
#[must_use]
pub fn context_for(config: &Config) -> CompilationContext {
    CompilationContext::new()
        .with_default_lang(config.default_lang)
        .with_symbol_scope(config.symbols)
}
