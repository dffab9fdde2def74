use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use rayon::prelude::*;
use tracing::debug;

use crate::cache::TreeCache;
use crate::session::QuotaLedger;
use crate::types::{Lang, SourceFile, SymbolScope};

/// Parser front end plus per-session navigation state.
///
/// Owns the parse cache and the quota ledger, so the ledger's lifetime is
/// the context's lifetime. Hosts that want process-wide budgets keep one
/// context for the whole process.
pub struct CompilationContext {
    trees: TreeCache,
    ledger: QuotaLedger,
    default_lang: Option<Lang>,
    symbol_scope: SymbolScope,
}

impl Default for CompilationContext {
    fn default() -> Self {
        Self {
            trees: TreeCache::new(),
            ledger: QuotaLedger::new(),
            default_lang: Some(Lang::TypeScript),
            symbol_scope: SymbolScope::default(),
        }
    }
}

impl CompilationContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Language for files whose extension is not recognised.
    /// `None` means such files are not parsed at all.
    #[must_use]
    pub fn with_default_lang(mut self, lang: Option<Lang>) -> Self {
        self.default_lang = lang;
        self
    }

    #[must_use]
    pub fn with_symbol_scope(mut self, scope: SymbolScope) -> Self {
        self.symbol_scope = scope;
        self
    }

    #[must_use]
    pub fn ledger(&self) -> &QuotaLedger {
        &self.ledger
    }

    #[must_use]
    pub fn symbol_scope(&self) -> SymbolScope {
        self.symbol_scope
    }

    /// Language a file is parsed with: by extension, else the default.
    #[must_use]
    pub fn lang_for(&self, file_path: &str) -> Option<Lang> {
        detect_lang(Path::new(file_path)).or(self.default_lang)
    }

    /// Syntax tree for `file`, parsed on first request and cached.
    /// `None` when no grammar applies or the parser gives up.
    pub fn parsed_root(&self, file: &SourceFile) -> Option<Arc<tree_sitter::Tree>> {
        let Some(lang) = self.lang_for(&file.file_path) else {
            debug!(file = %file.file_path, "no grammar for file");
            return None;
        };
        self.trees
            .get_or_parse(&file.file_path, &file.source, || parse_tree(&file.source, lang))
    }

    /// Parse every file into the cache in parallel. Results and their order
    /// are unaffected; later lookups just hit the cache.
    pub fn prepare(&self, files: &[SourceFile]) {
        files.par_iter().for_each(|file| {
            let _ = self.parsed_root(file);
        });
    }

    /// Evict cached trees older than `max_age`.
    pub fn prune(&self, max_age: Duration) {
        self.trees.prune(max_age);
    }

    #[must_use]
    pub fn cached_trees(&self) -> usize {
        self.trees.len()
    }
}

/// Map a path's extension to a language with a shipped grammar.
#[must_use]
pub fn detect_lang(path: &Path) -> Option<Lang> {
    match path.extension().and_then(|e| e.to_str())? {
        "ts" | "mts" | "cts" | "ets" => Some(Lang::TypeScript),
        "tsx" => Some(Lang::Tsx),
        "js" | "jsx" | "mjs" | "cjs" => Some(Lang::JavaScript),
        "py" | "pyi" => Some(Lang::Python),
        "rs" => Some(Lang::Rust),
        "go" => Some(Lang::Go),
        "java" => Some(Lang::Java),
        "c" | "h" => Some(Lang::C),
        "cpp" | "hpp" | "cc" | "cxx" | "hh" => Some(Lang::Cpp),
        "rb" => Some(Lang::Ruby),
        "swift" => Some(Lang::Swift),
        "zig" => Some(Lang::Zig),
        _ => None,
    }
}

/// Get the tree-sitter Language for a given Lang variant.
#[must_use]
pub fn ts_language(lang: Lang) -> tree_sitter::Language {
    let lang = match lang {
        Lang::Rust => tree_sitter_rust::LANGUAGE,
        Lang::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT,
        Lang::Tsx => tree_sitter_typescript::LANGUAGE_TSX,
        Lang::JavaScript => tree_sitter_javascript::LANGUAGE,
        Lang::Python => tree_sitter_python::LANGUAGE,
        Lang::Go => tree_sitter_go::LANGUAGE,
        Lang::Java => tree_sitter_java::LANGUAGE,
        Lang::C => tree_sitter_c::LANGUAGE,
        Lang::Cpp => tree_sitter_cpp::LANGUAGE,
        Lang::Ruby => tree_sitter_ruby::LANGUAGE,
        Lang::Swift => tree_sitter_swift::LANGUAGE,
        Lang::Zig => tree_sitter_zig::LANGUAGE,
    };
    lang.into()
}

/// Parse content into a tree-sitter Tree. Returns `None` if the language
/// can't be set or parsing fails.
fn parse_tree(content: &str, lang: Lang) -> Option<tree_sitter::Tree> {
    let mut parser = tree_sitter::Parser::new();
    if let Err(e) = parser.set_language(&ts_language(lang)) {
        debug!(?lang, error = %e, "grammar rejected by parser");
        return None;
    }
    parser.parse(content, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_detection() {
        assert_eq!(detect_lang(Path::new("a/b.rs")), Some(Lang::Rust));
        assert_eq!(detect_lang(Path::new("page.ets")), Some(Lang::TypeScript));
        assert_eq!(detect_lang(Path::new("view.tsx")), Some(Lang::Tsx));
        assert_eq!(detect_lang(Path::new("README.md")), None);
        assert_eq!(detect_lang(Path::new("Makefile")), None);
    }

    #[test]
    fn unknown_extension_uses_default_lang() {
        let ctx = CompilationContext::new();
        assert_eq!(ctx.lang_for("f1"), Some(Lang::TypeScript));

        let strict = CompilationContext::new().with_default_lang(None);
        assert_eq!(strict.lang_for("f1"), None);
        assert!(strict.parsed_root(&SourceFile::new("f1", "let x;")).is_none());
    }

    #[test]
    fn every_grammar_loads() {
        for lang in [
            Lang::Rust,
            Lang::TypeScript,
            Lang::Tsx,
            Lang::JavaScript,
            Lang::Python,
            Lang::Go,
            Lang::Java,
            Lang::C,
            Lang::Cpp,
            Lang::Ruby,
            Lang::Swift,
            Lang::Zig,
        ] {
            assert!(parse_tree("", lang).is_some(), "{lang:?} failed to load");
        }
    }

    #[test]
    fn prepare_fills_cache() {
        let ctx = CompilationContext::new();
        let files = vec![
            SourceFile::new("a.ts", "function a() {}"),
            SourceFile::new("b.py", "def b():\n    pass\n"),
            SourceFile::new("c.md", "# not code"),
        ];
        ctx.prepare(&files);
        // c.md falls back to TypeScript, so all three are cached.
        assert_eq!(ctx.cached_trees(), 3);

        ctx.prune(Duration::ZERO);
        assert_eq!(ctx.cached_trees(), 0);
    }
}
