use tracing::debug;

use super::treesitter::{descendants, names_parent, nearest_named_scope, node_class, NodeClass};

use crate::context::CompilationContext;
use crate::types::{SourceFile, SymbolScope, TextSpan};

/// One identifier found in a file, before any pattern matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SymbolEntry {
    pub name: String,
    pub kind: String,
    pub container_name: String,
    pub container_kind: String,
    pub span: TextSpan,
}

/// Enumerate the identifiers of one file with their lexical containers,
/// in document order. A file without a syntax tree yields nothing.
pub(crate) fn symbols_in_file(ctx: &CompilationContext, file: &SourceFile) -> Vec<SymbolEntry> {
    let Some(tree) = ctx.parsed_root(file) else {
        debug!(file = %file.file_path, "no syntax tree, skipping file");
        return Vec::new();
    };

    let root = tree.root_node();
    let source = file.source.as_bytes();
    let declarations_only = ctx.symbol_scope() == SymbolScope::Declarations;

    let mut nodes = Vec::new();
    descendants(root, &mut nodes);

    let mut entries = Vec::new();
    for node in nodes {
        if node_class(node) != NodeClass::Identifier {
            continue;
        }
        if declarations_only && !names_parent(node) {
            continue;
        }
        let Ok(name) = node.utf8_text(source) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }

        let kind = node.parent().unwrap_or(node).kind();
        let (container_name, container_kind) = match nearest_named_scope(node, source) {
            Some((scope, name_node)) => (
                name_node.utf8_text(source).unwrap_or_default().to_string(),
                scope.kind(),
            ),
            // File scope sentinel
            None => (String::new(), root.kind()),
        };

        entries.push(SymbolEntry {
            name: name.to_string(),
            kind: kind.to_string(),
            container_name,
            container_kind: container_kind.to_string(),
            span: TextSpan::new(node.start_byte(), node.end_byte() - node.start_byte()),
        });
    }

    entries
}
