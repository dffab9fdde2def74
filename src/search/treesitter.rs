//! Shared tree-sitter utilities for the symbol walker: node classification,
//! flattened child enumeration and lexical container lookup.

use tree_sitter::Node;

/// Identifier-like leaf kinds across the shipped grammars.
const IDENTIFIER_KINDS: &[&str] = &[
    "identifier",
    "type_identifier",
    "property_identifier",
    "private_property_identifier",
    "shorthand_property_identifier",
    "shorthand_property_identifier_pattern",
    "field_identifier",
    "namespace_identifier",
    "package_identifier",
    "statement_identifier",
    // Swift
    "simple_identifier",
    // Ruby class and module names
    "constant",
];

/// Declaration kinds that introduce a named lexical scope.
const SCOPE_KINDS: &[&str] = &[
    // Functions & methods
    "function_declaration",
    "generator_function_declaration",
    "function_signature",
    "function_definition",
    "function_item",
    "method_definition",
    "method_declaration",
    "constructor_declaration",
    "method",
    "singleton_method",
    // Classes, structs & records
    "class_declaration",
    "abstract_class_declaration",
    "class_definition",
    "class_specifier",
    "struct_specifier",
    "class",
    "struct_item",
    "record_declaration",
    "type_spec",
    // Interfaces, traits & protocols
    "interface_declaration",
    "trait_item",
    "protocol_declaration",
    "annotation_type_declaration",
    // Enums
    "enum_declaration",
    "enum_item",
    "enum_specifier",
    // Namespaces & modules
    "internal_module",
    "module",
    "namespace_definition",
    "mod_item",
    // Rust impl blocks, named by their type
    "impl_item",
];

/// Closed classification of syntax nodes for symbol walking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeClass {
    Identifier,
    Scope,
    Other,
}

pub(crate) fn node_class(node: Node) -> NodeClass {
    let kind = node.kind();
    if node.is_named() && !node.is_missing() && IDENTIFIER_KINDS.contains(&kind) {
        NodeClass::Identifier
    } else if SCOPE_KINDS.contains(&kind) {
        NodeClass::Scope
    } else {
        NodeClass::Other
    }
}

/// Push every node below `root` into `out`, in document order.
///
/// Iterative cursor walk: pathological nesting cannot blow the stack.
/// The buffer belongs to the caller and is only appended to.
pub(crate) fn descendants<'t>(root: Node<'t>, out: &mut Vec<Node<'t>>) {
    let mut cursor = root.walk();
    if !cursor.goto_first_child() {
        return;
    }
    // Depth below root's children; 0 means a direct child of root.
    let mut depth = 0usize;
    loop {
        out.push(cursor.node());
        if cursor.goto_first_child() {
            depth += 1;
            continue;
        }
        while !cursor.goto_next_sibling() {
            if depth == 0 || !cursor.goto_parent() {
                return;
            }
            depth -= 1;
        }
    }
}

/// The node naming a scope declaration, if it has one.
///
/// Tries the `name` field, Rust's `impl` type, then follows C-style
/// `declarator` chains (`int *f(void)`) down to the innermost declarator.
pub(crate) fn scope_name_node(node: Node) -> Option<Node> {
    if let Some(name) = node.child_by_field_name("name") {
        return Some(name);
    }
    if node.kind() == "impl_item" {
        return node.child_by_field_name("type");
    }
    let mut declarator = node.child_by_field_name("declarator")?;
    while let Some(inner) = declarator.child_by_field_name("declarator") {
        declarator = inner;
    }
    Some(declarator)
}

/// True if `inner` lies within `outer`'s byte range.
fn covers(outer: Node, inner: Node) -> bool {
    outer.start_byte() <= inner.start_byte() && inner.end_byte() <= outer.end_byte()
}

/// Nearest enclosing named scope of `node` and that scope's name node.
///
/// A scope whose name covers `node` is `node`'s own declaration, not its
/// container, and is passed over, as are scopes without a usable name.
/// `None` means the file scope.
pub(crate) fn nearest_named_scope<'t>(
    node: Node<'t>,
    source: &[u8],
) -> Option<(Node<'t>, Node<'t>)> {
    let mut current = node.parent();
    while let Some(ancestor) = current {
        if node_class(ancestor) == NodeClass::Scope
            && let Some(name) = scope_name_node(ancestor)
            && !covers(name, node)
            && name.utf8_text(source).is_ok_and(|t| !t.is_empty())
        {
            return Some((ancestor, name));
        }
        current = ancestor.parent();
    }
    None
}

/// True if `node` is the declared name of its parent: the parent's `name`
/// field, or the end of its `declarator` chain.
pub(crate) fn names_parent(node: Node) -> bool {
    let Some(parent) = node.parent() else {
        return false;
    };
    if parent.child_by_field_name("name") == Some(node) {
        return true;
    }
    if parent.kind() == "impl_item" {
        return parent.child_by_field_name("type") == Some(node);
    }
    parent.child_by_field_name("declarator").is_some()
        && scope_name_node(parent) == Some(node)
}
