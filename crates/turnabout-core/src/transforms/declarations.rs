//! Splitting multi-variable declarations.

use tree_sitter::Node;

use crate::action::Replacement;
use crate::syntax::{line_indent, text};

/// Parents where one declaration can't become several statements
const SINGLE_DECLARATION_PARENTS: &[&str] = &["for_statement", "for_in_statement", "export_statement"];

/// `var ac, b = 3` becomes `var ac\nvar b = 3`, each on its own line at the
/// original indentation
pub fn split_declaration(node: Node<'_>, src: &str) -> Option<Replacement> {
    if !matches!(node.kind(), "lexical_declaration" | "variable_declaration") {
        return None;
    }
    if node
        .parent()
        .is_some_and(|parent| SINGLE_DECLARATION_PARENTS.contains(&parent.kind()))
    {
        return None;
    }

    let mut cursor = node.walk();
    let children: Vec<_> = node.named_children(&mut cursor).collect();
    if children.iter().any(|child| child.kind() == "comment") {
        return None;
    }
    let declarators: Vec<_> = children
        .into_iter()
        .filter(|child| child.kind() == "variable_declarator")
        .collect();
    if declarators.len() < 2 {
        return None;
    }

    let keyword = text(node.child(0)?, src);
    let terminator = if text(node, src).trim_end().ends_with(';') { ";" } else { "" };
    let separator = format!("\n{}", line_indent(src, node.start_byte()));

    let lines: Vec<_> = declarators
        .iter()
        .map(|declarator| format!("{keyword} {}{terminator}", text(*declarator, src)))
        .collect();
    Some(Replacement::Text(lines.join(&separator)))
}
