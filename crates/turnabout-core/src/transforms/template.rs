//! Template literal <-> string concatenation.

use tree_sitter::Node;

use crate::action::Replacement;
use crate::syntax::{first_named, operator, required, text, unwrap_parens};

/// A chunk of a string being assembled: literal characters or an
/// interpolated expression
#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Hole(String),
}

/// `` `abc${a + 3}cde` `` becomes `'abc' + (a + 3) + 'cde'`
pub fn template_to_concat(node: Node<'_>, src: &str) -> Option<Replacement> {
    if node.kind() != "template_string" || is_tagged(node) {
        return None;
    }

    let mut pieces = Vec::new();
    let mut pos = node.start_byte() + 1;
    let end = node.end_byte().checked_sub(1)?;
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() != "template_substitution" {
            continue;
        }
        if child.start_byte() > pos {
            pieces.push(Piece::Literal(quote_template_chunk(&src[pos..child.start_byte()])));
        }
        let expr = first_named(child)?;
        pieces.push(Piece::Hole(format!("({})", text(expr, src))));
        pos = child.end_byte();
    }
    if end > pos {
        pieces.push(Piece::Literal(quote_template_chunk(&src[pos..end])));
    }

    // keep `+` a string concatenation when no literal leads the chain
    let leading_holes = pieces.iter().take_while(|p| matches!(p, Piece::Hole(_))).count();
    if pieces.is_empty() || leading_holes >= 2 || (leading_holes == 1 && pieces.len() == 1) {
        pieces.insert(0, Piece::Literal("''".to_string()));
    }

    let parts: Vec<_> = pieces
        .into_iter()
        .map(|piece| match piece {
            Piece::Literal(s) | Piece::Hole(s) => s,
        })
        .collect();
    Some(Replacement::Text(parts.join(" + ")))
}

/// `'abc' + (a + 3) + 'cde'` becomes `` `abc${a + 3}cde` ``.
///
/// Operands ahead of the first string literal are added numerically at run
/// time, so they become one interpolation together.
pub fn concat_to_template(node: Node<'_>, src: &str) -> Option<Replacement> {
    if node.kind() != "binary_expression" || operator(node) != Some("+") {
        return None;
    }

    let mut leaves = Vec::new();
    let mut prefixes = Vec::new();
    collect_plus_chain(node, &mut leaves, &mut prefixes)?;

    let first_string = leaves.iter().position(|leaf| is_string_like(unwrap_parens(*leaf)))?;
    let mut pieces = Vec::new();
    if first_string > 0 {
        let prefix = unwrap_parens(prefixes[first_string - 1]);
        pieces.push(Piece::Hole(text(prefix, src).to_string()));
    }
    for leaf in &leaves[first_string..] {
        let leaf = unwrap_parens(*leaf);
        let piece = match leaf.kind() {
            "string" => Piece::Literal(string_to_template_chunk(text(leaf, src))),
            "template_string" => Piece::Literal(inner(text(leaf, src)).to_string()),
            _ => Piece::Hole(text(leaf, src).to_string()),
        };
        pieces.push(piece);
    }

    let mut out = String::from("`");
    for piece in pieces {
        match piece {
            Piece::Literal(s) => out.push_str(&s),
            Piece::Hole(s) => {
                out.push_str("${");
                out.push_str(&s);
                out.push('}');
            }
        }
    }
    out.push('`');
    Some(Replacement::Text(out))
}

/// Flatten a left-leaning `+` chain. `prefixes[i]` covers `leaves[0..=i]`.
fn collect_plus_chain<'t>(
    node: Node<'t>,
    leaves: &mut Vec<Node<'t>>,
    prefixes: &mut Vec<Node<'t>>,
) -> Option<()> {
    if node.kind() == "binary_expression" && operator(node) == Some("+") {
        collect_plus_chain(unwrap_parens(required(node, "left")?), leaves, prefixes)?;
        leaves.push(required(node, "right")?);
    } else {
        leaves.push(node);
    }
    prefixes.push(node);
    Some(())
}

fn is_string_like(node: Node<'_>) -> bool {
    matches!(node.kind(), "string" | "template_string") && !is_tagged(node)
}

fn is_tagged(node: Node<'_>) -> bool {
    node.parent().is_some_and(|parent| {
        parent.kind() == "call_expression" && parent.child_by_field_name("arguments") == Some(node)
    })
}

/// Contents between the delimiters of a quoted literal
fn inner(literal: &str) -> &str {
    literal.get(1..literal.len().saturating_sub(1)).unwrap_or_default()
}

/// Raw template characters as a single-quoted string literal
fn quote_template_chunk(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('\'');
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped @ ('`' | '$')) => out.push(escaped),
                Some(escaped) => {
                    out.push('\\');
                    out.push(escaped);
                }
                None => out.push_str("\\\\"),
            },
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// A quoted string literal's contents, escaped for a template
fn string_to_template_chunk(literal: &str) -> String {
    let body = inner(literal);
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push('\\');
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '`' => out.push_str("\\`"),
            '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
            _ => out.push(c),
        }
    }
    out
}
