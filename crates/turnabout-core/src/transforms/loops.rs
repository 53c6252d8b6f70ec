//! `while` <-> `do ... while`.
//!
//! Only the syntax is swapped. The two loops differ in whether the body runs
//! before the first test.

use tree_sitter::Node;

use crate::action::Replacement;
use crate::syntax::{required, text};

pub fn while_to_do_while(node: Node<'_>, src: &str) -> Option<Replacement> {
    if node.kind() != "while_statement" {
        return None;
    }
    let condition = required(node, "condition")?;
    let body = required(node, "body")?;
    Some(Replacement::Text(format!(
        "do {} while {}",
        text(body, src),
        text(condition, src)
    )))
}

pub fn do_while_to_while(node: Node<'_>, src: &str) -> Option<Replacement> {
    if node.kind() != "do_statement" {
        return None;
    }
    let body = required(node, "body")?;
    let condition = required(node, "condition")?;
    Some(Replacement::Text(format!(
        "while {} {}",
        text(condition, src),
        text(body, src)
    )))
}
