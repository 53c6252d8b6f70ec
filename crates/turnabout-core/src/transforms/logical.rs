//! Else-less `if` <-> short-circuit `&&` / `||`.

use tree_sitter::Node;

use crate::action::Replacement;
use crate::syntax::{
    as_statement, expression_list, negate, operand, operator, required, sequence_elements,
    standalone_statement, statements, text, unwrap_parens,
};

/// `if (c) { a(); b() }` becomes `c && (a(), b())`, and a negated test
/// `if (!c)` becomes `c || (...)`
pub fn if_to_binary(node: Node<'_>, src: &str) -> Option<Replacement> {
    if node.kind() != "if_statement" || node.child_by_field_name("alternative").is_some() {
        return None;
    }
    let condition = unwrap_parens(required(node, "condition")?);
    let body = required(node, "consequence")?;

    let exprs = expression_list(&statements(body), src)?;
    if exprs.is_empty() {
        return None;
    }
    let joined = exprs.join(", ");

    let rewritten = if condition.kind() == "unary_expression" && operator(condition) == Some("!") {
        let argument = required(condition, "argument")?;
        format!("{} || ({joined})", operand(argument, src, "||"))
    } else {
        format!("{} && ({joined})", operand(condition, src, "&&"))
    };
    Some(Replacement::Text(standalone_statement(node, src, rewritten)))
}

/// `c && (a, b)` becomes an `if` running each element as a statement; `||`
/// negates the test
pub fn binary_to_if(node: Node<'_>, src: &str) -> Option<Replacement> {
    if node.kind() != "binary_expression" {
        return None;
    }
    let op = operator(node)?;
    if op != "&&" && op != "||" {
        return None;
    }
    let left = unwrap_parens(required(node, "left")?);
    let right = unwrap_parens(required(node, "right")?);

    let condition = if op == "&&" {
        text(left, src).to_string()
    } else {
        negate(left, src)
    };
    let body: Vec<_> = sequence_elements(right)
        .into_iter()
        .map(|expr| as_statement(expr, src))
        .collect();

    Some(Replacement::Text(format!("if ({condition}) {{\n{}\n}}", body.join("\n"))))
}
