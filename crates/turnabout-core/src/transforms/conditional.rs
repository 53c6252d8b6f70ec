//! `if / else` chains <-> conditional expressions, and branch swaps.

use tree_sitter::Node;

use crate::action::Replacement;
use crate::syntax::{
    as_statement, expression_list, first_named, operand, required, sequence_elements,
    standalone_statement, statements, text, unwrap_parens,
};
use crate::transforms::chain::{if_chain, ternary_chain, Arm};

/// What one `if` arm evaluates: its expression statements, and whether the
/// last of them was a `return`
struct ArmValue {
    exprs: Vec<String>,
    returns: bool,
}

impl ArmValue {
    fn of(body: Node<'_>, src: &str) -> Option<Self> {
        let stmts = statements(body);
        let Some((last, init)) = stmts.split_last() else {
            return Some(Self {
                exprs: Vec::new(),
                returns: false,
            });
        };

        if last.kind() == "return_statement" {
            let mut exprs: Vec<String> =
                expression_list(init, src)?.into_iter().map(str::to_string).collect();
            exprs.push(first_named(*last).map_or_else(|| "undefined".to_string(), |arg| text(arg, src).to_string()));
            Some(Self { exprs, returns: true })
        } else {
            let exprs = expression_list(&stmts, src)?.into_iter().map(str::to_string).collect();
            Some(Self { exprs, returns: false })
        }
    }

    fn render(&self) -> String {
        if self.exprs.is_empty() {
            "undefined".to_string()
        } else {
            format!("({})", self.exprs.join(", "))
        }
    }
}

/// `if (a) { b() } else { c() }` becomes `a ? (b()) : (c())`.
///
/// Chains whose every arm ends in `return` become one `return` of the
/// conditional, and need a final `else`. A missing `else` evaluates to
/// `undefined`.
pub fn if_to_ternary(node: Node<'_>, src: &str) -> Option<Replacement> {
    let arms = if_chain(node)?;
    let values = arms
        .iter()
        .map(|arm| ArmValue::of(arm.body, src))
        .collect::<Option<Vec<_>>>()?;

    let returns = values.first()?.returns;
    if values.iter().any(|value| value.returns != returns) {
        return None;
    }
    let has_else = arms.last().is_some_and(Arm::is_else);
    if returns && !has_else {
        return None;
    }
    if values.iter().all(|value| value.exprs.is_empty()) {
        return None;
    }

    let mut out = String::new();
    for (arm, value) in arms.iter().zip(&values) {
        match arm.condition {
            Some(condition) => {
                out.push_str(&operand(condition, src, "?"));
                out.push_str(" ? ");
                out.push_str(&value.render());
                out.push_str(" : ");
            }
            None => out.push_str(&value.render()),
        }
    }
    if !has_else {
        out.push_str("undefined");
    }
    if returns {
        out.insert_str(0, "return ");
    }
    Some(Replacement::Text(standalone_statement(node, src, out)))
}

/// `a ? b : c` becomes `if (a) {\nb\n} else {\nc\n}`, following nested
/// conditionals in the alternative as `else if`
pub fn ternary_to_if(node: Node<'_>, src: &str) -> Option<Replacement> {
    let mut arms = ternary_chain(node)?;
    if arms
        .last()
        .is_some_and(|arm| arm.is_else() && unwrap_parens(arm.body).kind() == "undefined")
    {
        arms.pop();
    }
    Some(Replacement::Text(render_if_chain(&arms, src, false)))
}

/// `return a ? b : c` becomes an `if` chain returning from every arm
pub fn return_ternary_to_if(node: Node<'_>, src: &str) -> Option<Replacement> {
    if node.kind() != "return_statement" {
        return None;
    }
    let value = unwrap_parens(first_named(node)?);
    if value.kind() != "ternary_expression" {
        return None;
    }
    let arms = ternary_chain(value)?;
    Some(Replacement::Text(render_if_chain(&arms, src, true)))
}

fn render_if_chain(arms: &[Arm<'_>], src: &str, returns: bool) -> String {
    let mut out = String::new();
    for (i, arm) in arms.iter().enumerate() {
        if i > 0 {
            out.push_str(" else ");
        }
        if let Some(condition) = arm.condition {
            out.push_str(&format!("if ({}) ", text(condition, src)));
        }
        out.push_str(&arm_block(arm.body, src, returns));
    }
    out
}

fn arm_block(value: Node<'_>, src: &str, returns: bool) -> String {
    let elements = sequence_elements(unwrap_parens(value));
    let mut lines: Vec<String> = elements.iter().map(|expr| as_statement(*expr, src)).collect();
    if returns {
        if let (Some(line), Some(last)) = (lines.last_mut(), elements.last()) {
            *line = format!("return {}", text(*last, src));
        }
    }
    format!("{{\n{}\n}}", lines.join("\n"))
}

/// `a ? b : c` becomes `a ? c : b`. The test is not negated.
pub fn swap_ternary_branches(node: Node<'_>, src: &str) -> Option<Replacement> {
    if node.kind() != "ternary_expression" {
        return None;
    }
    let condition = required(node, "condition")?;
    let consequence = required(node, "consequence")?;
    let alternative = required(node, "alternative")?;
    Some(Replacement::Text(format!(
        "{} ? {} : {}",
        text(condition, src),
        text(alternative, src),
        text(consequence, src)
    )))
}

/// Swap the then and else bodies of an `if`. The test is not negated.
pub fn swap_if_else_branches(node: Node<'_>, src: &str) -> Option<Replacement> {
    if node.kind() != "if_statement" {
        return None;
    }
    let else_clause = node.child_by_field_name("alternative")?;
    let else_body = first_named(else_clause)?;
    let condition = required(node, "condition")?;
    let consequence = required(node, "consequence")?;
    Some(Replacement::Text(format!(
        "if {} {} else {}",
        text(condition, src),
        text(else_body, src),
        text(consequence, src)
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transforms::test_support::{js, outermost, text_of};
    use pretty_assertions::assert_eq;

    fn apply(source: &str, kind: &str, f: crate::TransformFn) -> Option<Replacement> {
        let doc = js(source);
        f(outermost(&doc, kind), doc.source())
    }

    #[test]
    fn test_if_else_to_ternary() {
        assert_eq!(
            text_of(apply("if (a) { b() } else { c() }", "if_statement", if_to_ternary)),
            "a ? (b()) : (c())"
        );
    }

    #[test]
    fn test_if_chain_to_nested_ternary() {
        assert_eq!(
            text_of(apply(
                "if (a) { x(); y() } else if (b) { z() } else { w() }",
                "if_statement",
                if_to_ternary
            )),
            "a ? (x(), y()) : b ? (z()) : (w())"
        );
        assert_eq!(
            text_of(apply("if (a) { x() }", "if_statement", if_to_ternary)),
            "a ? (x()) : undefined"
        );
    }

    #[test]
    fn test_returning_chain_to_returned_ternary() {
        let source = "function f() { if (a) { log(); return 1 } else { return } }";
        assert_eq!(
            text_of(apply(source, "if_statement", if_to_ternary)),
            "return a ? (log(), 1) : (undefined)"
        );
    }

    #[test]
    fn test_if_to_ternary_declines() {
        let mixed = "function f() { if (a) { return 1 } else { b() } }";
        assert!(apply(mixed, "if_statement", if_to_ternary).is_none());
        let no_else = "function f() { if (a) { return 1 } }";
        assert!(apply(no_else, "if_statement", if_to_ternary).is_none());
        assert!(apply("if (a) { let x = 1 }", "if_statement", if_to_ternary).is_none());
        assert!(apply("if (a) {} else {}", "if_statement", if_to_ternary).is_none());
    }

    #[test]
    fn test_ternary_to_if() {
        assert_eq!(
            text_of(apply("a ? (b(), c()) : d()", "ternary_expression", ternary_to_if)),
            "if (a) {\nb()\nc()\n} else {\nd()\n}"
        );
        assert_eq!(
            text_of(apply("a ? b() : c ? d() : e()", "ternary_expression", ternary_to_if)),
            "if (a) {\nb()\n} else if (c) {\nd()\n} else {\ne()\n}"
        );
    }

    #[test]
    fn test_undefined_alternative_drops_else() {
        assert_eq!(
            text_of(apply("a ? (x()) : undefined", "ternary_expression", ternary_to_if)),
            "if (a) {\nx()\n}"
        );
    }

    #[test]
    fn test_return_ternary_to_if() {
        let source = "function f() { return a ? (log(), 1) : b ? 2 : 3 }";
        assert_eq!(
            text_of(apply(source, "return_statement", return_ternary_to_if)),
            "if (a) {\nlog()\nreturn 1\n} else if (b) {\nreturn 2\n} else {\nreturn 3\n}"
        );
        let plain = "function f() { return a }";
        assert!(apply(plain, "return_statement", return_ternary_to_if).is_none());
    }

    #[test]
    fn test_swaps_are_verbatim() {
        assert_eq!(
            text_of(apply("x = a ? b : c", "ternary_expression", swap_ternary_branches)),
            "a ? c : b"
        );
        assert_eq!(
            text_of(apply("if (a) { b() } else { c() }", "if_statement", swap_if_else_branches)),
            "if (a) { c() } else { b() }"
        );
        assert!(apply("if (a) { b() }", "if_statement", swap_if_else_branches).is_none());
    }

    #[test]
    fn test_statement_before_a_bracket_line_is_terminated() {
        assert_eq!(
            text_of(apply("if (x) { a() } else { d() }\n[1, 2].forEach(f)", "if_statement", if_to_ternary)),
            "x ? (a()) : (d());"
        );
        let source = "function f() { if (a) { return 1 } else { return 2 }\n(g)() }";
        assert_eq!(
            text_of(apply(source, "if_statement", if_to_ternary)),
            "return a ? (1) : (2);"
        );
    }

    #[test]
    fn test_other_kinds_are_declined() {
        let doc = js("if (a) { b() } else { c() }\nx = p ? q : r");
        let source = doc.source();
        let if_node = outermost(&doc, "if_statement");
        let ternary = outermost(&doc, "ternary_expression");
        assert!(swap_ternary_branches(if_node, source).is_none());
        assert!(ternary_to_if(if_node, source).is_none());
        assert!(return_ternary_to_if(if_node, source).is_none());
        assert!(if_to_ternary(ternary, source).is_none());
        assert!(swap_if_else_branches(ternary, source).is_none());
    }
}
