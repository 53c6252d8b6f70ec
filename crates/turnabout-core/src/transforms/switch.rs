//! Conditional chains -> `switch`.
//!
//! Statement chains become a `switch` in place. Expression chains become an
//! immediately invoked arrow function so the rewrite stays an expression.

use tree_sitter::Node;

use crate::action::Replacement;
use crate::syntax::{
    as_boolean, has_free_break, has_suspension, is_declaration, is_terminal, statements, text,
    unwrap_parens,
};
use crate::transforms::chain::{equality_tests, if_chain, ternary_chain, Arm};

/// `if (c1) {..} else if (c2) {..} else {..}` becomes `switch (true)` with
/// one case per test, each coerced to a boolean
pub fn if_to_switch(node: Node<'_>, src: &str) -> Option<Replacement> {
    let arms = if_chain(node)?;
    if arms.iter().any(|arm| has_free_break(arm.body)) {
        return None;
    }
    let labels = boolean_labels(&arms, src);
    Some(Replacement::Text(statement_switch("true", &arms, &labels, src)))
}

/// `if (a == 3) {..} else if (a === 4) {..}` becomes `switch (a)`
pub fn if_to_switch_on_value(node: Node<'_>, src: &str) -> Option<Replacement> {
    let arms = if_chain(node)?;
    if arms.iter().any(|arm| has_free_break(arm.body)) {
        return None;
    }
    let (value, labels) = equality_tests(&arms, src)?;
    let labels: Vec<String> = labels.into_iter().map(str::to_string).collect();
    Some(Replacement::Text(statement_switch(value, &arms, &labels, src)))
}

/// `a ? x : b ? y : z` becomes `(() => { switch (true) { .. } })()`
pub fn ternary_to_switch(node: Node<'_>, src: &str) -> Option<Replacement> {
    if has_suspension(node) {
        return None;
    }
    let arms = ternary_chain(node)?;
    let labels = boolean_labels(&arms, src);
    Some(Replacement::Text(expression_switch("true", &arms, &labels, src)))
}

/// Conditional chain of equality tests against one value, as an inline
/// `switch` on that value
pub fn ternary_to_switch_on_value(node: Node<'_>, src: &str) -> Option<Replacement> {
    if has_suspension(node) {
        return None;
    }
    let arms = ternary_chain(node)?;
    let (value, labels) = equality_tests(&arms, src)?;
    let labels: Vec<String> = labels.into_iter().map(str::to_string).collect();
    Some(Replacement::Text(expression_switch(value, &arms, &labels, src)))
}

fn boolean_labels(arms: &[Arm<'_>], src: &str) -> Vec<String> {
    arms.iter()
        .filter_map(|arm| arm.condition)
        .map(|condition| as_boolean(condition, src))
        .collect()
}

fn case_header(label: Option<&String>) -> String {
    match label {
        Some(label) => format!("case {label}:\n"),
        None => "default:\n".to_string(),
    }
}

/// `labels` lines up with the conditioned arms, which precede the `else` arm
fn statement_switch(discriminant: &str, arms: &[Arm<'_>], labels: &[String], src: &str) -> String {
    let mut out = format!("switch ({discriminant}) {{\n");
    for (i, arm) in arms.iter().enumerate() {
        let label = if arm.is_else() { None } else { labels.get(i) };
        out.push_str(&case_header(label));

        let stmts = statements(arm.body);
        let body: Vec<_> = stmts.iter().map(|stmt| text(*stmt, src)).collect();
        if stmts.iter().any(|stmt| is_declaration(*stmt)) {
            out.push_str(&format!("{{\n{}\n}}\n", body.join("\n")));
        } else if !body.is_empty() {
            out.push_str(&body.join("\n"));
            out.push('\n');
        }

        let falls_through = !stmts.last().is_some_and(|stmt| is_terminal(*stmt));
        if !arm.is_else() && falls_through {
            out.push_str("break\n");
        }
    }
    out.push('}');
    out
}

fn expression_switch(discriminant: &str, arms: &[Arm<'_>], labels: &[String], src: &str) -> String {
    let mut out = format!("(() => {{\nswitch ({discriminant}) {{\n");
    for (i, arm) in arms.iter().enumerate() {
        let label = if arm.is_else() { None } else { labels.get(i) };
        out.push_str(&case_header(label));
        out.push_str(&format!("return ({})\n", text(unwrap_parens(arm.body), src)));
    }
    out.push_str("}\n})()");
    out
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
    fn test_if_chain_to_switch_on_value() {
        let source = "if (a == 3) { a++ } else if (a === 4) { b = 3 } else { console.log('abc') }";
        assert_eq!(
            text_of(apply(source, "if_statement", if_to_switch_on_value)),
            "switch (a) {\ncase 3:\na++\nbreak\ncase 4:\nb = 3\nbreak\ndefault:\nconsole.log('abc')\n}"
        );
    }

    #[test]
    fn test_if_chain_to_switch_true() {
        let source = "if (x) { a() } else if (n > 2) { return n }";
        assert_eq!(
            text_of(apply(source, "if_statement", if_to_switch)),
            "switch (true) {\ncase !!x:\na()\nbreak\ncase n > 2:\nreturn n\n}"
        );
    }

    #[test]
    fn test_declarations_get_their_own_block() {
        let source = "if (x) { let y = 1; use(y) }";
        assert_eq!(
            text_of(apply(source, "if_statement", if_to_switch)),
            "switch (true) {\ncase !!x:\n{\nlet y = 1;\nuse(y)\n}\nbreak\n}"
        );
    }

    #[test]
    fn test_free_break_is_declined() {
        let source = "for (;;) { if (x) { break } else { go() } }";
        assert!(apply(source, "if_statement", if_to_switch).is_none());
        let nested = "if (x) { for (;;) { break } }";
        assert!(apply(nested, "if_statement", if_to_switch).is_some());
    }

    #[test]
    fn test_switch_on_value_needs_equality_tests() {
        assert!(apply("if (a > 3) { b() }", "if_statement", if_to_switch_on_value).is_none());
        assert!(
            apply("if (a == 1) { b() } else if (c == 2) { d() }", "if_statement", if_to_switch_on_value)
                .is_none()
        );
    }

    #[test]
    fn test_ternary_to_inline_switch() {
        assert_eq!(
            text_of(apply("r = a ? x : b ? (y, z) : w", "ternary_expression", ternary_to_switch)),
            "(() => {\nswitch (true) {\ncase !!a:\nreturn (x)\ncase !!b:\nreturn (y, z)\ndefault:\nreturn (w)\n}\n})()"
        );
    }

    #[test]
    fn test_ternary_to_inline_switch_on_value() {
        assert_eq!(
            text_of(apply(
                "r = k === 'a' ? 1 : k === 'b' ? 2 : 0",
                "ternary_expression",
                ternary_to_switch_on_value
            )),
            "(() => {\nswitch (k) {\ncase 'a':\nreturn (1)\ncase 'b':\nreturn (2)\ndefault:\nreturn (0)\n}\n})()"
        );
    }

    #[test]
    fn test_suspension_points_are_declined() {
        let source = "async function f() { return a ? await x : y }";
        assert!(apply(source, "ternary_expression", ternary_to_switch).is_none());
    }
}
