//! Flattened views of `if / else if / else` and nested conditional chains.

use tree_sitter::Node;

use crate::syntax::{first_named, operator, required, squash_whitespace, text, unwrap_parens};

/// One arm of a conditional chain. The trailing `else` arm has no condition.
#[derive(Debug, Clone, Copy)]
pub struct Arm<'t> {
    /// Test with parentheses stripped
    pub condition: Option<Node<'t>>,
    /// Statement body for `if` chains, value expression for ternary chains
    pub body: Node<'t>,
}

impl Arm<'_> {
    pub fn is_else(&self) -> bool {
        self.condition.is_none()
    }
}

/// Arms of an `if` statement, following `else if` links
pub fn if_chain(node: Node<'_>) -> Option<Vec<Arm<'_>>> {
    if node.kind() != "if_statement" {
        return None;
    }
    let mut arms = Vec::new();
    let mut current = node;
    loop {
        arms.push(Arm {
            condition: Some(unwrap_parens(required(current, "condition")?)),
            body: required(current, "consequence")?,
        });
        let Some(else_clause) = current.child_by_field_name("alternative") else {
            break;
        };
        let statement = first_named(else_clause)?;
        if statement.kind() == "if_statement" {
            current = statement;
        } else {
            arms.push(Arm {
                condition: None,
                body: statement,
            });
            break;
        }
    }
    Some(arms)
}

/// Arms of a conditional expression, following nested conditionals in the
/// alternative. There is always a final `else` arm.
pub fn ternary_chain(node: Node<'_>) -> Option<Vec<Arm<'_>>> {
    if node.kind() != "ternary_expression" {
        return None;
    }
    let mut arms = Vec::new();
    let mut current = node;
    loop {
        arms.push(Arm {
            condition: Some(unwrap_parens(required(current, "condition")?)),
            body: required(current, "consequence")?,
        });
        let alternative = required(current, "alternative")?;
        let inner = unwrap_parens(alternative);
        if inner.kind() == "ternary_expression" {
            current = inner;
        } else {
            arms.push(Arm {
                condition: None,
                body: alternative,
            });
            break;
        }
    }
    Some(arms)
}

/// Split a chain of `==`/`===` tests into the shared value and each compared
/// label. `None` if the tests aren't all equality tests against the same text.
pub fn equality_tests<'s>(arms: &[Arm<'_>], src: &'s str) -> Option<(&'s str, Vec<&'s str>)> {
    let mut discriminant: Option<&str> = None;
    let mut labels = Vec::new();
    for condition in arms.iter().filter_map(|arm| arm.condition) {
        if condition.kind() != "binary_expression"
            || !matches!(operator(condition), Some("==" | "==="))
        {
            return None;
        }
        let left = unwrap_parens(required(condition, "left")?);
        let right = required(condition, "right")?;
        let value = text(left, src);
        match discriminant {
            None => discriminant = Some(value),
            Some(seen) if squash_whitespace(seen) == squash_whitespace(value) => {}
            Some(_) => return None,
        }
        labels.push(text(right, src));
    }
    Some((discriminant?, labels))
}
