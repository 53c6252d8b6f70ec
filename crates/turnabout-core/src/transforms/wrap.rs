//! Generic wraps offered on every expression. Both leave a hole for the user,
//! so they produce snippets.

use tree_sitter::Node;

use crate::action::Replacement;
use crate::registry::Registry;
use crate::snippet::Snippet;
use crate::syntax::text;

/// `x` becomes `(x as $1)`
pub fn wrap_in_cast(node: Node<'_>, src: &str) -> Option<Replacement> {
    if !Registry::is_expression_shaped(node.kind()) {
        return None;
    }
    let snippet = Snippet::new()
        .text(format!("({} as ", text(node, src)))
        .placeholder(1, "")
        .text(")");
    Some(Replacement::Snippet(snippet))
}

/// `x` becomes `$0(x)`: the caret lands where the callee's name goes
pub fn wrap_in_call(node: Node<'_>, src: &str) -> Option<Replacement> {
    if !Registry::is_expression_shaped(node.kind()) {
        return None;
    }
    let snippet = Snippet::new().cursor().text(format!("({})", text(node, src)));
    Some(Replacement::Snippet(snippet))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transforms::test_support::{outermost, ts};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wraps_are_snippets() {
        let doc = ts("x = a + b;");
        let node = outermost(&doc, "binary_expression");

        let cast = wrap_in_cast(node, doc.source()).unwrap();
        let Replacement::Snippet(cast) = cast else {
            panic!("expected a snippet");
        };
        assert_eq!(cast.to_snippet_syntax(), "(a + b as $1)");

        let call = wrap_in_call(node, doc.source()).unwrap();
        assert!(call.is_snippet());
        assert_eq!(call.plain_text(), "(a + b)");
    }
}
