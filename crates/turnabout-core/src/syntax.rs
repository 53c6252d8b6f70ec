//! Helpers for reading tree-sitter nodes the way the transforms need them.
//!
//! Everything here is read-only over a borrowed node and its source text.

use tree_sitter::Node;

/// Kinds that open a new function scope. Searches for `break`, `await` and
/// similar keywords stop at these.
pub const FUNCTION_KINDS: &[&str] = &[
    "function_expression",
    "function_declaration",
    "generator_function",
    "generator_function_declaration",
    "arrow_function",
    "method_definition",
    "class_body",
];

const LOOP_OR_SWITCH_KINDS: &[&str] = &[
    "for_statement",
    "for_in_statement",
    "while_statement",
    "do_statement",
    "switch_statement",
];

const DECLARATION_KINDS: &[&str] = &[
    "lexical_declaration",
    "variable_declaration",
    "function_declaration",
    "generator_function_declaration",
    "class_declaration",
];

/// Tokens that let a line continue the expression on the line before it
const CONTINUATION_STARTS: [char; 6] = ['(', '[', '`', '+', '-', '/'];

/// Text spanned by `node`
pub fn text<'s>(node: Node<'_>, src: &'s str) -> &'s str {
    &src[node.byte_range()]
}

/// Look up a field the grammar always provides for this kind.
///
/// A miss means the transform misread the grammar: it asserts in debug
/// builds and logs in release, then declines.
pub fn required<'t>(node: Node<'t>, field: &str) -> Option<Node<'t>> {
    let child = node.child_by_field_name(field);
    if child.is_none() {
        tracing::error!(kind = node.kind(), field, "node is missing a required field");
        debug_assert!(false, "{} without field '{}'", node.kind(), field);
    }
    child
}

/// Named children, skipping comments
pub fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

pub fn first_named(node: Node<'_>) -> Option<Node<'_>> {
    named_children(node).into_iter().next()
}

/// Strip any number of `( ... )` wrappers
pub fn unwrap_parens(mut node: Node<'_>) -> Node<'_> {
    while node.kind() == "parenthesized_expression" {
        match first_named(node) {
            Some(inner) => node = inner,
            None => break,
        }
    }
    node
}

/// Text of the operator token of a binary or unary expression
pub fn operator(node: Node<'_>) -> Option<&'static str> {
    node.child_by_field_name("operator").map(|op| op.kind())
}

/// Statements of a statement body: the contents of a block, or the single
/// statement itself. Comments inside a block are kept.
pub fn statements(body: Node<'_>) -> Vec<Node<'_>> {
    if body.kind() == "statement_block" {
        let mut cursor = body.walk();
        body.named_children(&mut cursor).collect()
    } else {
        vec![body]
    }
}

/// The expression carried by an expression statement
pub fn statement_expression(stmt: Node<'_>) -> Option<Node<'_>> {
    if stmt.kind() == "expression_statement" {
        first_named(stmt)
    } else {
        None
    }
}

/// Expression texts of a run of expression statements, or `None` if any
/// statement is something else (comments included)
pub fn expression_list<'s>(stmts: &[Node<'_>], src: &'s str) -> Option<Vec<&'s str>> {
    stmts
        .iter()
        .map(|stmt| statement_expression(*stmt).map(|expr| text(expr, src)))
        .collect()
}

/// Elements of a comma sequence, flattened; a non-sequence is one element
pub fn sequence_elements(node: Node<'_>) -> Vec<Node<'_>> {
    let mut out = Vec::new();
    collect_sequence(node, &mut out);
    out
}

fn collect_sequence<'t>(node: Node<'t>, out: &mut Vec<Node<'t>>) {
    if node.kind() == "sequence_expression" {
        for child in named_children(node) {
            collect_sequence(child, out);
        }
    } else {
        out.push(node);
    }
}

/// Whether the first token of `node` is an `async` keyword
pub fn is_async(node: Node<'_>) -> bool {
    node.child(0).is_some_and(|first| first.kind() == "async")
}

/// Leftmost leaf token of `node`
fn leftmost_token(mut node: Node<'_>) -> Node<'_> {
    while let Some(first) = node.child(0) {
        node = first;
    }
    node
}

/// Render an expression so it can stand as a statement. Expressions that
/// would start with `{`, `function` or `class` are parenthesized.
pub fn as_statement(expr: Node<'_>, src: &str) -> String {
    let body = text(expr, src);
    match leftmost_token(expr).kind() {
        "{" | "function" | "class" | "async" => format!("({body})"),
        _ => body.to_string(),
    }
}

/// Expressions that bind looser than any binary operator
fn is_assignment_level(node: Node<'_>) -> bool {
    matches!(
        node.kind(),
        "assignment_expression"
            | "augmented_assignment_expression"
            | "ternary_expression"
            | "sequence_expression"
            | "arrow_function"
            | "yield_expression"
    )
}

/// Text of `node` (parens stripped) for use as the left operand of `op`,
/// re-parenthesized when it would otherwise bind wrongly. `op` is one of
/// `&&`, `||` or `?` (a ternary test).
pub fn operand(node: Node<'_>, src: &str, op: &str) -> String {
    let inner = unwrap_parens(node);
    let looser = is_assignment_level(inner)
        || (inner.kind() == "binary_expression"
            && match (op, operator(inner)) {
                ("&&", Some("||" | "??")) => true,
                ("||", Some("??")) => true,
                _ => false,
            });

    if looser {
        format!("({})", text(inner, src))
    } else {
        text(inner, src).to_string()
    }
}

/// Primary expressions can take a prefix operator without parentheses
pub fn is_primary(node: Node<'_>) -> bool {
    matches!(
        node.kind(),
        "identifier"
            | "member_expression"
            | "subscript_expression"
            | "call_expression"
            | "parenthesized_expression"
            | "non_null_expression"
            | "this"
            | "super"
            | "number"
            | "string"
            | "template_string"
            | "true"
            | "false"
            | "null"
            | "undefined"
            | "array"
    )
}

/// Logical negation of an expression's text, `!x` or `!(x)`
pub fn negate(node: Node<'_>, src: &str) -> String {
    if is_primary(node) {
        format!("!{}", text(node, src))
    } else {
        format!("!({})", text(node, src))
    }
}

/// Whether the expression always evaluates to a boolean
pub fn is_boolean_valued(node: Node<'_>) -> bool {
    let node = unwrap_parens(node);
    match node.kind() {
        "true" | "false" => true,
        "unary_expression" => operator(node) == Some("!"),
        "binary_expression" => match operator(node) {
            Some("==" | "===" | "!=" | "!==" | "<" | ">" | "<=" | ">=" | "instanceof" | "in") => {
                true
            }
            Some("&&" | "||") => {
                let left = node.child_by_field_name("left");
                let right = node.child_by_field_name("right");
                left.is_some_and(is_boolean_valued) && right.is_some_and(is_boolean_valued)
            }
            _ => false,
        },
        _ => false,
    }
}

/// Coerce a condition to a boolean so it can be matched by `case true`
pub fn as_boolean(node: Node<'_>, src: &str) -> String {
    let inner = unwrap_parens(node);
    if is_boolean_valued(inner) {
        text(inner, src).to_string()
    } else if is_primary(inner) {
        format!("!!{}", text(inner, src))
    } else {
        format!("!!({})", text(inner, src))
    }
}

pub fn is_declaration(node: Node<'_>) -> bool {
    DECLARATION_KINDS.contains(&node.kind())
}

/// Search `node`'s subtree for a match, without entering nested functions
/// or any kind listed in `stop`
pub fn contains_within<F>(node: Node<'_>, stop: &[&str], pred: &F) -> bool
where
    F: Fn(Node<'_>) -> bool,
{
    let mut cursor = node.walk();
    let children: Vec<_> = node.named_children(&mut cursor).collect();
    children.into_iter().any(|child| {
        if pred(child) {
            return true;
        }
        if FUNCTION_KINDS.contains(&child.kind()) || stop.contains(&child.kind()) {
            return false;
        }
        contains_within(child, stop, pred)
    })
}

/// An unlabeled `break` that a new enclosing switch would capture
pub fn has_free_break(node: Node<'_>) -> bool {
    let is_break = |n: Node<'_>| n.kind() == "break_statement" && n.child_by_field_name("label").is_none();
    is_break(node) || contains_within(node, LOOP_OR_SWITCH_KINDS, &is_break)
}

/// `await` or `yield` that would be cut off by a new function boundary
pub fn has_suspension(node: Node<'_>) -> bool {
    let suspends = |n: Node<'_>| matches!(n.kind(), "await_expression" | "yield_expression");
    suspends(node) || contains_within(node, &[], &suspends)
}

/// Number of ERROR and MISSING nodes in the tree below `node`
pub fn error_count(node: Node<'_>) -> usize {
    if !node.has_error() {
        return 0;
    }
    let own = usize::from(node.is_error() || node.is_missing());
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    own + children.into_iter().map(error_count).sum::<usize>()
}

/// Guard `rewritten`, an expression-like statement replacing `stmt`, from
/// fusing with its neighbours once newlines stop ending statements.
///
/// A `;` is appended unless `stmt` is the last thing in its block or the
/// document. One is prepended when the text opens with a continuation token
/// and the statement before it is unterminated.
pub fn standalone_statement(stmt: Node<'_>, src: &str, rewritten: String) -> String {
    let mut out = rewritten;
    let rest = src[stmt.end_byte()..].trim_start();
    if !(rest.is_empty() || rest.starts_with('}')) {
        out.push(';');
    }
    if out.starts_with(CONTINUATION_STARTS) && follows_unterminated(stmt, src) {
        out.insert(0, ';');
    }
    out
}

fn follows_unterminated(stmt: Node<'_>, src: &str) -> bool {
    let mut prev = stmt.prev_named_sibling();
    while let Some(node) = prev.filter(|node| node.kind() == "comment") {
        prev = node.prev_named_sibling();
    }
    prev.is_some_and(|node| {
        let body = text(node, src).trim_end();
        let block_like = !matches!(
            node.kind(),
            "expression_statement" | "lexical_declaration" | "variable_declaration"
        );
        !(body.ends_with(';') || (block_like && body.ends_with('}')))
    })
}

/// Leading whitespace of the line containing `offset`
pub fn line_indent(src: &str, offset: usize) -> &str {
    let line_start = src[..offset].rfind('\n').map_or(0, |i| i + 1);
    let line = &src[line_start..];
    let width = line.len() - line.trim_start_matches([' ', '\t']).len();
    &line[..width]
}

/// Source text with all whitespace removed, for layout-insensitive comparison
pub fn squash_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Whether the statement is a jump that ends its block
pub fn is_terminal(stmt: Node<'_>) -> bool {
    matches!(
        stmt.kind(),
        "return_statement" | "throw_statement" | "continue_statement" | "break_statement"
    )
}
