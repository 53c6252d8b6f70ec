//! Arrow functions <-> `function` forms.

use tree_sitter::Node;

use crate::action::Replacement;
use crate::syntax::{
    as_statement, expression_list, first_named, is_async, named_children, required,
    sequence_elements, standalone_statement, statements, text, unwrap_parens, FUNCTION_KINDS,
};

/// `<T>(a: T): R`: type parameters, parameter list and return type as written.
/// A bare arrow parameter `x` is parenthesized.
fn signature(node: Node<'_>, src: &str) -> Option<String> {
    let mut sig = String::new();
    if let Some(type_params) = node.child_by_field_name("type_parameters") {
        sig.push_str(text(type_params, src));
    }
    if let Some(params) = node.child_by_field_name("parameters") {
        sig.push_str(text(params, src));
    } else {
        let param = node.child_by_field_name("parameter")?;
        sig.push('(');
        sig.push_str(text(param, src));
        sig.push(')');
    }
    if let Some(return_type) = node.child_by_field_name("return_type") {
        sig.push_str(text(return_type, src));
    }
    Some(sig)
}

fn async_prefix(node: Node<'_>) -> &'static str {
    if is_async(node) {
        "async "
    } else {
        ""
    }
}

/// Arrow body as a function block. An expression body `(a(), b)` becomes
/// `{ a(); return b }`, and a trailing `undefined` is dropped instead of
/// returned.
fn function_block(body: Node<'_>, src: &str) -> String {
    if body.kind() == "statement_block" {
        return text(body, src).to_string();
    }
    let elements = sequence_elements(unwrap_parens(body));
    let Some((last, init)) = elements.split_last() else {
        return "{}".to_string();
    };
    let mut lines: Vec<String> = init.iter().map(|expr| as_statement(*expr, src)).collect();
    if last.kind() == "undefined" && !init.is_empty() {
        return format!("{{ {} }}", lines.join("; "));
    }
    lines.push(format!("return {}", text(*last, src)));
    format!("{{ {} }}", lines.join("; "))
}

/// Function block as an arrow body. A block of expression statements
/// collapses to `(e1, e2, ret)` when it ends in `return <expr>`, and to
/// `(e1, e2, undefined)` when it does not return. Anything else is kept.
fn arrow_body(body: Node<'_>, src: &str) -> String {
    collapse_block(body, src).unwrap_or_else(|| text(body, src).to_string())
}

fn collapse_block(body: Node<'_>, src: &str) -> Option<String> {
    let stmts = statements(body);
    let (last, init) = stmts.split_last()?;
    let exprs = if last.kind() == "return_statement" {
        let mut exprs = expression_list(init, src)?;
        exprs.push(text(first_named(*last)?, src));
        exprs
    } else {
        let mut exprs = expression_list(&stmts, src)?;
        exprs.push("undefined");
        exprs
    };
    Some(format!("({})", exprs.join(", ")))
}

/// Whether `name` is referenced anywhere below `node`
fn mentions(node: Node<'_>, name: &str, src: &str) -> bool {
    let mut cursor = node.walk();
    let children: Vec<_> = node.named_children(&mut cursor).collect();
    children.into_iter().any(|child| {
        (child.kind() == "identifier" && text(child, src) == name) || mentions(child, name, src)
    })
}

/// `this`, `super` or `arguments` read in `node`, not counting nested
/// non-arrow functions, which have their own
fn reads_own_binding(node: Node<'_>, src: &str) -> bool {
    match node.kind() {
        "this" | "super" => true,
        "identifier" => text(node, src) == "arguments",
        kind if kind != "arrow_function" && FUNCTION_KINDS.contains(&kind) => false,
        _ => {
            let mut cursor = node.walk();
            let children: Vec<_> = node.named_children(&mut cursor).collect();
            children.into_iter().any(|child| reads_own_binding(child, src))
        }
    }
}

/// `(x) => x + 1` becomes `function (x) { return x + 1 }`
pub fn arrow_to_function(node: Node<'_>, src: &str) -> Option<Replacement> {
    // a bare `function` statement would need a name
    if node.kind() != "arrow_function"
        || node.parent().is_some_and(|parent| parent.kind() == "expression_statement")
    {
        return None;
    }
    let body = required(node, "body")?;
    if reads_own_binding(body, src) {
        return None;
    }
    let sig = signature(node, src)?;
    Some(Replacement::Text(format!(
        "{}function {sig} {}",
        async_prefix(node),
        function_block(body, src)
    )))
}

/// `function (x) { return x + 1 }` becomes `(x) => (x + 1)`.
///
/// Functions that read `this`, `arguments` or their own name are declined,
/// since an arrow has none of them.
pub fn function_to_arrow(node: Node<'_>, src: &str) -> Option<Replacement> {
    if node.kind() != "function_expression" {
        return None;
    }
    let body = required(node, "body")?;
    let recursive = node
        .child_by_field_name("name")
        .is_some_and(|name| mentions(body, text(name, src), src));
    if recursive || reads_own_binding(body, src) {
        return None;
    }
    let sig = signature(node, src)?;
    Some(Replacement::Text(format!(
        "{}{sig} => {}",
        async_prefix(node),
        arrow_body(body, src)
    )))
}

/// `function f(x) { .. }` becomes `const f = (x) => ..`
pub fn function_declaration_to_arrow(node: Node<'_>, src: &str) -> Option<Replacement> {
    if node.kind() != "function_declaration" {
        return None;
    }
    let name = required(node, "name")?;
    let body = required(node, "body")?;
    if reads_own_binding(body, src) {
        return None;
    }
    let sig = signature(node, src)?;
    let binding = format!(
        "const {} = {}{sig} => {}",
        text(name, src),
        async_prefix(node),
        arrow_body(body, src)
    );
    Some(Replacement::Text(standalone_statement(node, src, binding)))
}

/// `const f = (x) => ..` becomes `function f(x) { .. }`
pub fn arrow_binding_to_function(node: Node<'_>, src: &str) -> Option<Replacement> {
    if !matches!(node.kind(), "lexical_declaration" | "variable_declaration") {
        return None;
    }
    let declarators: Vec<_> = named_children(node)
        .into_iter()
        .filter(|child| child.kind() == "variable_declarator")
        .collect();
    let [declarator] = declarators.as_slice() else {
        return None;
    };
    if declarator.child_by_field_name("type").is_some() {
        return None;
    }
    let name = declarator.child_by_field_name("name")?;
    if name.kind() != "identifier" {
        return None;
    }
    let value = unwrap_parens(declarator.child_by_field_name("value")?);
    if value.kind() != "arrow_function" {
        return None;
    }

    let body = required(value, "body")?;
    if reads_own_binding(body, src) {
        return None;
    }
    let sig = signature(value, src)?;
    Some(Replacement::Text(format!(
        "{}function {}{sig} {}",
        async_prefix(value),
        text(name, src),
        function_block(body, src)
    )))
}
