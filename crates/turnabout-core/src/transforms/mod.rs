/*!
# Built-in Transforms

Each pattern is a pair of transform functions, one per direction. A function
returns `None` whenever the node it is given does not have the exact shape
its pattern needs.

| Kind | Transforms |
|---|---|
| `template_string` | `template_to_concat` |
| `binary_expression` | `concat_to_template`, `binary_to_if` |
| `if_statement` | `if_to_binary`, `if_to_ternary`, `if_to_switch`, `if_to_switch_on_value`, `swap_if_else_branches` |
| `ternary_expression` | `ternary_to_if`, `ternary_to_switch`, `ternary_to_switch_on_value`, `swap_ternary_branches` |
| `return_statement` | `return_ternary_to_if` |
| `while_statement` / `do_statement` | `while_to_do_while` / `do_while_to_while` |
| `arrow_function` / `function_expression` | `arrow_to_function` / `function_to_arrow` |
| `function_declaration` | `function_declaration_to_arrow` |
| `lexical_declaration`, `variable_declaration` | `arrow_binding_to_function`, `split_declaration` |
| any expression | `wrap_in_cast`, `wrap_in_call` |
*/

pub mod chain;
pub mod conditional;
pub mod declarations;
pub mod functions;
pub mod logical;
pub mod loops;
pub mod switch;
pub mod template;
pub mod wrap;

use crate::registry::{Registry, Transform};

pub const TEMPLATE_TO_CONCAT: Transform = Transform::new(
    "template_to_concat",
    "Rewrite a template literal as string concatenation",
    template::template_to_concat,
);
pub const CONCAT_TO_TEMPLATE: Transform = Transform::new(
    "concat_to_template",
    "Rewrite a string concatenation as a template literal",
    template::concat_to_template,
);
pub const IF_TO_BINARY: Transform = Transform::new(
    "if_to_binary",
    "Rewrite an else-less if as a short-circuit expression",
    logical::if_to_binary,
);
pub const BINARY_TO_IF: Transform = Transform::new(
    "binary_to_if",
    "Rewrite a short-circuit expression as an if statement",
    logical::binary_to_if,
);
pub const IF_TO_TERNARY: Transform = Transform::new(
    "if_to_ternary",
    "Rewrite an if/else chain as a conditional expression",
    conditional::if_to_ternary,
);
pub const TERNARY_TO_IF: Transform = Transform::new(
    "ternary_to_if",
    "Rewrite a conditional expression as an if/else chain",
    conditional::ternary_to_if,
);
pub const RETURN_TERNARY_TO_IF: Transform = Transform::new(
    "return_ternary_to_if",
    "Rewrite a returned conditional expression as an if/else chain of returns",
    conditional::return_ternary_to_if,
);
pub const IF_TO_SWITCH: Transform = Transform::new(
    "if_to_switch",
    "Rewrite an if/else chain as switch (true)",
    switch::if_to_switch,
);
pub const IF_TO_SWITCH_ON_VALUE: Transform = Transform::new(
    "if_to_switch_on_value",
    "Rewrite equality tests against one value as a switch on that value",
    switch::if_to_switch_on_value,
);
pub const TERNARY_TO_SWITCH: Transform = Transform::new(
    "ternary_to_switch",
    "Rewrite a conditional chain as an inline switch (true)",
    switch::ternary_to_switch,
);
pub const TERNARY_TO_SWITCH_ON_VALUE: Transform = Transform::new(
    "ternary_to_switch_on_value",
    "Rewrite a conditional chain of equality tests as an inline switch",
    switch::ternary_to_switch_on_value,
);
pub const SWAP_TERNARY_BRANCHES: Transform = Transform::new(
    "swap_ternary_branches",
    "Swap the two operands of a conditional expression",
    conditional::swap_ternary_branches,
);
pub const SWAP_IF_ELSE_BRANCHES: Transform = Transform::new(
    "swap_if_else_branches",
    "Swap the then and else bodies of an if statement",
    conditional::swap_if_else_branches,
);
pub const WHILE_TO_DO_WHILE: Transform = Transform::new(
    "while_to_do_while",
    "Rewrite a while loop as a do-while loop",
    loops::while_to_do_while,
);
pub const DO_WHILE_TO_WHILE: Transform = Transform::new(
    "do_while_to_while",
    "Rewrite a do-while loop as a while loop",
    loops::do_while_to_while,
);
pub const ARROW_TO_FUNCTION: Transform = Transform::new(
    "arrow_to_function",
    "Rewrite an arrow function as a function expression",
    functions::arrow_to_function,
);
pub const FUNCTION_TO_ARROW: Transform = Transform::new(
    "function_to_arrow",
    "Rewrite a function expression as an arrow function",
    functions::function_to_arrow,
);
pub const FUNCTION_DECLARATION_TO_ARROW: Transform = Transform::new(
    "function_declaration_to_arrow",
    "Rewrite a function declaration as a const-bound arrow function",
    functions::function_declaration_to_arrow,
);
pub const ARROW_BINDING_TO_FUNCTION: Transform = Transform::new(
    "arrow_binding_to_function",
    "Rewrite a variable bound to an arrow function as a function declaration",
    functions::arrow_binding_to_function,
);
pub const SPLIT_DECLARATION: Transform = Transform::new(
    "split_declaration",
    "Split a multi-variable declaration into one declaration per variable",
    declarations::split_declaration,
);
pub const WRAP_IN_CAST: Transform = Transform::new(
    "wrap_in_cast",
    "Wrap an expression in a type assertion",
    wrap::wrap_in_cast,
);
pub const WRAP_IN_CALL: Transform = Transform::new(
    "wrap_in_call",
    "Wrap an expression in a call to a function you type",
    wrap::wrap_in_call,
);

/// Fill `registry` with the built-in transforms, in ranking order per kind
pub fn register_standard(registry: &mut Registry) {
    registry.register("template_string", TEMPLATE_TO_CONCAT);

    registry.register("binary_expression", CONCAT_TO_TEMPLATE);
    registry.register("binary_expression", BINARY_TO_IF);

    registry.register("if_statement", IF_TO_BINARY);
    registry.register("if_statement", IF_TO_TERNARY);
    registry.register("if_statement", IF_TO_SWITCH);
    registry.register("if_statement", IF_TO_SWITCH_ON_VALUE);
    registry.register("if_statement", SWAP_IF_ELSE_BRANCHES);

    registry.register("ternary_expression", TERNARY_TO_IF);
    registry.register("ternary_expression", TERNARY_TO_SWITCH);
    registry.register("ternary_expression", TERNARY_TO_SWITCH_ON_VALUE);
    registry.register("ternary_expression", SWAP_TERNARY_BRANCHES);

    registry.register("return_statement", RETURN_TERNARY_TO_IF);

    registry.register("while_statement", WHILE_TO_DO_WHILE);
    registry.register("do_statement", DO_WHILE_TO_WHILE);

    registry.register("arrow_function", ARROW_TO_FUNCTION);
    registry.register("function_expression", FUNCTION_TO_ARROW);
    registry.register("function_declaration", FUNCTION_DECLARATION_TO_ARROW);

    for kind in ["lexical_declaration", "variable_declaration"] {
        registry.register(kind, ARROW_BINDING_TO_FUNCTION);
        registry.register(kind, SPLIT_DECLARATION);
    }

    registry.register_generic(WRAP_IN_CAST);
    registry.register_generic(WRAP_IN_CALL);
}
