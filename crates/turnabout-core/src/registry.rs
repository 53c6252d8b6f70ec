/*!
# Transform Registry

Maps syntactic kinds to the transforms that can rewrite them, plus the
generic transforms every expression-shaped node qualifies for.
*/

use std::fmt;

use indexmap::IndexMap;
use tree_sitter::Node;

use crate::action::{CandidateAction, Replacement};
use crate::parser::Document;
use crate::path::TypePath;
use crate::transforms;

/// One direction of a rewrite pattern.
///
/// Pure and deterministic. `None` means the node has the right kind but not
/// the shape this pattern needs.
pub type TransformFn = for<'t> fn(Node<'t>, &str) -> Option<Replacement>;

/// A named transform function
#[derive(Clone, Copy)]
pub struct Transform {
    /// Identifier used in action titles
    pub name: &'static str,
    /// Human-readable summary
    pub description: &'static str,
    pub apply: TransformFn,
}

impl Transform {
    pub const fn new(name: &'static str, description: &'static str, apply: TransformFn) -> Self {
        Self {
            name,
            description,
            apply,
        }
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform").field("name", &self.name).finish()
    }
}

/// Kind-keyed transform table with insertion order preserved
#[derive(Debug, Clone, Default)]
pub struct Registry {
    by_kind: IndexMap<&'static str, Vec<Transform>>,
    generic: Vec<Transform>,
}

impl Registry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry with every built-in transform
    pub fn standard() -> Self {
        let mut registry = Self::new();
        transforms::register_standard(&mut registry);
        registry
    }

    /// Add a transform for nodes of `kind`; it runs after earlier registrations
    pub fn register(&mut self, kind: &'static str, transform: Transform) {
        self.by_kind.entry(kind).or_default().push(transform);
    }

    /// Add a transform offered on every expression-shaped node
    pub fn register_generic(&mut self, transform: Transform) {
        self.generic.push(transform);
    }

    pub fn transforms_for(&self, kind: &str) -> &[Transform] {
        self.by_kind.get(kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn generic_transforms(&self) -> &[Transform] {
        &self.generic
    }

    /// Kinds with at least one registered transform
    pub fn kinds(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.by_kind.keys().copied()
    }

    /// Expression-shaped kinds qualify for the generic transforms.
    /// `expression_statement` is a statement and does not.
    pub fn is_expression_shaped(kind: &str) -> bool {
        kind.contains("expression") && kind != "expression_statement"
    }

    /// Candidate actions for every node on the path, innermost first.
    ///
    /// Cheap: no replacement text is synthesized here.
    pub fn actions_for<'doc>(
        &self,
        document: &'doc Document,
        path: &TypePath<'doc>,
        include_generic: bool,
    ) -> Vec<CandidateAction<'doc>> {
        let mut actions = Vec::new();
        for node in path.iter() {
            for transform in self.transforms_for(node.kind()) {
                actions.push(CandidateAction::new(document, node, *transform));
            }
            if include_generic && Self::is_expression_shaped(node.kind()) {
                for transform in &self.generic {
                    actions.push(CandidateAction::new(document, node, *transform));
                }
            }
        }
        actions
    }
}
