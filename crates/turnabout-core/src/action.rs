/*!
# Action Materialization

Candidate actions are discovered cheaply and materialized only when one is
accepted. Materialization either produces one edit over the target's span or
nothing at all.
*/

use serde::{Deserialize, Serialize};
use tree_sitter::Node;

use crate::parser::{ByteRange, Document, Position};
use crate::registry::Transform;
use crate::snippet::Snippet;
use crate::syntax;

/// New text for a node's span
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Replacement {
    /// Plain text edit
    Text(String),
    /// Text with placeholders for an interactive host
    Snippet(Snippet),
}

impl Replacement {
    /// The text a non-interactive host inserts
    pub fn plain_text(&self) -> String {
        match self {
            Replacement::Text(text) => text.clone(),
            Replacement::Snippet(snippet) => snippet.to_plain_text(),
        }
    }

    pub fn is_snippet(&self) -> bool {
        matches!(self, Replacement::Snippet(_))
    }
}

impl From<String> for Replacement {
    fn from(text: String) -> Self {
        Replacement::Text(text)
    }
}

/// Replace `range` in the source with `replacement`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    pub range: ByteRange,
    pub start: Position,
    pub end: Position,
    pub replacement: Replacement,
}

impl Edit {
    /// The full document text after this edit
    pub fn apply_to(&self, source: &str) -> String {
        let mut out = String::with_capacity(source.len());
        out.push_str(&source[..self.range.start]);
        out.push_str(&self.replacement.plain_text());
        out.push_str(&source[self.range.end..]);
        out
    }
}

/// A deferred offer to run one transform on one node
#[derive(Debug, Clone)]
pub struct CandidateAction<'doc> {
    title: String,
    target: Node<'doc>,
    transform: Transform,
    document: &'doc Document,
    verify: bool,
}

impl<'doc> CandidateAction<'doc> {
    pub fn new(document: &'doc Document, target: Node<'doc>, transform: Transform) -> Self {
        Self {
            title: format!("{}({})", transform.name, target.kind()),
            target,
            transform,
            document,
            verify: true,
        }
    }

    /// Re-parse text replacements before handing them out (default on)
    pub fn with_verification(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// `"<transform>(<node kind>)"`
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn target(&self) -> Node<'doc> {
        self.target
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn document(&self) -> &'doc Document {
        self.document
    }

    /// Run the transform. `None` means the action does not apply and the
    /// host should do nothing.
    pub fn apply(&self) -> Option<Edit> {
        let target = self.target;
        if target.has_error() {
            tracing::debug!(title = %self.title, "target contains parse errors, declining");
            return None;
        }

        let Some(replacement) = (self.transform.apply)(target, self.document.source()) else {
            tracing::trace!(title = %self.title, "transform not applicable to this shape");
            return None;
        };

        let edit = Edit {
            range: ByteRange::of(target),
            start: target.start_position().into(),
            end: target.end_position().into(),
            replacement,
        };

        if self.verify && !edit.replacement.is_snippet() && !self.still_parses(&edit) {
            tracing::warn!(
                title = %self.title,
                "rewrite would introduce a syntax error here, declining"
            );
            return None;
        }

        tracing::debug!(title = %self.title, range = ?edit.range, "materialized action");
        Some(edit)
    }

    fn still_parses(&self, edit: &Edit) -> bool {
        let rewritten = edit.apply_to(self.document.source());
        match Document::parse(rewritten, self.document.dialect()) {
            Ok(doc) => syntax::error_count(doc.root()) <= syntax::error_count(self.document.root()),
            Err(e) => {
                tracing::warn!(error = %e, "could not re-parse rewritten document");
                false
            }
        }
    }
}
