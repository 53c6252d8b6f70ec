/*!
# Engine

Facade tying the resolver, registry and materializer to a configuration.
*/

use crate::action::CandidateAction;
use crate::parser::{ByteRange, Document, JsParser, Position};
use crate::path::{resolve_path, TypePath};
use crate::registry::Registry;
use crate::{EngineConfig, Result};

/// Transformation engine
///
/// Holds no per-document state; every query borrows a [`Document`].
#[derive(Debug, Clone)]
pub struct Engine {
    registry: Registry,
    config: EngineConfig,
}

impl Engine {
    /// Engine with the standard registry
    pub fn new(config: EngineConfig) -> Self {
        Self::with_registry(Registry::standard(), config)
    }

    pub fn with_registry(registry: Registry, config: EngineConfig) -> Self {
        Self { registry, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Parse `source` in the configured dialect
    pub fn parse(&self, source: impl Into<String>) -> Result<Document> {
        JsParser::new(self.config.dialect)?.parse(source)
    }

    pub fn path_at<'doc>(&self, document: &'doc Document, range: ByteRange) -> TypePath<'doc> {
        resolve_path(document, range)
    }

    /// Candidate actions enclosing `range`, innermost constructs first
    pub fn actions_at<'doc>(
        &self,
        document: &'doc Document,
        range: ByteRange,
    ) -> Vec<CandidateAction<'doc>> {
        let path = resolve_path(document, range);
        if path.is_empty() {
            tracing::debug!(?range, "no enclosing construct");
            return Vec::new();
        }

        let actions: Vec<_> = self
            .registry
            .actions_for(document, &path, self.config.generic_wraps)
            .into_iter()
            .map(|action| action.with_verification(self.config.verify_output))
            .collect();

        tracing::debug!(
            ?range,
            path_len = path.len(),
            candidates = actions.len(),
            "discovered candidate actions"
        );
        actions
    }

    /// Same as [`Engine::actions_at`], for zero-based row/column positions
    pub fn actions_at_positions<'doc>(
        &self,
        document: &'doc Document,
        start: Position,
        end: Position,
    ) -> Result<Vec<CandidateAction<'doc>>> {
        let range = document.range_from_positions(start, end)?;
        Ok(self.actions_at(document, range))
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
