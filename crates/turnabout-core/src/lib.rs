//! # Turnabout Core
//!
//! Bidirectional syntactic transformations for JavaScript and TypeScript:
//! - Parser binding over the tree-sitter grammars
//! - Ancestor path resolution around a cursor or selection
//! - A registry of transforms keyed by syntactic kind
//! - Deferred materialization of candidate actions into text edits
//!
//! The engine never owns or edits the syntax tree. Every node it hands out
//! borrows a [`Document`] snapshot, so actions cannot outlive the text they
//! were computed against.

#![warn(clippy::all)]

pub mod action;
pub mod engine;
pub mod parser;
pub mod path;
pub mod registry;
pub mod snippet;
pub mod syntax;
pub mod transforms;

use std::path::Path;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use action::{CandidateAction, Edit, Replacement};
pub use engine::Engine;
pub use parser::{ByteRange, Dialect, Document, JsParser, Position};
pub use path::{ancestor_chain, dedup_by_kind, resolve_path, TypePath};
pub use registry::{Registry, Transform, TransformFn};
pub use snippet::{Segment, Snippet};

/// Turnabout version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing for Turnabout components
///
/// Events go to stderr so hosts can keep stdout for rewritten source.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("turnabout_core=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Grammar used when parsing through the engine
    pub dialect: Dialect,
    /// Offer wrap-in-cast and wrap-in-call on expression-shaped nodes
    pub generic_wraps: bool,
    /// Re-parse text replacements and decline those that break the document
    pub verify_output: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::JavaScript,
            generic_wraps: true,
            verify_output: true,
        }
    }
}

impl EngineConfig {
    /// Load a configuration from a JSON file. Missing keys take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| EngineError::Config(format!("{}: {}", path.display(), e)))
    }
}

/// Error types for Turnabout core operations
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    /// The grammar could not be loaded into the parser
    #[error("Failed to set {dialect} language: {message}")]
    Language { dialect: Dialect, message: String },

    /// tree-sitter returned no tree
    #[error("Parser produced no tree for {0} source")]
    ParseFailed(Dialect),

    /// A row/column position does not exist in the document
    #[error("Position {row}:{column} is outside the document")]
    PositionOutOfBounds { row: usize, column: usize },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for Turnabout core operations
pub type Result<T> = std::result::Result<T, EngineError>;
