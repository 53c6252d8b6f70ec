//! Turnabout REPL - command-line host for the Turnabout transformation engine
//!
//! This crate stands in for an editor: it loads a source file, lists the
//! candidate actions at a position, applies one, and offers an interactive
//! line-edited session over the result.

pub mod repl;

// Re-export commonly used types for convenience
pub use repl::{ActionSummary, DefaultNotifier, Repl, ReplCommand, ReplNotifier};
