//! Output notification system for the REPL
//!
//! Lets the session print through a pluggable backend, so tests can capture
//! what a console user would see.

use std::sync::{Arc, Mutex};

/// Trait for handling REPL output notifications
pub trait ReplNotifier: Send + Sync {
    /// Handle regular output
    fn on_output(&self, content: &str);

    /// Handle error output
    fn on_error(&self, content: &str);

    /// Handle an applied action, with how long materialization took
    fn on_result(&self, output: &str, duration_ms: u64, verbose: bool);
}

/// Default console-based notifier
pub struct DefaultNotifier;

impl DefaultNotifier {
    /// Create a new default notifier
    pub fn new() -> Self {
        Self
    }
}

impl ReplNotifier for DefaultNotifier {
    fn on_output(&self, content: &str) {
        if !content.is_empty() {
            println!("{content}");
        }
    }

    fn on_error(&self, content: &str) {
        eprintln!("{content}");
    }

    fn on_result(&self, output: &str, duration_ms: u64, verbose: bool) {
        if verbose {
            println!("=> {output} ({duration_ms}ms)");
        } else {
            println!("=> {output}");
        }
    }
}

impl Default for DefaultNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ReplNotifier + ?Sized> ReplNotifier for Arc<T> {
    fn on_output(&self, content: &str) {
        (**self).on_output(content);
    }

    fn on_error(&self, content: &str) {
        (**self).on_error(content);
    }

    fn on_result(&self, output: &str, duration_ms: u64, verbose: bool) {
        (**self).on_result(output, duration_ms, verbose);
    }
}

/// Notifier that records everything it is sent
#[derive(Default)]
pub struct CapturingNotifier {
    lines: Mutex<Vec<String>>,
}

impl CapturingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far; errors are prefixed with `error: `
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|lines| lines.clone()).unwrap_or_default()
    }

    fn push(&self, line: String) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line);
        }
    }
}

impl ReplNotifier for CapturingNotifier {
    fn on_output(&self, content: &str) {
        self.push(content.to_string());
    }

    fn on_error(&self, content: &str) {
        self.push(format!("error: {content}"));
    }

    fn on_result(&self, output: &str, _duration_ms: u64, _verbose: bool) {
        self.push(format!("=> {output}"));
    }
}
