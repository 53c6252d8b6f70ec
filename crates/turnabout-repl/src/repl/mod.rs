//! Interactive session over one source document
//!
//! Wraps the core engine with what an editor would otherwise provide:
//! - A current document and selection
//! - Numbered action listings
//! - Applying an action and re-parsing the result
//! - Dot-commands (.help, .at, .apply, etc.)

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use turnabout_core::{ByteRange, CandidateAction, Dialect, Document, Edit, Engine, Position};

pub mod commands;
pub mod notifier;

pub use commands::{parse_selection, ReplCommand};
pub use notifier::{CapturingNotifier, DefaultNotifier, ReplNotifier};

/// One entry of an action listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionSummary {
    /// 1-based number used by `.apply`
    pub index: usize,
    pub title: String,
    pub transform: String,
    pub kind: String,
    pub range: ByteRange,
}

/// Interactive REPL for rewriting one source file
pub struct Repl {
    engine: Engine,
    document: Option<Document>,
    file: Option<PathBuf>,
    selection: (Position, Position),
    notifier: Box<dyn ReplNotifier>,
    running: bool,
    debug: bool,
}

impl Repl {
    /// Create a new REPL with the given engine and no document
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            document: None,
            file: None,
            selection: (Position::new(0, 0), Position::new(0, 0)),
            notifier: Box::new(DefaultNotifier::new()),
            running: true,
            debug: false,
        }
    }

    /// Set the notifier for this REPL
    pub fn set_notifier(&mut self, notifier: Box<dyn ReplNotifier>) {
        self.notifier = notifier;
    }

    /// Get a reference to the current notifier
    pub fn notifier(&self) -> &dyn ReplNotifier {
        self.notifier.as_ref()
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// Current source text, if a document is loaded
    pub fn source(&self) -> Option<&str> {
        self.document.as_ref().map(Document::source)
    }

    /// Read and parse `path`. Without an explicit dialect it is taken from
    /// the file extension, falling back to the configured one.
    pub fn load_file(&mut self, path: impl AsRef<Path>, dialect: Option<Dialect>) -> Result<String> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let dialect = dialect
            .or_else(|| Dialect::from_path(path))
            .unwrap_or(self.engine.config().dialect);
        let message = self.load_source(source, dialect)?;
        self.file = Some(path.to_path_buf());
        Ok(format!("{} ({message})", path.display()))
    }

    /// Parse `source` as the current document and reset the selection
    pub fn load_source(&mut self, source: impl Into<String>, dialect: Dialect) -> Result<String> {
        let document = Document::parse(source, dialect)?;
        let summary = format!(
            "{} bytes of {}{}",
            document.source().len(),
            dialect,
            if document.root().has_error() {
                ", with syntax errors"
            } else {
                ""
            }
        );
        tracing::info!(dialect = %dialect, bytes = document.source().len(), "loaded document");
        self.document = Some(document);
        self.file = None;
        self.selection = (Position::new(0, 0), Position::new(0, 0));
        Ok(summary)
    }

    pub fn set_selection(&mut self, start: Position, end: Position) {
        self.selection = (start, end);
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| anyhow!("No document loaded, use .load <file>"))
    }

    fn candidate_actions(&self) -> Result<Vec<CandidateAction<'_>>> {
        let document = self.document()?;
        let (start, end) = self.selection;
        Ok(self.engine.actions_at_positions(document, start, end)?)
    }

    /// Numbered candidate actions at the current selection
    pub fn actions(&self) -> Result<Vec<ActionSummary>> {
        Ok(self
            .candidate_actions()?
            .iter()
            .enumerate()
            .map(|(i, action)| ActionSummary {
                index: i + 1,
                title: action.title().to_string(),
                transform: action.transform().name.to_string(),
                kind: action.target().kind().to_string(),
                range: ByteRange::of(action.target()),
            })
            .collect())
    }

    /// Kinds on the type path at the current selection, innermost first
    pub fn type_path(&self) -> Result<Vec<&'static str>> {
        let document = self.document()?;
        let (start, end) = self.selection;
        let range = document.range_from_positions(start, end)?;
        Ok(self.engine.path_at(document, range).kinds())
    }

    /// Materialize the numbered action. `Ok(None)` means it does not apply
    /// and nothing changed.
    pub fn edit_for(&self, index: usize) -> Result<Option<Edit>> {
        let actions = self.candidate_actions()?;
        let action = index
            .checked_sub(1)
            .and_then(|i| actions.get(i))
            .ok_or_else(|| anyhow!("No action {index}; there are {}", actions.len()))?;
        Ok(action.apply())
    }

    /// Apply the numbered action to the current document and re-parse it.
    /// Returns a summary and how long materialization took.
    pub fn apply_action(&mut self, index: usize) -> Result<(String, u64)> {
        let start = Instant::now();
        let edit = self.edit_for(index)?;
        let duration = start.elapsed().as_millis() as u64;

        let Some(edit) = edit else {
            return Ok(("Action does not apply here; nothing changed".to_string(), duration));
        };
        let document = self.document()?;
        let rewritten = edit.apply_to(document.source());
        let dialect = document.dialect();
        let replaced = &document.source()[edit.range.start..edit.range.end];
        let summary = if self.debug {
            format!(
                "replaced {:?} with {:?}",
                replaced,
                edit.replacement.plain_text()
            )
        } else {
            format!(
                "rewrote {}:{}-{}:{}",
                edit.start.row + 1,
                edit.start.column + 1,
                edit.end.row + 1,
                edit.end.column + 1
            )
        };

        self.document = Some(Document::parse(rewritten, dialect)?);
        Ok((summary, duration))
    }

    /// Write the current source to `path`, or back to the loaded file
    pub fn write(&self, path: Option<&str>) -> Result<String> {
        let target = match path {
            Some(path) => PathBuf::from(path),
            None => self
                .file
                .clone()
                .ok_or_else(|| anyhow!("No file to write to, use .write <path>"))?,
        };
        let source = self.document()?.source();
        fs::write(&target, source).with_context(|| format!("Failed to write {}", target.display()))?;
        Ok(format!("Wrote {} bytes to {}", source.len(), target.display()))
    }

    /// Parse REPL input into a command
    pub fn parse_input(&self, input: &str) -> Result<ReplCommand> {
        commands::parse_command(input)
    }

    /// Handle a REPL command
    pub fn handle_command(&mut self, command: ReplCommand) -> Result<String> {
        match command {
            ReplCommand::Help => Ok(self.get_help_text()),
            ReplCommand::Quit => {
                self.running = false;
                Ok("Goodbye!".to_string())
            }
            ReplCommand::At(start, end) => {
                self.set_selection(start, end);
                self.format_actions()
            }
            ReplCommand::Actions => self.format_actions(),
            ReplCommand::Path => Ok(self.type_path()?.join(" < ")),
            ReplCommand::Apply(index) => self.apply_action(index).map(|(summary, _)| summary),
            ReplCommand::Show => Ok(self.document()?.source().to_string()),
            ReplCommand::Write(path) => self.write(path.as_deref()),
            ReplCommand::Load(path) => self.load_file(path, None).map(|loaded| format!("Loaded {loaded}")),
            ReplCommand::Debug => {
                self.debug = !self.debug;
                Ok(format!(
                    "Debug mode: {}",
                    if self.debug { "on" } else { "off" }
                ))
            }
        }
    }

    /// Run one line of input, reporting through the notifier.
    ///
    /// A bare `LINE:COL[-LINE:COL]` is shorthand for `.at`.
    pub fn process_line(&mut self, line: &str) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return;
        }

        let command = if trimmed.starts_with('.') {
            self.parse_input(trimmed)
        } else {
            parse_selection(trimmed).map(|(start, end)| ReplCommand::At(start, end))
        };

        match command {
            Ok(ReplCommand::Apply(index)) => match self.apply_action(index) {
                Ok((summary, duration)) => self.notifier.on_result(&summary, duration, self.debug),
                Err(e) => self.notifier.on_error(&format!("Error: {e}")),
            },
            Ok(command) => match self.handle_command(command) {
                Ok(output) => self.notifier.on_output(&output),
                Err(e) => self.notifier.on_error(&format!("Error: {e}")),
            },
            Err(e) => self.notifier.on_error(&format!("Error: {e}")),
        }
    }

    fn format_actions(&self) -> Result<String> {
        let actions = self.actions()?;
        if actions.is_empty() {
            return Ok("No actions here.".to_string());
        }
        let lines: Vec<_> = actions
            .iter()
            .map(|action| {
                if self.debug {
                    format!(
                        "  {:>2}. {} [{}..{}]",
                        action.index, action.title, action.range.start, action.range.end
                    )
                } else {
                    format!("  {:>2}. {}", action.index, action.title)
                }
            })
            .collect();
        Ok(lines.join("\n"))
    }

    /// Get help text
    fn get_help_text(&self) -> String {
        r#"Turnabout Commands:
  .help              - Show this help message
  .quit              - Exit the REPL
  .at LINE:COL       - Select a position (or LINE:COL-LINE:COL) and list actions
  .actions           - List actions at the current selection
  .path              - Show the enclosing constructs, innermost first
  .apply N           - Apply action N from the listing
  .show              - Print the current source
  .write [PATH]      - Save the current source (default: the loaded file)
  .load PATH         - Load another file
  .debug             - Toggle debug mode (ranges and replaced text)

A bare LINE:COL works like .at. Lines and columns start at 1."#
            .to_string()
    }
}
