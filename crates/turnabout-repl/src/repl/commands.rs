//! REPL command parsing and definitions
//!
//! Handles parsing of dot-commands (.help, .at, .apply, etc.) and the
//! `LINE:COL[-LINE:COL]` selection syntax shared with the command line.

use anyhow::{anyhow, Context, Result};
use turnabout_core::Position;

/// Available REPL commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Show help information
    Help,
    /// Exit the REPL
    Quit,
    /// Move the selection and list the actions there
    At(Position, Position),
    /// List the actions at the current selection
    Actions,
    /// Show the type path at the current selection
    Path,
    /// Apply the numbered action from the last listing
    Apply(usize),
    /// Print the current source
    Show,
    /// Write the current source back to disk
    Write(Option<String>),
    /// Load a different source file
    Load(String),
    /// Toggle debug mode
    Debug,
}

/// Parse a command string into a ReplCommand
pub fn parse_command(input: &str) -> Result<ReplCommand> {
    let trimmed = input.trim();

    if !trimmed.starts_with('.') {
        return Err(anyhow!("Commands must start with '.'"));
    }

    let parts: Vec<&str> = trimmed[1..].split_whitespace().collect();

    if parts.is_empty() {
        return Err(anyhow!("Empty command"));
    }

    match parts[0] {
        "help" | "h" => Ok(ReplCommand::Help),
        "quit" | "q" | "exit" => Ok(ReplCommand::Quit),
        "at" => {
            if parts.len() != 2 {
                return Err(anyhow!("Usage: .at LINE:COL[-LINE:COL]"));
            }
            let (start, end) = parse_selection(parts[1])?;
            Ok(ReplCommand::At(start, end))
        }
        "actions" | "ls" => Ok(ReplCommand::Actions),
        "path" => Ok(ReplCommand::Path),
        "apply" | "a" => {
            if parts.len() != 2 {
                return Err(anyhow!("Usage: .apply <number>"));
            }
            let index = parts[1]
                .parse::<usize>()
                .with_context(|| format!("'{}' is not an action number", parts[1]))?;
            Ok(ReplCommand::Apply(index))
        }
        "show" | "cat" => Ok(ReplCommand::Show),
        "write" | "w" => match parts.len() {
            1 => Ok(ReplCommand::Write(None)),
            2 => Ok(ReplCommand::Write(Some(parts[1].to_string()))),
            _ => Err(anyhow!("Usage: .write [path]")),
        },
        "load" => {
            if parts.len() != 2 {
                return Err(anyhow!("Usage: .load <file>"));
            }
            Ok(ReplCommand::Load(parts[1].to_string()))
        }
        "debug" => Ok(ReplCommand::Debug),
        _ => Err(anyhow!("Unknown command: .{}", parts[0])),
    }
}

/// Parse `LINE:COL` or `LINE:COL-LINE:COL` (1-based) into zero-based positions
pub fn parse_selection(input: &str) -> Result<(Position, Position)> {
    match input.split_once('-') {
        Some((start, end)) => Ok((parse_location(start)?, parse_location(end)?)),
        None => {
            let at = parse_location(input)?;
            Ok((at, at))
        }
    }
}

fn parse_location(input: &str) -> Result<Position> {
    let (line, column) = input
        .split_once(':')
        .ok_or_else(|| anyhow!("Expected LINE:COL, got '{input}'"))?;
    let line: usize = line
        .trim()
        .parse()
        .with_context(|| format!("Bad line number in '{input}'"))?;
    let column: usize = column
        .trim()
        .parse()
        .with_context(|| format!("Bad column number in '{input}'"))?;
    if line == 0 || column == 0 {
        return Err(anyhow!("Lines and columns start at 1, got '{input}'"));
    }
    Ok(Position::new(line - 1, column - 1))
}
