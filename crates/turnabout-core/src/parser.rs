// Parser binding - wraps the tree-sitter JavaScript and TypeScript grammars
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tree_sitter::{Node, Point, Tree};

use crate::{EngineError, Result};

/// Source dialects understood by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// JavaScript, including JSX
    #[serde(alias = "js")]
    JavaScript,
    /// TypeScript without JSX
    #[serde(alias = "ts")]
    TypeScript,
    /// TypeScript with JSX
    Tsx,
}

impl Dialect {
    /// Pick a dialect from a file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?;
        match ext.to_ascii_lowercase().as_str() {
            "js" | "mjs" | "cjs" | "jsx" => Some(Dialect::JavaScript),
            "ts" | "mts" | "cts" => Some(Dialect::TypeScript),
            "tsx" => Some(Dialect::Tsx),
            _ => None,
        }
    }

    fn language(self) -> tree_sitter::Language {
        match self {
            Dialect::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Dialect::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Dialect::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dialect::JavaScript => "javascript",
            Dialect::TypeScript => "typescript",
            Dialect::Tsx => "tsx",
        };
        f.write_str(name)
    }
}

impl FromStr for Dialect {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "js" | "javascript" | "jsx" => Ok(Dialect::JavaScript),
            "ts" | "typescript" => Ok(Dialect::TypeScript),
            "tsx" => Ok(Dialect::Tsx),
            other => Err(EngineError::Config(format!("unknown dialect '{other}'"))),
        }
    }
}

/// Half-open byte range into a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// An empty range at `offset`, i.e. a cursor
    pub fn cursor(offset: usize) -> Self {
        Self { start: offset, end: offset }
    }

    pub fn of(node: Node<'_>) -> Self {
        Self {
            start: node.start_byte(),
            end: node.end_byte(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `other` lies entirely within this range
    pub fn contains(&self, other: ByteRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// Zero-based row and byte column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl From<Point> for Position {
    fn from(point: Point) -> Self {
        Self {
            row: point.row,
            column: point.column,
        }
    }
}

impl From<Position> for Point {
    fn from(position: Position) -> Self {
        Point::new(position.row, position.column)
    }
}

/// tree-sitter parser for one dialect
pub struct JsParser {
    parser: tree_sitter::Parser,
    dialect: Dialect,
}

impl JsParser {
    pub fn new(dialect: Dialect) -> Result<Self> {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&dialect.language())
            .map_err(|e| EngineError::Language {
                dialect,
                message: e.to_string(),
            })?;

        Ok(Self { parser, dialect })
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Parse source into an immutable document snapshot
    pub fn parse(&mut self, source: impl Into<String>) -> Result<Document> {
        let source = source.into();
        let tree = self
            .parser
            .parse(&source, None)
            .ok_or(EngineError::ParseFailed(self.dialect))?;

        Ok(Document {
            source,
            tree,
            dialect: self.dialect,
        })
    }
}

/// Source text paired with the tree parsed from it
///
/// Nodes obtained from a document borrow it; replacing the document (after
/// an edit) invalidates all of them.
#[derive(Debug, Clone)]
pub struct Document {
    source: String,
    tree: Tree,
    dialect: Dialect,
}

impl Document {
    /// Parse with a throwaway parser
    pub fn parse(source: impl Into<String>, dialect: Dialect) -> Result<Self> {
        JsParser::new(dialect)?.parse(source)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Text spanned by `node`
    pub fn text(&self, node: Node<'_>) -> &str {
        &self.source[node.byte_range()]
    }

    /// Byte offset of a row/column position, if it exists in the document
    pub fn offset_at(&self, position: Position) -> Option<usize> {
        let mut line_start = 0;
        for _ in 0..position.row {
            let newline = self.source[line_start..].find('\n')?;
            line_start += newline + 1;
        }

        let line_len = self.source[line_start..]
            .find('\n')
            .unwrap_or(self.source.len() - line_start);
        if position.column > line_len {
            return None;
        }

        let offset = line_start + position.column;
        self.source.is_char_boundary(offset).then_some(offset)
    }

    /// Row/column position of a byte offset
    pub fn position_at(&self, offset: usize) -> Option<Position> {
        if offset > self.source.len() || !self.source.is_char_boundary(offset) {
            return None;
        }
        let before = &self.source[..offset];
        let row = before.matches('\n').count();
        let column = offset - before.rfind('\n').map_or(0, |i| i + 1);
        Some(Position { row, column })
    }

    /// Byte range between two row/column positions
    pub fn range_from_positions(&self, start: Position, end: Position) -> Result<ByteRange> {
        let resolve = |p: Position| {
            self.offset_at(p).ok_or(EngineError::PositionOutOfBounds {
                row: p.row,
                column: p.column,
            })
        };
        Ok(ByteRange::new(resolve(start)?, resolve(end)?))
    }
}
