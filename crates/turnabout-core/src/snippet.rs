// Snippets - replacement text with holes the user fills in
use serde::{Deserialize, Serialize};

/// One piece of a snippet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    /// Literal text inserted as-is
    Text { value: String },
    /// A numbered tab stop with optional default text
    Placeholder { index: u32, default: String },
    /// Where the caret lands once all placeholders are filled
    Cursor,
}

/// Ordered literal and placeholder segments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub segments: Vec<Segment>,
}

impl Snippet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, value: impl Into<String>) -> Self {
        self.segments.push(Segment::Text { value: value.into() });
        self
    }

    pub fn placeholder(mut self, index: u32, default: impl Into<String>) -> Self {
        self.segments.push(Segment::Placeholder {
            index,
            default: default.into(),
        });
        self
    }

    pub fn cursor(mut self) -> Self {
        self.segments.push(Segment::Cursor);
        self
    }

    /// Text a non-interactive host inserts: placeholders become their defaults
    pub fn to_plain_text(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Text { value } => value.as_str(),
                Segment::Placeholder { default, .. } => default.as_str(),
                Segment::Cursor => "",
            })
            .collect()
    }

    /// TextMate/LSP snippet syntax
    pub fn to_snippet_syntax(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text { value } => out.push_str(&escape(value)),
                Segment::Placeholder { index, default } if default.is_empty() => {
                    out.push_str(&format!("${index}"));
                }
                Segment::Placeholder { index, default } => {
                    out.push_str(&format!("${{{}:{}}}", index, escape(default)));
                }
                Segment::Cursor => out.push_str("$0"),
            }
        }
        out
    }
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '$' | '}' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_syntax_escapes_literals() {
        let snippet = Snippet::new()
            .text("(`${a}` as ")
            .placeholder(1, "")
            .text(")");
        assert_eq!(snippet.to_snippet_syntax(), "(`\\${a\\}` as $1)");
        assert_eq!(snippet.to_plain_text(), "(`${a}` as )");
    }

    #[test]
    fn test_placeholder_defaults() {
        let snippet = Snippet::new().cursor().text("(x)").placeholder(2, "any");
        assert_eq!(snippet.to_snippet_syntax(), "$0(x)${2:any}");
        assert_eq!(snippet.to_plain_text(), "(x)any");
    }
}
