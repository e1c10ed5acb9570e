//! Frontmatter types and data structures.

use serde_yaml::{Mapping, Value};

/// Represents parsed YAML frontmatter from a markdown document.
///
/// Keys keep the order in which they appear in the source text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    /// Fields as ordered key-value pairs.
    pub fields: Mapping,
}

impl Frontmatter {
    /// Look up a top-level field by name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Look up a top-level field and return it only if it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Set a field. Existing keys keep their position, new keys are appended.
    pub fn set(&mut self, key: &str, value: Value) {
        self.fields.insert(Value::String(key.to_string()), value);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Line terminator used by a document's frontmatter delimiters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// The delimiter text around a frontmatter header.
///
/// The opening line is always `---` plus `line_ending`. The closing text is
/// kept exactly as found so rewriting the header leaves it alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    /// Line ending of the opening delimiter.
    pub line_ending: LineEnding,
    /// Everything between the header text and the body: the last header
    /// line's terminator, `---`, and the closing line's terminator (absent
    /// when the delimiter ends the file).
    pub closing: String,
}

impl Delimiters {
    /// Terminator of the last header line (empty for an empty header).
    pub fn header_terminator(&self) -> &str {
        self.split_closing().0
    }

    /// Terminator of the closing `---` line (empty at end of file).
    pub fn closing_terminator(&self) -> &str {
        self.split_closing().1
    }

    fn split_closing(&self) -> (&str, &str) {
        match self.closing.rfind("---") {
            Some(i) => (&self.closing[..i], &self.closing[i + 3..]),
            None => ("", ""),
        }
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self { line_ending: LineEnding::Lf, closing: "\n---\n".to_string() }
    }
}

/// Result of splitting frontmatter from markdown.
#[derive(Debug, Clone, Default)]
pub struct ParsedDocument {
    /// Parsed frontmatter (if present).
    pub frontmatter: Option<Frontmatter>,
    /// The markdown body (everything after the closing delimiter line).
    pub body: String,
    /// Exact text between the delimiter lines, used for in-place patching.
    pub raw_frontmatter: Option<String>,
    pub delimiters: Delimiters,
}

impl ParsedDocument {
    /// A document without a frontmatter block.
    pub fn without_frontmatter(content: &str) -> Self {
        Self { body: content.to_string(), ..Self::default() }
    }

    pub fn has_frontmatter(&self) -> bool {
        self.frontmatter.is_some()
    }
}
