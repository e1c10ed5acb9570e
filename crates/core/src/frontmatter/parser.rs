//! Frontmatter parsing from markdown documents.

use super::types::{Delimiters, Frontmatter, LineEnding, ParsedDocument};
use serde_yaml::{Mapping, Value};
use thiserror::Error;

/// Errors that can occur during frontmatter parsing.
#[derive(Debug, Error)]
pub enum FrontmatterParseError {
    #[error("invalid YAML frontmatter: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),
    #[error("frontmatter is not a mapping (found {0})")]
    NotAMapping(&'static str),
}

/// Parse frontmatter from markdown content.
///
/// Frontmatter is delimited by `---` lines at the very start of the document:
/// ```markdown
/// ---
/// key: value
/// ---
/// # Document content
/// ```
///
/// A document whose first line is not exactly `---`, or that has no closing
/// `---` line, has no frontmatter and its whole text is the body.
pub fn parse(content: &str) -> Result<ParsedDocument, FrontmatterParseError> {
    let Some(block) = split_block(content) else {
        return Ok(ParsedDocument::without_frontmatter(content));
    };

    let fields = if block.raw.trim().is_empty() {
        Mapping::new()
    } else {
        match serde_yaml::from_str::<Value>(block.raw)? {
            Value::Mapping(map) => map,
            // A header holding only comments
            Value::Null => Mapping::new(),
            other => return Err(FrontmatterParseError::NotAMapping(value_kind(&other))),
        }
    };

    Ok(ParsedDocument {
        frontmatter: Some(Frontmatter { fields }),
        body: block.body.to_string(),
        raw_frontmatter: Some(block.raw.to_string()),
        delimiters: Delimiters {
            line_ending: block.line_ending,
            closing: block.closing.to_string(),
        },
    })
}

/// Parse frontmatter, treating malformed YAML as "no frontmatter".
///
/// The failure is logged and the whole input becomes the body, so callers
/// never create or rewrite a header they could not read.
pub fn parse_lenient(content: &str) -> ParsedDocument {
    match parse(content) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::warn!("ignoring unreadable frontmatter: {e}");
            ParsedDocument::without_frontmatter(content)
        }
    }
}

struct Block<'a> {
    raw: &'a str,
    closing: &'a str,
    body: &'a str,
    line_ending: LineEnding,
}

/// Locate the delimiter lines without interpreting the header.
fn split_block(content: &str) -> Option<Block<'_>> {
    let (rest, line_ending) = if let Some(rest) = content.strip_prefix("---\n") {
        (rest, LineEnding::Lf)
    } else if let Some(rest) = content.strip_prefix("---\r\n") {
        (rest, LineEnding::CrLf)
    } else {
        return None;
    };

    let mut offset = 0;
    loop {
        let line_end = rest[offset..].find('\n').map(|i| offset + i);
        let line = &rest[offset..line_end.unwrap_or(rest.len())];

        if line.strip_suffix('\r').unwrap_or(line) == "---" {
            let header = &rest[..offset];
            let raw = header
                .strip_suffix("\r\n")
                .or_else(|| header.strip_suffix('\n'))
                .unwrap_or(header);
            let body_start = line_end.map_or(rest.len(), |end| end + 1);
            let closing = &rest[raw.len()..body_start];
            let body = &rest[body_start..];
            return Some(Block { raw, closing, body, line_ending });
        }

        match line_end {
            Some(end) => offset = end + 1,
            None => return None,
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
