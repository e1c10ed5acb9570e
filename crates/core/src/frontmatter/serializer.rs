//! Frontmatter serialization back to YAML text.

use super::types::{Delimiters, Frontmatter, LineEnding};
use serde_yaml::{Mapping, Value};
use thiserror::Error;

/// Errors that can occur while re-serializing frontmatter.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("failed to serialize frontmatter as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to serialize frontmatter value: {0}")]
    Value(#[from] serde_json::Error),
    #[error("frontmatter key is not a scalar: {0}")]
    UnsupportedKey(String),
}

/// Characters that force a re-serialized string value into double quotes.
const QUOTE_TRIGGERS: [char; 4] = [':', '#', '[', '{'];

/// Whether a string value must be double-quoted when re-serialized.
pub fn needs_quotes(value: &str) -> bool {
    value.contains(QUOTE_TRIGGERS)
}

/// Wrap a string in YAML double quotes, escaping what YAML requires.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Whether `value` written bare reads back as the same string.
pub(crate) fn reads_back_as_string(value: &str) -> bool {
    if value.is_empty() || value.trim() != value || value.contains(['\n', '\r']) {
        return false;
    }
    matches!(serde_yaml::from_str::<Value>(value), Ok(Value::String(ref parsed)) if parsed == value)
}

/// Render a top-level string value for re-serialized output.
fn render_string(value: &str) -> String {
    if needs_quotes(value) || !reads_back_as_string(value) {
        quote(value)
    } else {
        value.to_string()
    }
}

/// Serialize frontmatter fields to YAML (without delimiters or trailing newline).
///
/// Structured serialization goes through `serde_yaml`; if that fails the
/// manual per-key serializer is used instead.
pub fn to_yaml(fm: &Frontmatter) -> Result<String, SerializeError> {
    match serialize_structured(&fm.fields) {
        Ok(yaml) => Ok(yaml),
        Err(e) => {
            tracing::warn!("structured frontmatter serialization failed, using fallback: {e}");
            serialize_manual(&fm.fields)
        }
    }
}

/// One `key: value` entry per top-level key, in map order.
fn serialize_structured(fields: &Mapping) -> Result<String, SerializeError> {
    let mut lines = Vec::with_capacity(fields.len());

    for (key, value) in fields {
        let entry = match value {
            Value::String(s) => {
                let key_text = serde_yaml::to_string(key)?;
                format!("{}: {}", key_text.trim_end(), render_string(s))
            }
            _ => {
                let mut single = Mapping::new();
                single.insert(key.clone(), value.clone());
                serde_yaml::to_string(&single)?.trim_end_matches('\n').to_string()
            }
        };
        lines.push(entry);
    }

    Ok(lines.join("\n"))
}

/// Plain per-key serializer: scalars as text, collections in flow style.
fn serialize_manual(fields: &Mapping) -> Result<String, SerializeError> {
    let mut lines = Vec::with_capacity(fields.len());

    for (key, value) in fields {
        let key_text = match key {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => return Err(SerializeError::UnsupportedKey(format!("{other:?}"))),
        };
        let value_text = match value {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => {
                if needs_quotes(s) {
                    quote(s)
                } else {
                    s.clone()
                }
            }
            // JSON is valid YAML flow syntax
            other => serde_json::to_string(other)?,
        };
        lines.push(format!("{key_text}: {value_text}"));
    }

    Ok(lines.join("\n"))
}

/// Wrap header text in `---` delimiter lines.
///
/// Header lines use the opening line's ending. The terminators around the
/// closing `---` are reused from `delimiters`.
pub fn wrap_header(yaml: &str, delimiters: &Delimiters) -> String {
    let eol = delimiters.line_ending.as_str();
    let close_eol = delimiters.closing_terminator();
    if yaml.is_empty() {
        return format!("---{eol}---{close_eol}");
    }
    let yaml = match delimiters.line_ending {
        LineEnding::Lf => yaml.to_string(),
        LineEnding::CrLf => yaml.replace("\r\n", "\n").replace('\n', "\r\n"),
    };
    let sep = match delimiters.header_terminator() {
        "" => eol,
        original => original,
    };
    format!("---{eol}{yaml}{sep}---{close_eol}")
}
