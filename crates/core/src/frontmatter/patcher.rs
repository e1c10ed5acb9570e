//! In-place patching of a single frontmatter field.
//!
//! Rewriting one line of the original header keeps unrelated keys, comments
//! and formatting untouched. When that is not possible the whole map is
//! re-serialized.

use regex::Regex;
use serde_yaml::Value;

use super::serializer::{SerializeError, quote, reads_back_as_string, to_yaml, wrap_header};
use super::types::{Delimiters, Frontmatter};

/// Render the frontmatter block (delimiters included) after `field` changed.
///
/// `fm` must already hold the new value for `field`. `raw` is the original
/// header text between the delimiters, if the caller has it. The result ends
/// where the body begins.
pub fn patch_header(
    fm: &Frontmatter,
    raw: Option<&str>,
    field: &str,
    delimiters: &Delimiters,
) -> Result<String, SerializeError> {
    if let Some(raw) = raw
        && let Some(patched) = patch_in_place(fm, raw, field)
    {
        let eol = delimiters.line_ending.as_str();
        return Ok(format!("---{eol}{patched}{}", delimiters.closing));
    }

    tracing::debug!(field, "re-serializing frontmatter");
    Ok(wrap_header(&to_yaml(fm)?, delimiters))
}

/// Replace the value on the first `field:` line of `raw`.
///
/// Returns `None` when the field has no line of its own, its new value is not
/// a scalar, or the patched text would not read back as `fm`.
fn patch_in_place(fm: &Frontmatter, raw: &str, field: &str) -> Option<String> {
    let value = fm.get(field)?;
    let rendered = inline_scalar(value)?;
    let re = Regex::new(&format!(r"^({}:\s*)(.*)$", regex::escape(field))).ok()?;

    let mut found = false;
    let lines: Vec<String> = raw
        .split('\n')
        .map(|line| {
            if found {
                return line.to_string();
            }
            let (content, cr) = match line.strip_suffix('\r') {
                Some(stripped) => (stripped, "\r"),
                None => (line, ""),
            };
            let Some(caps) = re.captures(content) else {
                return line.to_string();
            };
            found = true;
            let prefix = &caps[1];
            let sep = if prefix.ends_with(':') { " " } else { "" };
            format!("{prefix}{sep}{rendered}{cr}")
        })
        .collect();

    if !found {
        return None;
    }

    let patched = lines.join("\n");
    match serde_yaml::from_str::<Value>(&patched) {
        Ok(Value::Mapping(map)) if map == fm.fields => Some(patched),
        _ => {
            tracing::debug!(field, "in-place patch does not read back, falling back");
            None
        }
    }
}

/// Text for a scalar written after `key: ` on an existing line.
fn inline_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            if breaks_plain_scalar(s) || !reads_back_as_string(s) {
                Some(quote(s))
            } else {
                Some(s.clone())
            }
        }
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
    }
}

/// Whether a string would change meaning if written bare on a `key:` line.
///
/// A colon only matters when followed by whitespace or at the end, so
/// timestamps like `14:30:25` stay unquoted.
fn breaks_plain_scalar(value: &str) -> bool {
    if value.contains(['#', '[', '{']) {
        return true;
    }
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ':' && chars.peek().is_none_or(|next| next.is_whitespace()) {
            return true;
        }
    }
    false
}
