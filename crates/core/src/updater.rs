//! Single-pass update of the last-updated field.
//!
//! `Start -> Parsed -> {Skipped | Patched | Rejected}`. Nothing is written
//! here; callers receive the new text and decide what to do with it.

use serde_yaml::Value;
use thiserror::Error;

use crate::frontmatter::{ParsedDocument, SerializeError, parse_lenient, patch_header, reassemble};
use crate::settings::Settings;
use crate::timestamp::{Clock, DateFormat};

/// Errors that can occur while rewriting a document.
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error(transparent)]
    Serialize(#[from] SerializeError),
}

/// Result of running the updater over a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The field changed; holds the full new document text.
    Patched(String),
    /// The field already holds the current timestamp.
    Skipped,
    /// The document has no frontmatter, which is never created.
    Rejected,
}

impl UpdateOutcome {
    pub fn is_noop(&self) -> bool {
        !matches!(self, UpdateOutcome::Patched(_))
    }
}

/// Computes and applies the last-updated timestamp for one document.
pub struct FrontmatterUpdater<'a> {
    field: &'a str,
    format: DateFormat,
    clock: &'a dyn Clock,
}

impl<'a> FrontmatterUpdater<'a> {
    pub fn new(settings: &'a Settings, clock: &'a dyn Clock) -> Self {
        Self { field: settings.field_name(), format: settings.date_format, clock }
    }

    /// The value the field would be set to right now.
    pub fn timestamp(&self) -> String {
        self.format.format(&self.clock.now())
    }

    /// Update the field in `content`.
    pub fn update(&self, content: &str) -> Result<UpdateOutcome, UpdateError> {
        let doc = parse_lenient(content);
        if !doc.has_frontmatter() {
            tracing::debug!("no frontmatter, not updating");
            return Ok(UpdateOutcome::Rejected);
        }

        let timestamp = self.timestamp();
        if doc.frontmatter.as_ref().and_then(|fm| fm.get_str(self.field))
            == Some(timestamp.as_str())
        {
            tracing::debug!(field = self.field, "timestamp unchanged");
            return Ok(UpdateOutcome::Skipped);
        }

        let text = rewrite_field(doc, self.field, Value::String(timestamp))?;
        Ok(UpdateOutcome::Patched(text))
    }
}

/// Set `field` to `value` in a parsed document and render the full text.
///
/// Documents without frontmatter are returned unchanged.
pub fn rewrite_field(
    doc: ParsedDocument,
    field: &str,
    value: Value,
) -> Result<String, SerializeError> {
    let ParsedDocument { frontmatter, body, raw_frontmatter, delimiters } = doc;
    let Some(mut fm) = frontmatter else {
        return Ok(body);
    };

    fm.set(field, value);
    let header = patch_header(&fm, raw_frontmatter.as_deref(), field, &delimiters)?;
    Ok(reassemble(&header, &body))
}
