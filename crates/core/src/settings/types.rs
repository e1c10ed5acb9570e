//! The persisted settings record.

use serde::{Deserialize, Serialize};

use crate::timestamp::DateFormat;

/// Field written when no name is configured.
pub const DEFAULT_FIELD_NAME: &str = "last-updated";

/// Frontmatter key that overrides `enabled_by_default` for one document.
pub const OVERRIDE_FLAG: &str = "auto-update-last-modified";

/// User settings, stored as JSON with camelCase keys.
///
/// Missing keys take their defaults when loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Master switch for updates triggered by file modification.
    pub auto_update_enabled: bool,

    /// Frontmatter field holding the timestamp.
    pub field_name: String,

    pub date_format: DateFormat,

    /// Whether documents without an override flag are auto-updated.
    pub enabled_by_default: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_update_enabled: false,
            field_name: DEFAULT_FIELD_NAME.to_string(),
            date_format: DateFormat::default(),
            enabled_by_default: true,
        }
    }
}

impl Settings {
    /// The configured field name, or the default when it is blank.
    pub fn field_name(&self) -> &str {
        if self.field_name.trim().is_empty() { DEFAULT_FIELD_NAME } else { &self.field_name }
    }

    /// Set the field name; an empty value restores the default.
    pub fn set_field_name(&mut self, value: &str) {
        let value = value.trim();
        self.field_name =
            if value.is_empty() { DEFAULT_FIELD_NAME.to_string() } else { value.to_string() };
    }
}
