//! Commands exposed to the host's command palette.
//!
//! Each command reports back through the [`Notifier`] and returns a
//! [`CommandOutcome`]; raw errors are logged, never handed to the host.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde_yaml::Value;
use thiserror::Error;

use crate::frontmatter::{SerializeError, parse_lenient};
use crate::gate::effective_enabled;
use crate::host::{DocumentStore, Notifier};
use crate::settings::{OVERRIDE_FLAG, Settings, SettingsError, SettingsStore};
use crate::timestamp::Clock;
use crate::updater::{FrontmatterUpdater, UpdateError, UpdateOutcome, rewrite_field};

/// Palette command identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    UpdateLastModified,
    ToggleAutoUpdate,
    ToggleAutoUpdateGlobally,
}

impl CommandId {
    pub const ALL: [CommandId; 3] = [
        CommandId::UpdateLastModified,
        CommandId::ToggleAutoUpdate,
        CommandId::ToggleAutoUpdateGlobally,
    ];

    pub fn id(self) -> &'static str {
        match self {
            CommandId::UpdateLastModified => "update-last-modified",
            CommandId::ToggleAutoUpdate => "toggle-auto-update",
            CommandId::ToggleAutoUpdateGlobally => "toggle-auto-update-globally",
        }
    }

    /// Human-readable name shown in the palette.
    pub fn name(self) -> &'static str {
        match self {
            CommandId::UpdateLastModified => "Update last modified date",
            CommandId::ToggleAutoUpdate => "Toggle auto-update for current file",
            CommandId::ToggleAutoUpdateGlobally => "Toggle auto-update globally",
        }
    }

    /// Whether the command acts on the active document.
    pub fn needs_document(self) -> bool {
        !matches!(self, CommandId::ToggleAutoUpdateGlobally)
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Error)]
#[error("unknown command '{0}'")]
pub struct UnknownCommand(pub String);

impl FromStr for CommandId {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.id() == s)
            .ok_or_else(|| UnknownCommand(s.to_string()))
    }
}

/// Errors raised inside a command before they are reported to the user.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Update(#[from] UpdateError),

    #[error(transparent)]
    Serialize(#[from] SerializeError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// What a command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The document was rewritten.
    Updated,
    /// Nothing to write: the timestamp was current or the document had no
    /// frontmatter.
    Unchanged,
    /// A toggle now holds this value.
    Toggled(bool),
    NoActiveDocument,
    NoFrontmatter,
    Failed,
}

/// Runs palette commands against host-supplied collaborators.
///
/// Settings are loaded once on construction and saved on every change.
pub struct CommandRunner<'a> {
    documents: &'a dyn DocumentStore,
    notifier: &'a dyn Notifier,
    settings_store: &'a dyn SettingsStore,
    clock: &'a dyn Clock,
    settings: Settings,
}

impl<'a> CommandRunner<'a> {
    pub fn new(
        documents: &'a dyn DocumentStore,
        notifier: &'a dyn Notifier,
        settings_store: &'a dyn SettingsStore,
        clock: &'a dyn Clock,
    ) -> Result<Self, SettingsError> {
        let settings = settings_store.load()?;
        Ok(Self { documents, notifier, settings_store, clock, settings })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Apply a change from the settings surface and persist it.
    ///
    /// The in-memory record is left untouched if saving fails.
    pub fn update_settings(
        &mut self,
        change: impl FnOnce(&mut Settings),
    ) -> Result<(), SettingsError> {
        let mut next = self.settings.clone();
        change(&mut next);
        self.settings_store.save(&next)?;
        self.settings = next;
        Ok(())
    }

    /// Dispatch a palette command.
    pub fn execute(&mut self, command: CommandId, active: Option<&Path>) -> CommandOutcome {
        tracing::debug!(command = command.id(), "executing command");
        match command {
            CommandId::UpdateLastModified => self.update_last_modified(active),
            CommandId::ToggleAutoUpdate => self.toggle_auto_update(active),
            CommandId::ToggleAutoUpdateGlobally => self.toggle_auto_update_globally(),
        }
    }

    /// Write the current timestamp into the active document.
    pub fn update_last_modified(&self, active: Option<&Path>) -> CommandOutcome {
        let Some(doc) = active else {
            self.notifier.notify("No active document");
            return CommandOutcome::NoActiveDocument;
        };

        let field = self.settings.field_name();
        match self.try_update(doc) {
            Ok(UpdateOutcome::Patched(_)) => {
                tracing::info!(field, doc = %doc.display(), "updated");
                self.notifier.notify(&format!("Updated {field} in {}", display_name(doc)));
                CommandOutcome::Updated
            }
            Ok(UpdateOutcome::Skipped | UpdateOutcome::Rejected) => CommandOutcome::Unchanged,
            Err(e) => {
                tracing::error!(doc = %doc.display(), "update failed: {e}");
                self.notifier.notify(&format!("Failed to update {field}"));
                CommandOutcome::Failed
            }
        }
    }

    /// Run the updater and write the result back if it changed.
    ///
    /// Returns the outcome, including the written text, so automatic hosts
    /// can remember their own writes.
    pub fn try_update(&self, doc: &Path) -> Result<UpdateOutcome, CommandError> {
        let content = self.read(doc)?;
        let updater = FrontmatterUpdater::new(&self.settings, self.clock);
        let outcome = updater.update(&content)?;
        if let UpdateOutcome::Patched(text) = &outcome {
            self.write(doc, text)?;
        }
        Ok(outcome)
    }

    /// Flip the per-document override flag.
    pub fn toggle_auto_update(&self, active: Option<&Path>) -> CommandOutcome {
        let Some(doc) = active else {
            self.notifier.notify("No active document");
            return CommandOutcome::NoActiveDocument;
        };

        match self.try_toggle(doc) {
            Ok(Some(enabled)) => {
                let state = if enabled { "enabled" } else { "disabled" };
                tracing::info!(doc = %doc.display(), enabled, "toggled auto-update");
                self.notifier
                    .notify(&format!("Auto-update {state} for {}", display_name(doc)));
                CommandOutcome::Toggled(enabled)
            }
            Ok(None) => {
                self.notifier.notify(&format!(
                    "{} has no frontmatter; add a frontmatter block before toggling auto-update",
                    display_name(doc)
                ));
                CommandOutcome::NoFrontmatter
            }
            Err(e) => {
                tracing::error!(doc = %doc.display(), "toggle failed: {e}");
                self.notifier.notify("Failed to toggle auto-update");
                CommandOutcome::Failed
            }
        }
    }

    fn try_toggle(&self, doc: &Path) -> Result<Option<bool>, CommandError> {
        let content = self.read(doc)?;
        let parsed = parse_lenient(&content);
        let Some(fm) = parsed.frontmatter.as_ref() else {
            return Ok(None);
        };

        let enabled = !effective_enabled(&self.settings, fm);
        let text = rewrite_field(parsed, OVERRIDE_FLAG, Value::Bool(enabled))?;
        self.write(doc, &text)?;
        Ok(Some(enabled))
    }

    /// Flip `autoUpdateEnabled` and persist it.
    pub fn toggle_auto_update_globally(&mut self) -> CommandOutcome {
        let enabled = !self.settings.auto_update_enabled;
        match self.update_settings(|s| s.auto_update_enabled = enabled) {
            Ok(()) => {
                let state = if enabled { "enabled" } else { "disabled" };
                tracing::info!(enabled, "toggled auto-update globally");
                self.notifier.notify(&format!("Auto-update {state} globally"));
                CommandOutcome::Toggled(enabled)
            }
            Err(e) => {
                tracing::error!("saving settings failed: {e}");
                self.notifier.notify("Failed to toggle auto-update");
                CommandOutcome::Failed
            }
        }
    }

    fn read(&self, doc: &Path) -> Result<String, CommandError> {
        self.documents
            .read(doc)
            .map_err(|source| CommandError::Read { path: doc.to_path_buf(), source })
    }

    fn write(&self, doc: &Path, content: &str) -> Result<(), CommandError> {
        self.documents
            .write(doc, content)
            .map_err(|source| CommandError::Write { path: doc.to_path_buf(), source })
    }
}

fn display_name(doc: &Path) -> String {
    doc.file_name().unwrap_or(doc.as_os_str()).to_string_lossy().into_owned()
}
