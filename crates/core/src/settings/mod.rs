//! Settings record and its persistence.
//!
//! The record is loaded once when a host starts and saved after every change.

mod store;
mod types;

pub use store::{JsonSettingsStore, MemorySettingsStore, SettingsError, SettingsStore};
pub use types::{DEFAULT_FIELD_NAME, OVERRIDE_FLAG, Settings};
