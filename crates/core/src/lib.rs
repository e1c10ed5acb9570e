//! Keep a "last updated" field in markdown frontmatter current.
//!
//! The [`updater`] rewrites one frontmatter field per pass, preferring a
//! single-line patch over re-serializing the header. [`gate`] decides which
//! saves trigger an automatic update, and [`commands`] exposes the palette
//! commands on top of the [`host`] and [`settings`] collaborators.

pub mod commands;
pub mod config;
pub mod frontmatter;
pub mod gate;
pub mod host;
pub mod settings;
pub mod timestamp;
pub mod updater;

pub use commands::{CommandId, CommandOutcome, CommandRunner};
pub use updater::{FrontmatterUpdater, UpdateOutcome};
