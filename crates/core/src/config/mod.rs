//! Configuration loading for the CLI host.

pub mod loader;
pub mod types;
