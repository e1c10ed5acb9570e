//! Frontmatter parsing, patching, and serialization.
//!
//! This module provides functionality to:
//! - Parse YAML frontmatter from markdown documents
//! - Patch a single field while keeping the rest of the header intact
//! - Serialize frontmatter back to YAML when patching is not possible

pub mod parser;
pub mod patcher;
pub mod serializer;
pub mod types;

pub use parser::{FrontmatterParseError, parse, parse_lenient};
pub use patcher::patch_header;
pub use serializer::{SerializeError, needs_quotes, quote, to_yaml, wrap_header};
pub use types::{Delimiters, Frontmatter, LineEnding, ParsedDocument};

/// Reassemble a document from its rendered header block and body.
///
/// The header block already ends with the closing delimiter's terminator.
pub fn reassemble(header: &str, body: &str) -> String {
    format!("{header}{body}")
}
