//! Parsing and serialization for persisted file formats.
//!
//! This module handles reading and writing versioned quilt layout documents.

pub mod layout_json;

// Re-export commonly used types and functions
pub use layout_json::{deserialize, serialize, LayoutError, PersistedLayout};
