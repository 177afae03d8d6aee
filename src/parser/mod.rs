//! Parsing and serialization for the file formats the tool reads and writes.
//!
//! This module handles the step catalog, description templates and the
//! session snapshot document.

pub mod catalog;
pub mod snapshot;
pub mod template;

// Re-export commonly used functions
pub use catalog::load_catalog;
pub use snapshot::SessionSnapshot;
pub use template::render;
