//! Data models for the checklist session.
//!
//! This module contains the core data structures of the engine. Models are
//! independent of the UI and of file formats.

pub mod catalog;
pub mod checklist;
pub mod credentials;
pub mod identifiers;

// Re-export all model types
pub use catalog::Catalog;
pub use checklist::ChecklistState;
pub use credentials::{BmcRecord, CredentialRecord, CredentialTables};
pub use identifiers::{IdentifierFamily, IdentifierSet};
