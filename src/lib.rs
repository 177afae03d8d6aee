//! Rack Checklist Library
//!
//! Core engine for guided rack bring-up: a step catalog with per-substep
//! completion, identifier derivation from the rack name, description
//! templates, host list and credential table generation, and YAML session
//! persistence with autosave.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod parser;
pub mod services;
pub mod session;
pub mod tui;

pub use error::{SessionError, SnapshotLoadError, TemplateError};
pub use session::{IdentifierInput, Session};
