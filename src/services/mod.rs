//! Service layer for generation and persistence logic.
//!
//! Services are pure functions over identifiers and input text, except for
//! the autosaver which owns a timer and a target file.

pub mod autosave;
pub mod credentials;
pub mod exports;
pub mod hosts;

// Re-export commonly used types and functions
pub use autosave::{AutosaveFailure, AutosaveOutcome, Autosaver};
pub use exports::export_block;
pub use hosts::generate_hosts;
