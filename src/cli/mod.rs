//! CLI command handlers for rack-checklist.
//!
//! This module provides headless, scriptable access to the checklist engine
//! for automation, testing, and pasting generated artifacts into tickets.

pub mod check;
pub mod common;
pub mod config;
pub mod credentials;
pub mod derive;
pub mod exports;
pub mod hosts;
pub mod render;
pub mod status;

// Re-export types used by main.rs and tests
pub use check::CheckArgs;
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use credentials::CredentialsArgs;
pub use derive::DeriveArgs;
pub use exports::ExportsArgs;
pub use hosts::HostsArgs;
pub use render::RenderArgs;
pub use status::StatusArgs;
