//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name, well-known file names and the
//! autosave cadence.

use std::time::Duration;

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Rack Checklist";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "rack-checklist";

/// Directory name used under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "RackChecklist";

/// Catalog document looked up in the working directory when nothing else is configured.
pub const DEFAULT_CATALOG_FILENAME: &str = "steps.yaml";

/// Fixed autosave target, overwritten on every tick.
pub const AUTOSAVE_FILENAME: &str = "checklist-autosave.yaml";

/// Extension used for user session saves (`{sys}-{rack}.yaml`).
pub const SESSION_EXTENSION: &str = "yaml";

/// Period between autosave writes.
pub const AUTOSAVE_INTERVAL: Duration = Duration::from_secs(1);

/// Log file used while the TUI owns the terminal.
pub const LOG_FILENAME: &str = "rack-checklist.log";

/// MAC address input file picked up by the TUI's generate action.
pub const MAC_INPUT_FILENAME: &str = "macs.txt";

/// Password input file picked up by the TUI's generate action.
pub const PASSWORD_INPUT_FILENAME: &str = "passwords.txt";

/// Environment variable overriding the config directory (used by tests and packaging).
pub const CONFIG_DIR_ENV: &str = "RACK_CHECKLIST_CONFIG_DIR";
