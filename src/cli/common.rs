//! Shared CLI plumbing: error type, exit codes and loaders used by every command.

use std::fmt;
use std::path::Path;

use crate::config::Config;
use crate::models::Catalog;
use crate::parser::load_catalog;
use crate::session::Session;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Input was readable but invalid
    ValidationError = 1,
    /// A file could not be read or written
    IoError = 2,
}

impl ExitCode {
    /// Numeric code passed to `std::process::exit`.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by CLI commands, carrying its exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code for the process
    pub code: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Invalid input (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::ValidationError,
            message: message.into(),
        }
    }

    /// File system failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::IoError,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Loads a catalog, mapping a missing file to an I/O error and bad content
/// to a validation error.
pub fn load_catalog_arg(path: &Path) -> CliResult<Catalog> {
    if !path.exists() {
        return Err(CliError::io(format!(
            "Catalog file not found: {}",
            path.display()
        )));
    }
    load_catalog(path).map_err(|e| CliError::validation(format!("Failed to load catalog: {e:#}")))
}

/// Builds a session over `catalog` and restores `session_path` into it.
pub fn load_session_arg(catalog: Catalog, session_path: &Path) -> CliResult<Session> {
    if !session_path.exists() {
        return Err(CliError::io(format!(
            "Session file not found: {}",
            session_path.display()
        )));
    }
    let mut session = Session::new(catalog);
    session
        .load(session_path)
        .map_err(|e| CliError::validation(format!("Failed to load session: {e}")))?;
    Ok(session)
}

/// Catalog embedded in a session file, used when no catalog is given.
pub fn catalog_from_session(session_path: &Path) -> CliResult<Catalog> {
    let snapshot = crate::parser::SessionSnapshot::read(session_path)
        .map_err(|e| CliError::io(format!("Failed to read session: {e}")))?;
    Ok(Catalog {
        steps: snapshot.steps,
        ..Catalog::default()
    })
}

/// Effective configuration; a broken config file is a validation error.
pub fn load_config() -> CliResult<Config> {
    Config::load().map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))
}

/// Prints a value as pretty JSON.
pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(CliError::validation("bad").code.code(), 1);
        assert_eq!(CliError::io("missing").code.code(), 2);
    }

    #[test]
    fn test_missing_catalog_is_io_error() {
        let err = load_catalog_arg(Path::new("/nonexistent/steps.yaml")).unwrap_err();
        assert_eq!(err.code, ExitCode::IoError);
        assert!(err.to_string().contains("not found"));
    }
}
