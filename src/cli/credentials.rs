//! Credential table generation command.

use crate::cli::common::{catalog_from_session, load_session_arg, CliError, CliResult};
use clap::Args;
use std::path::{Path, PathBuf};

/// Build the info and BMC password tables for a saved session
#[derive(Debug, Clone, Args)]
pub struct CredentialsArgs {
    /// Saved session providing rack and MTM
    #[arg(long, value_name = "FILE")]
    pub session: PathBuf,

    /// File with one MAC address per line
    #[arg(long, value_name = "FILE")]
    pub macs: PathBuf,

    /// File with one vendor password per line
    #[arg(long, value_name = "FILE")]
    pub passwords: PathBuf,

    /// Store the generated tables back into the session file
    #[arg(long)]
    pub write: bool,
}

impl CredentialsArgs {
    /// Execute the credentials command
    pub fn execute(&self) -> CliResult<()> {
        let catalog = catalog_from_session(&self.session)?;
        let mut session = load_session_arg(catalog, &self.session)?;

        let mac_lines = read_input(&self.macs)?;
        let password_lines = read_input(&self.passwords)?;

        let tables = session
            .generate_credentials(&mac_lines, &password_lines)
            .map_err(|e| CliError::io(e.to_string()))?;

        if tables.is_empty() {
            return Err(CliError::validation(
                "No credential records generated: inputs contain no usable lines",
            ));
        }

        print!("{}", session.info_yaml());
        println!("---");
        print!("{}", session.bmc_yaml());

        let invalid: Vec<&str> = tables.invalid_macs().collect();
        if !invalid.is_empty() {
            eprintln!("⚠ {} host(s) have an invalid MAC: {}", invalid.len(), invalid.join(", "));
        }

        if self.write {
            session
                .save_to(&self.session)
                .map_err(|e| CliError::io(format!("Failed to update session: {e}")))?;
            eprintln!("✓ Tables written to {}", self.session.display());
        }

        Ok(())
    }
}

fn read_input(path: &Path) -> CliResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("Failed to read {}: {e}", path.display())))
}
