//! Export block command.

use crate::cli::common::CliResult;
use crate::services::export_block;
use clap::Args;

/// Print the shell export block for the derived identifiers
#[derive(Debug, Clone, Args)]
pub struct ExportsArgs {}

impl ExportsArgs {
    /// Execute the exports command
    pub fn execute(&self) -> CliResult<()> {
        print!("{}", export_block());
        Ok(())
    }
}
