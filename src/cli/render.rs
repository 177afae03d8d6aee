//! Substep template rendering command.

use crate::cli::common::{load_catalog_arg, load_session_arg, CliError, CliResult};
use crate::error::SessionError;
use crate::session::Session;
use clap::Args;
use std::path::PathBuf;

/// Render one substep description with a session's identifiers
#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    /// Path to the step catalog
    #[arg(short, long, value_name = "FILE")]
    pub catalog: PathBuf,

    /// Substep whose description is rendered
    #[arg(short, long, value_name = "NAME")]
    pub substep: String,

    /// Saved session providing the identifiers (blank identifiers otherwise)
    #[arg(long, value_name = "FILE")]
    pub session: Option<PathBuf>,
}

impl RenderArgs {
    /// Execute the render command
    pub fn execute(&self) -> CliResult<()> {
        let catalog = load_catalog_arg(&self.catalog)?;
        let session = match &self.session {
            Some(path) => load_session_arg(catalog, path)?,
            None => Session::new(catalog),
        };

        let rendered = session.render(&self.substep).map_err(|e| match e {
            SessionError::Template(e) => CliError::validation(e.to_string()),
            other => CliError::validation(format!("Failed to render '{}': {other}", self.substep)),
        })?;

        println!("{rendered}");
        Ok(())
    }
}
