//! Checklist progress command.

use crate::cli::common::{load_catalog_arg, load_session_arg, print_json, CliError, CliResult};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Show per-step progress of a saved session
#[derive(Debug, Clone, Args)]
pub struct StatusArgs {
    /// Path to the step catalog
    #[arg(short, long, value_name = "FILE")]
    pub catalog: PathBuf,

    /// Saved session to report on
    #[arg(short, long, value_name = "FILE")]
    pub session: PathBuf,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Progress of one main step
#[derive(Debug, Serialize)]
pub struct StepStatus {
    /// Step name
    pub step: String,
    /// Checked substeps
    pub done: usize,
    /// Total substeps
    pub total: usize,
    /// Every substep checked
    pub complete: bool,
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    sys: String,
    rack: String,
    steps: Vec<StepStatus>,
    complete_steps: usize,
    total_steps: usize,
}

impl StatusArgs {
    /// Execute the status command
    pub fn execute(&self) -> CliResult<()> {
        let catalog = load_catalog_arg(&self.catalog)?;
        let session = load_session_arg(catalog, &self.session)?;

        let mut steps = Vec::new();
        for step in session.catalog().step_names() {
            let (done, total) = session
                .checklist()
                .progress(step)
                .map_err(|e| CliError::validation(e.to_string()))?;
            let complete = session
                .is_step_complete(step)
                .map_err(|e| CliError::validation(e.to_string()))?;
            steps.push(StepStatus {
                step: step.to_string(),
                done,
                total,
                complete,
            });
        }

        let response = StatusResponse {
            sys: session.identifiers().sys.clone(),
            rack: session.identifiers().rack.clone(),
            complete_steps: steps.iter().filter(|s| s.complete).count(),
            total_steps: steps.len(),
            steps,
        };

        if self.json {
            return print_json(&response);
        }

        println!("{} / {}", response.sys, response.rack);
        println!();
        for status in &response.steps {
            let mark = if status.complete { "✓" } else { " " };
            println!(
                "  [{mark}] {:<32} {}/{}",
                status.step, status.done, status.total
            );
        }
        println!();
        println!(
            "{} of {} steps complete",
            response.complete_steps, response.total_steps
        );
        Ok(())
    }
}
