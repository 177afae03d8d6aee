//! Catalog validation command.

use crate::cli::common::{load_catalog_arg, print_json, CliError, CliResult};
use crate::parser::template::validate_templates;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Validate a step catalog
#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    /// Path to the step catalog
    #[arg(short, long, value_name = "FILE")]
    pub catalog: PathBuf,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct CheckResponse {
    valid: bool,
    steps: usize,
    substeps: usize,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl CheckArgs {
    /// Execute the check command
    pub fn execute(&self) -> CliResult<()> {
        let catalog = load_catalog_arg(&self.catalog)?;

        let errors: Vec<String> = validate_templates(&catalog)
            .iter()
            .map(ToString::to_string)
            .collect();

        let mut warnings = Vec::new();
        for step in catalog.step_names() {
            let substeps = catalog.substeps(step).unwrap_or_default();
            if substeps.is_empty() {
                warnings.push(format!("step '{step}' has no substeps"));
            }
            for substep in substeps {
                if catalog.template(substep).is_none() {
                    warnings.push(format!("substep '{substep}' has no description"));
                }
            }
        }

        let response = CheckResponse {
            valid: errors.is_empty(),
            steps: catalog.len(),
            substeps: catalog.substep_count(),
            errors,
            warnings,
        };

        if self.json {
            print_json(&response)?;
        } else {
            if response.valid {
                println!("✓ Catalog is valid");
            } else {
                println!("✗ Catalog has errors");
            }
            println!("  Steps:    {}", response.steps);
            println!("  Substeps: {}", response.substeps);
            for error in &response.errors {
                println!("  ✗ {error}");
            }
            for warning in &response.warnings {
                println!("  ⚠ {warning}");
            }
        }

        if response.valid {
            Ok(())
        } else {
            Err(CliError::validation(format!(
                "{} template error(s) in {}",
                response.errors.len(),
                self.catalog.display()
            )))
        }
    }
}
