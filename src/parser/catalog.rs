//! Step catalog loading.
//!
//! The catalog is a YAML document with two top-level collections:
//!
//! ```yaml
//! steps:
//!   Power:
//!     - Cable PDU
//!     - Power on
//! sub_step_descriptions:
//!   Cable PDU: "Patch {pdu} to both feeds of {rack}"
//! ```

use anyhow::{Context, Result};
use std::path::Path;

use crate::constants::APP_BINARY_NAME;
use crate::models::Catalog;

/// Loads and checks a catalog file.
///
/// # Errors
///
/// Returns errors for:
/// - File not found or unreadable
/// - Invalid YAML
/// - Duplicate substep names within a step
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    if !path.exists() {
        anyhow::bail!(
            "Catalog file not found: {}\n\n\
             Pass one with: {} --catalog path/to/steps.yaml",
            path.display(),
            APP_BINARY_NAME
        );
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;

    parse_catalog_str(&content)
        .with_context(|| format!("Failed to parse catalog file: {}", path.display()))
}

/// Parses a catalog from a YAML string.
pub fn parse_catalog_str(content: &str) -> Result<Catalog> {
    let catalog: Catalog =
        serde_yml::from_str(content).context("Failed to parse catalog YAML")?;

    if let Some((step, substep)) = catalog.duplicate_substeps().into_iter().next() {
        anyhow::bail!("Substep '{substep}' appears more than once in step '{step}'");
    }

    Ok(catalog)
}
