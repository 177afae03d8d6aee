//! Step catalog: the fixed procedure the operator works through.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Read-only procedure definition loaded once per session.
///
/// `steps` keeps document order, which is also the order steps are shown
/// and persisted in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Main step name to ordered substep names
    #[serde(default)]
    pub steps: IndexMap<String, Vec<String>>,
    /// Substep name to description template
    #[serde(default)]
    pub sub_step_descriptions: HashMap<String, String>,
}

impl Catalog {
    /// Substeps of `step`, if the step exists.
    pub fn substeps(&self, step: &str) -> Option<&[String]> {
        self.steps.get(step).map(Vec::as_slice)
    }

    /// Main step names in catalog order.
    pub fn step_names(&self) -> impl Iterator<Item = &str> {
        self.steps.keys().map(String::as_str)
    }

    /// Template text for `substep`, if any.
    pub fn template(&self, substep: &str) -> Option<&str> {
        self.sub_step_descriptions.get(substep).map(String::as_str)
    }

    /// Number of main steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Total substeps across all steps.
    pub fn substep_count(&self) -> usize {
        self.steps.values().map(Vec::len).sum()
    }

    /// True when the catalog has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns `(step, substep)` pairs where a substep name repeats within its step.
    pub fn duplicate_substeps(&self) -> Vec<(String, String)> {
        let mut duplicates = Vec::new();
        for (step, substeps) in &self.steps {
            for (idx, substep) in substeps.iter().enumerate() {
                if substeps[..idx].contains(substep) {
                    duplicates.push((step.clone(), substep.clone()));
                }
            }
        }
        duplicates
    }
}
