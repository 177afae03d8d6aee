//! Checklist completion state.
//!
//! One boolean per substep, grouped by main step. The per-step rollup
//! ("all substeps done") is always computed from the booleans and never
//! stored, so a single toggle is immediately reflected.

use indexmap::IndexMap;

use crate::error::{SessionError, SnapshotLoadError};
use crate::models::Catalog;

/// Completion booleans keyed by main step, shaped exactly like the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecklistState {
    states: IndexMap<String, Vec<bool>>,
}

impl ChecklistState {
    /// Creates an all-unchecked state for every step of `catalog`.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let states = catalog
            .steps
            .iter()
            .map(|(step, substeps)| (step.clone(), vec![false; substeps.len()]))
            .collect();
        Self { states }
    }

    /// Rebuilds state from persisted booleans.
    ///
    /// Steps missing from `saved` start unchecked. A saved step that the
    /// catalog does not know, or whose length differs from the catalog, is a
    /// shape error.
    pub fn from_saved(
        catalog: &Catalog,
        saved: &IndexMap<String, Vec<bool>>,
    ) -> Result<Self, SnapshotLoadError> {
        if let Some(unknown) = saved.keys().find(|step| !catalog.steps.contains_key(*step)) {
            return Err(SnapshotLoadError::Shape(format!(
                "checkbox state for unknown step '{unknown}'"
            )));
        }

        let mut state = Self::from_catalog(catalog);
        for (step, values) in saved {
            let slot = state
                .states
                .get_mut(step)
                .ok_or_else(|| SnapshotLoadError::Shape(format!("unknown step '{step}'")))?;
            if slot.len() != values.len() {
                return Err(SnapshotLoadError::Shape(format!(
                    "step '{step}' has {} substeps but the session stores {}",
                    slot.len(),
                    values.len()
                )));
            }
            slot.clone_from(values);
        }
        Ok(state)
    }

    /// Sets substep `index` of `step` to `value`.
    pub fn toggle(&mut self, step: &str, index: usize, value: bool) -> Result<(), SessionError> {
        let values = self
            .states
            .get_mut(step)
            .ok_or_else(|| SessionError::UnknownStep(step.to_string()))?;
        let len = values.len();
        let slot = values.get_mut(index).ok_or_else(|| SessionError::InvalidIndex {
            step: step.to_string(),
            index,
            len,
        })?;
        *slot = value;
        Ok(())
    }

    /// Current value of one substep.
    pub fn get(&self, step: &str, index: usize) -> Option<bool> {
        self.states.get(step).and_then(|values| values.get(index)).copied()
    }

    /// True iff every substep of `step` is checked.
    pub fn is_step_complete(&self, step: &str) -> Result<bool, SessionError> {
        self.states
            .get(step)
            .map(|values| values.iter().all(|checked| *checked))
            .ok_or_else(|| SessionError::UnknownStep(step.to_string()))
    }

    /// `(checked, total)` for `step`.
    pub fn progress(&self, step: &str) -> Result<(usize, usize), SessionError> {
        self.states
            .get(step)
            .map(|values| (values.iter().filter(|checked| **checked).count(), values.len()))
            .ok_or_else(|| SessionError::UnknownStep(step.to_string()))
    }

    /// Names of all complete steps, in catalog order.
    pub fn completed_steps(&self) -> Vec<&str> {
        self.states
            .iter()
            .filter(|(_, values)| values.iter().all(|checked| *checked))
            .map(|(step, _)| step.as_str())
            .collect()
    }

    /// Raw booleans keyed by step, for persistence.
    pub const fn as_map(&self) -> &IndexMap<String, Vec<bool>> {
        &self.states
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn catalog() -> Catalog {
        let mut steps = IndexMap::new();
        steps.insert(
            "Power".to_string(),
            vec!["Cable PDU".to_string(), "Power on".to_string()],
        );
        steps.insert("Network".to_string(), vec!["Patch TOR".to_string()]);
        steps.insert("Notes".to_string(), vec![]);
        Catalog {
            steps,
            sub_step_descriptions: HashMap::new(),
        }
    }

    #[test]
    fn test_initial_state_all_unchecked() {
        let state = ChecklistState::from_catalog(&catalog());
        assert_eq!(state.as_map()["Power"], vec![false, false]);
        assert_eq!(state.as_map()["Network"], vec![false]);
        assert!(!state.is_step_complete("Power").unwrap());
    }

    #[test]
    fn test_rollup_follows_every_toggle() {
        let mut state = ChecklistState::from_catalog(&catalog());
        state.toggle("Power", 0, true).unwrap();
        assert!(!state.is_step_complete("Power").unwrap());

        state.toggle("Power", 1, true).unwrap();
        assert!(state.is_step_complete("Power").unwrap());

        state.toggle("Power", 0, false).unwrap();
        assert!(!state.is_step_complete("Power").unwrap());
    }

    #[test]
    fn test_empty_step_is_complete() {
        let state = ChecklistState::from_catalog(&catalog());
        assert!(state.is_step_complete("Notes").unwrap());
        assert_eq!(state.completed_steps(), vec!["Notes"]);
    }

    #[test]
    fn test_toggle_errors() {
        let mut state = ChecklistState::from_catalog(&catalog());
        assert!(matches!(
            state.toggle("Cooling", 0, true),
            Err(SessionError::UnknownStep(step)) if step == "Cooling"
        ));
        assert!(matches!(
            state.toggle("Network", 1, true),
            Err(SessionError::InvalidIndex { index: 1, len: 1, .. })
        ));
        assert!(state.is_step_complete("Cooling").is_err());
    }

    #[test]
    fn test_progress() {
        let mut state = ChecklistState::from_catalog(&catalog());
        state.toggle("Power", 1, true).unwrap();
        assert_eq!(state.progress("Power").unwrap(), (1, 2));
        assert_eq!(state.get("Power", 1), Some(true));
        assert_eq!(state.get("Power", 2), None);
    }

    #[test]
    fn test_from_saved_fills_missing_steps() {
        let mut saved = IndexMap::new();
        saved.insert("Power".to_string(), vec![true, true]);
        let state = ChecklistState::from_saved(&catalog(), &saved).unwrap();
        assert!(state.is_step_complete("Power").unwrap());
        assert_eq!(state.as_map()["Network"], vec![false]);
    }

    #[test]
    fn test_from_saved_rejects_wrong_shape() {
        let mut saved = IndexMap::new();
        saved.insert("Power".to_string(), vec![true]);
        assert!(matches!(
            ChecklistState::from_saved(&catalog(), &saved),
            Err(SnapshotLoadError::Shape(_))
        ));

        let mut saved = IndexMap::new();
        saved.insert("Cooling".to_string(), vec![true]);
        assert!(matches!(
            ChecklistState::from_saved(&catalog(), &saved),
            Err(SnapshotLoadError::Shape(_))
        ));
    }
}
