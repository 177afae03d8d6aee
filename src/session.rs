//! The checklist session: single owner of all mutable engine state.
//!
//! The presentation layer holds a `Session` and drives it exclusively through
//! the command handlers below (`confirm`, `toggle`, `set_note`,
//! `generate_credentials`, `save`, `load`). Derivation and generation are pure
//! functions in `models` and `services`; the session only sequences them and
//! stores their results.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::constants::SESSION_EXTENSION;
use crate::error::SessionError;
use crate::models::{Catalog, ChecklistState, CredentialTables, IdentifierSet};
use crate::parser::{template, SessionSnapshot};
use crate::services::{credentials, exports, hosts};

/// Raw identifier input as typed by the operator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierInput {
    /// Ticket / system reference
    pub sys: String,
    /// Full rack name
    pub rack: String,
    /// Machine type/model
    pub mtm: String,
}

impl IdentifierInput {
    /// Convenience constructor.
    pub fn new(sys: impl Into<String>, rack: impl Into<String>, mtm: impl Into<String>) -> Self {
        Self {
            sys: sys.into(),
            rack: rack.into(),
            mtm: mtm.into(),
        }
    }
}

/// Live session state bound to one catalog.
#[derive(Debug, Clone)]
pub struct Session {
    catalog: Catalog,
    identifiers: IdentifierSet,
    checklist: ChecklistState,
    notes: BTreeMap<String, String>,
    info_yaml: String,
    bmc_yaml: String,
}

impl Session {
    /// Starts a blank session: nothing checked, no identifiers, no notes.
    pub fn new(catalog: Catalog) -> Self {
        let checklist = ChecklistState::from_catalog(&catalog);
        Self {
            catalog,
            identifiers: IdentifierSet::default(),
            checklist,
            notes: BTreeMap::new(),
            info_yaml: String::new(),
            bmc_yaml: String::new(),
        }
    }

    /// The catalog this session runs against.
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current identifiers.
    pub const fn identifiers(&self) -> &IdentifierSet {
        &self.identifiers
    }

    /// Current completion state.
    pub const fn checklist(&self) -> &ChecklistState {
        &self.checklist
    }

    /// All notes keyed by substep.
    pub const fn notes(&self) -> &BTreeMap<String, String> {
        &self.notes
    }

    /// Note for `substep`, empty if never edited.
    pub fn note(&self, substep: &str) -> &str {
        self.notes.get(substep).map_or("", String::as_str)
    }

    /// Last generated info table (YAML), empty before the first generation.
    pub fn info_yaml(&self) -> &str {
        &self.info_yaml
    }

    /// Last generated BMC password table (YAML).
    pub fn bmc_yaml(&self) -> &str {
        &self.bmc_yaml
    }

    /// Stores identifier input and re-derives the rack family.
    ///
    /// When the rack name has no `rk<N>` token the input is still stored,
    /// the previously derived names are kept, and `SessionError::Parse` is
    /// returned so the caller can warn.
    pub fn confirm(&mut self, input: &IdentifierInput) -> Result<(), SessionError> {
        let matched = self
            .identifiers
            .apply_input(&input.sys, &input.rack, &input.mtm);
        if matched {
            debug!(rack = %input.rack, "derived rack identifiers");
            Ok(())
        } else {
            warn!(rack = %input.rack, "rack name has no rk<number> token, keeping previous identifiers");
            Err(SessionError::Parse(input.rack.clone()))
        }
    }

    /// Sets one substep's completion flag.
    pub fn toggle(&mut self, step: &str, index: usize, value: bool) -> Result<(), SessionError> {
        self.checklist.toggle(step, index, value)
    }

    /// True iff every substep of `step` is checked. Recomputed on each call.
    pub fn is_step_complete(&self, step: &str) -> Result<bool, SessionError> {
        self.checklist.is_step_complete(step)
    }

    /// Renders the description of `substep` with the current identifiers.
    pub fn render(&self, substep: &str) -> Result<String, SessionError> {
        Ok(template::render(&self.catalog, substep, &self.identifiers)?)
    }

    /// Replaces the note for `substep`, creating it on first edit.
    pub fn set_note(&mut self, substep: &str, text: impl Into<String>) {
        self.notes.insert(substep.to_string(), text.into());
    }

    /// Server host names for the current rack.
    pub fn hosts(&self) -> Vec<String> {
        hosts::generate_hosts(&self.identifiers.rack)
    }

    /// Export block for the derived identifiers.
    pub fn exports(&self) -> String {
        exports::export_block()
    }

    /// Builds both credential tables against the current host list and
    /// stores their YAML renderings, replacing any previous ones.
    pub fn generate_credentials(
        &mut self,
        mac_lines: &str,
        password_lines: &str,
    ) -> Result<CredentialTables, SessionError> {
        let hosts = self.hosts();
        let tables =
            credentials::build_tables(mac_lines, password_lines, &hosts, &self.identifiers.mtm);

        let info_yaml = credentials::info_yaml(&tables)
            .map_err(|e| SessionError::Serialize(format!("info table: {e}")))?;
        let bmc_yaml = credentials::bmc_yaml(&tables)
            .map_err(|e| SessionError::Serialize(format!("BMC table: {e}")))?;

        let invalid = tables.invalid_macs().count();
        if invalid > 0 {
            warn!(invalid, "some MAC addresses could not be normalized");
        }
        info!(records = tables.len(), "generated credential tables");

        self.info_yaml = info_yaml;
        self.bmc_yaml = bmc_yaml;
        Ok(tables)
    }

    /// Captures the full session as a serializable snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        let ids = &self.identifiers;
        SessionSnapshot {
            sys_var: ids.sys.clone(),
            rack_var: ids.rack.clone(),
            mtm_var: ids.mtm.clone(),
            plain_rack_var: ids.plain_rack.clone(),
            mtor_var: ids.mtor.clone(),
            tor_var: ids.tor.clone(),
            pdu_var: ids.pdu.clone(),
            bmc_var: ids.bmc.clone(),
            server_var: ids.server.clone(),
            steps: self.catalog.steps.clone(),
            user_notes: self.notes.clone(),
            checkbox_states: self.checklist.as_map().clone(),
            info_yaml: self.info_yaml.clone(),
            bmc_yaml: self.bmc_yaml.clone(),
        }
    }

    /// Replaces identifiers, checklist, notes and artifacts with the snapshot's.
    ///
    /// Nothing is merged. If the snapshot's checkbox states do not fit the
    /// catalog the session is left exactly as it was.
    pub fn restore(&mut self, snapshot: SessionSnapshot) -> Result<(), SessionError> {
        let checklist = ChecklistState::from_saved(&self.catalog, &snapshot.checkbox_states)?;

        self.identifiers = IdentifierSet {
            sys: snapshot.sys_var,
            rack: snapshot.rack_var,
            plain_rack: snapshot.plain_rack_var,
            mtm: snapshot.mtm_var,
            mtor: snapshot.mtor_var,
            tor: snapshot.tor_var,
            pdu: snapshot.pdu_var,
            bmc: snapshot.bmc_var,
            server: snapshot.server_var,
        };
        self.checklist = checklist;
        self.notes = snapshot.user_notes;
        self.info_yaml = snapshot.info_yaml;
        self.bmc_yaml = snapshot.bmc_yaml;
        Ok(())
    }

    /// Default save file name: `{sys}-{rack}.yaml`.
    pub fn default_filename(&self) -> String {
        format!(
            "{}-{}.{SESSION_EXTENSION}",
            self.identifiers.sys, self.identifiers.rack
        )
    }

    /// Saves to `dir/{sys}-{rack}.yaml` and returns the written path.
    pub fn save(&self, dir: &Path) -> Result<PathBuf, SessionError> {
        let path = dir.join(self.default_filename());
        self.save_to(&path)?;
        Ok(path)
    }

    /// Saves to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), SessionError> {
        self.write_snapshot(path)?;
        info!(path = %path.display(), "session saved");
        Ok(())
    }

    /// Writes a snapshot without logging; shared by saves and autosave ticks.
    pub fn write_snapshot(&self, path: &Path) -> Result<(), SessionError> {
        self.snapshot().write(path)
    }

    /// Loads a session file, replacing the current state.
    ///
    /// On any failure the current state is left untouched.
    pub fn load(&mut self, path: &Path) -> Result<(), SessionError> {
        let snapshot = SessionSnapshot::read(path)?;
        if !snapshot.steps.is_empty() && snapshot.steps != self.catalog.steps {
            warn!(path = %path.display(), "session was recorded against a different catalog");
        }
        self.restore(snapshot).inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "session does not fit the catalog");
        })?;
        info!(path = %path.display(), "session loaded");
        Ok(())
    }
}
