//! Session snapshot document (YAML).
//!
//! The snapshot is the only durable form of a session. It is written by
//! explicit saves and by the autosave timer, and read back on load:
//!
//! ```yaml
//! sys_var: SYS-1042
//! rack_var: fra2-rk5
//! mtm_var: 7X06
//! plain_rack_var: rk5
//! mtor_var: r5-mtor
//! ...
//! steps:
//!   Power: [Cable PDU, Power on]
//! user_notes:
//!   Cable PDU: feed B was loose
//! checkbox_states:
//!   Power: [true, false]
//! info_yaml: ''
//! bmc_yaml: ''
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{SessionError, SnapshotLoadError};

/// Serializable aggregate of a session.
///
/// Every field defaults when absent so partially written or older documents
/// still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSnapshot {
    /// Ticket / system reference
    #[serde(deserialize_with = "null_as_empty")]
    pub sys_var: String,
    /// Full rack name
    #[serde(deserialize_with = "null_as_empty")]
    pub rack_var: String,
    /// Machine type/model
    #[serde(deserialize_with = "null_as_empty")]
    pub mtm_var: String,
    /// `rk<N>` token
    #[serde(deserialize_with = "empty_as_none")]
    pub plain_rack_var: Option<String>,
    /// Management top-of-rack switch
    #[serde(deserialize_with = "empty_as_none")]
    pub mtor_var: Option<String>,
    /// Data top-of-rack switch
    #[serde(deserialize_with = "empty_as_none")]
    pub tor_var: Option<String>,
    /// Power distribution unit
    #[serde(deserialize_with = "empty_as_none")]
    pub pdu_var: Option<String>,
    /// BMC network name
    #[serde(deserialize_with = "empty_as_none")]
    pub bmc_var: Option<String>,
    /// Server hostname prefix
    #[serde(deserialize_with = "empty_as_none")]
    pub server_var: Option<String>,
    /// Catalog steps the session was recorded against
    pub steps: IndexMap<String, Vec<String>>,
    /// Operator notes keyed by substep
    pub user_notes: BTreeMap<String, String>,
    /// Completion booleans keyed by step
    pub checkbox_states: IndexMap<String, Vec<bool>>,
    /// Rendered info table
    #[serde(deserialize_with = "null_as_empty")]
    pub info_yaml: String,
    /// Rendered BMC password table
    #[serde(deserialize_with = "null_as_empty")]
    pub bmc_yaml: String,
}

/// Accepts `null` wherever a string is expected.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Treats `''` like `null` for derived names, which older documents
/// write for a rack that never matched.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|value| value.filter(|s| !s.is_empty()))
}

impl SessionSnapshot {
    /// Serializes the snapshot to YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yml::Error> {
        serde_yml::to_string(self)
    }

    /// Parses a snapshot document. An empty document yields a blank snapshot.
    pub fn from_yaml(content: &str) -> Result<Self, SnapshotLoadError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yml::from_str(content).map_err(|e| SnapshotLoadError::Malformed(e.to_string()))
    }

    /// Reads and parses a snapshot file.
    pub fn read(path: &Path) -> Result<Self, SnapshotLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SnapshotLoadError::NotFound(path.to_path_buf()),
            _ => SnapshotLoadError::Malformed(format!("{}: {e}", path.display())),
        })?;
        Self::from_yaml(&content)
    }

    /// Serializes and atomically writes the snapshot to `path`.
    pub fn write(&self, path: &Path) -> Result<(), SessionError> {
        let yaml = self
            .to_yaml()
            .map_err(|e| SessionError::Serialize(format!("session snapshot: {e}")))?;
        atomic_write(path, &yaml).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Performs an atomic file write using temp file + rename.
///
/// The target is never left half-written: content goes to a sibling
/// `.tmp` file first and is renamed over the target afterwards.
pub fn atomic_write(path: &Path, content: &str) -> std::io::Result<()> {
    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    std::fs::write(&temp_path, content)?;
    std::fs::rename(&temp_path, path)
}
