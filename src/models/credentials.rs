//! Generated credential tables.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Top-level key the BMC password table is nested under.
pub const BMC_TABLE_KEY: &str = "bmc_passwords";

/// Marker written in place of a MAC address that failed normalization.
pub const INVALID_MAC: &str = "INVALID";

/// One row of the info table, keyed by `"{host}-bmc"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Normalized MAC (`AA:BB:CC:DD:EE:FF`) or `INVALID`
    pub mac: String,
    /// Normalized BMC password
    pub password: String,
    /// Machine type/model of the server
    pub mtm: String,
}

/// One row of the BMC password table, keyed by host name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BmcRecord {
    /// Factory BMC password
    pub vendor_password: String,
}

/// Both generated tables. Maps are kept in descending key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialTables {
    /// `"{host}-bmc"` to MAC/password/MTM
    pub info: IndexMap<String, CredentialRecord>,
    /// Host to vendor password
    pub bmc: IndexMap<String, BmcRecord>,
}

impl CredentialTables {
    /// Number of paired records.
    pub fn len(&self) -> usize {
        self.info.len()
    }

    /// True when no record could be paired.
    pub fn is_empty(&self) -> bool {
        self.info.is_empty()
    }

    /// Records whose MAC failed normalization.
    pub fn invalid_macs(&self) -> impl Iterator<Item = &str> {
        self.info
            .iter()
            .filter(|(_, record)| record.mac == INVALID_MAC)
            .map(|(key, _)| key.as_str())
    }
}
