//! Credential table generation.
//!
//! Operators paste the MAC addresses and factory BMC passwords from the
//! rack's delivery sheet. The sheet lists servers top-down, so the host list
//! is reversed before pairing. Pairing is positional and stops at the
//! shortest of the three lists.

use indexmap::IndexMap;
use std::collections::BTreeMap;

use crate::models::credentials::{BMC_TABLE_KEY, INVALID_MAC};
use crate::models::{BmcRecord, CredentialRecord, CredentialTables};

/// Lines shorter than this (after trimming) are treated as blank rows.
const MIN_LINE_LEN: usize = 5;

/// Normalizes a MAC address to `AA:BB:CC:DD:EE:FF`.
///
/// Separators `:`, `-` and `.` are dropped and the rest uppercased; anything
/// that is not exactly 12 hex digits becomes `INVALID`.
pub fn format_mac(raw: &str) -> String {
    let digits: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ':' | '-' | '.'))
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if digits.len() != 12 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return INVALID_MAC.to_string();
    }

    digits
        .as_bytes()
        .chunks(2)
        .map(|pair| String::from_utf8_lossy(pair).into_owned())
        .collect::<Vec<_>>()
        .join(":")
}

/// Trims a password and strips quotes and embedded line breaks.
pub fn clean_password(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !matches!(c, '"' | '\'' | '\n' | '\r'))
        .collect()
}

/// Splits pasted text into rows, dropping blank and truncated ones.
fn significant_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .filter(|line| line.trim().chars().count() >= MIN_LINE_LEN)
}

/// Builds both credential tables from pasted MAC and password text.
///
/// Hosts are paired highest slot first. Surplus MACs, passwords or hosts are
/// dropped. Both tables come back in descending key order and are rebuilt
/// from scratch on every call.
pub fn build_tables(
    mac_lines: &str,
    password_lines: &str,
    hosts: &[String],
    mtm: &str,
) -> CredentialTables {
    let macs = significant_lines(mac_lines).map(format_mac);
    let passwords = significant_lines(password_lines).map(clean_password);

    let mut info = BTreeMap::new();
    let mut bmc = BTreeMap::new();
    for ((host, mac), password) in hosts.iter().rev().zip(macs).zip(passwords) {
        info.insert(
            format!("{host}-bmc"),
            CredentialRecord {
                mac,
                password: password.clone(),
                mtm: mtm.to_string(),
            },
        );
        bmc.insert(
            host.clone(),
            BmcRecord {
                vendor_password: password,
            },
        );
    }

    CredentialTables {
        info: info.into_iter().rev().collect(),
        bmc: bmc.into_iter().rev().collect(),
    }
}

/// Renders the info table as YAML.
pub fn info_yaml(tables: &CredentialTables) -> Result<String, serde_yml::Error> {
    if tables.info.is_empty() {
        return Ok(String::new());
    }
    serde_yml::to_string(&tables.info)
}

/// Renders the BMC password table as YAML, nested under [`BMC_TABLE_KEY`].
pub fn bmc_yaml(tables: &CredentialTables) -> Result<String, serde_yml::Error> {
    if tables.bmc.is_empty() {
        return Ok(String::new());
    }
    let mut nested = IndexMap::new();
    nested.insert(BMC_TABLE_KEY, &tables.bmc);
    serde_yml::to_string(&nested)
}
