//! Environment export block.
//!
//! The bring-up shell session declares one exported variable per derived
//! identifier. Values are filled in by the operator's own tooling, so the
//! block only names them.

/// Variable names, one per identifier in the derived family.
pub const EXPORT_NAMES: [&str; 5] = ["MTOR", "TOR", "PDU", "BMC", "SERVER"];

/// Returns the export block: five `export NAME` lines.
pub fn export_block() -> String {
    EXPORT_NAMES
        .iter()
        .map(|name| format!("export {name}\n"))
        .collect()
}
