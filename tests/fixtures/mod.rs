//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use rack_checklist::models::Catalog;
use rack_checklist::parser::catalog::parse_catalog_str;
use rack_checklist::session::{IdentifierInput, Session};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Small catalog covering placeholders, an escaped brace and an undescribed substep.
pub const CATALOG_YAML: &str = r#"
steps:
  Power:
    - Cable PDU
    - Power on
  Network:
    - Patch TOR
    - Verify uplinks
sub_step_descriptions:
  Cable PDU: "Patch {pdu} for {rack}"
  Patch TOR: "ssh {mtor} && ssh {tor}"
  Verify uplinks: "awk '{{print $1}}' on {server}01"
"#;

/// Catalog with a misspelled placeholder.
pub const BROKEN_CATALOG_YAML: &str = r#"
steps:
  Power:
    - Cable PDU
sub_step_descriptions:
  Cable PDU: "Patch {pud} for {rack}"
"#;

/// Path to the binary under test.
pub fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_rack-checklist")
}

/// Runs the binary with an isolated config directory.
pub fn run(args: &[&str], config_dir: &Path) -> Output {
    Command::new(bin())
        .env("RACK_CHECKLIST_CONFIG_DIR", config_dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// Parsed fixture catalog.
pub fn test_catalog() -> Catalog {
    parse_catalog_str(CATALOG_YAML).expect("fixture catalog parses")
}

/// Writes a file into `dir` and returns its path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write fixture file");
    path
}

/// Writes the fixture catalog into a temp dir.
pub fn temp_catalog() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_file(temp_dir.path(), "steps.yaml", CATALOG_YAML);
    (temp_dir, path)
}

/// Saves a session for `SYS-1042` / `fra2-rk5` with the first Power substep
/// and all Network substeps checked. Returns the session file path.
pub fn saved_session(dir: &Path) -> PathBuf {
    let mut session = Session::new(test_catalog());
    session
        .confirm(&IdentifierInput::new("SYS-1042", "fra2-rk5", "7X06"))
        .expect("rack name derives");
    session.toggle("Power", 0, true).expect("valid toggle");
    session.toggle("Network", 0, true).expect("valid toggle");
    session.toggle("Network", 1, true).expect("valid toggle");
    session.set_note("Cable PDU", "feed B loose");
    session.save(dir).expect("Failed to save session")
}

/// stdout as a string.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// stderr as a string.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
