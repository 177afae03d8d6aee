//! End-to-end tests for `rack-checklist config`.

mod fixtures;
use fixtures::*;

use tempfile::TempDir;

fn show_json(config_dir: &std::path::Path) -> serde_json::Value {
    let output = run(&["config", "show", "--json"], config_dir);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    serde_json::from_str(&stdout(&output)).unwrap()
}

#[test]
fn test_config_show_defaults() {
    let config_dir = TempDir::new().unwrap();
    let config = show_json(config_dir.path());

    assert_eq!(config["paths"]["catalog"], "steps.yaml");
    assert_eq!(config["paths"]["session_dir"], ".");
    assert_eq!(config["autosave"]["enabled"], true);
    assert!(config["autosave"]["file"]
        .as_str()
        .unwrap()
        .ends_with("checklist-autosave.yaml"));
    assert_eq!(config["ui"]["theme"], "auto");
    assert!(config["ui"]["mtm_options"].as_array().unwrap().is_empty());
}

#[test]
fn test_config_path_uses_override_dir() {
    let config_dir = TempDir::new().unwrap();
    let output = run(&["config", "path"], config_dir.path());

    assert_eq!(output.status.code(), Some(0));
    let expected = config_dir.path().join("config.toml");
    assert_eq!(stdout(&output).trim(), expected.to_str().unwrap());
}

#[test]
fn test_config_set_persists() {
    let config_dir = TempDir::new().unwrap();
    let (temp_dir, catalog) = temp_catalog();
    let sessions = temp_dir.path().join("sessions");

    let output = run(
        &[
            "config",
            "set",
            "--catalog",
            catalog.to_str().unwrap(),
            "--session-dir",
            sessions.to_str().unwrap(),
            "--autosave",
            "false",
            "--theme",
            "dark",
            "--mtm",
            "7X06",
            "--mtm",
            "7X21",
        ],
        config_dir.path(),
    );
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(sessions.is_dir());
    assert!(config_dir.path().join("config.toml").exists());

    let config = show_json(config_dir.path());
    assert_eq!(config["paths"]["catalog"], catalog.to_str().unwrap());
    assert_eq!(config["paths"]["session_dir"], sessions.to_str().unwrap());
    assert_eq!(config["autosave"]["enabled"], false);
    assert_eq!(config["ui"]["theme"], "dark");
    assert_eq!(config["ui"]["mtm_options"], serde_json::json!(["7X06", "7X21"]));
}

#[test]
fn test_config_set_invalid_theme() {
    let config_dir = TempDir::new().unwrap();
    let output = run(&["config", "set", "--theme", "purple"], config_dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Invalid theme mode"));
    assert!(!config_dir.path().join("config.toml").exists());
}

#[test]
fn test_config_set_requires_an_option() {
    let config_dir = TempDir::new().unwrap();
    let output = run(&["config", "set"], config_dir.path());

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_config_set_missing_catalog() {
    let config_dir = TempDir::new().unwrap();
    let output = run(
        &["config", "set", "--catalog", "/nonexistent/steps.yaml"],
        config_dir.path(),
    );

    assert_eq!(output.status.code(), Some(1));
}
