//! Library-level tests of a full bring-up session: identifiers, checklist,
//! credentials, save/load and autosave working together.

mod fixtures;
use fixtures::*;

use rack_checklist::parser::SessionSnapshot;
use rack_checklist::services::{AutosaveOutcome, Autosaver};
use rack_checklist::{IdentifierInput, Session, SessionError};
use std::time::{Duration, Instant};
use tempfile::TempDir;

#[test]
fn test_saved_session_restores_everything() {
    let temp_dir = TempDir::new().unwrap();
    let path = saved_session(temp_dir.path());
    assert_eq!(path.file_name().unwrap(), "SYS-1042-fra2-rk5.yaml");

    let mut session = Session::new(test_catalog());
    session.load(&path).unwrap();

    assert_eq!(session.identifiers().sys, "SYS-1042");
    assert_eq!(session.identifiers().mtm, "7X06");
    assert!(!session.is_step_complete("Power").unwrap());
    assert!(session.is_step_complete("Network").unwrap());
    assert_eq!(session.note("Cable PDU"), "feed B loose");
    assert_eq!(session.render("Patch TOR").unwrap(), "ssh r5-mtor && ssh r5-tor");
}

#[test]
fn test_unmatched_rack_keeps_previous_family() {
    let mut session = Session::new(test_catalog());
    session
        .confirm(&IdentifierInput::new("SYS-1", "fra2-rk5", ""))
        .unwrap();

    let err = session
        .confirm(&IdentifierInput::new("SYS-1", "fra2-row4", ""))
        .unwrap_err();
    assert!(matches!(err, SessionError::Parse(_)));
    assert_eq!(session.identifiers().rack, "fra2-row4");
    assert_eq!(session.render("Cable PDU").unwrap(), "Patch r5pdu for fra2-row4");
}

#[test]
fn test_credentials_follow_rack_changes() {
    let mut session = Session::new(test_catalog());
    session
        .confirm(&IdentifierInput::new("SYS-1", "fra2-rk5", "7X06"))
        .unwrap();
    session
        .generate_credentials("aa:bb:cc:dd:ee:01\n", "Secret001\n")
        .unwrap();
    assert!(session.info_yaml().contains("fra2-rk5-s50-bmc"));

    session
        .confirm(&IdentifierInput::new("SYS-1", "fra2-rk6", "7X06"))
        .unwrap();
    session
        .generate_credentials("aa:bb:cc:dd:ee:01\n", "Secret001\n")
        .unwrap();
    assert!(session.info_yaml().contains("fra2-rk6-s50-bmc"));
    assert!(!session.info_yaml().contains("fra2-rk5"));
}

#[test]
fn test_autosave_writes_loadable_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let mut session = Session::new(test_catalog());
    session
        .confirm(&IdentifierInput::new("SYS-9", "rk9", ""))
        .unwrap();
    session.toggle("Power", 1, true).unwrap();

    let mut autosaver = Autosaver::in_dir(temp_dir.path());
    let start = Instant::now();
    assert!(matches!(
        autosaver.tick(&session, start),
        Some(AutosaveOutcome::Saved(_))
    ));
    assert!(autosaver.tick(&session, start + Duration::from_millis(500)).is_none());

    let snapshot = SessionSnapshot::read(autosaver.path()).unwrap();
    assert_eq!(snapshot.rack_var, "rk9");
    assert_eq!(snapshot.checkbox_states["Power"], vec![false, true]);
}

#[test]
fn test_failed_autosave_leaves_session_intact() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = write_file(temp_dir.path(), "not-a-dir", "");
    let mut session = Session::new(test_catalog());
    session.toggle("Network", 0, true).unwrap();

    let mut autosaver = Autosaver::new(blocker.join("autosave.yaml"), Duration::from_secs(1));
    let outcome = autosaver.tick(&session, Instant::now());

    assert!(matches!(outcome, Some(AutosaveOutcome::Failed(_))));
    assert!(autosaver.last_saved().is_none());
    assert_eq!(session.checklist().progress("Network").unwrap(), (1, 2));
}
