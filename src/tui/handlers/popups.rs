//! Popup input handlers: identifier form, note editor, load prompt and quit prompt.

use anyhow::Result;
use crossterm::event::{self, KeyCode, KeyModifiers};
use std::path::PathBuf;

use crate::tui::{AppState, NoteEdit, PopupType};

/// Handle input for the active popup
pub fn handle_popup_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    let Some(popup) = state.active_popup.take() else {
        return Ok(false);
    };

    match popup {
        PopupType::IdentifierForm(form) => handle_identifier_form(state, form, key),
        PopupType::NoteEditor => handle_note_editor(state, key),
        PopupType::LoadPrompt(path) => handle_load_prompt(state, path, key),
        PopupType::UnsavedChangesPrompt => handle_unsaved_prompt(state, key),
    }
}

fn handle_identifier_form(
    state: &mut AppState,
    mut form: crate::tui::IdentifierForm,
    key: event::KeyEvent,
) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            state.set_status("Identifier entry cancelled");
            return Ok(false);
        }
        KeyCode::Enter => {
            state.apply_identifiers(&form);
            return Ok(false);
        }
        KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.cycle_mtm(&state.config.ui.mtm_options);
        }
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.previous_field(),
        KeyCode::Backspace => {
            form.active_field_mut().pop();
        }
        KeyCode::Char(c) => form.active_field_mut().push(c),
        _ => {}
    }

    state.active_popup = Some(PopupType::IdentifierForm(form));
    Ok(false)
}

fn handle_note_editor(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            state.set_status("Note updated");
            return Ok(false);
        }
        KeyCode::Enter => state.edit_note(NoteEdit::Insert('\n')),
        KeyCode::Backspace => state.edit_note(NoteEdit::Backspace),
        KeyCode::Char(c) => state.edit_note(NoteEdit::Insert(c)),
        _ => {}
    }

    state.active_popup = Some(PopupType::NoteEditor);
    Ok(false)
}

fn handle_load_prompt(state: &mut AppState, mut path: String, key: event::KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => return Ok(false),
        KeyCode::Enter => {
            let target = PathBuf::from(path.trim());
            state.load(&target);
            return Ok(false);
        }
        KeyCode::Backspace => {
            path.pop();
        }
        KeyCode::Char(c) => path.push(c),
        _ => {}
    }

    state.active_popup = Some(PopupType::LoadPrompt(path));
    Ok(false)
}

fn handle_unsaved_prompt(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('s' | 'S') => {
            if state.save() {
                state.should_quit = true;
                return Ok(true);
            }
            Ok(false)
        }
        KeyCode::Char('q' | 'Q') => {
            state.should_quit = true;
            Ok(true)
        }
        KeyCode::Esc => Ok(false),
        _ => {
            state.active_popup = Some(PopupType::UnsavedChangesPrompt);
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ThemeMode};
    use crate::parser::catalog::parse_catalog_str;
    use crate::session::Session;
    use crate::tui::handlers::handle_key_event;
    use crossterm::event::KeyEvent;
    use tempfile::TempDir;

    fn state() -> (TempDir, AppState) {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::new();
        config.paths.session_dir = Some(temp_dir.path().to_path_buf());
        config.ui.theme_mode = ThemeMode::Dark;
        let catalog = parse_catalog_str("steps:\n  Power: [Cable PDU]\n").unwrap();
        let state = AppState::new(Session::new(catalog), config);
        (temp_dir, state)
    }

    fn press(state: &mut AppState, code: KeyCode) -> bool {
        handle_key_event(state, KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    fn type_str(state: &mut AppState, text: &str) {
        for c in text.chars() {
            press(state, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_identifier_form_flow() {
        let (_dir, mut state) = state();
        press(&mut state, KeyCode::Char('i'));
        type_str(&mut state, "SYS-9");
        press(&mut state, KeyCode::Tab);
        type_str(&mut state, "fra2-rk12");
        press(&mut state, KeyCode::Enter);

        assert!(state.active_popup.is_none());
        assert_eq!(state.session.identifiers().sys, "SYS-9");
        assert_eq!(state.session.identifiers().tor.as_deref(), Some("r12-tor"));
    }

    #[test]
    fn test_identifier_form_escape_discards() {
        let (_dir, mut state) = state();
        press(&mut state, KeyCode::Char('i'));
        type_str(&mut state, "SYS-9");
        press(&mut state, KeyCode::Esc);

        assert!(state.active_popup.is_none());
        assert_eq!(state.session.identifiers().sys, "");
    }

    #[test]
    fn test_note_editor_captures_shortcut_letters() {
        let (_dir, mut state) = state();
        press(&mut state, KeyCode::Char('n'));
        type_str(&mut state, "qs");
        press(&mut state, KeyCode::Esc);

        assert!(!state.should_quit);
        assert_eq!(state.session.note("Cable PDU"), "qs");
    }

    #[test]
    fn test_quit_with_unsaved_changes_prompts() {
        let (_dir, mut state) = state();
        press(&mut state, KeyCode::Char(' '));
        assert!(!press(&mut state, KeyCode::Char('q')));
        assert_eq!(state.active_popup, Some(PopupType::UnsavedChangesPrompt));

        press(&mut state, KeyCode::Esc);
        assert!(state.active_popup.is_none());

        press(&mut state, KeyCode::Char('q'));
        assert!(press(&mut state, KeyCode::Char('q')));
        assert!(state.should_quit);
    }

    #[test]
    fn test_error_overlay_blocks_input() {
        let (_dir, mut state) = state();
        state.set_error("boom");
        press(&mut state, KeyCode::Char(' '));
        assert!(!state.session.is_step_complete("Power").unwrap());
        press(&mut state, KeyCode::Esc);
        assert!(state.error_message.is_none());
    }

    #[test]
    fn test_load_prompt_missing_file_reports_error() {
        let (dir, mut state) = state();
        press(&mut state, KeyCode::Char('o'));
        let Some(PopupType::LoadPrompt(path)) = &mut state.active_popup else {
            panic!("load prompt not open");
        };
        *path = dir.path().join("missing.yaml").to_string_lossy().to_string();
        press(&mut state, KeyCode::Enter);

        assert!(state.active_popup.is_none());
        assert!(state.error_message.is_some());
    }
}
