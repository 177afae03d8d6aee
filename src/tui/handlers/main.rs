//! Main UI input handler.

use anyhow::Result;
use crossterm::event::{self, KeyCode, KeyModifiers};

use crate::services::hosts::host_list_text;
use crate::tui::{AppState, IdentifierForm, PopupType};

/// Handle input for main UI
pub fn handle_main_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.should_quit = true;
            Ok(true)
        }
        KeyCode::Char('q') => {
            if state.dirty {
                state.active_popup = Some(PopupType::UnsavedChangesPrompt);
                Ok(false)
            } else {
                state.should_quit = true;
                Ok(true)
            }
        }
        KeyCode::Tab | KeyCode::BackTab => {
            state.toggle_focus();
            Ok(false)
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.move_up();
            Ok(false)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.move_down();
            Ok(false)
        }
        KeyCode::Char(' ') | KeyCode::Enter => {
            state.toggle_selected();
            Ok(false)
        }
        KeyCode::Char('i') => {
            let form = IdentifierForm::from_identifiers(state.session.identifiers());
            state.active_popup = Some(PopupType::IdentifierForm(form));
            Ok(false)
        }
        KeyCode::Char('m') => {
            state.cycle_mtm();
            Ok(false)
        }
        KeyCode::Char('n') => {
            if state.selected_substep_name().is_some() {
                state.active_popup = Some(PopupType::NoteEditor);
            }
            Ok(false)
        }
        KeyCode::Char('g') => {
            state.generate_credentials();
            Ok(false)
        }
        KeyCode::Char('y') => {
            match state.selected_description() {
                Some(Ok(text)) => state.copy_to_clipboard("Description", text),
                Some(Err(e)) => state.set_error(e),
                None => state.set_status("No substep selected"),
            }
            Ok(false)
        }
        KeyCode::Char('e') => {
            let block = state.session.exports();
            state.copy_to_clipboard("Export block", block);
            Ok(false)
        }
        KeyCode::Char('h') => {
            let hosts = host_list_text(&state.session.hosts());
            state.copy_to_clipboard("Host list", hosts);
            Ok(false)
        }
        KeyCode::Char('s') => {
            state.save();
            Ok(false)
        }
        KeyCode::Char('o') => {
            let path = state.default_load_path();
            state.active_popup = Some(PopupType::LoadPrompt(path));
            Ok(false)
        }
        // No action mapped - ignore key
        _ => Ok(false),
    }
}
