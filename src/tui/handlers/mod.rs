//! Input handler modules for different TUI contexts.

pub mod main;
pub mod popups;

use anyhow::Result;
use crossterm::event::{self, KeyCode, KeyEventKind};

use crate::tui::AppState;

// Re-export handler functions
pub use main::handle_main_input;
pub use popups::handle_popup_input;

/// Handle keyboard input events. Returns `true` when the app should exit.
pub fn handle_key_event(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    // Windows reports releases too
    if key.kind == KeyEventKind::Release {
        return Ok(false);
    }

    // If error overlay is shown, allow dismissing with Enter or Esc
    if state.error_message.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            state.clear_error();
        }
        // Block all other input while error is shown
        return Ok(false);
    }

    // Route to popup handler if popup is active
    if state.active_popup.is_some() {
        return handle_popup_input(state, key);
    }

    handle_main_input(state, key)
}
