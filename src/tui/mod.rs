//! Terminal user interface components and state management.
//!
//! This module contains the main TUI loop, `AppState`, event handling,
//! and all UI widgets using Ratatui. The autosave timer is ticked from the
//! same loop, so snapshots never race with edits.

// Input handlers use Result<bool> for consistency even when they never fail
#![allow(clippy::unnecessary_wraps)]
// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_truncation)]

pub mod handlers;
pub mod identifier_form;
pub mod status_bar;
pub mod theme;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout as RatatuiLayout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::warn;

use crate::config::Config;
use crate::constants::{APP_NAME, AUTOSAVE_INTERVAL, MAC_INPUT_FILENAME, PASSWORD_INPUT_FILENAME};
use crate::services::{AutosaveOutcome, Autosaver};
use crate::session::Session;

// Re-export TUI components
pub use identifier_form::IdentifierForm;
pub use status_bar::StatusBar;
pub use theme::Theme;

/// Pane receiving navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Main step list (left)
    #[default]
    Steps,
    /// Substep checklist (right)
    Substeps,
}

/// Popup types that can be displayed over the main UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupType {
    /// Identifier entry form
    IdentifierForm(IdentifierForm),
    /// Note editor for the selected substep
    NoteEditor,
    /// Path prompt for loading a saved session
    LoadPrompt(String),
    /// Quit confirmation while the explicit save is stale
    UnsavedChangesPrompt,
}

/// Application state - single source of truth for the TUI.
#[derive(Debug)]
pub struct AppState {
    // Core data
    /// Live checklist session
    pub session: Session,
    /// Periodic snapshot writer
    pub autosaver: Autosaver,
    /// Directory for saves, loads and credential inputs
    pub session_dir: PathBuf,
    /// Whether the session changed since the last explicit save or load
    pub dirty: bool,

    // UI state
    /// Current UI theme
    pub theme: Theme,
    /// Focused pane
    pub focus: Focus,
    /// Index into the catalog's main steps
    pub selected_step: usize,
    /// Index into the selected step's substeps
    pub selected_substep: usize,
    /// Currently active popup (if any)
    pub active_popup: Option<PopupType>,
    /// Status bar message
    pub status_message: String,
    /// Optional color override for status message (warnings rendered via status)
    pub status_color_override: Option<Color>,
    /// Current error message (if any)
    pub error_message: Option<String>,

    /// Application configuration
    pub config: Config,

    // Control flags
    /// Whether application should exit
    pub should_quit: bool,
}

impl AppState {
    /// Wraps a session with the UI state and an autosaver configured from `config`.
    pub fn new(session: Session, config: Config) -> Self {
        let session_dir = config.session_dir();
        if let Err(e) = std::fs::create_dir_all(&session_dir) {
            warn!(dir = %session_dir.display(), error = %e, "failed to create session directory");
        }
        let mut autosaver = Autosaver::new(config.autosave_path(), AUTOSAVE_INTERVAL);
        if !config.autosave.enabled {
            autosaver = autosaver.disabled();
        }

        Self {
            session,
            autosaver,
            session_dir,
            dirty: false,
            theme: Theme::from_mode(config.ui.theme_mode),
            focus: Focus::Steps,
            selected_step: 0,
            selected_substep: 0,
            active_popup: None,
            status_message: String::new(),
            status_color_override: None,
            error_message: None,
            config,
            should_quit: false,
        }
    }

    /// Name of the highlighted main step.
    pub fn selected_step_name(&self) -> Option<&str> {
        self.session.catalog().step_names().nth(self.selected_step)
    }

    /// Substeps of the highlighted main step.
    pub fn current_substeps(&self) -> &[String] {
        self.selected_step_name()
            .and_then(|step| self.session.catalog().substeps(step))
            .unwrap_or_default()
    }

    /// Name of the highlighted substep.
    pub fn selected_substep_name(&self) -> Option<&str> {
        self.current_substeps()
            .get(self.selected_substep)
            .map(String::as_str)
    }

    /// Moves the selection in the focused pane up by one.
    pub fn move_up(&mut self) {
        match self.focus {
            Focus::Steps => {
                if self.selected_step > 0 {
                    self.selected_step -= 1;
                    self.selected_substep = 0;
                }
            }
            Focus::Substeps => self.selected_substep = self.selected_substep.saturating_sub(1),
        }
    }

    /// Moves the selection in the focused pane down by one.
    pub fn move_down(&mut self) {
        match self.focus {
            Focus::Steps => {
                if self.selected_step + 1 < self.session.catalog().len() {
                    self.selected_step += 1;
                    self.selected_substep = 0;
                }
            }
            Focus::Substeps => {
                if self.selected_substep + 1 < self.current_substeps().len() {
                    self.selected_substep += 1;
                }
            }
        }
    }

    /// Switches focus between the two panes.
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Steps => Focus::Substeps,
            Focus::Substeps => Focus::Steps,
        };
    }

    /// Flips the completion flag of the highlighted substep.
    pub fn toggle_selected(&mut self) {
        let Some(step) = self.selected_step_name().map(str::to_string) else {
            return;
        };
        let index = self.selected_substep;
        let current = self.session.checklist().get(&step, index).unwrap_or(false);

        match self.session.toggle(&step, index, !current) {
            Ok(()) => {
                self.dirty = true;
                if self.session.is_step_complete(&step).unwrap_or(false) {
                    self.set_status_with_style(format!("Step '{step}' complete"), self.theme.success);
                } else {
                    self.set_status("");
                }
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    /// Stores the form input and re-derives identifiers. Returns `true` when
    /// the rack name matched.
    pub fn apply_identifiers(&mut self, form: &IdentifierForm) -> bool {
        let input = form.to_input();
        self.dirty = true;
        match self.session.confirm(&input) {
            Ok(()) => {
                self.set_status(format!("Identifiers set for {}", input.rack));
                true
            }
            Err(e) if e.is_recoverable() => {
                self.set_status_with_style(
                    format!("⚠ {e}; derived names unchanged"),
                    self.theme.warning,
                );
                false
            }
            Err(e) => {
                self.set_error(e.to_string());
                false
            }
        }
    }

    /// Re-confirms the session with the next configured MTM option.
    pub fn cycle_mtm(&mut self) {
        let ids = self.session.identifiers();
        let Some(next) = identifier_form::next_option(&self.config.ui.mtm_options, &ids.mtm)
        else {
            self.set_status_with_style(
                "No MTM options configured (config set --mtm)",
                self.theme.warning,
            );
            return;
        };
        let form = IdentifierForm {
            sys: ids.sys.clone(),
            rack: ids.rack.clone(),
            mtm: next.to_string(),
            ..IdentifierForm::default()
        };
        if self.apply_identifiers(&form) {
            self.set_status(format!("MTM set to {}", form.mtm));
        }
    }

    /// Applies one keystroke to the highlighted substep's note.
    pub fn edit_note(&mut self, edit: NoteEdit) {
        let Some(substep) = self.selected_substep_name().map(str::to_string) else {
            return;
        };
        let mut text = self.session.note(&substep).to_string();
        match edit {
            NoteEdit::Insert(c) => text.push(c),
            NoteEdit::Backspace => {
                text.pop();
            }
        }
        self.session.set_note(&substep, text);
        self.dirty = true;
    }

    /// Rendered description of the highlighted substep, or the render error.
    pub fn selected_description(&self) -> Option<Result<String, String>> {
        self.selected_substep_name()
            .map(|substep| self.session.render(substep).map_err(|e| e.to_string()))
    }

    /// Builds credential tables from the input files in the session directory.
    pub fn generate_credentials(&mut self) {
        let macs = self.session_dir.join(MAC_INPUT_FILENAME);
        let passwords = self.session_dir.join(PASSWORD_INPUT_FILENAME);

        let (mac_lines, password_lines) = match (read_input(&macs), read_input(&passwords)) {
            (Ok(m), Ok(p)) => (m, p),
            (Err(e), _) | (_, Err(e)) => {
                self.set_error(e);
                return;
            }
        };

        match self
            .session
            .generate_credentials(&mac_lines, &password_lines)
        {
            Ok(tables) if tables.is_empty() => {
                self.set_status_with_style("No usable MAC/password lines", self.theme.warning);
            }
            Ok(tables) => {
                self.dirty = true;
                let invalid = tables.invalid_macs().count();
                if invalid > 0 {
                    self.set_status_with_style(
                        format!("Generated {} records, {invalid} with invalid MAC", tables.len()),
                        self.theme.warning,
                    );
                } else {
                    self.set_status(format!("Generated {} credential records", tables.len()));
                }
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    /// Copies text to the system clipboard and reports the outcome.
    pub fn copy_to_clipboard(&mut self, what: &str, text: String) {
        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
            Ok(()) => self.set_status(format!("{what} copied to clipboard")),
            Err(e) => self.set_error(format!("Failed to copy to clipboard: {e}")),
        }
    }

    /// Saves to `{sys}-{rack}.yaml` in the session directory.
    pub fn save(&mut self) -> bool {
        match self.session.save(&self.session_dir) {
            Ok(path) => {
                self.dirty = false;
                self.set_status_with_style(
                    format!("Saved to {}", path.display()),
                    self.theme.success,
                );
                true
            }
            Err(e) => {
                self.set_error(e.to_string());
                false
            }
        }
    }

    /// Replaces the session with a saved one. State is untouched on failure.
    pub fn load(&mut self, path: &Path) {
        match self.session.load(path) {
            Ok(()) => {
                self.dirty = false;
                self.selected_substep = 0;
                self.set_status(format!("Loaded {}", path.display()));
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    /// Offers the autosaver a tick. Failures are logged by the autosaver and
    /// leave the status bar and error overlay alone.
    pub fn tick_autosave(&mut self, now: Instant) {
        self.autosaver.tick(&self.session, now);
    }

    /// Time of the last successful autosave.
    pub fn last_autosave(&self) -> Option<DateTime<Local>> {
        self.autosaver.last_saved()
    }

    /// Default path offered by the load prompt: the named save file once
    /// identifiers are set, the autosave file before that.
    pub fn default_load_path(&self) -> String {
        let ids = self.session.identifiers();
        let path = if ids.sys.is_empty() && ids.rack.is_empty() {
            self.autosaver.path().to_path_buf()
        } else {
            self.session_dir.join(self.session.default_filename())
        };
        path.to_string_lossy().to_string()
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.error_message = None;
        self.status_color_override = None;
    }

    /// Set status message with custom foreground color (used for warnings)
    pub fn set_status_with_style(&mut self, message: impl Into<String>, color: Color) {
        self.status_message = message.into();
        self.error_message = None;
        self.status_color_override = Some(color);
    }

    /// Set error message
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error_message = Some(error.into());
    }

    /// Clear error message
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}

/// One keystroke applied to a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteEdit {
    /// Append a character (newlines included)
    Insert(char),
    /// Remove the last character
    Backspace,
}

fn read_input(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))
}

/// Initialize terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
///
/// Ends with a final autosave flush so the last edits survive a quit.
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    let result = event_loop(state, terminal);

    if let Some(AutosaveOutcome::Failed(failure)) = state.autosaver.flush(&state.session) {
        warn!("final {failure}");
    }

    result
}

fn event_loop(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        // Render current state
        terminal.draw(|f| render(f, state))?;

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if handlers::handle_key_event(state, key)? {
                    break; // User quit
                }
            }
        }

        state.tick_autosave(Instant::now());

        // Check if should quit
        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Render the UI from current state
fn render(f: &mut Frame, state: &AppState) {
    // Fill entire screen with theme background color first
    let full_bg = Block::default().style(Style::default().bg(state.theme.background));
    f.render_widget(full_bg, f.area());

    let chunks = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Main content
            Constraint::Length(5), // Status bar
        ])
        .split(f.area());

    render_title_bar(f, chunks[0], state);
    render_main_content(f, chunks[1], state);
    StatusBar::render(f, chunks[2], state, &state.theme);

    if let Some(popup_type) = &state.active_popup {
        render_popup(f, popup_type, state);
    }

    // Render error overlay on top of everything if error is present
    if let Some(ref error) = state.error_message {
        render_error_overlay(f, error, &state.theme);
    }
}

/// Render title bar with the identifiers and dirty indicator
fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let ids = state.session.identifiers();
    let dirty_indicator = if state.dirty { " *" } else { "" };
    let title = if ids.sys.is_empty() && ids.rack.is_empty() {
        format!(" {APP_NAME} - press i to enter identifiers{dirty_indicator}")
    } else {
        format!(
            " {APP_NAME} - {} | {} | {} | {}{dirty_indicator}",
            ids.sys,
            ids.rack,
            ids.plain_rack.as_deref().unwrap_or("-"),
            ids.mtm
        )
    };

    let title_widget = Paragraph::new(title)
        .style(
            Style::default()
                .fg(state.theme.primary)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(title_widget, area);
}

fn pane_block<'a>(title: &'a str, focused: bool, theme: &Theme) -> Block<'a> {
    let border = if focused { theme.active } else { theme.inactive };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
}

fn render_main_content(f: &mut Frame, area: Rect, state: &AppState) {
    let columns = RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    render_steps(f, columns[0], state);

    let right = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Percentage(30),
            Constraint::Percentage(25),
        ])
        .split(columns[1]);

    render_substeps(f, right[0], state);
    render_description(f, right[1], state);
    render_note(f, right[2], state);
}

fn render_steps(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let items: Vec<ListItem> = state
        .session
        .catalog()
        .step_names()
        .map(|step| {
            let complete = state.session.is_step_complete(step).unwrap_or(false);
            let style = if complete {
                Style::default()
                    .fg(theme.text_muted)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(theme.text)
            };
            ListItem::new(Line::from(Span::styled(step.to_string(), style)))
        })
        .collect();

    let list = List::new(items)
        .block(pane_block(" Steps ", state.focus == Focus::Steps, theme))
        .highlight_style(Style::default().bg(theme.highlight_bg))
        .highlight_symbol("▶ ");

    let mut list_state = ListState::default().with_selected(Some(state.selected_step));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn render_substeps(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let step = state.selected_step_name().unwrap_or_default();
    let items: Vec<ListItem> = state
        .current_substeps()
        .iter()
        .enumerate()
        .map(|(idx, substep)| {
            let checked = state.session.checklist().get(step, idx).unwrap_or(false);
            let (mark, color) = if checked {
                ("[x]", theme.success)
            } else {
                ("[ ]", theme.text)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{mark} "), Style::default().fg(color)),
                Span::styled(substep.clone(), Style::default().fg(theme.text)),
            ]))
        })
        .collect();

    let title = format!(" {step} ");
    let list = List::new(items)
        .block(pane_block(&title, state.focus == Focus::Substeps, theme))
        .highlight_style(Style::default().bg(theme.highlight_bg));

    let selected = (state.focus == Focus::Substeps).then_some(state.selected_substep);
    let mut list_state = ListState::default().with_selected(selected);
    f.render_stateful_widget(list, area, &mut list_state);
}

fn render_description(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let text = match state.selected_description() {
        Some(Ok(rendered)) => Paragraph::new(rendered).style(Style::default().fg(theme.text)),
        Some(Err(e)) => Paragraph::new(e).style(Style::default().fg(theme.error)),
        None => Paragraph::new("").style(Style::default().fg(theme.text_muted)),
    };
    let widget = text
        .wrap(Wrap { trim: false })
        .block(pane_block(" Description ", false, theme));
    f.render_widget(widget, area);
}

fn render_note(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let editing = state.active_popup == Some(PopupType::NoteEditor);
    let note = state
        .selected_substep_name()
        .map(|substep| state.session.note(substep))
        .unwrap_or_default();
    let cursor = if editing { "█" } else { "" };
    let title = if editing {
        " Note (Esc to finish) "
    } else {
        " Note "
    };

    let widget = Paragraph::new(format!("{note}{cursor}"))
        .style(Style::default().fg(theme.text))
        .wrap(Wrap { trim: false })
        .block(pane_block(title, editing, theme));
    f.render_widget(widget, area);
}

fn render_popup(f: &mut Frame, popup_type: &PopupType, state: &AppState) {
    match popup_type {
        PopupType::IdentifierForm(form) => {
            let area = centered_rect(60, 35, f.area());
            form.render(f, area, &state.theme, !state.config.ui.mtm_options.is_empty());
        }
        // Edited in place in the note pane
        PopupType::NoteEditor => {}
        PopupType::LoadPrompt(path) => render_load_prompt(f, path, &state.theme),
        PopupType::UnsavedChangesPrompt => render_unsaved_prompt(f, &state.theme),
    }
}

fn render_load_prompt(f: &mut Frame, path: &str, theme: &Theme) {
    let area = centered_rect(70, 25, f.area());
    f.render_widget(Clear, area);

    let text = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Path: ", Style::default().fg(theme.accent)),
            Span::styled(format!("{path}█"), Style::default().fg(theme.text)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  Enter: Load | Esc: Cancel",
            Style::default().fg(theme.text_muted),
        )),
    ];

    let prompt = Paragraph::new(text).block(
        Block::default()
            .title(" Load Session ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.background)),
    );
    f.render_widget(prompt, area);
}

fn render_unsaved_prompt(f: &mut Frame, theme: &Theme) {
    let area = centered_rect(60, 30, f.area());

    f.render_widget(Clear, area);

    let text = vec![
        Line::from(""),
        Line::from("The session changed since the last save."),
        Line::from("The autosave file still holds the latest state."),
        Line::from(""),
        Line::from("  [S] Save and quit"),
        Line::from("  [Q] Quit without saving"),
        Line::from("  [Esc] Cancel"),
    ];

    let prompt = Paragraph::new(text).block(
        Block::default()
            .title(" Unsaved Changes ")
            .borders(Borders::ALL)
            .style(Style::default().fg(theme.warning).bg(theme.background)),
    );

    f.render_widget(prompt, area);
}

/// Render error overlay on top of all other UI elements
fn render_error_overlay(f: &mut Frame, error: &str, theme: &Theme) {
    let area = centered_rect(70, 30, f.area());

    f.render_widget(Clear, area);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(error, Style::default().fg(theme.text))),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter or Esc to dismiss",
            Style::default().fg(theme.text_muted),
        )),
    ];

    let overlay = Paragraph::new(text).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(" Error ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.error))
            .style(Style::default().bg(theme.background)),
    );

    f.render_widget(overlay, area);
}

/// Helper to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThemeMode;
    use crate::parser::catalog::parse_catalog_str;
    use tempfile::TempDir;

    const CATALOG: &str = r#"
steps:
  Power:
    - Cable PDU
    - Power on
  Network:
    - Patch TOR
sub_step_descriptions:
  Cable PDU: "Patch {pdu} for {rack}"
"#;

    fn state_in(dir: &Path) -> AppState {
        let mut config = Config::new();
        config.paths.session_dir = Some(dir.to_path_buf());
        config.ui.theme_mode = ThemeMode::Dark;
        config.ui.mtm_options = vec!["7X06".to_string(), "7X21".to_string()];
        AppState::new(Session::new(parse_catalog_str(CATALOG).unwrap()), config)
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let temp_dir = TempDir::new().unwrap();
        let mut state = state_in(temp_dir.path());

        state.move_up();
        assert_eq!(state.selected_step, 0);
        state.move_down();
        state.move_down();
        assert_eq!(state.selected_step_name(), Some("Network"));

        state.toggle_focus();
        state.move_down();
        assert_eq!(state.selected_substep_name(), Some("Patch TOR"));
    }

    #[test]
    fn test_changing_step_resets_substep() {
        let temp_dir = TempDir::new().unwrap();
        let mut state = state_in(temp_dir.path());

        state.toggle_focus();
        state.move_down();
        assert_eq!(state.selected_substep, 1);
        state.toggle_focus();
        state.move_down();
        assert_eq!(state.selected_substep, 0);
    }

    #[test]
    fn test_toggle_selected_marks_dirty() {
        let temp_dir = TempDir::new().unwrap();
        let mut state = state_in(temp_dir.path());
        state.selected_step = 1;

        state.toggle_selected();
        assert!(state.dirty);
        assert!(state.session.is_step_complete("Network").unwrap());
        state.toggle_selected();
        assert!(!state.session.is_step_complete("Network").unwrap());
    }

    #[test]
    fn test_unmatched_rack_warns_without_error() {
        let temp_dir = TempDir::new().unwrap();
        let mut state = state_in(temp_dir.path());
        let form = IdentifierForm {
            sys: "SYS-1".to_string(),
            rack: "lab-bench".to_string(),
            ..IdentifierForm::default()
        };

        state.apply_identifiers(&form);
        assert!(state.error_message.is_none());
        assert_eq!(state.status_color_override, Some(state.theme.warning));
        assert_eq!(state.session.identifiers().rack, "lab-bench");
    }

    #[test]
    fn test_cycle_mtm_uses_config_options() {
        let temp_dir = TempDir::new().unwrap();
        let mut state = state_in(temp_dir.path());

        state.cycle_mtm();
        assert_eq!(state.session.identifiers().mtm, "7X06");
        state.cycle_mtm();
        assert_eq!(state.session.identifiers().mtm, "7X21");
    }

    #[test]
    fn test_note_editing() {
        let temp_dir = TempDir::new().unwrap();
        let mut state = state_in(temp_dir.path());

        for c in "ok\n".chars() {
            state.edit_note(NoteEdit::Insert(c));
        }
        state.edit_note(NoteEdit::Backspace);
        assert_eq!(state.session.note("Cable PDU"), "ok");
    }

    #[test]
    fn test_description_renders_identifiers() {
        let temp_dir = TempDir::new().unwrap();
        let mut state = state_in(temp_dir.path());
        let form = IdentifierForm {
            sys: "SYS-1".to_string(),
            rack: "fra2-rk5".to_string(),
            ..IdentifierForm::default()
        };
        state.apply_identifiers(&form);

        assert_eq!(
            state.selected_description(),
            Some(Ok("Patch r5pdu for fra2-rk5".to_string()))
        );
    }

    #[test]
    fn test_generate_credentials_from_session_dir() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(MAC_INPUT_FILENAME), "aa:bb:cc:dd:ee:01\n").unwrap();
        std::fs::write(temp_dir.path().join(PASSWORD_INPUT_FILENAME), "Secret001\n").unwrap();

        let mut state = state_in(temp_dir.path());
        state.apply_identifiers(&IdentifierForm {
            sys: "SYS-1".to_string(),
            rack: "rk5".to_string(),
            ..IdentifierForm::default()
        });
        state.generate_credentials();

        assert!(state.error_message.is_none());
        assert!(state.session.info_yaml().contains("rk5-s50-bmc"));
    }

    #[test]
    fn test_generate_credentials_missing_inputs() {
        let temp_dir = TempDir::new().unwrap();
        let mut state = state_in(temp_dir.path());
        state.generate_credentials();
        assert!(state.error_message.is_some());
    }

    #[test]
    fn test_save_clears_dirty_and_load_restores() {
        let temp_dir = TempDir::new().unwrap();
        let mut state = state_in(temp_dir.path());
        state.apply_identifiers(&IdentifierForm {
            sys: "SYS-1".to_string(),
            rack: "rk5".to_string(),
            ..IdentifierForm::default()
        });
        state.toggle_selected();
        assert!(state.save());
        assert!(!state.dirty);

        let mut other = state_in(temp_dir.path());
        other.load(&temp_dir.path().join("SYS-1-rk5.yaml"));
        assert!(other.error_message.is_none());
        assert_eq!(other.session.checklist(), state.session.checklist());
    }

    #[test]
    fn test_default_load_path() {
        let temp_dir = TempDir::new().unwrap();
        let mut state = state_in(temp_dir.path());
        assert!(state
            .default_load_path()
            .ends_with(crate::constants::AUTOSAVE_FILENAME));

        state.apply_identifiers(&IdentifierForm {
            sys: "SYS-1".to_string(),
            rack: "rk5".to_string(),
            ..IdentifierForm::default()
        });
        assert!(state.default_load_path().ends_with("SYS-1-rk5.yaml"));
    }

    #[test]
    fn test_cycle_mtm_keeps_rack_warning() {
        let temp_dir = TempDir::new().unwrap();
        let mut state = state_in(temp_dir.path());
        state.apply_identifiers(&IdentifierForm {
            sys: "SYS-1".to_string(),
            rack: "lab-bench".to_string(),
            ..IdentifierForm::default()
        });

        state.cycle_mtm();
        assert_eq!(state.session.identifiers().mtm, "7X06");
        assert!(state.status_message.contains("rk<number>"));
        assert_eq!(state.status_color_override, Some(state.theme.warning));
    }

    #[test]
    fn test_missing_session_dir_is_created() {
        let temp_dir = TempDir::new().unwrap();
        let session_dir = temp_dir.path().join("sessions").join("fra2");
        let mut state = state_in(&session_dir);

        assert!(session_dir.is_dir());
        state.tick_autosave(Instant::now());
        assert!(state.last_autosave().is_some());
    }

    #[test]
    fn test_failed_autosave_keeps_error_overlay() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let mut state = state_in(&blocker.join("sessions"));

        state.set_error("Failed to write SYS-1-rk5.yaml");
        state.tick_autosave(Instant::now());

        assert_eq!(
            state.error_message.as_deref(),
            Some("Failed to write SYS-1-rk5.yaml")
        );
        assert!(state.status_message.is_empty());
        assert!(state.last_autosave().is_none());
    }

    #[test]
    fn test_autosave_tick_writes_into_session_dir() {
        let temp_dir = TempDir::new().unwrap();
        let mut state = state_in(temp_dir.path());

        state.tick_autosave(Instant::now());
        assert!(state.last_autosave().is_some());
        assert!(temp_dir
            .path()
            .join(crate::constants::AUTOSAVE_FILENAME)
            .exists());
    }
}
