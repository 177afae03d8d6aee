//! Status bar widget for displaying status messages, autosave time and help

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{AppState, Focus, PopupType, Theme};

/// Key hints for the main screen.
const MAIN_HINTS: &[(&str, &str)] = &[
    ("Tab", "Pane"),
    ("Space", "Toggle"),
    ("i", "Identifiers"),
    ("m", "MTM"),
    ("n", "Note"),
    ("g", "Generate"),
    ("y", "Copy"),
    ("s", "Save"),
    ("o", "Load"),
    ("q", "Quit"),
];

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar with contextual help
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let mut status_text: Vec<Line> = Vec::new();

        // First line: status message or the focus hint
        if state.status_message.is_empty() {
            let hint = match state.focus {
                Focus::Steps => "Select a step, Tab to work through its substeps",
                Focus::Substeps => "Space toggles the highlighted substep",
            };
            status_text.push(Line::from(Span::styled(
                hint,
                Style::default().fg(theme.text_muted),
            )));
        } else {
            let style = state
                .status_color_override
                .map_or_else(Style::default, |color| Style::default().fg(color));
            status_text.push(Line::from(Span::styled(
                state.status_message.as_str(),
                style,
            )));
        }

        status_text.push(Self::autosave_line(state, theme));
        status_text.push(Self::help_line(state, theme));

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(theme.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Status ")
                    .style(Style::default().bg(theme.background)),
            );

        f.render_widget(status, area);
    }

    fn autosave_line(state: &AppState, theme: &Theme) -> Line<'static> {
        let value = if !state.config.autosave.enabled {
            Span::styled("disabled", Style::default().fg(theme.text_muted))
        } else if let Some(saved_at) = state.last_autosave() {
            Span::styled(
                saved_at.format("%H:%M:%S").to_string(),
                Style::default().fg(theme.success),
            )
        } else {
            Span::styled("pending", Style::default().fg(theme.text_muted))
        };

        Line::from(vec![
            Span::styled("Autosave: ", Style::default().fg(theme.primary)),
            value,
            Span::styled(
                format!("  ({})", state.autosaver.path().display()),
                Style::default().fg(theme.text_muted),
            ),
        ])
    }

    fn help_line(state: &AppState, theme: &Theme) -> Line<'static> {
        let hints: &[(&str, &str)] = match &state.active_popup {
            Some(PopupType::IdentifierForm(_)) => &[
                ("Tab", "Next field"),
                ("Ctrl+N", "Next MTM"),
                ("Enter", "Confirm"),
                ("Esc", "Cancel"),
            ],
            Some(PopupType::NoteEditor) => &[("Enter", "New line"), ("Esc", "Done")],
            Some(PopupType::LoadPrompt(_)) => &[("Enter", "Load"), ("Esc", "Cancel")],
            Some(PopupType::UnsavedChangesPrompt) => {
                &[("S", "Save and quit"), ("Q", "Quit"), ("Esc", "Cancel")]
            }
            None => MAIN_HINTS,
        };

        let mut spans: Vec<Span<'static>> = Vec::new();
        spans.push(Span::styled("Help: ", Style::default().fg(theme.primary)));
        for (i, (key, action)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" | "));
            }
            spans.push(Span::styled(
                (*key).to_string(),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(": "));
            spans.push(Span::raw((*action).to_string()));
        }

        Line::from(spans)
    }
}
