//! Identifier entry form (sys, rack, MTM).

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::Theme;
use crate::models::IdentifierSet;
use crate::session::IdentifierInput;

/// Field currently receiving keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    /// Ticket / system reference
    #[default]
    Sys,
    /// Full rack name
    Rack,
    /// Machine type/model
    Mtm,
}

impl FormField {
    const fn next(self) -> Self {
        match self {
            Self::Sys => Self::Rack,
            Self::Rack => Self::Mtm,
            Self::Mtm => Self::Sys,
        }
    }

    const fn previous(self) -> Self {
        match self {
            Self::Sys => Self::Mtm,
            Self::Rack => Self::Sys,
            Self::Mtm => Self::Rack,
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Sys => "Sys-Ticket",
            Self::Rack => "Full Rack Name",
            Self::Mtm => "MTM",
        }
    }
}

/// Editable copy of the raw identifier input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierForm {
    /// Ticket / system reference
    pub sys: String,
    /// Full rack name
    pub rack: String,
    /// Machine type/model
    pub mtm: String,
    /// Focused field
    pub active: FormField,
}

impl IdentifierForm {
    /// Form prefilled from the session's current identifiers.
    pub fn from_identifiers(ids: &IdentifierSet) -> Self {
        Self {
            sys: ids.sys.clone(),
            rack: ids.rack.clone(),
            mtm: ids.mtm.clone(),
            active: FormField::Sys,
        }
    }

    /// Mutable buffer of the focused field.
    pub fn active_field_mut(&mut self) -> &mut String {
        match self.active {
            FormField::Sys => &mut self.sys,
            FormField::Rack => &mut self.rack,
            FormField::Mtm => &mut self.mtm,
        }
    }

    /// Moves focus to the next field.
    pub fn next_field(&mut self) {
        self.active = self.active.next();
    }

    /// Moves focus to the previous field.
    pub fn previous_field(&mut self) {
        self.active = self.active.previous();
    }

    /// Replaces the MTM with the option after the current one, wrapping around.
    pub fn cycle_mtm(&mut self, options: &[String]) {
        if let Some(next) = next_option(options, &self.mtm) {
            self.mtm = next.to_string();
        }
    }

    /// Input handed to `Session::confirm`.
    pub fn to_input(&self) -> IdentifierInput {
        IdentifierInput::new(self.sys.trim(), self.rack.trim(), self.mtm.trim())
    }

    /// Renders the form as a centered popup.
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme, has_mtm_options: bool) {
        f.render_widget(Clear, area);

        let mut lines = vec![Line::from("")];
        for field in [FormField::Sys, FormField::Rack, FormField::Mtm] {
            let value = match field {
                FormField::Sys => &self.sys,
                FormField::Rack => &self.rack,
                FormField::Mtm => &self.mtm,
            };
            let focused = field == self.active;
            let label_style = if focused {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            let cursor = if focused { "█" } else { "" };
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<16}", field.label()), label_style),
                Span::styled(format!("{value}{cursor}"), Style::default().fg(theme.text)),
            ]));
        }
        lines.push(Line::from(""));

        let mut hint = String::from("  Tab/↑↓: Field | Enter: Confirm | Esc: Cancel");
        if has_mtm_options {
            hint.push_str(" | Ctrl+N: Next MTM");
        }
        lines.push(Line::from(Span::styled(
            hint,
            Style::default().fg(theme.text_muted),
        )));

        let form = Paragraph::new(lines).block(
            Block::default()
                .title(" Identifiers ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.primary))
                .style(Style::default().bg(theme.background)),
        );
        f.render_widget(form, area);
    }
}

/// Option following `current` in `options`, or the first one when `current`
/// is not listed. `None` when there are no options.
pub fn next_option<'a>(options: &'a [String], current: &str) -> Option<&'a str> {
    if options.is_empty() {
        return None;
    }
    let next = options
        .iter()
        .position(|option| option == current)
        .map_or(0, |idx| (idx + 1) % options.len());
    Some(options[next].as_str())
}
