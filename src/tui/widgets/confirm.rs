//! Yes/no confirmation popup.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::i18n::{Locale, Text, tr};

/// Answer given to a [`ConfirmDialog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

/// A pending yes/no question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmDialog {
    prompt: Text,
}

impl ConfirmDialog {
    pub fn new(prompt: Text) -> Self {
        Self { prompt }
    }

    pub fn prompt(&self) -> Text {
        self.prompt
    }

    /// `y`/Enter answers yes, `n`/Esc answers no; other keys are ignored.
    pub fn handle_key(&self, key: KeyEvent) -> Option<Answer> {
        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(Answer::Yes),
            KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Answer::No),
            _ => None,
        }
    }
}

/// Renders the dialog centered over `area`.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_confirm(dialog: &ConfirmDialog, locale: Locale, frame: &mut Frame, area: Rect) {
    let [row] = Layout::vertical([Constraint::Length(5)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Max(50)])
        .flex(Flex::Center)
        .areas(row);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let lines = vec![
        Line::from(tr(locale, dialog.prompt())).style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from(tr(locale, Text::FooterConfirm)).style(Style::default().fg(Color::DarkGray)),
    ];

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        popup,
    );
}
