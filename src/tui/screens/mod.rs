//! TUI screen implementations.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::i18n::{Locale, Text, param_message, tr};
use crate::model::ParamError;

pub mod gallery;
pub mod language;
pub mod questionnaire;
pub mod route_entry;
pub mod route_overview;
pub mod stop_reason;

pub use gallery::{GalleryState, draw_gallery};
pub use language::{LanguageState, draw_language};
pub use questionnaire::{QuestionnaireState, draw_questionnaire};
pub use route_entry::{RouteEntryState, draw_route_entry};
pub use route_overview::{RouteOverviewState, draw_route_overview};
pub use stop_reason::{StopReasonState, draw_stop_reason};

/// Full-screen message shown instead of a form whose link is incomplete.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub(crate) fn draw_missing_params(
    err: &ParamError,
    locale: Locale,
    block: Block,
    frame: &mut Frame,
    area: Rect,
) {
    let lines = vec![
        Line::from(Span::styled(
            tr(locale, Text::MissingParamsTitle),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(param_message(locale, err)),
        Line::from(""),
        Line::from(tr(locale, Text::MissingParamsHint)).style(Style::default().fg(Color::DarkGray)),
    ];
    draw_centered(lines, locale, block, frame, area);
}

/// Full-screen summary shown once a submission succeeded.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub(crate) fn draw_completed(
    mut lines: Vec<Line<'static>>,
    locale: Locale,
    block: Block,
    frame: &mut Frame,
    area: Rect,
) {
    if let Some(first) = lines.first_mut() {
        *first = std::mem::take(first).style(Style::default().fg(Color::Green));
    }
    draw_centered(lines, locale, block, frame, area);
}

fn draw_centered(lines: Vec<Line>, locale: Locale, block: Block, frame: &mut Frame, area: Rect) {
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [_top, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        body,
    );
    frame.render_widget(
        Paragraph::new(tr(locale, Text::FooterDone)).style(Style::default().fg(Color::DarkGray)),
        footer,
    );
}
