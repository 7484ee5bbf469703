//! Stop-reason screen — pick why the vehicle stopped and send it.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use crate::i18n::{Locale, Text, tr, validation_message};
use crate::model::{
    ParamError, StopReason, StopReasonParams, StopReasonResult, StopReasonSubmission,
    ValidationError,
};
use crate::tui::action::{Action, ScreenState};
use crate::tui::flow::FlowPhase;

use super::{draw_completed, draw_missing_params};

/// Label for a stop reason.
pub fn reason_text(reason: StopReason) -> Text {
    match reason {
        StopReason::Rest => Text::ReasonRest,
        StopReason::Personal => Text::ReasonPersonal,
        StopReason::Breakdown => Text::ReasonBreakdown,
    }
}

/// State for the stop-reason screen.
#[derive(Debug, Clone)]
pub struct StopReasonState {
    phase: FlowPhase,
    params: Option<StopReasonParams>,
    /// Index into [`StopReason::all`], or `None` until the user picks one.
    selected: Option<usize>,
    error: Option<ValidationError>,
    result: Option<StopReasonResult>,
}

impl StopReasonState {
    /// Creates the screen from its entry parameters.
    ///
    /// A `reason` hint preselects a reason; an unknown hint is shown as a
    /// validation error and nothing is selected.
    pub fn new(params: Result<StopReasonParams, ParamError>) -> Self {
        let phase = FlowPhase::for_params(&params);
        let params = params.ok();
        let (selected, error) = match params.as_ref().and_then(|p| p.reason.as_deref()) {
            Some(hint) => match hint.parse::<StopReason>() {
                Ok(reason) => (StopReason::all().iter().position(|r| *r == reason), None),
                Err(e) => (None, Some(e)),
            },
            None => (None, None),
        };
        Self {
            phase,
            params,
            selected,
            error,
            result: None,
        }
    }

    pub fn phase(&self) -> &FlowPhase {
        &self.phase
    }

    pub fn params(&self) -> Option<&StopReasonParams> {
        self.params.as_ref()
    }

    /// Returns the currently selected reason.
    pub fn selected(&self) -> Option<StopReason> {
        self.selected.and_then(|i| StopReason::all().get(i).copied())
    }

    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    pub fn result(&self) -> Option<&StopReasonResult> {
        self.result.as_ref()
    }

    /// Records the server's answer and completes the screen.
    pub fn succeed(&mut self, result: StopReasonResult) {
        self.phase.finish(true);
        self.result = Some(result);
    }

    /// Returns to editing after a failed submission.
    pub fn fail(&mut self) {
        self.phase.finish(false);
    }

    fn select_prev(&mut self) {
        self.selected = match self.selected {
            Some(i) if i > 0 => Some(i - 1),
            None => Some(0),
            other => other,
        };
        self.error = None;
    }

    fn select_next(&mut self) {
        self.selected = match self.selected {
            Some(i) if i + 1 < StopReason::all().len() => Some(i + 1),
            None => Some(0),
            other => other,
        };
        self.error = None;
    }

    /// Validates the selection and starts the submission.
    fn submit(&mut self) -> Action {
        let Some(params) = self.params.as_ref() else {
            return Action::None;
        };
        let Some(reason) = self.selected() else {
            if self.error.is_none() {
                self.error = Some(ValidationError::NoReasonSelected);
            }
            return Action::None;
        };
        let submission = StopReasonSubmission {
            reason,
            trip_id: params.trip_id,
            stop_state_id: params.stop_state_id,
        };
        if !self.phase.begin_submit() {
            return Action::None;
        }
        self.error = None;
        Action::SubmitStopReason(submission)
    }
}

impl ScreenState for StopReasonState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match &self.phase {
            FlowPhase::MissingParams(_) | FlowPhase::Completed => match key.code {
                KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => Action::Quit,
                _ => Action::None,
            },
            FlowPhase::Submitting => Action::None,
            FlowPhase::Editing => match key.code {
                KeyCode::Up => {
                    self.select_prev();
                    Action::None
                }
                KeyCode::Down => {
                    self.select_next();
                    Action::None
                }
                KeyCode::Enter => self.submit(),
                KeyCode::Esc => Action::Quit,
                _ => Action::None,
            },
        }
    }
}

/// Renders the stop-reason screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_stop_reason(state: &StopReasonState, locale: Locale, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", tr(locale, Text::StopReasonTitle)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    match state.phase() {
        FlowPhase::MissingParams(err) => {
            draw_missing_params(err, locale, block, frame, area);
            return;
        }
        FlowPhase::Completed => {
            let mut lines = vec![Line::from(tr(locale, Text::StopReasonSaved))];
            if let Some(result) = state.result() {
                lines.push(Line::from(format!(
                    "#{} {}",
                    result.id,
                    tr(locale, reason_text(result.reason))
                )));
                if let Some(at) = result.recorded_at() {
                    lines.push(Line::from(format!(
                        "{}: {}",
                        tr(locale, Text::RecordedAt),
                        at.format("%Y-%m-%d %H:%M")
                    )));
                }
            }
            draw_completed(lines, locale, block, frame, area);
            return;
        }
        FlowPhase::Editing | FlowPhase::Submitting => {}
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [header_area, list_area, error_area, _spacer, footer_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(StopReason::all().len() as u16 + 2),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    if let Some(params) = state.params() {
        let header = vec![
            Line::from(Span::styled(
                tr(locale, Text::StopReasonPrompt),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("{} #{}", tr(locale, Text::TripLabel), params.trip_id))
                .style(Style::default().fg(Color::DarkGray)),
        ];
        frame.render_widget(Paragraph::new(header), header_area);
    }

    let items: Vec<ListItem> = StopReason::all()
        .iter()
        .map(|reason| {
            let chosen = state.selected() == Some(*reason);
            let marker = if chosen { "(•) " } else { "( ) " };
            let style = if chosen {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else {
                Style::default()
            };
            ListItem::new(format!("{marker}{}", tr(locale, reason_text(*reason)))).style(style)
        })
        .collect();
    let list_border = if state.error().is_some() {
        Color::Red
    } else {
        Color::DarkGray
    };
    frame.render_widget(
        List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(list_border)),
        ),
        list_area,
    );

    if let Some(err) = state.error() {
        frame.render_widget(
            Paragraph::new(validation_message(locale, err)).style(Style::default().fg(Color::Red)),
            error_area,
        );
    }

    let footer = if state.phase().is_busy() {
        Paragraph::new(tr(locale, Text::Sending))
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Left)
    } else {
        Paragraph::new(tr(locale, Text::FooterStopReason)).style(Style::default().fg(Color::DarkGray))
    };
    frame.render_widget(footer, footer_area);
}
