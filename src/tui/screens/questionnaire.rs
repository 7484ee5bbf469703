//! Questionnaire screen — describe a planned trip and its destination.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::i18n::{Locale, Text, tr};
use crate::model::{
    ParamError, QuestionnaireParams, QuestionnaireResult, QuestionnaireSubmission, ReasonType,
    parse_latitude, parse_longitude, validate_required,
};
use crate::tui::action::{Action, ScreenState};
use crate::tui::flow::FlowPhase;
use crate::tui::widgets::form::{Form, FormField, ROW_HEIGHT, draw_form};

use super::{draw_completed, draw_missing_params};

/// Field index for the free-text trip reason.
const REASON: usize = 0;
/// Field index for the destination description.
const DESTINATION: usize = 1;
/// Field index for destination latitude.
const LATITUDE: usize = 2;
/// Field index for destination longitude.
const LONGITUDE: usize = 3;

/// Label for a reason type.
pub fn reason_type_text(reason_type: ReasonType) -> Text {
    match reason_type {
        ReasonType::Work => Text::ReasonTypeWork,
        ReasonType::Personal => Text::ReasonTypePersonal,
    }
}

/// State for the questionnaire screen.
#[derive(Debug, Clone)]
pub struct QuestionnaireState {
    phase: FlowPhase,
    start_state_id: Option<i64>,
    reason_type: ReasonType,
    form: Form,
    result: Option<QuestionnaireResult>,
}

impl QuestionnaireState {
    pub fn new(params: Result<QuestionnaireParams, ParamError>) -> Self {
        Self {
            phase: FlowPhase::for_params(&params),
            start_state_id: params.ok().map(|p| p.start_state_id),
            reason_type: ReasonType::default(),
            form: Form::new(vec![
                FormField::new(Text::FieldReason, true),
                FormField::new(Text::FieldDestination, true),
                FormField::decimal(Text::FieldLatitude, true),
                FormField::decimal(Text::FieldLongitude, true),
            ]),
            result: None,
        }
    }

    pub fn phase(&self) -> &FlowPhase {
        &self.phase
    }

    pub fn start_state_id(&self) -> Option<i64> {
        self.start_state_id
    }

    pub fn reason_type(&self) -> ReasonType {
        self.reason_type
    }

    /// Returns a reference to the form for rendering.
    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn result(&self) -> Option<&QuestionnaireResult> {
        self.result.as_ref()
    }

    /// Records the server's answer and completes the screen.
    pub fn succeed(&mut self, result: QuestionnaireResult) {
        self.phase.finish(true);
        self.result = Some(result);
    }

    /// Returns to editing after a failed submission; entered values are kept.
    pub fn fail(&mut self) {
        self.phase.finish(false);
    }

    /// Validates every field and starts the submission.
    fn submit(&mut self) -> Action {
        let Some(start_state_id) = self.start_state_id else {
            return Action::None;
        };
        self.form.clear_errors();

        if let Err(e) = validate_required(self.form.value(REASON)) {
            self.form.set_error(REASON, e);
        }
        if let Err(e) = validate_required(self.form.value(DESTINATION)) {
            self.form.set_error(DESTINATION, e);
        }
        let lat = parse_latitude(self.form.value(LATITUDE));
        if let Err(e) = &lat {
            self.form.set_error(LATITUDE, e.clone());
        }
        let lng = parse_longitude(self.form.value(LONGITUDE));
        if let Err(e) = &lng {
            self.form.set_error(LONGITUDE, e.clone());
        }

        let (Ok(lat), Ok(lng)) = (lat, lng) else {
            return Action::None;
        };
        if self.form.has_errors() {
            return Action::None;
        }

        let submission = match QuestionnaireSubmission::new(
            self.reason_type,
            self.form.value(REASON),
            self.form.value(DESTINATION),
            lat,
            lng,
        ) {
            Ok(submission) => submission,
            Err(e) => {
                self.form.set_error(REASON, e);
                return Action::None;
            }
        };

        if !self.phase.begin_submit() {
            return Action::None;
        }
        Action::SubmitQuestionnaire {
            start_state_id,
            submission,
        }
    }
}

impl ScreenState for QuestionnaireState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match &self.phase {
            FlowPhase::MissingParams(_) | FlowPhase::Completed => match key.code {
                KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => Action::Quit,
                _ => Action::None,
            },
            FlowPhase::Submitting => Action::None,
            FlowPhase::Editing => match key.code {
                KeyCode::Tab | KeyCode::Down => {
                    self.form.focus_next();
                    Action::None
                }
                KeyCode::BackTab | KeyCode::Up => {
                    self.form.focus_prev();
                    Action::None
                }
                KeyCode::Left | KeyCode::Right => {
                    self.reason_type = self.reason_type.toggled();
                    Action::None
                }
                KeyCode::Backspace => {
                    self.form.delete_char();
                    Action::None
                }
                KeyCode::Esc => Action::Quit,
                KeyCode::Enter => self.submit(),
                KeyCode::Char(ch) => {
                    self.form.insert_char(ch);
                    Action::None
                }
                _ => Action::None,
            },
        }
    }
}

/// Renders the questionnaire screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_questionnaire(
    state: &QuestionnaireState,
    locale: Locale,
    frame: &mut Frame,
    area: Rect,
) {
    let block = Block::default()
        .title(format!(" {} ", tr(locale, Text::QuestionnaireTitle)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    match state.phase() {
        FlowPhase::MissingParams(err) => {
            draw_missing_params(err, locale, block, frame, area);
            return;
        }
        FlowPhase::Completed => {
            let mut lines = vec![Line::from(tr(locale, Text::QuestionnaireSaved))];
            if let Some(result) = state.result() {
                lines.push(Line::from(format!(
                    "#{} {} → {}",
                    result.id,
                    tr(locale, reason_type_text(result.submission.reason_type)),
                    result.submission.destination_description
                )));
                lines.push(Line::from(result.status.clone()));
            }
            draw_completed(lines, locale, block, frame, area);
            return;
        }
        FlowPhase::Editing | FlowPhase::Submitting => {}
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [type_area, form_area, _spacer, footer_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(ROW_HEIGHT * state.form().fields().len() as u16),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    let mut spans = vec![Span::raw(format!("{}: ", tr(locale, Text::ReasonTypeLabel)))];
    for reason_type in ReasonType::all() {
        let label = format!(" {} ", tr(locale, reason_type_text(*reason_type)));
        if *reason_type == state.reason_type() {
            spans.push(Span::styled(
                format!("◀{label}▶"),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(label, Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), type_area);

    draw_form(state.form(), locale, frame, form_area);

    let footer = if state.phase().is_busy() {
        Paragraph::new(tr(locale, Text::Sending)).style(Style::default().fg(Color::Yellow))
    } else {
        Paragraph::new(tr(locale, Text::FooterQuestionnaire))
            .style(Style::default().fg(Color::DarkGray))
    };
    frame.render_widget(footer, footer_area);
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    use super::*;
    use crate::model::ValidationError;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_string(state: &mut QuestionnaireState, s: &str) {
        for ch in s.chars() {
            state.handle_key(press(KeyCode::Char(ch)));
        }
    }

    fn make_state() -> QuestionnaireState {
        QuestionnaireState::new(Ok(QuestionnaireParams { start_state_id: 77 }))
    }

    fn fill(state: &mut QuestionnaireState, reason: &str, dest: &str, lat: &str, lng: &str) {
        for (i, value) in [reason, dest, lat, lng].into_iter().enumerate() {
            if i > 0 {
                state.handle_key(press(KeyCode::Tab));
            }
            type_string(state, value);
        }
    }

    #[test]
    fn defaults_to_work() {
        let state = make_state();
        assert_eq!(state.reason_type(), ReasonType::Work);
        assert!(state.phase().is_editing());
        assert_eq!(state.start_state_id(), Some(77));
    }

    #[test]
    fn arrows_toggle_reason_type() {
        let mut state = make_state();
        state.handle_key(press(KeyCode::Right));
        assert_eq!(state.reason_type(), ReasonType::Personal);
        state.handle_key(press(KeyCode::Left));
        assert_eq!(state.reason_type(), ReasonType::Work);
    }

    #[test]
    fn coordinate_fields_reject_letters() {
        let mut state = make_state();
        state.handle_key(press(KeyCode::Tab));
        state.handle_key(press(KeyCode::Tab));
        type_string(&mut state, "4x1.5");
        assert_eq!(state.form().value(LATITUDE), "41.5");
    }

    #[test]
    fn blank_form_marks_every_field() {
        let mut state = make_state();
        assert_eq!(state.handle_key(press(KeyCode::Enter)), Action::None);
        for field in [REASON, DESTINATION, LATITUDE, LONGITUDE] {
            assert_eq!(state.form().error(field), Some(&ValidationError::Blank));
        }
        assert!(state.phase().is_editing());
    }

    #[test]
    fn out_of_range_latitude_blocks_submit() {
        let mut state = make_state();
        fill(&mut state, "Client visit", "Chilonzor", "91", "69.2");
        assert_eq!(state.handle_key(press(KeyCode::Enter)), Action::None);
        assert_eq!(
            state.form().error(LATITUDE),
            Some(&ValidationError::LatitudeOutOfRange(91.0))
        );
        assert_eq!(state.form().error(LONGITUDE), None);
    }

    #[test]
    fn lone_minus_is_not_a_number() {
        let mut state = make_state();
        fill(&mut state, "Client visit", "Chilonzor", "41.3", "-");
        state.handle_key(press(KeyCode::Enter));
        assert_eq!(
            state.form().error(LONGITUDE),
            Some(&ValidationError::NotANumber("-".into()))
        );
    }

    #[test]
    fn valid_form_submits_trimmed_payload() {
        let mut state = make_state();
        state.handle_key(press(KeyCode::Right));
        fill(&mut state, "  Dentist ", "Yunusobod", "41.36", "-69.28");
        let action = state.handle_key(press(KeyCode::Enter));
        assert_eq!(
            action,
            Action::SubmitQuestionnaire {
                start_state_id: 77,
                submission: QuestionnaireSubmission {
                    reason_type: ReasonType::Personal,
                    reason: "Dentist".into(),
                    destination_description: "Yunusobod".into(),
                    destination_lat: 41.36,
                    destination_lng: -69.28,
                },
            }
        );
        assert!(state.phase().is_busy());
    }

    #[test]
    fn keys_ignored_while_submitting() {
        let mut state = make_state();
        fill(&mut state, "Visit", "Depot", "1", "2");
        state.handle_key(press(KeyCode::Enter));
        assert_eq!(state.handle_key(press(KeyCode::Enter)), Action::None);
        state.handle_key(press(KeyCode::Char('z')));
        state.handle_key(press(KeyCode::Right));
        assert_eq!(state.reason_type(), ReasonType::Work);
    }

    #[test]
    fn failure_keeps_values() {
        let mut state = make_state();
        fill(&mut state, "Visit", "Depot", "1", "2");
        state.handle_key(press(KeyCode::Enter));
        state.fail();
        assert!(state.phase().is_editing());
        assert_eq!(state.form().value(DESTINATION), "Depot");
    }

    #[test]
    fn missing_start_state_never_submits() {
        let mut state = QuestionnaireState::new(Err(ParamError::Missing("start_state_id")));
        assert_eq!(state.handle_key(press(KeyCode::Char('a'))), Action::None);
        assert_eq!(state.handle_key(press(KeyCode::Enter)), Action::Quit);
        assert_eq!(state.start_state_id(), None);
    }
}
