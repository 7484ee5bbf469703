use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::{SubmitError, Submitter};
use crate::config::Config;
use crate::host::MiniAppHost;
use crate::i18n::{LocaleContext, Text};
use crate::model::{
    EntryLink, ParamError, QuestionnaireParams, QuestionnaireResult, RoutePlan, StopReasonParams,
    StopReasonResult,
};

use super::action::{Action, ScreenState};
use super::error::AppError;
use super::flow::Ticket;
use super::screens::{
    GalleryState, LanguageState, QuestionnaireState, RouteEntryState, RouteOverviewState,
    StopReasonState, draw_gallery, draw_language, draw_questionnaire, draw_route_entry,
    draw_route_overview, draw_stop_reason,
};
use super::widgets::{Toast, draw_toast};

/// How often toasts and the close timer are checked.
const TICK_RATE: Duration = Duration::from_millis(250);

/// Navigation targets, with the payload each screen is opened with.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    /// Choose and send a stop reason.
    StopReason(Result<StopReasonParams, ParamError>),
    /// Answer the trip questionnaire.
    Questionnaire(Result<QuestionnaireParams, ParamError>),
    /// Add a leg to the route.
    RouteEntry(RoutePlan),
    /// Review the route.
    RouteOverview(RoutePlan),
    /// Switch the interface language.
    Language,
    /// Browse guide images.
    Gallery,
}

impl Screen {
    /// Name used in log lines.
    fn label(&self) -> &'static str {
        match self {
            Self::StopReason(_) => "stop-reason",
            Self::Questionnaire(_) => "questionnaire",
            Self::RouteEntry(_) => "route-entry",
            Self::RouteOverview(_) => "route-overview",
            Self::Language => "language",
            Self::Gallery => "gallery",
        }
    }
}

impl From<EntryLink> for Screen {
    fn from(link: EntryLink) -> Self {
        match link {
            EntryLink::StopReason(params) => Screen::StopReason(params),
            EntryLink::Questionnaire(params) => Screen::Questionnaire(params),
            EntryLink::Route => Screen::RouteEntry(RoutePlan::new()),
            EntryLink::Language => Screen::Language,
            EntryLink::Gallery => Screen::Gallery,
        }
    }
}

/// State of the screen being shown.
#[derive(Debug, Clone)]
enum ActiveScreen {
    StopReason(StopReasonState),
    Questionnaire(QuestionnaireState),
    RouteEntry(RouteEntryState),
    RouteOverview(RouteOverviewState),
    Language(LanguageState),
    Gallery(GalleryState),
}

impl ActiveScreen {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match self {
            Self::StopReason(s) => s.handle_key(key),
            Self::Questionnaire(s) => s.handle_key(key),
            Self::RouteEntry(s) => s.handle_key(key),
            Self::RouteOverview(s) => s.handle_key(key),
            Self::Language(s) => s.handle_key(key),
            Self::Gallery(s) => s.handle_key(key),
        }
    }
}

/// Server answer for one submission.
#[derive(Debug)]
enum Outcome {
    StopReason(Result<StopReasonResult, SubmitError>),
    Questionnaire(Result<QuestionnaireResult, SubmitError>),
}

/// A finished submission, sent from its task back to the event loop.
#[derive(Debug)]
struct Completion {
    ticket: Ticket,
    outcome: Outcome,
}

/// Top-level application state.
pub struct App {
    screen: ActiveScreen,
    /// Screen to return to when the language or gallery screen is left.
    stashed: Option<ActiveScreen>,
    locale: LocaleContext,
    submitter: Arc<dyn Submitter>,
    host: Box<dyn MiniAppHost>,
    gallery: Vec<String>,
    toast: Option<Toast>,
    in_flight: Option<Ticket>,
    next_ticket: u64,
    close_delay: Duration,
    close_at: Option<Instant>,
    outcome_tx: mpsc::UnboundedSender<Completion>,
    outcome_rx: Option<mpsc::UnboundedReceiver<Completion>>,
    should_quit: bool,
}

impl App {
    /// Creates the app on `screen` and tells the host it is ready.
    pub fn new(
        screen: Screen,
        config: &Config,
        submitter: Arc<dyn Submitter>,
        mut host: Box<dyn MiniAppHost>,
    ) -> Self {
        host.ready();
        host.expand();
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        let locale = LocaleContext::new(config.locale);
        let gallery = config.gallery.clone();
        info!(screen = screen.label(), locale = %config.locale, "starting");
        Self {
            screen: Self::open(screen, locale, &gallery),
            stashed: None,
            locale,
            submitter,
            host,
            gallery,
            toast: None,
            in_flight: None,
            next_ticket: 0,
            close_delay: config.close_delay(),
            close_at: None,
            outcome_tx,
            outcome_rx: Some(outcome_rx),
            should_quit: false,
        }
    }

    fn open(screen: Screen, locale: LocaleContext, gallery: &[String]) -> ActiveScreen {
        match screen {
            Screen::StopReason(params) => ActiveScreen::StopReason(StopReasonState::new(params)),
            Screen::Questionnaire(params) => {
                ActiveScreen::Questionnaire(QuestionnaireState::new(params))
            }
            Screen::RouteEntry(plan) => ActiveScreen::RouteEntry(RouteEntryState::new(plan)),
            Screen::RouteOverview(plan) => {
                ActiveScreen::RouteOverview(RouteOverviewState::new(plan))
            }
            Screen::Language => ActiveScreen::Language(LanguageState::new(locale.locale())),
            Screen::Gallery => ActiveScreen::Gallery(GalleryState::new(gallery.to_vec())),
        }
    }

    /// Main event loop: draw, then wait for a terminal event, a submission
    /// result or a tick.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub async fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut outcomes = self.outcome_rx.take().ok_or(AppError::AlreadyRunning)?;
        let mut events = EventStream::new();
        let mut ticks = tokio::time::interval(TICK_RATE);

        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            tokio::select! {
                event = events.next() => match event {
                    Some(Ok(event)) => self.handle_event(event),
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },
                Some(completion) = outcomes.recv() => {
                    self.apply_completion(completion, Instant::now());
                }
                _ = ticks.tick() => self.on_tick(Instant::now()),
            }
        }
        Ok(())
    }

    /// Routes a terminal event. Mouse events only matter to the gallery.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => {
                if let ActiveScreen::Gallery(gallery) = &mut self.screen {
                    gallery.handle_mouse(mouse);
                }
            }
            _ => {}
        }
    }

    /// Handles a key event: global keys first, then screen-specific.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit();
            }
            KeyCode::F(2) => self.open_overlay(Screen::Language),
            KeyCode::F(3) => self.open_overlay(Screen::Gallery),
            _ => {
                let action = self.screen.handle_key(key);
                self.apply(action);
            }
        }
    }

    /// Applies an [`Action`] returned by a screen.
    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(screen) => self.navigate(screen),
            Action::Back => self.back(),
            Action::SubmitStopReason(submission) => {
                let ticket = self.begin_submission();
                info!(
                    ticket = ticket.0,
                    trip_id = submission.trip_id,
                    stop_state_id = submission.stop_state_id,
                    reason = %submission.reason,
                    "submitting stop reason"
                );
                let submitter = Arc::clone(&self.submitter);
                let tx = self.outcome_tx.clone();
                tokio::spawn(async move {
                    let result = submitter.submit_stop_reason(&submission).await;
                    let _ = tx.send(Completion {
                        ticket,
                        outcome: Outcome::StopReason(result),
                    });
                });
            }
            Action::SubmitQuestionnaire {
                start_state_id,
                submission,
            } => {
                let ticket = self.begin_submission();
                info!(
                    ticket = ticket.0,
                    start_state_id,
                    reason_type = %submission.reason_type,
                    "submitting questionnaire"
                );
                let submitter = Arc::clone(&self.submitter);
                let tx = self.outcome_tx.clone();
                tokio::spawn(async move {
                    let result = submitter
                        .submit_questionnaire(start_state_id, &submission)
                        .await;
                    let _ = tx.send(Completion {
                        ticket,
                        outcome: Outcome::Questionnaire(result),
                    });
                });
            }
            Action::SetLocale(locale) => {
                if self.locale.set(locale) {
                    info!(locale = %locale, "locale changed");
                }
                if self.stashed.is_some() {
                    self.back();
                }
            }
            Action::FinishRoute(plan) => {
                info!(points = plan.len(), "route finished");
                self.succeed(Text::RouteSaved, Instant::now());
            }
            Action::Quit => self.quit(),
        }
    }

    fn begin_submission(&mut self) -> Ticket {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.in_flight = Some(ticket);
        ticket
    }

    /// Resolves a submission on the screen that started it.
    ///
    /// Results whose ticket is no longer in flight belong to a screen that
    /// has been left and are dropped.
    fn apply_completion(&mut self, completion: Completion, now: Instant) {
        if self.in_flight != Some(completion.ticket) {
            debug!(ticket = completion.ticket.0, "ignoring late submission result");
            return;
        }
        self.in_flight = None;

        let resolved = match (completion.outcome, &mut self.screen) {
            (Outcome::StopReason(result), ActiveScreen::StopReason(state)) => match result {
                Ok(saved) => {
                    info!(id = saved.id, trip_id = saved.trip_id, "stop reason saved");
                    state.succeed(saved);
                    Ok(Text::StopReasonSaved)
                }
                Err(e) => {
                    state.fail();
                    Err(e)
                }
            },
            (Outcome::Questionnaire(result), ActiveScreen::Questionnaire(state)) => match result {
                Ok(saved) => {
                    info!(id = saved.id, status = %saved.status, "questionnaire saved");
                    state.succeed(saved);
                    Ok(Text::QuestionnaireSaved)
                }
                Err(e) => {
                    state.fail();
                    Err(e)
                }
            },
            (outcome, _) => {
                debug!(?outcome, "submission result does not match the active screen");
                return;
            }
        };

        match resolved {
            Ok(text) => self.succeed(text, now),
            Err(e) => {
                warn!(error = %e, status = ?e.status(), "submission failed");
                self.toast = Some(Toast::error(e.user_message(self.locale.locale()), now));
            }
        }
    }

    /// Shows a success toast and, when embedded, schedules the host close.
    fn succeed(&mut self, text: Text, now: Instant) {
        self.toast = Some(Toast::success(self.locale.tr(text), now));
        if self.host.is_embedded() {
            self.close_at = Some(now + self.close_delay);
            info!(
                delay_ms = u64::try_from(self.close_delay.as_millis()).unwrap_or(u64::MAX),
                "closing after success"
            );
        }
    }

    /// Expires the toast and closes the host once the close delay is over.
    pub fn on_tick(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired(now)) {
            self.toast = None;
        }
        if let Some(at) = self.close_at
            && now >= at
        {
            self.close_at = None;
            self.quit();
        }
    }

    fn navigate(&mut self, screen: Screen) {
        info!(screen = screen.label(), "navigate");
        if let Some(ticket) = self.in_flight.take() {
            debug!(ticket = ticket.0, "leaving screen with a submission in flight");
        }
        self.stashed = None;
        self.host.set_back_button(false);
        self.screen = Self::open(screen, self.locale, &self.gallery);
    }

    /// Opens the language or gallery screen on top of the current one.
    fn open_overlay(&mut self, screen: Screen) {
        if self.in_flight.is_some() {
            return;
        }
        info!(screen = screen.label(), "open");
        let overlay = Self::open(screen, self.locale, &self.gallery);
        let previous = std::mem::replace(&mut self.screen, overlay);
        if self.stashed.is_none() {
            self.stashed = Some(previous);
        }
        self.host.set_back_button(true);
    }

    fn back(&mut self) {
        match self.stashed.take() {
            Some(previous) => {
                self.screen = previous;
                self.host.set_back_button(false);
            }
            None => self.quit(),
        }
    }

    fn quit(&mut self) {
        if self.host.is_embedded() {
            self.host.close();
        }
        self.should_quit = true;
    }

    /// Renders the active screen with the title bar and toast line.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        let locale = self.locale.locale();
        let [title_area, body, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let title = Line::from(vec![
            Span::styled(
                format!(" {} ", self.locale.tr(Text::AppTitle)),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{} {}", locale.flag(), locale.code()),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(Paragraph::new(title), title_area);

        match &self.screen {
            ActiveScreen::StopReason(s) => draw_stop_reason(s, locale, frame, body),
            ActiveScreen::Questionnaire(s) => draw_questionnaire(s, locale, frame, body),
            ActiveScreen::RouteEntry(s) => draw_route_entry(s, locale, frame, body),
            ActiveScreen::RouteOverview(s) => draw_route_overview(s, locale, frame, body),
            ActiveScreen::Language(s) => draw_language(s, locale, frame, body),
            ActiveScreen::Gallery(s) => draw_gallery(s, locale, frame, body),
        }

        self.draw_status(frame, status_area);
    }

    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw_status(&self, frame: &mut Frame, area: Rect) {
        if let Some(toast) = &self.toast {
            draw_toast(toast, frame, area);
        } else if self.close_at.is_some() {
            frame.render_widget(
                Paragraph::new(self.locale.tr(Text::ClosingSoon))
                    .style(Style::default().fg(Color::DarkGray)),
                area,
            );
        }
    }

    /// Returns `true` while a submission is in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns the toast currently shown, if any.
    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    /// Returns the active locale.
    pub fn locale(&self) -> LocaleContext {
        self.locale
    }
}
