//! Route entry screen — add one leg to the route being planned.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::i18n::{Locale, Text, tr};
use crate::model::{RoutePlan, RoutePoint, validate_required};
use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;
use crate::tui::widgets::form::{Form, FormField, ROW_HEIGHT, draw_form};

/// Field index for the destination.
const TO: usize = 0;
/// Field index for the reason of the leg.
const REASON: usize = 1;

/// State for the route entry screen.
#[derive(Debug, Clone)]
pub struct RouteEntryState {
    plan: RoutePlan,
    form: Form,
}

impl RouteEntryState {
    /// Starts a new leg on top of `plan`.
    pub fn new(plan: RoutePlan) -> Self {
        Self {
            plan,
            form: Form::new(vec![
                FormField::new(Text::FieldTo, true),
                FormField::new(Text::FieldReason, true),
            ]),
        }
    }

    /// Origin of the leg being entered.
    pub fn origin(&self) -> &str {
        self.plan.next_origin()
    }

    pub fn plan(&self) -> &RoutePlan {
        &self.plan
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Validates the leg and hands the extended plan to the overview.
    fn submit(&mut self) -> Action {
        self.form.clear_errors();
        if let Err(e) = validate_required(self.form.value(TO)) {
            self.form.set_error(TO, e);
        }
        if let Err(e) = validate_required(self.form.value(REASON)) {
            self.form.set_error(REASON, e);
        }
        if self.form.has_errors() {
            return Action::None;
        }

        match RoutePoint::new(self.origin(), self.form.value(TO), self.form.value(REASON)) {
            Ok(point) => {
                let mut plan = self.plan.clone();
                plan.push(point);
                Action::Navigate(Screen::RouteOverview(plan))
            }
            Err(e) => {
                self.form.set_error(TO, e);
                Action::None
            }
        }
    }
}

impl ScreenState for RouteEntryState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.form.focus_next();
                Action::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.form.focus_prev();
                Action::None
            }
            KeyCode::Backspace => {
                self.form.delete_char();
                Action::None
            }
            KeyCode::Esc if self.plan.is_empty() => Action::Quit,
            KeyCode::Esc => Action::Navigate(Screen::RouteOverview(self.plan.clone())),
            KeyCode::Enter => self.submit(),
            KeyCode::Char(ch) => {
                self.form.insert_char(ch);
                Action::None
            }
            _ => Action::None,
        }
    }
}

/// Renders the route entry screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_route_entry(state: &RouteEntryState, locale: Locale, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", tr(locale, Text::RouteEntryTitle)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [origin_area, form_area, _spacer, footer_area] = Layout::vertical([
        Constraint::Length(ROW_HEIGHT),
        Constraint::Length(ROW_HEIGHT * state.form().fields().len() as u16),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    // Origin is derived from the plan and cannot be edited
    let origin = Paragraph::new(Line::from(Span::styled(
        state.origin(),
        Style::default().fg(Color::White),
    )))
    .block(
        Block::default()
            .title(tr(locale, Text::FieldFrom))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(origin, origin_area);

    draw_form(state.form(), locale, frame, form_area);

    let footer = Paragraph::new(tr(locale, Text::FooterRouteEntry))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
