//! Route overview screen — review the planned legs, then finish or discard.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};

use crate::i18n::{Locale, Text, tr};
use crate::model::RoutePlan;
use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;
use crate::tui::widgets::confirm::{Answer, ConfirmDialog, draw_confirm};

/// State for the route overview screen.
#[derive(Debug, Clone)]
pub struct RouteOverviewState {
    plan: RoutePlan,
    confirm: Option<ConfirmDialog>,
    finished: bool,
}

impl RouteOverviewState {
    pub fn new(plan: RoutePlan) -> Self {
        Self {
            plan,
            confirm: None,
            finished: false,
        }
    }

    pub fn plan(&self) -> &RoutePlan {
        &self.plan
    }

    /// The question currently asked, if any.
    pub fn confirm(&self) -> Option<&ConfirmDialog> {
        self.confirm.as_ref()
    }

    /// Whether the route was confirmed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn answer(&mut self, dialog: ConfirmDialog, answer: Answer) -> Action {
        self.confirm = None;
        match (dialog.prompt(), answer) {
            (_, Answer::No) => Action::None,
            (Text::ConfirmFinishRoute, Answer::Yes) => {
                self.finished = true;
                Action::FinishRoute(self.plan.clone())
            }
            (Text::ConfirmDiscardRoute, Answer::Yes) => Action::Quit,
            (_, Answer::Yes) => Action::None,
        }
    }
}

impl ScreenState for RouteOverviewState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        if self.finished {
            return match key.code {
                KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => Action::Quit,
                _ => Action::None,
            };
        }
        if let Some(dialog) = self.confirm {
            return match dialog.handle_key(key) {
                Some(answer) => self.answer(dialog, answer),
                None => Action::None,
            };
        }

        match key.code {
            KeyCode::Char('a') => Action::Navigate(Screen::RouteEntry(self.plan.clone())),
            KeyCode::Backspace => {
                self.plan.pop();
                Action::None
            }
            KeyCode::Enter if !self.plan.is_empty() => {
                self.confirm = Some(ConfirmDialog::new(Text::ConfirmFinishRoute));
                Action::None
            }
            KeyCode::Esc | KeyCode::Char('q') if self.plan.is_empty() => Action::Quit,
            KeyCode::Esc | KeyCode::Char('q') => {
                self.confirm = Some(ConfirmDialog::new(Text::ConfirmDiscardRoute));
                Action::None
            }
            _ => Action::None,
        }
    }
}

/// Renders the route overview screen, with its confirm dialog on top.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_route_overview(
    state: &RouteOverviewState,
    locale: Locale,
    frame: &mut Frame,
    area: Rect,
) {
    let block = Block::default()
        .title(format!(" {} ", tr(locale, Text::RouteOverviewTitle)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [table_area, footer_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(inner);

    if state.plan().is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(tr(locale, Text::RouteEmpty)),
        ])
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, table_area);
    } else {
        let header = Row::new(vec![
            "#",
            tr(locale, Text::FieldFrom),
            tr(locale, Text::FieldTo),
            tr(locale, Text::FieldReason),
        ])
        .style(Style::default().add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = state
            .plan()
            .points()
            .iter()
            .enumerate()
            .map(|(i, point)| {
                Row::new(vec![
                    (i + 1).to_string(),
                    point.from.clone(),
                    point.to.clone(),
                    point.reason.clone(),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(3),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Min(10),
        ];
        frame.render_widget(Table::new(rows, widths).header(header), table_area);
    }

    let footer_text = if state.is_finished() {
        tr(locale, Text::FooterDone)
    } else {
        tr(locale, Text::FooterRouteOverview)
    };
    frame.render_widget(
        Paragraph::new(footer_text).style(Style::default().fg(Color::DarkGray)),
        footer_area,
    );

    if let Some(dialog) = state.confirm() {
        draw_confirm(dialog, locale, frame, area);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::model::{DEFAULT_ORIGIN, RoutePoint};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn two_legs() -> RoutePlan {
        let mut plan = RoutePlan::new();
        plan.push(RoutePoint::new(DEFAULT_ORIGIN, "Warehouse", "Pickup").unwrap());
        plan.push(RoutePoint::new("Warehouse", "Client", "Delivery").unwrap());
        plan
    }

    fn render(state: &RouteOverviewState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 14)).unwrap();
        terminal
            .draw(|frame| draw_route_overview(state, Locale::En, frame, frame.area()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn a_opens_entry_with_current_plan() {
        let mut state = RouteOverviewState::new(two_legs());
        assert_eq!(
            state.handle_key(press(KeyCode::Char('a'))),
            Action::Navigate(Screen::RouteEntry(two_legs()))
        );
    }

    #[test]
    fn backspace_removes_last_leg() {
        let mut state = RouteOverviewState::new(two_legs());
        state.handle_key(press(KeyCode::Backspace));
        assert_eq!(state.plan().len(), 1);
        assert_eq!(state.plan().next_origin(), "Warehouse");
    }

    #[test]
    fn enter_on_empty_plan_does_nothing() {
        let mut state = RouteOverviewState::new(RoutePlan::new());
        assert_eq!(state.handle_key(press(KeyCode::Enter)), Action::None);
        assert!(state.confirm().is_none());
    }

    #[test]
    fn finish_requires_confirmation() {
        let mut state = RouteOverviewState::new(two_legs());
        assert_eq!(state.handle_key(press(KeyCode::Enter)), Action::None);
        assert_eq!(
            state.confirm().map(|d| d.prompt()),
            Some(Text::ConfirmFinishRoute)
        );
        assert_eq!(
            state.handle_key(press(KeyCode::Char('y'))),
            Action::FinishRoute(two_legs())
        );
        assert!(state.is_finished());
        assert!(state.confirm().is_none());
    }

    #[test]
    fn declining_finish_keeps_editing() {
        let mut state = RouteOverviewState::new(two_legs());
        state.handle_key(press(KeyCode::Enter));
        assert_eq!(state.handle_key(press(KeyCode::Char('n'))), Action::None);
        assert!(!state.is_finished());
        assert_eq!(state.plan().len(), 2);
    }

    #[test]
    fn keys_go_to_dialog_while_open() {
        let mut state = RouteOverviewState::new(two_legs());
        state.handle_key(press(KeyCode::Enter));
        assert_eq!(state.handle_key(press(KeyCode::Backspace)), Action::None);
        assert_eq!(state.plan().len(), 2);
        assert!(state.confirm().is_some());
    }

    #[test]
    fn esc_with_points_asks_before_discarding() {
        let mut state = RouteOverviewState::new(two_legs());
        assert_eq!(state.handle_key(press(KeyCode::Esc)), Action::None);
        assert_eq!(
            state.confirm().map(|d| d.prompt()),
            Some(Text::ConfirmDiscardRoute)
        );
        assert_eq!(state.handle_key(press(KeyCode::Char('y'))), Action::Quit);
    }

    #[test]
    fn esc_on_empty_plan_quits() {
        let mut state = RouteOverviewState::new(RoutePlan::new());
        assert_eq!(state.handle_key(press(KeyCode::Esc)), Action::Quit);
    }

    #[test]
    fn finished_route_ignores_edits() {
        let mut state = RouteOverviewState::new(two_legs());
        state.handle_key(press(KeyCode::Enter));
        state.handle_key(press(KeyCode::Enter));
        assert!(state.is_finished());
        assert_eq!(state.handle_key(press(KeyCode::Char('a'))), Action::None);
        assert_eq!(state.handle_key(press(KeyCode::Char('q'))), Action::Quit);
    }

    #[test]
    fn unrelated_prompt_yes_does_not_quit() {
        let mut state = RouteOverviewState::new(two_legs());
        let action = state.answer(ConfirmDialog::new(Text::RouteEmpty), Answer::Yes);
        assert_eq!(action, Action::None);
        assert!(!state.is_finished());
    }

    #[test]
    fn renders_legs_in_order() {
        let screen = render(&RouteOverviewState::new(two_legs()));
        let warehouse = screen.find("Pickup").unwrap();
        let client = screen.find("Delivery").unwrap();
        assert!(warehouse < client);
    }

    #[test]
    fn renders_dialog_prompt() {
        let mut state = RouteOverviewState::new(two_legs());
        state.handle_key(press(KeyCode::Enter));
        assert!(render(&state).contains("y: yes  n: no"));
    }
}
