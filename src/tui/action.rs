//! Actions returned by screen event handlers.

use crossterm::event::KeyEvent;

use crate::i18n::Locale;
use crate::model::{QuestionnaireSubmission, RoutePlan, StopReasonSubmission};

use super::app::Screen;

/// An action that a screen handler returns to the [`App`](super::App).
///
/// The `App` interprets these to run submissions, change the locale and
/// navigate between screens.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No state change needed.
    None,
    /// Navigate to the given screen, replacing the current one.
    Navigate(Screen),
    /// Return to the screen that opened this one, or quit if there is none.
    Back,
    /// Send a stop reason. The screen is already `Submitting`.
    SubmitStopReason(StopReasonSubmission),
    /// Send a questionnaire answer. The screen is already `Submitting`.
    SubmitQuestionnaire {
        start_state_id: i64,
        submission: QuestionnaireSubmission,
    },
    /// Switch the UI locale, then go back.
    SetLocale(Locale),
    /// The user confirmed the accumulated route.
    FinishRoute(RoutePlan),
    /// Quit the application.
    Quit,
}

/// Common behavior for all screen state types.
pub trait ScreenState {
    /// Process a key event and return an [`Action`] for the `App` to apply.
    fn handle_key(&mut self, key: KeyEvent) -> Action;
}
