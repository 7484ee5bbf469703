//! Phases shared by the submitting form screens.
//!
//! ```text
//! MissingParams                      (terminal)
//! Editing ──begin_submit──▶ Submitting ──finish(ok)──▶ Completed (terminal)
//!    ▲                          │
//!    └──────finish(err)─────────┘
//! ```

use crate::model::ParamError;

/// Where a form screen is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowPhase {
    /// Entry parameters are missing or malformed; the form is never shown.
    MissingParams(ParamError),
    /// The user is filling in the form.
    Editing,
    /// A submission is in flight; further submits are ignored.
    Submitting,
    /// The submission succeeded.
    Completed,
}

impl FlowPhase {
    /// `Editing` when the entry parameters parsed, `MissingParams` otherwise.
    pub fn for_params<T>(params: &Result<T, ParamError>) -> Self {
        match params {
            Ok(_) => FlowPhase::Editing,
            Err(e) => FlowPhase::MissingParams(e.clone()),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, FlowPhase::Editing)
    }

    /// Returns `true` while a submission is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self, FlowPhase::Submitting)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, FlowPhase::Completed)
    }

    /// Moves `Editing` to `Submitting`. Returns `false`, leaving the phase
    /// untouched, from any other phase.
    pub fn begin_submit(&mut self) -> bool {
        if self.is_editing() {
            *self = FlowPhase::Submitting;
            true
        } else {
            false
        }
    }

    /// Resolves an in-flight submission. Ignored unless `Submitting`.
    pub fn finish(&mut self, success: bool) {
        if self.is_busy() {
            *self = if success {
                FlowPhase::Completed
            } else {
                FlowPhase::Editing
            };
        }
    }
}

/// Identifies one submission so a result can be matched to its screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(pub u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_ok_starts_editing() {
        let params: Result<i64, ParamError> = Ok(1);
        assert_eq!(FlowPhase::for_params(&params), FlowPhase::Editing);
    }

    #[test]
    fn params_err_is_terminal() {
        let params: Result<i64, ParamError> = Err(ParamError::Missing("trip_id"));
        let mut phase = FlowPhase::for_params(&params);
        assert_eq!(phase, FlowPhase::MissingParams(ParamError::Missing("trip_id")));
        assert!(!phase.begin_submit());
        phase.finish(true);
        assert!(matches!(phase, FlowPhase::MissingParams(_)));
    }

    #[test]
    fn begin_submit_only_once() {
        let mut phase = FlowPhase::Editing;
        assert!(phase.begin_submit());
        assert!(phase.is_busy());
        assert!(!phase.begin_submit(), "double submit must be refused");
        assert!(phase.is_busy());
    }

    #[test]
    fn success_completes() {
        let mut phase = FlowPhase::Editing;
        phase.begin_submit();
        phase.finish(true);
        assert!(phase.is_completed());
        assert!(!phase.begin_submit());
    }

    #[test]
    fn failure_returns_to_editing() {
        let mut phase = FlowPhase::Editing;
        phase.begin_submit();
        phase.finish(false);
        assert!(phase.is_editing());
        assert!(phase.begin_submit(), "form stays usable after a failure");
    }

    #[test]
    fn finish_while_editing_is_ignored() {
        let mut phase = FlowPhase::Editing;
        phase.finish(true);
        assert!(phase.is_editing());
    }
}
