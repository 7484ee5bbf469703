mod link;
mod questionnaire;
mod route;
mod stop_reason;
mod validation;

pub use link::{
    EntryLink, LinkError, ParamError, QuestionnaireParams, StopReasonParams, required_id,
};
pub use questionnaire::{QuestionnaireResult, QuestionnaireSubmission, ReasonType};
pub use route::{DEFAULT_ORIGIN, HOME_MARKER, RoutePlan, RoutePoint};
pub use stop_reason::{StopReason, StopReasonResult, StopReasonSubmission};
pub use validation::{ValidationError, parse_latitude, parse_longitude, validate_required};
