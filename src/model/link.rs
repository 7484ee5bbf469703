//! Mini-app entry links and the identifiers they carry.
//!
//! Links look like `/stop-reason?trip_id=123&stop_state_id=45` or
//! `/questionnaire/77`. Full URLs are accepted, including hash routing
//! (`https://host/#/stop-reason?...`).

use thiserror::Error;
use url::Url;

const LINK_BASE: &str = "tripform://app/";

/// A required identifier is absent or unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("missing parameter: {0}")]
    Missing(&'static str),
    #[error("parameter {name} is not an integer: {value}")]
    Malformed { name: &'static str, value: String },
}

/// The link itself cannot be opened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("invalid link {link}: {source}")]
    Invalid {
        link: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unknown page: {0}")]
    UnknownPage(String),
}

/// Identifiers for the stop-reason screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopReasonParams {
    pub trip_id: i64,
    pub stop_state_id: i64,
    /// Raw `reason` query value used to preselect a reason, if present.
    pub reason: Option<String>,
}

/// Identifier for the questionnaire screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionnaireParams {
    pub start_state_id: i64,
}

/// Page addressed by an entry link.
///
/// Parameter problems are kept inside the variant so the page can show them
/// instead of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryLink {
    StopReason(Result<StopReasonParams, ParamError>),
    Questionnaire(Result<QuestionnaireParams, ParamError>),
    Route,
    Language,
    Gallery,
}

impl EntryLink {
    /// Parses an entry link.
    pub fn parse(link: &str) -> Result<Self, LinkError> {
        let invalid = |source| LinkError::Invalid {
            link: link.to_string(),
            source,
        };
        let base = Url::parse(LINK_BASE).map_err(invalid)?;
        let mut url = base.join(link.trim()).map_err(invalid)?;
        if let Some(fragment) = url.fragment()
            && fragment.starts_with('/')
        {
            url = base.join(fragment).map_err(invalid)?;
        }

        let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        match segments.as_slice() {
            [.., "stop-reason"] => Ok(EntryLink::StopReason(stop_reason_params(&query))),
            [.., "questionnaire", id] => Ok(EntryLink::Questionnaire(
                required_id("start_state_id", Some(*id))
                    .map(|start_state_id| QuestionnaireParams { start_state_id }),
            )),
            [.., "questionnaire"] => Ok(EntryLink::Questionnaire(Err(ParamError::Missing(
                "start_state_id",
            )))),
            [.., "route"] => Ok(EntryLink::Route),
            [.., "language"] => Ok(EntryLink::Language),
            [.., "gallery"] => Ok(EntryLink::Gallery),
            _ => Err(LinkError::UnknownPage(url.path().to_string())),
        }
    }
}

fn query_value<'a>(query: &'a [(String, String)], name: &str) -> Option<&'a str> {
    query
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

fn stop_reason_params(query: &[(String, String)]) -> Result<StopReasonParams, ParamError> {
    let trip_id = required_id("trip_id", query_value(query, "trip_id"))?;
    let stop_state_id = required_id("stop_state_id", query_value(query, "stop_state_id"))?;
    let reason = query_value(query, "reason")
        .filter(|r| !r.trim().is_empty())
        .map(str::to_string);
    Ok(StopReasonParams {
        trip_id,
        stop_state_id,
        reason,
    })
}

/// Parses a required integer identifier.
pub fn required_id(name: &'static str, value: Option<&str>) -> Result<i64, ParamError> {
    let value = value.map(str::trim).filter(|v| !v.is_empty());
    let Some(value) = value else {
        return Err(ParamError::Missing(name));
    };
    value.parse().map_err(|_| ParamError::Malformed {
        name,
        value: value.to_string(),
    })
}
