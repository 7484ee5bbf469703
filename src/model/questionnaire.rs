use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validation::{ValidationError, validate_required};

/// Whether a planned trip is for work or personal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonType {
    #[default]
    Work,
    Personal,
}

static ALL_REASON_TYPES: &[ReasonType] = &[ReasonType::Work, ReasonType::Personal];

impl ReasonType {
    /// Returns the wire representation (`WORK`, `PERSONAL`).
    pub fn wire_str(&self) -> &'static str {
        match self {
            ReasonType::Work => "WORK",
            ReasonType::Personal => "PERSONAL",
        }
    }

    /// Returns all reason types.
    pub fn all() -> &'static [ReasonType] {
        ALL_REASON_TYPES
    }

    /// Returns the other reason type.
    pub fn toggled(self) -> Self {
        match self {
            ReasonType::Work => ReasonType::Personal,
            ReasonType::Personal => ReasonType::Work,
        }
    }
}

impl FromStr for ReasonType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_REASON_TYPES
            .iter()
            .copied()
            .find(|r| r.wire_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownReasonType(s.to_string()))
    }
}

#[mutants::skip]
impl fmt::Display for ReasonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_str())
    }
}

/// Body of `POST /questionnaire/{start_state_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionnaireSubmission {
    pub reason_type: ReasonType,
    pub reason: String,
    pub destination_description: String,
    pub destination_lat: f64,
    pub destination_lng: f64,
}

impl QuestionnaireSubmission {
    /// Creates a submission, trimming text and checking that it is present
    /// and that the coordinates are in range.
    pub fn new(
        reason_type: ReasonType,
        reason: &str,
        destination_description: &str,
        destination_lat: f64,
        destination_lng: f64,
    ) -> Result<Self, ValidationError> {
        let reason = validate_required(reason)?.to_string();
        let destination_description = validate_required(destination_description)?.to_string();
        if !(-90.0..=90.0).contains(&destination_lat) {
            return Err(ValidationError::LatitudeOutOfRange(destination_lat));
        }
        if !(-180.0..=180.0).contains(&destination_lng) {
            return Err(ValidationError::LongitudeOutOfRange(destination_lng));
        }
        Ok(Self {
            reason_type,
            reason,
            destination_description,
            destination_lat,
            destination_lng,
        })
    }
}

/// Questionnaire record returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionnaireResult {
    #[serde(flatten)]
    pub submission: QuestionnaireSubmission,
    pub id: i64,
    pub start_state_id: i64,
    pub trip_id: Option<i64>,
    pub status: String,
    pub created_at: String,
    pub answered_at: Option<String>,
}
