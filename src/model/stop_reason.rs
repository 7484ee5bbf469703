use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::validation::ValidationError;

/// Why a vehicle stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StopReason {
    Rest,
    Personal,
    Breakdown,
}

static ALL_REASONS: &[StopReason] = &[StopReason::Rest, StopReason::Personal, StopReason::Breakdown];

impl StopReason {
    /// Returns the wire representation (`REST`, `PERSONAL`, `BREAKDOWN`).
    pub fn wire_str(&self) -> &'static str {
        match self {
            StopReason::Rest => "REST",
            StopReason::Personal => "PERSONAL",
            StopReason::Breakdown => "BREAKDOWN",
        }
    }

    /// Returns all reasons in display order.
    pub fn all() -> &'static [StopReason] {
        ALL_REASONS
    }
}

impl FromStr for StopReason {
    type Err = ValidationError;

    /// Case-insensitive parse of the wire representation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_REASONS
            .iter()
            .copied()
            .find(|r| r.wire_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownStopReason(s.to_string()))
    }
}

#[mutants::skip]
impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_str())
    }
}

/// Body of `POST /stop-reason`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopReasonSubmission {
    pub reason: StopReason,
    pub trip_id: i64,
    pub stop_state_id: i64,
}

/// Stop record echoed back by the server after a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopReasonResult {
    pub id: i64,
    pub trip_id: i64,
    pub reason: StopReason,
    /// Server timestamp as sent; see [`recorded_at`](Self::recorded_at).
    #[serde(rename = "ts")]
    pub timestamp: String,
    #[serde(rename = "gps_lat")]
    pub latitude: Option<f64>,
    #[serde(rename = "gps_lng")]
    pub longitude: Option<f64>,
}

impl StopReasonResult {
    /// Parses the server timestamp, if it is RFC 3339.
    pub fn recorded_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.timestamp).ok()
    }
}
