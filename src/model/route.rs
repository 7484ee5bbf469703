use serde::{Deserialize, Serialize};

use super::validation::{ValidationError, validate_required};

/// Destination that sends the next leg back to [`DEFAULT_ORIGIN`].
pub const HOME_MARKER: &str = "Home";

/// Origin of the first leg, and of any leg that follows a trip home.
pub const DEFAULT_ORIGIN: &str = "Office";

/// One leg of a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub from: String,
    pub to: String,
    pub reason: String,
}

impl RoutePoint {
    /// Creates a leg, trimming each part and rejecting blank ones.
    pub fn new(from: &str, to: &str, reason: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            from: validate_required(from)?.to_string(),
            to: validate_required(to)?.to_string(),
            reason: validate_required(reason)?.to_string(),
        })
    }
}

/// Legs accumulated so far, in travel order.
///
/// Carried between the route screens by value; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoutePlan {
    points: Vec<RoutePoint>,
}

impl RoutePlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Origin for the next leg: the previous destination, or
    /// [`DEFAULT_ORIGIN`] when there is none or it was [`HOME_MARKER`].
    pub fn next_origin(&self) -> &str {
        match self.points.last() {
            Some(last) if last.to.trim() != HOME_MARKER => &last.to,
            _ => DEFAULT_ORIGIN,
        }
    }

    /// Appends a leg.
    pub fn push(&mut self, point: RoutePoint) {
        self.points.push(point);
    }

    /// Removes and returns the most recent leg.
    pub fn pop(&mut self) -> Option<RoutePoint> {
        self.points.pop()
    }

    /// Returns the legs in order.
    pub fn points(&self) -> &[RoutePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
