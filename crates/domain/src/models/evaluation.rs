//! Evaluation results for geofence membership tests.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a match was established.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    Polygon,
    Radius,
}

impl MatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::Polygon => "polygon",
            MatchMode::Radius => "radius",
        }
    }
}

/// A successful membership match.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GeofenceMatch {
    pub area_id: Uuid,
    pub area_name: String,
    pub mode: MatchMode,
    /// Distance from the sample to the matched boundary, in meters.
    pub distance_to_boundary_meters: f64,
    /// Slack that was available for admission, in meters.
    pub effective_slack_meters: f64,
    /// True when the sample was inside the boundary itself, with no slack
    /// needed.
    pub strictly_inside: bool,
}

/// Closest candidate seen while scanning, reported on a negative result so
/// callers can say "you are N m outside <area>".
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct NearestArea {
    pub area_id: Uuid,
    pub area_name: String,
    pub distance_to_boundary_meters: f64,
}

/// Outcome of a membership evaluation.
///
/// `NoMatch` is a valid negative result, not an error: the calling
/// attendance flow turns it into a user-facing rejection.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum GeofenceEvaluation {
    Match(GeofenceMatch),
    NoMatch {
        #[serde(skip_serializing_if = "Option::is_none")]
        nearest: Option<NearestArea>,
    },
}

impl GeofenceEvaluation {
    pub fn is_inside(&self) -> bool {
        matches!(self, GeofenceEvaluation::Match(_))
    }

    pub fn matched(&self) -> Option<&GeofenceMatch> {
        match self {
            GeofenceEvaluation::Match(m) => Some(m),
            GeofenceEvaluation::NoMatch { .. } => None,
        }
    }

    pub fn matched_area_name(&self) -> Option<&str> {
        self.matched().map(|m| m.area_name.as_str())
    }
}

/// Per-area report row for the location diagnostic panel.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AreaDiagnostic {
    pub area_id: Uuid,
    pub area_name: String,
    pub is_active: bool,
    /// Geometry the verdict came from: the primary shape, or the legacy
    /// circle when it produced the admission.
    pub mode: MatchMode,
    pub strictly_inside: bool,
    /// Whether the sample would be admitted; always false for inactive areas.
    pub admitted: bool,
    pub distance_to_boundary_meters: f64,
    pub effective_slack_meters: f64,
}

/// Explicit admit/deny decision for callers whose fetch of geofence
/// definitions failed.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GeofenceDecision {
    Admit,
    Deny,
}
