//! Geofence membership resolution.

use crate::config::{EvaluationOrder, FailMode, ResolverOptions};
use crate::geometry::distance::distance_meters;
use crate::geometry::polygon::{
    admission_slack_meters, distance_to_polygon_edge, is_strictly_inside,
};
use crate::models::evaluation::{
    AreaDiagnostic, GeofenceDecision, GeofenceEvaluation, GeofenceMatch, MatchMode, NearestArea,
};
use crate::models::geofence::{Circle, GeofenceArea, GeofenceShape};
use crate::models::location::LocationSample;

/// Resolves which named area, if any, a location sample falls in.
///
/// Candidate definitions are supplied per call; the caller is expected to
/// fetch them fresh immediately before each evaluation so administrative
/// edits take effect without a client reload.
#[derive(Debug, Default)]
pub struct GeofenceResolver {
    options: ResolverOptions,
}

/// Verdict for a single area, shared by resolution and diagnostics.
struct AreaVerdict {
    mode: MatchMode,
    strictly_inside: bool,
    admitted: bool,
    distance_to_boundary_meters: f64,
    effective_slack_meters: f64,
}

impl GeofenceResolver {
    pub fn new(options: ResolverOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Evaluates the sample against the candidate areas.
    ///
    /// Inactive areas are skipped. Scanning stops at the first admitting
    /// area; when nothing admits, the result carries the nearest candidate
    /// boundary seen, and is a valid negative outcome rather than an error.
    pub fn resolve(
        &self,
        sample: &LocationSample,
        areas: &[GeofenceArea],
    ) -> GeofenceEvaluation {
        let mut nearest: Option<NearestArea> = None;

        for area in self.ordered(areas) {
            if !area.is_active {
                tracing::debug!(area = %area.name, "skipping inactive area");
                continue;
            }

            let verdict = self.evaluate_area(sample, area);
            if verdict.admitted {
                tracing::info!(
                    area = %area.name,
                    mode = verdict.mode.as_str(),
                    distance_m = verdict.distance_to_boundary_meters,
                    "location admitted by geofence"
                );
                return GeofenceEvaluation::Match(GeofenceMatch {
                    area_id: area.id,
                    area_name: area.name.clone(),
                    mode: verdict.mode,
                    distance_to_boundary_meters: verdict.distance_to_boundary_meters,
                    effective_slack_meters: verdict.effective_slack_meters,
                    strictly_inside: verdict.strictly_inside,
                });
            }

            tracing::debug!(
                area = %area.name,
                distance_m = verdict.distance_to_boundary_meters,
                slack_m = verdict.effective_slack_meters,
                "location outside area"
            );

            let closer = nearest
                .as_ref()
                .map_or(true, |n| {
                    verdict.distance_to_boundary_meters < n.distance_to_boundary_meters
                });
            if closer && verdict.distance_to_boundary_meters.is_finite() {
                nearest = Some(NearestArea {
                    area_id: area.id,
                    area_name: area.name.clone(),
                    distance_to_boundary_meters: verdict.distance_to_boundary_meters,
                });
            }
        }

        tracing::info!("location outside all configured areas");
        GeofenceEvaluation::NoMatch { nearest }
    }

    /// Per-area report for the location diagnostic panel.
    ///
    /// Every supplied area appears in the report, in the supplied order.
    /// Inactive areas are marked and never admitted, but their geometry is
    /// still evaluated so an administrator can see what would happen.
    pub fn diagnose(
        &self,
        sample: &LocationSample,
        areas: &[GeofenceArea],
    ) -> Vec<AreaDiagnostic> {
        areas
            .iter()
            .map(|area| {
                let verdict = self.evaluate_area(sample, area);
                AreaDiagnostic {
                    area_id: area.id,
                    area_name: area.name.clone(),
                    is_active: area.is_active,
                    mode: verdict.mode,
                    strictly_inside: verdict.strictly_inside,
                    admitted: verdict.admitted && area.is_active,
                    distance_to_boundary_meters: verdict.distance_to_boundary_meters,
                    effective_slack_meters: verdict.effective_slack_meters,
                }
            })
            .collect()
    }

    /// Maps a failed definitions fetch to an explicit decision.
    ///
    /// Callers must route fetch errors through this instead of defaulting to
    /// admit; the fail mode is a deliberate configuration choice.
    pub fn decision_on_unavailable(&self) -> GeofenceDecision {
        match self.options.fail_mode {
            FailMode::Closed => {
                tracing::warn!("geofence definitions unavailable, denying (fail-closed)");
                GeofenceDecision::Deny
            }
            FailMode::Open => {
                tracing::warn!("geofence definitions unavailable, admitting (fail-open)");
                GeofenceDecision::Admit
            }
        }
    }

    fn ordered<'a>(&self, areas: &'a [GeofenceArea]) -> Vec<&'a GeofenceArea> {
        let mut refs: Vec<&GeofenceArea> = areas.iter().collect();
        if self.options.evaluation_order == EvaluationOrder::SmallestAreaFirst {
            refs.sort_by(|a, b| {
                a.shape
                    .area_square_meters()
                    .partial_cmp(&b.shape.area_square_meters())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }
        refs
    }

    fn evaluate_area(&self, sample: &LocationSample, area: &GeofenceArea) -> AreaVerdict {
        let slack = admission_slack_meters(
            area.tolerance_meters,
            sample.accuracy(),
            self.options.accuracy_weight,
        );

        match &area.shape {
            GeofenceShape::Polygon(polygon) => {
                let strictly_inside =
                    is_strictly_inside(sample.lat, sample.lng, polygon.vertices());
                let distance =
                    distance_to_polygon_edge(sample.lat, sample.lng, polygon.vertices());

                if strictly_inside || distance <= slack {
                    return AreaVerdict {
                        mode: MatchMode::Polygon,
                        strictly_inside,
                        admitted: true,
                        distance_to_boundary_meters: distance,
                        effective_slack_meters: slack,
                    };
                }

                // Polygon rejected; a legacy circle may still admit.
                if let Some(circle) = &area.fallback_circle {
                    let fallback = circle_verdict(sample, circle, slack);
                    if fallback.admitted {
                        return fallback;
                    }
                }

                AreaVerdict {
                    mode: MatchMode::Polygon,
                    strictly_inside: false,
                    admitted: false,
                    distance_to_boundary_meters: distance,
                    effective_slack_meters: slack,
                }
            }
            GeofenceShape::Circle(circle) => circle_verdict(sample, circle, slack),
        }
    }
}

fn circle_verdict(sample: &LocationSample, circle: &Circle, slack: f64) -> AreaVerdict {
    let center_distance =
        distance_meters(sample.lat, sample.lng, circle.center.lat, circle.center.lng);
    AreaVerdict {
        mode: MatchMode::Radius,
        strictly_inside: center_distance <= circle.radius_meters,
        admitted: center_distance <= circle.radius_meters + slack,
        distance_to_boundary_meters: (center_distance - circle.radius_meters).abs(),
        effective_slack_meters: slack,
    }
}
