//! Polygon membership, boundary distance, area and centroid.
//!
//! Membership is a ray-casting test softened by a tolerance band: GPS fixes
//! near a boundary are noisy, so a point outside the ring is still admitted
//! when it lies within the effective slack of the nearest edge. The slack is
//! bounded by the configured tolerance so a bad fix with a huge accuracy
//! radius cannot admit arbitrarily distant points.

use shared::validation::is_usable_coordinate;

use super::distance::{meters_per_degree_lng, METERS_PER_DEGREE_LAT};
use crate::models::geofence::Coordinate;

/// Default fraction of the reported GPS accuracy radius added to the
/// tolerance band.
pub const DEFAULT_ACCURACY_WEIGHT: f64 = 0.5;

/// Drops vertices with non-finite or out-of-range coordinates, preserving
/// insertion order.
pub fn sanitize_vertices(vertices: &[Coordinate]) -> Vec<Coordinate> {
    vertices
        .iter()
        .copied()
        .filter(|v| is_usable_coordinate(v.lat, v.lng))
        .collect()
}

/// Arithmetic mean of the vertex coordinates (not area-weighted).
pub fn polygon_centroid(vertices: &[Coordinate]) -> Option<Coordinate> {
    if vertices.is_empty() {
        return None;
    }
    let n = vertices.len() as f64;
    let lat = vertices.iter().map(|v| v.lat).sum::<f64>() / n;
    let lng = vertices.iter().map(|v| v.lng).sum::<f64>() / n;
    Some(Coordinate { lat, lng })
}

/// Approximate planar area in square meters via the shoelace formula.
///
/// Vertices are projected to a local equirectangular frame scaled by the
/// meters-per-degree at the polygon's mean latitude. Returns 0 for fewer
/// than 3 vertices.
pub fn polygon_area_square_meters(vertices: &[Coordinate]) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let mean_lat = vertices.iter().map(|v| v.lat).sum::<f64>() / vertices.len() as f64;
    let m_lng = meters_per_degree_lng(mean_lat);

    let mut sum = 0.0;
    for i in 0..vertices.len() {
        let a = &vertices[i];
        let b = &vertices[(i + 1) % vertices.len()];
        let (ax, ay) = (a.lng * m_lng, a.lat * METERS_PER_DEGREE_LAT);
        let (bx, by) = (b.lng * m_lng, b.lat * METERS_PER_DEGREE_LAT);
        sum += ax * by - bx * ay;
    }
    (sum / 2.0).abs()
}

/// Ray-casting crossing count; an odd number of crossings of a horizontal
/// ray from the point means strictly inside.
fn ray_cast(lat: f64, lng: f64, vertices: &[Coordinate]) -> bool {
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let vi = &vertices[i];
        let vj = &vertices[j];
        let crosses = (vi.lat > lat) != (vj.lat > lat)
            && lng < (vj.lng - vi.lng) * (lat - vi.lat) / (vj.lat - vi.lat) + vi.lng;
        if crosses {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Strict containment without any tolerance band. False for fewer than 3
/// vertices.
pub fn is_strictly_inside(lat: f64, lng: f64, vertices: &[Coordinate]) -> bool {
    vertices.len() >= 3 && ray_cast(lat, lng, vertices)
}

/// Minimum distance in meters from a point to the polygon boundary.
///
/// Each edge (consecutive vertex pair, wrapping last to first) is projected
/// into a planar frame centered on the query point, scaled by the
/// meters-per-degree at the point's latitude; the result is the minimum
/// closest-point-on-segment distance over all edges.
pub fn distance_to_polygon_edge(lat: f64, lng: f64, vertices: &[Coordinate]) -> f64 {
    if vertices.is_empty() {
        return f64::INFINITY;
    }
    let m_lng = meters_per_degree_lng(lat);

    let mut min_dist = f64::INFINITY;
    for i in 0..vertices.len() {
        let a = &vertices[i];
        let b = &vertices[(i + 1) % vertices.len()];

        let ax = (a.lng - lng) * m_lng;
        let ay = (a.lat - lat) * METERS_PER_DEGREE_LAT;
        let bx = (b.lng - lng) * m_lng;
        let by = (b.lat - lat) * METERS_PER_DEGREE_LAT;

        let dx = bx - ax;
        let dy = by - ay;
        let len_sq = dx * dx + dy * dy;
        let t = if len_sq > 0.0 {
            (-(ax * dx + ay * dy) / len_sq).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let cx = ax + t * dx;
        let cy = ay + t * dy;
        let dist = (cx * cx + cy * cy).sqrt();
        if dist < min_dist {
            min_dist = dist;
        }
    }
    min_dist
}

/// Effective admission slack in meters: the configured tolerance plus an
/// accuracy-scaled contribution capped at the tolerance, so the band never
/// exceeds twice the tolerance.
pub(crate) fn admission_slack_meters(
    tolerance_meters: f64,
    accuracy_meters: f64,
    accuracy_weight: f64,
) -> f64 {
    let tolerance = tolerance_meters.max(0.0);
    let accuracy_part = (accuracy_meters.max(0.0) * accuracy_weight).min(tolerance);
    tolerance + accuracy_part
}

/// Membership test with the default accuracy weight.
///
/// Strictly-inside points are admitted immediately; points outside the ring
/// are admitted when within the effective slack of the nearest edge.
pub fn is_point_in_polygon(
    lat: f64,
    lng: f64,
    accuracy_meters: f64,
    vertices: &[Coordinate],
    tolerance_meters: f64,
) -> bool {
    is_point_in_polygon_weighted(
        lat,
        lng,
        accuracy_meters,
        vertices,
        tolerance_meters,
        DEFAULT_ACCURACY_WEIGHT,
    )
}

/// Membership test with an explicit accuracy weight.
pub fn is_point_in_polygon_weighted(
    lat: f64,
    lng: f64,
    accuracy_meters: f64,
    vertices: &[Coordinate],
    tolerance_meters: f64,
    accuracy_weight: f64,
) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    if ray_cast(lat, lng, vertices) {
        return true;
    }
    let slack = admission_slack_meters(tolerance_meters, accuracy_meters, accuracy_weight);
    if slack <= 0.0 {
        return false;
    }
    distance_to_polygon_edge(lat, lng, vertices) <= slack
}
