//! Great-circle distance and local planar scale helpers.

/// Earth radius in meters used by all distance calculations.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Meters per degree of latitude, constant over the sphere.
pub(crate) const METERS_PER_DEGREE_LAT: f64 =
    EARTH_RADIUS_METERS * std::f64::consts::PI / 180.0;

/// Great-circle distance in meters between two WGS84 points (haversine).
///
/// Pure function with no failure modes; NaN inputs propagate to the result.
#[inline]
pub fn distance_meters(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Meters per degree of longitude at the given latitude.
#[inline]
pub(crate) fn meters_per_degree_lng(lat: f64) -> f64 {
    METERS_PER_DEGREE_LAT * lat.to_radians().cos()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_symmetry() {
        let d1 = distance_meters(-6.2005, 106.8005, 51.5074, -0.1278);
        let d2 = distance_meters(51.5074, -0.1278, -6.2005, 106.8005);
        assert_eq!(d1, d2);
    }

    #[test]
    fn test_distance_zero_for_same_point() {
        assert_eq!(distance_meters(-6.2005, 106.8005, -6.2005, 106.8005), 0.0);
        assert_eq!(distance_meters(0.0, 0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_distance_london_to_paris() {
        // Approximately 343.5 km
        let d = distance_meters(51.5074, -0.1278, 48.8566, 2.3522);
        assert!(
            (d - 343_500.0).abs() < 3_000.0,
            "expected ~343.5km, got {d}"
        );
    }

    #[test]
    fn test_distance_one_degree_of_latitude() {
        // One degree of latitude is ~111.19 km on a 6371 km sphere.
        let d = distance_meters(0.0, 0.0, 1.0, 0.0);
        assert!((d - 111_194.9).abs() < 1.0, "got {d}");
    }

    #[test]
    fn test_distance_nan_propagates() {
        assert!(distance_meters(f64::NAN, 0.0, 1.0, 1.0).is_nan());
        assert!(distance_meters(0.0, 0.0, f64::NAN, 1.0).is_nan());
    }

    #[test]
    fn test_meters_per_degree_lng_shrinks_with_latitude() {
        let at_equator = meters_per_degree_lng(0.0);
        let at_sixty = meters_per_degree_lng(60.0);
        assert!((at_equator - METERS_PER_DEGREE_LAT).abs() < 1e-9);
        assert!((at_sixty - METERS_PER_DEGREE_LAT / 2.0).abs() < 1.0);
    }
}
