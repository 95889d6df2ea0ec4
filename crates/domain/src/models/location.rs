//! Location sample domain model.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A single device location fix supplied to an evaluation.
///
/// Samples are ephemeral: produced once per check-in/out attempt or
/// diagnostic test, and never persisted by this layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct LocationSample {
    #[validate(custom(function = "shared::validation::validate_latitude"))]
    pub lat: f64,

    #[validate(custom(function = "shared::validation::validate_longitude"))]
    pub lng: f64,

    /// Device-reported GPS accuracy radius in meters; absent means no extra
    /// tolerance slack.
    #[validate(custom(function = "shared::validation::validate_accuracy"))]
    pub accuracy_meters: Option<f64>,
}

impl LocationSample {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            accuracy_meters: None,
        }
    }

    pub fn with_accuracy(lat: f64, lng: f64, accuracy_meters: f64) -> Self {
        Self {
            lat,
            lng,
            accuracy_meters: Some(accuracy_meters),
        }
    }

    /// Accuracy radius used for slack computation, clamped non-negative.
    pub fn accuracy(&self) -> f64 {
        self.accuracy_meters.unwrap_or(0.0).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_valid() {
        let sample = LocationSample::with_accuracy(-6.2005, 106.8005, 8.0);
        assert!(sample.validate().is_ok());
        assert_eq!(sample.accuracy(), 8.0);
    }

    #[test]
    fn test_sample_invalid_latitude() {
        let sample = LocationSample::new(100.0, 106.8005);
        assert!(sample.validate().is_err());
    }

    #[test]
    fn test_sample_invalid_longitude() {
        let sample = LocationSample::new(-6.2005, -200.0);
        assert!(sample.validate().is_err());
    }

    #[test]
    fn test_sample_invalid_accuracy() {
        let sample = LocationSample::with_accuracy(-6.2005, 106.8005, -1.0);
        assert!(sample.validate().is_err());
    }

    #[test]
    fn test_missing_accuracy_means_no_slack() {
        let sample = LocationSample::new(-6.2005, 106.8005);
        assert_eq!(sample.accuracy(), 0.0);
    }

    #[test]
    fn test_negative_accuracy_clamped_in_helper() {
        // Validation rejects it, but the helper still never yields negative slack.
        let sample = LocationSample {
            lat: -6.2005,
            lng: 106.8005,
            accuracy_meters: Some(-3.0),
        };
        assert_eq!(sample.accuracy(), 0.0);
    }

    #[test]
    fn test_sample_deserialization() {
        let json = r#"{"lat": -6.2005, "lng": 106.8005, "accuracy_meters": 8.0}"#;
        let sample: LocationSample = serde_json::from_str(json).unwrap();
        assert_eq!(sample.lat, -6.2005);
        assert_eq!(sample.accuracy_meters, Some(8.0));
    }
}
