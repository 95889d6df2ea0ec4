//! Resolver options.
//!
//! Options are plain values injected through constructors; nothing in the
//! evaluation path reads ambient global state. [`ResolverOptions::load`] is a
//! convenience for embedding applications that configure the resolver from a
//! file or environment variables.

use serde::Deserialize;
use thiserror::Error;

use crate::geometry::polygon::DEFAULT_ACCURACY_WEIGHT;

/// Scan order for candidate areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationOrder {
    /// Evaluate areas in the order the caller supplied them; first match
    /// wins.
    #[default]
    ListOrder,
    /// Sort candidates by ascending approximate area before scanning, so the
    /// most specific of overlapping areas wins deterministically.
    SmallestAreaFirst,
}

/// Policy applied when geofence definitions could not be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FailMode {
    /// Deny location-gated actions while definitions are unavailable.
    #[default]
    Closed,
    /// Admit while definitions are unavailable. Opt-in; weakens the gate.
    Open,
}

/// Tunables for geofence evaluation.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolverOptions {
    /// Fraction of the reported GPS accuracy radius added to the tolerance
    /// band. The contribution is capped at the area's tolerance.
    #[serde(default = "default_accuracy_weight")]
    pub accuracy_weight: f64,

    #[serde(default)]
    pub evaluation_order: EvaluationOrder,

    #[serde(default)]
    pub fail_mode: FailMode,
}

fn default_accuracy_weight() -> f64 {
    DEFAULT_ACCURACY_WEIGHT
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            accuracy_weight: default_accuracy_weight(),
            evaluation_order: EvaluationOrder::default(),
            fail_mode: FailMode::default(),
        }
    }
}

/// Options validation error.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("Invalid option value: {0}")]
    InvalidValue(String),
}

impl ResolverOptions {
    /// Load options from a file and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/geofence.toml - optional base configuration
    /// 2. Environment variables with GEOFENCE__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name("config/geofence").required(false))
            .add_source(config::Environment::with_prefix("GEOFENCE").separator("__"))
            .build()?;

        let options: Self = cfg.try_deserialize()?;
        options
            .validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(options)
    }

    /// Validate option values.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !self.accuracy_weight.is_finite() || !(0.0..=1.0).contains(&self.accuracy_weight) {
            return Err(OptionsError::InvalidValue(
                "accuracy_weight must be between 0 and 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ResolverOptions::default();
        assert_eq!(options.accuracy_weight, 0.5);
        assert_eq!(options.evaluation_order, EvaluationOrder::ListOrder);
        assert_eq!(options.fail_mode, FailMode::Closed);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_weight() {
        let mut options = ResolverOptions::default();

        options.accuracy_weight = 1.5;
        assert!(options.validate().is_err());

        options.accuracy_weight = -0.1;
        assert!(options.validate().is_err());

        options.accuracy_weight = f64::NAN;
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_options_deserialize_with_overrides() {
        let cfg = config::Config::builder()
            .set_override("accuracy_weight", 0.25)
            .unwrap()
            .set_override("evaluation_order", "smallest_area_first")
            .unwrap()
            .set_override("fail_mode", "open")
            .unwrap()
            .build()
            .unwrap();

        let options: ResolverOptions = cfg.try_deserialize().unwrap();
        assert_eq!(options.accuracy_weight, 0.25);
        assert_eq!(options.evaluation_order, EvaluationOrder::SmallestAreaFirst);
        assert_eq!(options.fail_mode, FailMode::Open);
    }

    #[test]
    fn test_options_deserialize_empty_uses_defaults() {
        let cfg = config::Config::builder().build().unwrap();
        let options: ResolverOptions = cfg.try_deserialize().unwrap();
        assert_eq!(options.accuracy_weight, 0.5);
        assert_eq!(options.fail_mode, FailMode::Closed);
    }

    #[test]
    fn test_options_error_display() {
        let err = OptionsError::InvalidValue("test".to_string());
        assert_eq!(format!("{err}"), "Invalid option value: test");
    }
}
