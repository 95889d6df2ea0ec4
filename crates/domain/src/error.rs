//! Domain error types.

use thiserror::Error;

/// Record-level problems an administrator must fix before an area can be
/// evaluated. Malformed vertices inside an otherwise usable polygon are
/// sanitized away silently and never surface here.
#[derive(Debug, Error)]
pub enum GeofenceError {
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Unusable shape: {0}")]
    UnusableShape(String),

    #[error("Invalid radius: {0}")]
    InvalidRadius(String),

    #[error("Invalid tolerance: {0}")]
    InvalidTolerance(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geofence_error_display() {
        assert_eq!(
            format!("{}", GeofenceError::InvalidCoordinate("test".to_string())),
            "Invalid coordinate: test"
        );
        assert_eq!(
            format!("{}", GeofenceError::UnusableShape("test".to_string())),
            "Unusable shape: test"
        );
        assert_eq!(
            format!("{}", GeofenceError::InvalidRadius("test".to_string())),
            "Invalid radius: test"
        );
        assert_eq!(
            format!("{}", GeofenceError::InvalidTolerance("test".to_string())),
            "Invalid tolerance: test"
        );
    }
}
