//! Domain models for geofence evaluation.

pub mod evaluation;
pub mod geofence;
pub mod location;

pub use evaluation::{
    AreaDiagnostic, GeofenceDecision, GeofenceEvaluation, GeofenceMatch, MatchMode, NearestArea,
};
pub use geofence::{
    Circle, Coordinate, CreateGeofenceAreaRequest, GeofenceArea, GeofenceRecord, GeofenceShape,
    Polygon, UpdateGeofenceAreaRequest,
};
pub use location::LocationSample;
