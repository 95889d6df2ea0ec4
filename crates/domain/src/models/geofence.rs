//! Geofence area domain model.
//!
//! The persisted wire record encodes its mode through which optional fields
//! happen to be populated; [`GeofenceArea`] makes the mode an explicit tagged
//! shape at conversion time, keeping a legacy circular boundary only as a
//! fallback behind a polygon.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::GeofenceError;
use crate::geometry::polygon::{polygon_area_square_meters, polygon_centroid, sanitize_vertices};
use shared::validation::is_usable_coordinate;

/// A WGS84 coordinate pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A closed polygon boundary with at least three usable vertices.
///
/// Vertex insertion order defines the edges; the ring closes implicitly from
/// the last vertex back to the first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polygon {
    vertices: Vec<Coordinate>,
}

impl Polygon {
    /// Builds a polygon from raw vertices, dropping unusable coordinates.
    ///
    /// Returns [`GeofenceError::UnusableShape`] when fewer than three usable
    /// vertices remain after sanitization.
    pub fn new(vertices: Vec<Coordinate>) -> Result<Self, GeofenceError> {
        let vertices = sanitize_vertices(&vertices);
        if vertices.len() < 3 {
            return Err(GeofenceError::UnusableShape(format!(
                "polygon needs at least 3 usable vertices, got {}",
                vertices.len()
            )));
        }
        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[Coordinate] {
        &self.vertices
    }

    /// Arithmetic mean of the vertices. Always `Some` for a constructed
    /// polygon; exposed as an `Option` for parity with the free helper.
    pub fn centroid(&self) -> Option<Coordinate> {
        polygon_centroid(&self.vertices)
    }

    pub fn area_square_meters(&self) -> f64 {
        polygon_area_square_meters(&self.vertices)
    }
}

/// A circular boundary around a center point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Circle {
    pub center: Coordinate,
    pub radius_meters: f64,
}

impl Circle {
    pub fn new(center: Coordinate, radius_meters: f64) -> Result<Self, GeofenceError> {
        if !is_usable_coordinate(center.lat, center.lng) {
            return Err(GeofenceError::InvalidCoordinate(format!(
                "circle center ({}, {}) is not a usable coordinate",
                center.lat, center.lng
            )));
        }
        if !radius_meters.is_finite() || radius_meters <= 0.0 {
            return Err(GeofenceError::InvalidRadius(format!(
                "radius must be a positive number of meters, got {radius_meters}"
            )));
        }
        Ok(Self {
            center,
            radius_meters,
        })
    }

    pub fn area_square_meters(&self) -> f64 {
        std::f64::consts::PI * self.radius_meters * self.radius_meters
    }
}

/// Geometry of a geofence area, tagged explicitly instead of inferred from
/// which optional record fields are populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeofenceShape {
    Polygon(Polygon),
    Circle(Circle),
}

impl GeofenceShape {
    /// Approximate enclosed area, used for deterministic ordering of
    /// overlapping candidates.
    pub fn area_square_meters(&self) -> f64 {
        match self {
            GeofenceShape::Polygon(polygon) => polygon.area_square_meters(),
            GeofenceShape::Circle(circle) => circle.area_square_meters(),
        }
    }
}

/// A named geographic region used to gate location-dependent actions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GeofenceArea {
    pub id: Uuid,
    pub name: String,
    pub shape: GeofenceShape,
    /// Legacy circular boundary kept alongside a polygon; consulted only
    /// when the polygon test rejects a point.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_circle: Option<Circle>,
    pub tolerance_meters: f64,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl GeofenceArea {
    /// Creates an active polygon area.
    pub fn polygon(
        name: impl Into<String>,
        vertices: Vec<Coordinate>,
        tolerance_meters: f64,
    ) -> Result<Self, GeofenceError> {
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            shape: GeofenceShape::Polygon(Polygon::new(vertices)?),
            fallback_circle: None,
            tolerance_meters: validate_tolerance(tolerance_meters)?,
            is_active: true,
            created_at: None,
            updated_at: None,
        })
    }

    /// Creates an active circular area.
    pub fn circle(
        name: impl Into<String>,
        center: Coordinate,
        radius_meters: f64,
        tolerance_meters: f64,
    ) -> Result<Self, GeofenceError> {
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            shape: GeofenceShape::Circle(Circle::new(center, radius_meters)?),
            fallback_circle: None,
            tolerance_meters: validate_tolerance(tolerance_meters)?,
            is_active: true,
            created_at: None,
            updated_at: None,
        })
    }

    /// Attaches a legacy circular fallback to a polygon area.
    pub fn with_fallback_circle(mut self, circle: Circle) -> Self {
        self.fallback_circle = Some(circle);
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }
}

fn validate_tolerance(tolerance_meters: f64) -> Result<f64, GeofenceError> {
    if !tolerance_meters.is_finite() || tolerance_meters < 0.0 {
        return Err(GeofenceError::InvalidTolerance(format!(
            "tolerance must be a non-negative number of meters, got {tolerance_meters}"
        )));
    }
    Ok(tolerance_meters)
}

/// Default active status for new geofence records.
fn default_active() -> bool {
    true
}

/// Persisted wire shape of a geofence record, as stored by the backing
/// service.
///
/// Both the polygon (`coordinates`) and the legacy circular fields may be
/// populated at once; conversion into [`GeofenceArea`] prefers the polygon
/// and keeps the circle as a fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GeofenceRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    pub name: String,

    pub center_lat: Option<f64>,
    pub center_lng: Option<f64>,
    pub radius: Option<f64>,

    pub coordinates: Option<Vec<Coordinate>>,

    #[serde(default)]
    pub tolerance_meters: f64,

    #[serde(default = "default_active")]
    pub is_active: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<GeofenceRecord> for GeofenceArea {
    type Error = GeofenceError;

    fn try_from(record: GeofenceRecord) -> Result<Self, Self::Error> {
        let tolerance_meters = validate_tolerance(record.tolerance_meters)?;

        // Fewer than 3 usable vertices means the polygon is treated as absent.
        let polygon = record
            .coordinates
            .as_deref()
            .map(sanitize_vertices)
            .filter(|vertices| vertices.len() >= 3)
            .map(|vertices| Polygon { vertices });

        let circle = match (record.center_lat, record.center_lng, record.radius) {
            (Some(lat), Some(lng), Some(radius)) => {
                Circle::new(Coordinate::new(lat, lng), radius).ok()
            }
            _ => None,
        };

        let (shape, fallback_circle) = match (polygon, circle) {
            (Some(polygon), circle) => (GeofenceShape::Polygon(polygon), circle),
            (None, Some(circle)) => (GeofenceShape::Circle(circle), None),
            (None, None) => {
                return Err(GeofenceError::UnusableShape(format!(
                    "record '{}' has neither a usable polygon nor a circular boundary",
                    record.name
                )))
            }
        };

        Ok(Self {
            id: record.id.unwrap_or_else(Uuid::new_v4),
            name: record.name,
            shape,
            fallback_circle,
            tolerance_meters,
            is_active: record.is_active,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

impl From<GeofenceArea> for GeofenceRecord {
    fn from(area: GeofenceArea) -> Self {
        let (coordinates, circle) = match area.shape {
            GeofenceShape::Polygon(polygon) => (Some(polygon.vertices), area.fallback_circle),
            GeofenceShape::Circle(circle) => (None, Some(circle)),
        };
        Self {
            id: Some(area.id),
            name: area.name,
            center_lat: circle.map(|c| c.center.lat),
            center_lng: circle.map(|c| c.center.lng),
            radius: circle.map(|c| c.radius_meters),
            coordinates,
            tolerance_meters: area.tolerance_meters,
            is_active: area.is_active,
            created_at: area.created_at,
            updated_at: area.updated_at,
        }
    }
}

/// Request payload for creating a geofence area.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateGeofenceAreaRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(custom(function = "shared::validation::validate_latitude"))]
    pub center_lat: Option<f64>,

    #[validate(custom(function = "shared::validation::validate_longitude"))]
    pub center_lng: Option<f64>,

    #[validate(range(min = 20.0, max = 50000.0, message = "Radius must be between 20 and 50000 meters"))]
    pub radius: Option<f64>,

    #[validate(length(min = 3, max = 100, message = "Polygon must have 3-100 vertices"))]
    pub coordinates: Option<Vec<Coordinate>>,

    #[validate(range(min = 0.0, max = 500.0, message = "Tolerance must be between 0 and 500 meters"))]
    #[serde(default)]
    pub tolerance_meters: f64,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl From<CreateGeofenceAreaRequest> for GeofenceRecord {
    fn from(request: CreateGeofenceAreaRequest) -> Self {
        Self {
            id: None,
            name: request.name,
            center_lat: request.center_lat,
            center_lng: request.center_lng,
            radius: request.radius,
            coordinates: request.coordinates,
            tolerance_meters: request.tolerance_meters,
            is_active: request.is_active,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Request payload for updating a geofence area (partial update).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateGeofenceAreaRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(custom(function = "shared::validation::validate_latitude"))]
    pub center_lat: Option<f64>,

    #[validate(custom(function = "shared::validation::validate_longitude"))]
    pub center_lng: Option<f64>,

    #[validate(range(min = 20.0, max = 50000.0, message = "Radius must be between 20 and 50000 meters"))]
    pub radius: Option<f64>,

    #[validate(length(min = 3, max = 100, message = "Polygon must have 3-100 vertices"))]
    pub coordinates: Option<Vec<Coordinate>>,

    #[validate(range(min = 0.0, max = 500.0, message = "Tolerance must be between 0 and 500 meters"))]
    pub tolerance_meters: Option<f64>,

    pub is_active: Option<bool>,
}

impl UpdateGeofenceAreaRequest {
    /// Merges the populated fields into an existing record.
    pub fn apply_to(&self, record: &mut GeofenceRecord) {
        if let Some(name) = &self.name {
            record.name = name.clone();
        }
        if self.center_lat.is_some() {
            record.center_lat = self.center_lat;
        }
        if self.center_lng.is_some() {
            record.center_lng = self.center_lng;
        }
        if self.radius.is_some() {
            record.radius = self.radius;
        }
        if let Some(coordinates) = &self.coordinates {
            record.coordinates = Some(coordinates.clone());
        }
        if let Some(tolerance_meters) = self.tolerance_meters {
            record.tolerance_meters = tolerance_meters;
        }
        if let Some(is_active) = self.is_active {
            record.is_active = is_active;
        }
    }
}
