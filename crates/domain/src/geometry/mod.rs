//! Geofence geometry.
//!
//! Pure, synchronous calculations over in-memory coordinate data. Planar
//! approximations use a local equirectangular frame and are valid for
//! site-scale shapes spanning at most a few kilometers.

pub mod distance;
pub mod polygon;

pub use distance::{distance_meters, EARTH_RADIUS_METERS};
pub use polygon::{
    distance_to_polygon_edge, is_point_in_polygon, is_strictly_inside,
    polygon_area_square_meters, polygon_centroid, sanitize_vertices,
};
