//! Conversions between the canonical [`Coordinate`] and `geo` types.
//!
//! `geo` stores points as `x = longitude`, `y = latitude`; these helpers keep
//! that swap in one place.

use geo::Point;

pub use chargenav_core::models::Coordinate;

/// Convert a coordinate to a geo::Point
pub fn to_geo_point(coordinate: &Coordinate) -> Point {
    Point::new(coordinate.longitude, coordinate.latitude)
}

/// Convert a geo::Point to a coordinate
pub fn from_geo_point(point: &Point) -> Coordinate {
    Coordinate::new(point.y(), point.x())
}
