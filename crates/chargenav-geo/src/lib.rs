//! Chargenav Geo - Great-circle math and route path helpers
//!
//! This crate handles distance and bearing between coordinates, conversion
//! of routing-service geometry into the canonical coordinate type, and
//! sanity checks on route paths.

pub mod models;
pub mod path;
pub mod spatial;
pub mod validation;

pub use path::{normalize_lng_lat_path, path_length_km};
pub use spatial::{bearing_degrees, distance_km, EARTH_RADIUS_KM};
pub use validation::{validate_path, ValidationResult};
