use crate::models::{to_geo_point, Coordinate};
use geo::{Bearing, Haversine};

/// Mean Earth radius used for all great-circle distances
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates in kilometers
///
/// Inputs are only expected to be finite; out-of-range latitudes or
/// longitudes give a defined but meaningless result.
pub fn distance_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();

    let (lat_a, lat_b) = (a.latitude.to_radians(), b.latitude.to_radians());
    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);

    // Rounding can push h marginally above 1 for antipodal points
    let c = 2.0 * h.sqrt().min(1.0).asin();
    EARTH_RADIUS_KM * c
}

/// Initial bearing from `from` to `to` in degrees, clockwise from north, in [0, 360)
pub fn bearing_degrees(from: &Coordinate, to: &Coordinate) -> f64 {
    let bearing = Haversine.bearing(to_geo_point(from), to_geo_point(to)).rem_euclid(360.0);
    if bearing >= 360.0 {
        0.0
    } else {
        bearing
    }
}
