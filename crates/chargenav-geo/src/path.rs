//! Route path helpers

use crate::models::Coordinate;
use crate::spatial::distance_km;

/// Convert `[longitude, latitude]` pairs from a routing service into coordinates
pub fn normalize_lng_lat_path(pairs: &[[f64; 2]]) -> Vec<Coordinate> {
    pairs.iter().copied().map(Coordinate::from_lng_lat).collect()
}

/// Sum of great-circle segment lengths along a path, in kilometers
pub fn path_length_km(path: &[Coordinate]) -> f64 {
    path.windows(2).map(|segment| distance_km(&segment[0], &segment[1])).sum()
}
