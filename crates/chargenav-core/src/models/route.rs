use crate::models::{Coordinate, StationId};
use serde::{Deserialize, Serialize};

/// Driving route to a station returned by the routing collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    /// Station the route leads to
    pub station_id: StationId,

    /// Polyline in travel order, latitude/longitude convention
    pub path: Vec<Coordinate>,

    /// Road distance in kilometers
    pub real_distance_km: f64,

    /// Driving time in seconds
    pub real_duration_seconds: u64,
}

impl RouteResult {
    /// Driving time rounded to whole minutes
    pub fn real_duration_minutes(&self) -> u32 {
        ((self.real_duration_seconds as f64) / 60.0).round() as u32
    }
}
