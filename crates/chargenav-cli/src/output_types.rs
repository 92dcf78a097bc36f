use chargenav_core::config::ConfigSource;
use chargenav_core::models::{Coordinate, LocationQuality, RankedStation, StationId};
use chargenav_session::{MarkerDescriptor, Notice, UserMarker};
use serde::Serialize;
use std::collections::BTreeMap;

/// Where the ranking was computed from
#[derive(Debug, Serialize)]
pub struct OriginOutput {
    pub coordinate: Coordinate,
    pub quality: LocationQuality,
}

/// Output for nearby command
#[derive(Debug, Serialize)]
pub struct NearbyOutput {
    pub origin: Option<OriginOutput>,
    pub source: String,
    pub range_km: f64,
    pub stations: Vec<RankedStation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markers: Option<MarkersOutput>,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Serialize)]
pub struct MarkersOutput {
    pub user: Option<UserMarker>,
    pub stations: Vec<MarkerDescriptor>,
}

/// Output for route command
#[derive(Debug, Serialize)]
pub struct RouteOutput {
    pub station_id: StationId,
    pub station: RankedStation,
    pub route: Option<RouteSummary>,
    pub directions_url: String,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Serialize)]
pub struct RouteSummary {
    pub real_distance_km: f64,
    pub real_duration_minutes: u32,
    pub path: Vec<Coordinate>,
}

/// Output for estimate command
#[derive(Debug, Serialize)]
pub struct EstimateOutput {
    pub distance_km: f64,
    pub departure_hour: u32,
    pub consumption_kwh: f64,
    pub cost: f64,
    pub arrival_charge_percent: f64,
    pub is_within_range: bool,
    pub range_km: f64,
    pub estimated_duration_minutes: u32,
    pub estimated_arrival: String,
}

/// Output for config command
#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub values: BTreeMap<String, ConfigValue<String>>,
}

#[derive(Debug, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}
