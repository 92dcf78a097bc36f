//! Declarative map marker descriptors
//!
//! The map widget renders whatever these describe; nothing here touches a
//! rendering API.

use chargenav_core::models::{Coordinate, RankedStation, StationId, StationStatus, UserLocation};
use chargenav_geo::bearing_degrees;
use serde::{Deserialize, Serialize};

/// Icon to draw for a station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerIcon {
    Available,
    Busy,
    OutOfService,
    /// Cannot be reached on the current charge
    OutOfRange,
    Selected,
}

/// Station marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerDescriptor {
    pub station_id: StationId,
    pub position: Coordinate,
    pub icon: MarkerIcon,
    pub label: String,
    /// Direction from the user, for directional arrows
    pub bearing_degrees: Option<f64>,
}

/// Marker for the user's own position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMarker {
    pub position: Coordinate,
    /// Drawn differently when the position is the default coordinate
    pub is_fallback: bool,
    pub accuracy_m: Option<f64>,
}

impl MarkerDescriptor {
    /// Describe one ranked station
    pub fn for_station(
        ranked: &RankedStation,
        origin: Option<&Coordinate>,
        selection: Option<&StationId>,
    ) -> Self {
        let station = &ranked.station;
        let icon = if selection == Some(&station.id) {
            MarkerIcon::Selected
        } else if !ranked.is_within_range {
            MarkerIcon::OutOfRange
        } else {
            match station.status() {
                StationStatus::Available => MarkerIcon::Available,
                StationStatus::Busy => MarkerIcon::Busy,
                StationStatus::OutOfService => MarkerIcon::OutOfService,
            }
        };

        Self {
            station_id: station.id.clone(),
            position: station.coordinate,
            icon,
            label: format!("{} • {:.1} km", station.name, ranked.distance_km),
            bearing_degrees: origin.map(|o| bearing_degrees(o, &station.coordinate)),
        }
    }
}

/// Markers for a ranked list, in ranking order
pub fn station_markers(
    ranked: &[RankedStation],
    origin: Option<&Coordinate>,
    selection: Option<&StationId>,
) -> Vec<MarkerDescriptor> {
    ranked.iter().map(|r| MarkerDescriptor::for_station(r, origin, selection)).collect()
}

/// Marker for the user's position, if one is known
pub fn user_marker(location: &UserLocation) -> Option<UserMarker> {
    match location {
        UserLocation::Unknown => None,
        UserLocation::Live { coordinate, accuracy_m } => {
            Some(UserMarker { position: *coordinate, is_fallback: false, accuracy_m: *accuracy_m })
        }
        UserLocation::Fallback { coordinate, .. } => {
            Some(UserMarker { position: *coordinate, is_fallback: true, accuracy_m: None })
        }
    }
}
