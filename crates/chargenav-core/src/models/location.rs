use crate::models::Coordinate;
use serde::{Deserialize, Serialize};

/// Best known position of the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UserLocation {
    /// No fix yet; ranking must not run
    #[default]
    Unknown,

    /// Fix reported by the geolocation collaborator
    Live {
        coordinate: Coordinate,
        accuracy_m: Option<f64>,
    },

    /// Default coordinate used after the fix could not be obtained
    Fallback { coordinate: Coordinate, reason: String },
}

impl UserLocation {
    pub fn live(coordinate: Coordinate) -> Self {
        UserLocation::Live { coordinate, accuracy_m: None }
    }

    pub fn fallback(coordinate: Coordinate, reason: impl Into<String>) -> Self {
        UserLocation::Fallback { coordinate, reason: reason.into() }
    }

    /// Coordinate to rank against, if any
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            UserLocation::Unknown => None,
            UserLocation::Live { coordinate, .. } | UserLocation::Fallback { coordinate, .. } => {
                Some(*coordinate)
            }
        }
    }

    /// Quality of the coordinate, if any
    pub fn quality(&self) -> Option<LocationQuality> {
        match self {
            UserLocation::Unknown => None,
            UserLocation::Live { .. } => Some(LocationQuality::Live),
            UserLocation::Fallback { .. } => Some(LocationQuality::Fallback),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, UserLocation::Fallback { .. })
    }
}

/// Whether a ranking was computed from a real fix or the default coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationQuality {
    Live,
    Fallback,
}
