use chargenav_core::error::ChargenavError;
use chargenav_core::models::StationId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// User-visible notice for a recovered failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// Ranking uses the default coordinate
    LocationUnavailable { reason: String },
    /// Station list could not be loaded; the list is empty
    StationFetchFailed { reason: String },
    /// No route could be drawn to the station
    RouteUnavailable { station_id: StationId, reason: String },
    /// Routing service throttled the request; the previous route is kept
    RateLimited { retry_after_secs: Option<u64> },
}

impl Notice {
    /// Notice for an error raised while serving `station_id`, if it is one users should see
    pub fn from_error(err: &ChargenavError, station_id: Option<&StationId>) -> Option<Self> {
        match err {
            ChargenavError::LocationUnavailable { reason } => {
                Some(Notice::LocationUnavailable { reason: reason.clone() })
            }
            ChargenavError::StationFetchFailed { reason } => {
                Some(Notice::StationFetchFailed { reason: reason.clone() })
            }
            ChargenavError::RateLimited { retry_after_secs } => {
                Some(Notice::RateLimited { retry_after_secs: *retry_after_secs })
            }
            ChargenavError::RouteUnavailable { reason } => station_id.map(|id| {
                Notice::RouteUnavailable { station_id: id.clone(), reason: reason.clone() }
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::LocationUnavailable { reason } => {
                write!(
                    f,
                    "Location unavailable ({}); showing stations near the default location",
                    reason
                )
            }
            Notice::StationFetchFailed { reason } => {
                write!(f, "Could not load stations: {}", reason)
            }
            Notice::RouteUnavailable { station_id, reason } => {
                write!(f, "No route to station {}: {}", station_id, reason)
            }
            Notice::RateLimited { retry_after_secs: Some(secs) } => {
                write!(f, "Routing is busy, try again in {}s", secs)
            }
            Notice::RateLimited { retry_after_secs: None } => {
                write!(f, "Routing is busy, try again shortly")
            }
        }
    }
}
