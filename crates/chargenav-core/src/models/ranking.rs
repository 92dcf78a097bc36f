use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{LocationQuality, RouteResult, Station};

/// Station annotated with distance, travel and energy projections
///
/// Created fresh on every ranking pass and never patched afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedStation {
    pub station: Station,

    /// Great-circle distance from the user in kilometers
    pub distance_km: f64,

    pub estimated_duration_minutes: u32,

    /// Local wall-clock arrival time
    pub estimated_arrival: NaiveDateTime,

    pub consumption_kwh: f64,

    pub cost_estimate: f64,

    /// State of charge on arrival; negative when the station is out of range
    pub arrival_charge_percent: f64,

    pub is_within_range: bool,

    /// Road distance, present only after a successful route fetch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_distance_km: Option<f64>,

    /// Road duration, present only after a successful route fetch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_duration_minutes: Option<u32>,
}

impl RankedStation {
    /// Arrival charge clamped for display
    pub fn display_arrival_charge_percent(&self) -> f64 {
        self.arrival_charge_percent.max(0.0)
    }

    /// Arrival time formatted as `HH:MM`
    pub fn arrival_clock(&self) -> String {
        self.estimated_arrival.format("%H:%M").to_string()
    }

    /// Copy of this annotation carrying the road distance and duration of `route`
    pub fn with_route(&self, route: &RouteResult) -> Self {
        Self {
            real_distance_km: Some(route.real_distance_km),
            real_duration_minutes: Some(route.real_duration_minutes()),
            ..self.clone()
        }
    }

    pub fn has_route(&self) -> bool {
        self.real_distance_km.is_some()
    }
}

/// Result of a ranking request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RankingOutcome {
    /// No user location yet
    #[default]
    NotReady,

    /// Nearest stations, closest first
    Ranked {
        stations: Vec<RankedStation>,
        location_quality: LocationQuality,
    },
}

impl RankingOutcome {
    /// Ranked stations, empty when not ready
    pub fn stations(&self) -> &[RankedStation] {
        match self {
            RankingOutcome::NotReady => &[],
            RankingOutcome::Ranked { stations, .. } => stations,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, RankingOutcome::Ranked { .. })
    }

    pub fn is_degraded(&self) -> bool {
        matches!(
            self,
            RankingOutcome::Ranked { location_quality: LocationQuality::Fallback, .. }
        )
    }
}
