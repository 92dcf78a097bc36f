//! Serializable application state and its reducer
//!
//! [`apply`] is pure: given a state, an action and the current local time it
//! returns the next state. Any change to stations, location, profile, filter
//! or limit recomputes the ranking from scratch; route results are merged
//! into a freshly built list rather than patched in place.

use chargenav_core::error::ChargenavError;
use chargenav_core::models::{
    Coordinate, RankedStation, RankingOutcome, RouteResult, Station, StationFilter, StationId,
    UserLocation, VehicleProfile,
};
use chargenav_ranking::{rank, RankingRequest, DEFAULT_LIMIT};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::location::{GeolocationEvent, LocationTracker};
use crate::markers::{station_markers, user_marker, MarkerDescriptor, UserMarker};
use crate::notice::Notice;
use crate::panel::{PanelEvent, PanelMachine};

/// Why a route request for the selected station failed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouteFailure {
    Unavailable { reason: String },
    RateLimited { retry_after_secs: Option<u64> },
}

impl RouteFailure {
    /// Classify a routing error; anything that is not rate limiting counts as unavailable
    pub fn from_error(err: &ChargenavError) -> Self {
        match err {
            ChargenavError::RateLimited { retry_after_secs } => {
                RouteFailure::RateLimited { retry_after_secs: *retry_after_secs }
            }
            ChargenavError::RouteUnavailable { reason } => {
                RouteFailure::Unavailable { reason: reason.clone() }
            }
            other => RouteFailure::Unavailable { reason: other.to_string() },
        }
    }
}

/// Input to the reducer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    StationsLoaded { stations: Vec<Station> },
    StationsFailed { reason: String },
    Geolocation { event: GeolocationEvent },
    ProfileChanged { profile: VehicleProfile },
    FilterChanged { filter: StationFilter },
    LimitChanged { limit: usize },
    StationSelected { station_id: StationId },
    SelectionCleared,
    RouteLoaded { route: RouteResult },
    RouteFailed { station_id: StationId, failure: RouteFailure },
    Panel { event: PanelEvent },
    /// Recompute arrival clocks for a new time
    Refresh,
    NoticesDismissed,
}

/// Everything the UI renders from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub stations: Vec<Station>,
    pub tracker: LocationTracker,
    pub profile: VehicleProfile,
    pub filter: StationFilter,
    pub limit: usize,
    pub ranking: RankingOutcome,
    pub selection: Option<StationId>,
    pub route: Option<RouteResult>,
    pub panel: PanelMachine,
    pub notices: Vec<Notice>,
}

impl AppState {
    /// Empty state waiting for stations and a location
    pub fn new(default_location: Coordinate, profile: VehicleProfile) -> Self {
        Self {
            stations: Vec::new(),
            tracker: LocationTracker::new(default_location),
            profile,
            filter: StationFilter::default(),
            limit: DEFAULT_LIMIT,
            ranking: RankingOutcome::NotReady,
            selection: None,
            route: None,
            panel: PanelMachine::new(),
            notices: Vec::new(),
        }
    }

    /// Set the nearest-N limit
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn location(&self) -> &UserLocation {
        self.tracker.location()
    }

    /// Ranked entry for the selected station, if it made the list
    pub fn selected_station(&self) -> Option<&RankedStation> {
        let selection = self.selection.as_ref()?;
        self.ranking.stations().iter().find(|r| &r.station.id == selection)
    }

    /// Markers for the current ranking
    pub fn markers(&self) -> Vec<MarkerDescriptor> {
        let origin = self.location().coordinate();
        station_markers(self.ranking.stations(), origin.as_ref(), self.selection.as_ref())
    }

    pub fn user_marker(&self) -> Option<UserMarker> {
        user_marker(self.location())
    }
}

/// Compute the next state
pub fn apply(mut state: AppState, action: Action, now: NaiveDateTime) -> AppState {
    match action {
        Action::StationsLoaded { stations } => {
            state.stations = stations;
            rerank(&mut state, now);
        }
        Action::StationsFailed { reason } => {
            state.stations = Vec::new();
            post_notice(&mut state, Notice::StationFetchFailed { reason });
            rerank(&mut state, now);
        }
        Action::Geolocation { event } => {
            if let Some(notice) = state.tracker.handle(event) {
                post_notice(&mut state, notice);
            }
            rerank(&mut state, now);
        }
        Action::ProfileChanged { profile } => match profile.validate() {
            Ok(()) => {
                state.profile = profile;
                rerank(&mut state, now);
            }
            Err(e) => tracing::warn!("Ignoring vehicle profile update: {}", e),
        },
        Action::FilterChanged { filter } => {
            state.filter = filter;
            rerank(&mut state, now);
        }
        Action::LimitChanged { limit } => {
            state.limit = limit;
            rerank(&mut state, now);
        }
        Action::StationSelected { station_id } => {
            if state.selection.as_ref() != Some(&station_id) {
                state.route = None;
                state.selection = Some(station_id);
                merge_route(&mut state);
            }
        }
        Action::SelectionCleared => {
            state.selection = None;
            state.route = None;
            merge_route(&mut state);
        }
        Action::RouteLoaded { route } => {
            if state.selection.as_ref() == Some(&route.station_id) {
                state.route = Some(route);
                merge_route(&mut state);
            } else {
                tracing::debug!("Discarding route for unselected station {}", route.station_id);
            }
        }
        Action::RouteFailed { station_id, failure } => {
            if state.selection.as_ref() != Some(&station_id) {
                tracing::debug!("Discarding route failure for unselected station {}", station_id);
                return state;
            }
            match failure {
                RouteFailure::Unavailable { reason } => {
                    state.route = None;
                    merge_route(&mut state);
                    post_notice(&mut state, Notice::RouteUnavailable { station_id, reason });
                }
                RouteFailure::RateLimited { retry_after_secs } => {
                    post_notice(&mut state, Notice::RateLimited { retry_after_secs });
                }
            }
        }
        Action::Panel { event } => {
            state.panel.handle(event);
        }
        Action::Refresh => rerank(&mut state, now),
        Action::NoticesDismissed => state.notices.clear(),
    }
    state
}

/// Queue a notice unless it repeats the most recent one
fn post_notice(state: &mut AppState, notice: Notice) {
    if state.notices.last() != Some(&notice) {
        state.notices.push(notice);
    }
}

fn rerank(state: &mut AppState, now: NaiveDateTime) {
    let request =
        RankingRequest::new(&state.stations, state.tracker.location(), &state.profile, now)
            .with_filter(state.filter)
            .with_limit(state.limit);
    state.ranking = rank(&request);
    merge_route(state);
}

/// Rebuild the ranked list so only the routed station carries road figures
fn merge_route(state: &mut AppState) {
    let merged = match &state.ranking {
        RankingOutcome::NotReady => RankingOutcome::NotReady,
        RankingOutcome::Ranked { stations, location_quality } => RankingOutcome::Ranked {
            stations: stations
                .iter()
                .map(|ranked| match &state.route {
                    Some(route) if route.station_id == ranked.station.id => {
                        ranked.with_route(route)
                    }
                    _ => RankedStation {
                        real_distance_km: None,
                        real_duration_minutes: None,
                        ..ranked.clone()
                    },
                })
                .collect(),
            location_quality: *location_quality,
        },
    };
    state.ranking = merged;
}
