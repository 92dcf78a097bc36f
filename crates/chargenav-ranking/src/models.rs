use chargenav_core::models::{Station, StationFilter, UserLocation, VehicleProfile};
use chrono::NaiveDateTime;

/// Number of stations kept when no limit is configured
pub const DEFAULT_LIMIT: usize = 10;

/// Everything a ranking pass depends on
///
/// Borrowed so that a caller holding application state can rank without
/// cloning the station list.
#[derive(Debug, Clone)]
pub struct RankingRequest<'a> {
    pub stations: &'a [Station],
    pub location: &'a UserLocation,
    pub profile: &'a VehicleProfile,
    pub filter: StationFilter,
    pub limit: usize,
    /// Local time the trip would start
    pub now: NaiveDateTime,
}

impl<'a> RankingRequest<'a> {
    /// Create a request with the default filter and limit
    pub fn new(
        stations: &'a [Station],
        location: &'a UserLocation,
        profile: &'a VehicleProfile,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            stations,
            location,
            profile,
            filter: StationFilter::default(),
            limit: DEFAULT_LIMIT,
            now,
        }
    }

    /// Set the station filter
    pub fn with_filter(mut self, filter: StationFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Set the nearest-N limit
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}
