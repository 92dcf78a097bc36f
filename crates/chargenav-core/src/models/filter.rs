use crate::models::Station;
use serde::{Deserialize, Serialize};

/// Availability and connector-type filter applied before ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationFilter {
    /// Require at least one free connector of an enabled type
    #[serde(default)]
    pub only_available: bool,

    /// Include stations with DC capability
    #[serde(default = "enabled")]
    pub show_dc: bool,

    /// Include stations with AC capability
    #[serde(default = "enabled")]
    pub show_ac: bool,
}

fn enabled() -> bool {
    true
}

impl Default for StationFilter {
    fn default() -> Self {
        Self { only_available: false, show_dc: true, show_ac: true }
    }
}

impl StationFilter {
    /// Create a filter that admits every station
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a free connector
    pub fn only_available(mut self, only_available: bool) -> Self {
        self.only_available = only_available;
        self
    }

    /// Show or hide DC stations
    pub fn show_dc(mut self, show: bool) -> Self {
        self.show_dc = show;
        self
    }

    /// Show or hide AC stations
    pub fn show_ac(mut self, show: bool) -> Self {
        self.show_ac = show;
        self
    }

    /// Check if the filter has no constraints
    pub fn is_unrestricted(&self) -> bool {
        self.show_dc && self.show_ac && !self.only_available
    }

    /// Check if a station passes the filter
    pub fn matches(&self, station: &Station) -> bool {
        if self.is_unrestricted() {
            return true;
        }

        let visible = (self.show_dc && station.has_dc()) || (self.show_ac && station.has_ac());
        if !visible {
            return false;
        }

        !self.only_available || station.has_available_connector(self)
    }
}
