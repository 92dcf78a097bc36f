use crate::error::{ChargenavError, Result};
use crate::models::{Coordinate, StationFilter};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a charging station
///
/// Station feeds use either strings or integers; both deserialize into the
/// same textual identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawStationId")]
pub struct StationId(pub String);

impl StationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawStationId {
    Text(String),
    Number(i64),
}

impl From<RawStationId> for StationId {
    fn from(raw: RawStationId) -> Self {
        match raw {
            RawStationId::Text(text) => StationId(text),
            RawStationId::Number(number) => StationId(number.to_string()),
        }
    }
}

/// Coarse availability used for marker styling
///
/// Feeds without connector counts report it directly as `"available"`,
/// `"busy"` or `"offline"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StationStatus {
    /// At least one connector is free
    Available,
    /// Every connector is occupied
    Busy,
    /// Every DC connector is faulted or unavailable and nothing is free
    #[serde(alias = "offline")]
    OutOfService,
}

/// Charging station as delivered by a station source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,

    pub name: String,

    #[serde(default)]
    pub address: String,

    #[serde(flatten)]
    pub coordinate: Coordinate,

    /// Number of DC connectors
    #[serde(default, alias = "connectorCount")]
    pub connector_count: u32,

    #[serde(default, alias = "availableDC")]
    pub available_dc: u32,

    /// Number of AC connectors, free or not
    #[serde(default, alias = "acConnectorCount")]
    pub ac_connector_count: u32,

    #[serde(default, alias = "availableAC")]
    pub available_ac: u32,

    #[serde(default, alias = "errorCount")]
    pub error_count: u32,

    #[serde(default, alias = "unavailableCount")]
    pub unavailable_count: u32,

    /// Peak charging power in kW, when the feed reports it
    #[serde(default, alias = "power")]
    pub power_kw: Option<f64>,

    /// Plug standards, e.g. "CCS", "CHAdeMO", "Type2"
    #[serde(default, alias = "type", alias = "connectorTypes")]
    pub connector_types: Vec<String>,

    /// Status stated by the feed; only consulted when no connector counts are given
    #[serde(default, rename = "status", skip_serializing_if = "Option::is_none")]
    pub reported_status: Option<StationStatus>,
}

impl Station {
    /// Create a station with no connectors; use the builder methods to add them
    pub fn new(id: impl Into<String>, name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id: StationId::new(id),
            name: name.into(),
            address: String::new(),
            coordinate,
            connector_count: 0,
            available_dc: 0,
            ac_connector_count: 0,
            available_ac: 0,
            error_count: 0,
            unavailable_count: 0,
            power_kw: None,
            connector_types: Vec::new(),
            reported_status: None,
        }
    }

    /// Set the address
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Set DC connector counts
    pub fn with_dc(mut self, total: u32, available: u32) -> Self {
        self.connector_count = total;
        self.available_dc = available;
        self
    }

    /// Set AC connector counts
    pub fn with_ac(mut self, total: u32, available: u32) -> Self {
        self.ac_connector_count = total;
        self.available_ac = available;
        self
    }

    /// Set faulted and unavailable DC connector counts
    pub fn with_faults(mut self, error_count: u32, unavailable_count: u32) -> Self {
        self.error_count = error_count;
        self.unavailable_count = unavailable_count;
        self
    }

    /// Set peak power and plug standards
    pub fn with_power(mut self, power_kw: f64, connector_types: &[&str]) -> Self {
        self.power_kw = Some(power_kw);
        self.connector_types = connector_types.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Set the status stated by the feed
    pub fn with_reported_status(mut self, status: StationStatus) -> Self {
        self.reported_status = Some(status);
        self
    }

    /// Whether the feed gave any connector counts
    pub fn has_connector_counts(&self) -> bool {
        self.connector_count > 0
            || self.available_dc > 0
            || self.ac_connector_count > 0
            || self.available_ac > 0
    }

    pub fn has_dc(&self) -> bool {
        if self.has_connector_counts() {
            self.connector_count > 0
        } else {
            self.connector_types.iter().any(|plug| plug_kind(plug) == Some(PlugKind::Dc))
        }
    }

    pub fn has_ac(&self) -> bool {
        if self.has_connector_counts() {
            self.ac_connector_count > 0 || self.available_ac > 0
        } else {
            self.connector_types.iter().any(|plug| plug_kind(plug) == Some(PlugKind::Ac))
        }
    }

    pub fn has_any_available(&self) -> bool {
        if self.has_connector_counts() {
            self.available_dc > 0 || self.available_ac > 0
        } else {
            self.reported_status == Some(StationStatus::Available)
        }
    }

    /// Whether a connector of a type enabled by `filter` is free
    pub fn has_available_connector(&self, filter: &StationFilter) -> bool {
        if self.has_connector_counts() {
            (filter.show_dc && self.available_dc > 0) || (filter.show_ac && self.available_ac > 0)
        } else {
            self.has_any_available()
                && ((filter.show_dc && self.has_dc()) || (filter.show_ac && self.has_ac()))
        }
    }

    pub fn status(&self) -> StationStatus {
        if !self.has_connector_counts() {
            if let Some(status) = self.reported_status {
                return status;
            }
        }

        let down = u64::from(self.error_count) + u64::from(self.unavailable_count);
        if self.has_any_available() {
            StationStatus::Available
        } else if self.connector_count > 0 && down >= u64::from(self.connector_count) {
            StationStatus::OutOfService
        } else {
            StationStatus::Busy
        }
    }

    /// Check the connector count invariants
    pub fn validate(&self) -> Result<()> {
        if self.id.as_str().trim().is_empty() {
            return Err(self.invalid("station id is empty"));
        }
        if !self.coordinate.is_finite() {
            return Err(self.invalid("coordinates must be finite"));
        }
        if self.available_dc > self.connector_count {
            return Err(self.invalid(format!(
                "{} available DC connectors exceed the {} installed",
                self.available_dc, self.connector_count
            )));
        }
        if self.error_count > self.connector_count {
            return Err(self.invalid(format!(
                "{} faulted connectors exceed the {} installed",
                self.error_count, self.connector_count
            )));
        }
        let accounted = u64::from(self.available_dc)
            + u64::from(self.unavailable_count)
            + u64::from(self.error_count);
        if accounted > u64::from(self.connector_count) {
            return Err(self.invalid(format!(
                "available, unavailable and faulted DC connectors sum to {} of {} installed",
                accounted, self.connector_count
            )));
        }
        Ok(())
    }

    fn invalid(&self, reason: impl Into<String>) -> ChargenavError {
        ChargenavError::InvalidStation { id: self.id.to_string(), reason: reason.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlugKind {
    Ac,
    Dc,
}

fn plug_kind(plug: &str) -> Option<PlugKind> {
    let normalized: String = plug
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if normalized.starts_with("ccs") || normalized.starts_with("chademo") || normalized == "gbtdc" {
        Some(PlugKind::Dc)
    } else if normalized.starts_with("type") || normalized == "j1772" || normalized == "gbtac" {
        Some(PlugKind::Ac)
    } else {
        None
    }
}
