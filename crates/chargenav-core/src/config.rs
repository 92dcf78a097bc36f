use crate::error::{ChargenavError, Result};
use crate::models::{Coordinate, VehicleProfile};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// Kızılay, Ankara; used when no location fix can be obtained
pub const DEFAULT_LOCATION: Coordinate = Coordinate::new(39.925533, 32.866287);

/// Public OSRM demo server
pub const DEFAULT_ROUTER_URL: &str = "https://router.project-osrm.org";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for chargenav
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub battery_capacity_kwh: ConfigValue<f64>,
    pub current_charge_percent: ConfigValue<f64>,
    pub average_consumption_per_100km: ConfigValue<f64>,
    pub unit_energy_price: ConfigValue<f64>,
    pub nearest_limit: ConfigValue<usize>,
    pub router_url: ConfigValue<String>,
    pub stations: ConfigValue<Option<String>>,
    pub default_location: ConfigValue<Coordinate>,
    pub location_timeout_secs: ConfigValue<u64>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        let profile = VehicleProfile::default();
        Self {
            battery_capacity_kwh: ConfigValue::new(
                profile.battery_capacity_kwh,
                ConfigSource::Default,
            ),
            current_charge_percent: ConfigValue::new(
                profile.current_charge_percent,
                ConfigSource::Default,
            ),
            average_consumption_per_100km: ConfigValue::new(
                profile.average_consumption_per_100km,
                ConfigSource::Default,
            ),
            unit_energy_price: ConfigValue::new(profile.unit_energy_price, ConfigSource::Default),
            nearest_limit: ConfigValue::new(10, ConfigSource::Default),
            router_url: ConfigValue::new(DEFAULT_ROUTER_URL.to_string(), ConfigSource::Default),
            stations: ConfigValue::new(None, ConfigSource::Default),
            default_location: ConfigValue::new(DEFAULT_LOCATION, ConfigSource::Default),
            location_timeout_secs: ConfigValue::new(10, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ChargenavError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| ChargenavError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(vehicle) = file_config.vehicle {
            if let Some(capacity) = vehicle.battery_capacity_kwh {
                self.battery_capacity_kwh.update(capacity, ConfigSource::File);
            }
            if let Some(charge) = vehicle.current_charge_percent {
                self.current_charge_percent.update(charge, ConfigSource::File);
            }
            if let Some(consumption) = vehicle.average_consumption_per_100km {
                self.average_consumption_per_100km.update(consumption, ConfigSource::File);
            }
            if let Some(price) = vehicle.unit_energy_price {
                self.unit_energy_price.update(price, ConfigSource::File);
            }
        }

        if let Some(limit) = file_config.nearest_limit {
            self.nearest_limit.update(validate_limit(limit)?, ConfigSource::File);
        }

        if let Some(router_url) = file_config.router_url {
            self.router_url.update(router_url, ConfigSource::File);
        }

        if let Some(stations) = file_config.stations {
            self.stations.update(Some(stations), ConfigSource::File);
        }

        if let Some(location) = file_config.default_location {
            self.default_location.update(location, ConfigSource::File);
        }

        if let Some(timeout) = file_config.location_timeout_secs {
            self.location_timeout_secs.update(timeout, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        if let Some(capacity) = env_number::<f64>("CHARGENAV_BATTERY_KWH") {
            self.battery_capacity_kwh.update(capacity, ConfigSource::Environment);
        }

        if let Some(charge) = env_number::<f64>("CHARGENAV_CHARGE_PERCENT") {
            self.current_charge_percent.update(charge, ConfigSource::Environment);
        }

        if let Some(consumption) = env_number::<f64>("CHARGENAV_CONSUMPTION") {
            self.average_consumption_per_100km.update(consumption, ConfigSource::Environment);
        }

        if let Some(price) = env_number::<f64>("CHARGENAV_ENERGY_PRICE") {
            self.unit_energy_price.update(price, ConfigSource::Environment);
        }

        // CHARGENAV_NEAREST_LIMIT
        if let Ok(limit_str) = env::var("CHARGENAV_NEAREST_LIMIT") {
            match parse_limit(&limit_str) {
                Ok(limit) => self.nearest_limit.update(limit, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid CHARGENAV_NEAREST_LIMIT value '{}': expected a positive integer",
                    limit_str
                ),
            }
        }

        if let Ok(router_url) = env::var("CHARGENAV_ROUTER_URL") {
            self.router_url.update(router_url, ConfigSource::Environment);
        }

        if let Ok(stations) = env::var("CHARGENAV_STATIONS") {
            self.stations.update(Some(stations), ConfigSource::Environment);
        }

        // Both halves are required; a lone latitude or longitude is ignored
        match (
            env_number::<f64>("CHARGENAV_DEFAULT_LAT"),
            env_number::<f64>("CHARGENAV_DEFAULT_LNG"),
        ) {
            (Some(latitude), Some(longitude)) => self
                .default_location
                .update(Coordinate::new(latitude, longitude), ConfigSource::Environment),
            (None, None) => {}
            _ => tracing::warn!(
                "CHARGENAV_DEFAULT_LAT and CHARGENAV_DEFAULT_LNG must be set together; ignoring"
            ),
        }

        if let Some(timeout) = env_number::<u64>("CHARGENAV_LOCATION_TIMEOUT_SECS") {
            self.location_timeout_secs.update(timeout, ConfigSource::Environment);
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(capacity) = overrides.battery_capacity_kwh {
            self.battery_capacity_kwh.update(capacity, ConfigSource::Cli);
        }

        if let Some(charge) = overrides.current_charge_percent {
            self.current_charge_percent.update(charge, ConfigSource::Cli);
        }

        if let Some(consumption) = overrides.average_consumption_per_100km {
            self.average_consumption_per_100km.update(consumption, ConfigSource::Cli);
        }

        if let Some(price) = overrides.unit_energy_price {
            self.unit_energy_price.update(price, ConfigSource::Cli);
        }

        if let Some(limit) = overrides.nearest_limit {
            self.nearest_limit.update(limit, ConfigSource::Cli);
        }

        if let Some(router_url) = overrides.router_url {
            self.router_url.update(router_url, ConfigSource::Cli);
        }

        if let Some(stations) = overrides.stations {
            self.stations.update(Some(stations), ConfigSource::Cli);
        }
    }

    /// Build and validate the vehicle profile from the resolved values
    pub fn vehicle_profile(&self) -> Result<VehicleProfile> {
        VehicleProfile::new(
            self.battery_capacity_kwh.value,
            self.current_charge_percent.value,
            self.average_consumption_per_100km.value,
            self.unit_energy_price.value,
        )
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "battery_capacity_kwh".to_string(),
            (format!("{} kWh", self.battery_capacity_kwh.value), self.battery_capacity_kwh.source),
        );

        map.insert(
            "current_charge_percent".to_string(),
            (
                format!("{}%", self.current_charge_percent.value),
                self.current_charge_percent.source,
            ),
        );

        map.insert(
            "average_consumption_per_100km".to_string(),
            (
                format!("{} kWh/100km", self.average_consumption_per_100km.value),
                self.average_consumption_per_100km.source,
            ),
        );

        map.insert(
            "unit_energy_price".to_string(),
            (self.unit_energy_price.value.to_string(), self.unit_energy_price.source),
        );

        map.insert(
            "nearest_limit".to_string(),
            (self.nearest_limit.value.to_string(), self.nearest_limit.source),
        );

        map.insert(
            "router_url".to_string(),
            (self.router_url.value.clone(), self.router_url.source),
        );

        map.insert(
            "stations".to_string(),
            (
                self.stations.value.clone().unwrap_or_else(|| "(built-in sample)".to_string()),
                self.stations.source,
            ),
        );

        map.insert(
            "default_location".to_string(),
            (self.default_location.value.to_string(), self.default_location.source),
        );

        map.insert(
            "location_timeout_secs".to_string(),
            (format!("{}s", self.location_timeout_secs.value), self.location_timeout_secs.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    vehicle: Option<FileVehicleConfig>,
    nearest_limit: Option<usize>,
    router_url: Option<String>,
    stations: Option<String>,
    default_location: Option<Coordinate>,
    location_timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Serialize)]
struct FileVehicleConfig {
    battery_capacity_kwh: Option<f64>,
    current_charge_percent: Option<f64>,
    average_consumption_per_100km: Option<f64>,
    unit_energy_price: Option<f64>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub battery_capacity_kwh: Option<f64>,
    pub current_charge_percent: Option<f64>,
    pub average_consumption_per_100km: Option<f64>,
    pub unit_energy_price: Option<f64>,
    pub nearest_limit: Option<usize>,
    pub router_url: Option<String>,
    pub stations: Option<String>,
}

/// Parse the nearest-N limit from string
pub fn parse_limit(s: &str) -> Result<usize> {
    let limit = s.trim().parse::<usize>().map_err(|_| ChargenavError::ConfigInvalid {
        key: "nearest_limit".to_string(),
        reason: format!("Invalid limit: {}. Use a positive integer", s),
    })?;
    validate_limit(limit)
}

fn validate_limit(limit: usize) -> Result<usize> {
    if limit == 0 {
        return Err(ChargenavError::ConfigInvalid {
            key: "nearest_limit".to_string(),
            reason: "Limit must be at least 1".to_string(),
        });
    }
    Ok(limit)
}

fn env_number<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Invalid {} value '{}': expected a number", key, raw);
            None
        }
    }
}
