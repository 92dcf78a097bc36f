use crate::error::{ChargenavError, Result};
use serde::{Deserialize, Serialize};

/// Vehicle parameters used for energy and reachability projections
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleProfile {
    /// Usable battery capacity in kWh
    pub battery_capacity_kwh: f64,

    /// Current state of charge, 0–100
    pub current_charge_percent: f64,

    /// Average consumption in kWh per 100 km
    pub average_consumption_per_100km: f64,

    /// Price of one kWh in the user's currency
    pub unit_energy_price: f64,
}

impl Default for VehicleProfile {
    fn default() -> Self {
        Self {
            battery_capacity_kwh: 60.0,
            current_charge_percent: 80.0,
            average_consumption_per_100km: 16.5,
            unit_energy_price: 8.0,
        }
    }
}

impl VehicleProfile {
    /// Create a validated profile
    pub fn new(
        battery_capacity_kwh: f64,
        current_charge_percent: f64,
        average_consumption_per_100km: f64,
        unit_energy_price: f64,
    ) -> Result<Self> {
        let profile = Self {
            battery_capacity_kwh,
            current_charge_percent,
            average_consumption_per_100km,
            unit_energy_price,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Check every field against its allowed range
    pub fn validate(&self) -> Result<()> {
        if !(self.battery_capacity_kwh.is_finite() && self.battery_capacity_kwh > 0.0) {
            return Err(invalid("battery_capacity_kwh", "must be a positive number"));
        }
        if !(0.0..=100.0).contains(&self.current_charge_percent) {
            return Err(invalid("current_charge_percent", "must be between 0 and 100"));
        }
        if !(self.average_consumption_per_100km.is_finite()
            && self.average_consumption_per_100km > 0.0)
        {
            return Err(invalid("average_consumption_per_100km", "must be a positive number"));
        }
        if !(self.unit_energy_price.is_finite() && self.unit_energy_price >= 0.0) {
            return Err(invalid("unit_energy_price", "must not be negative"));
        }
        Ok(())
    }

    /// Energy currently stored in the battery, in kWh
    pub fn current_energy_kwh(&self) -> f64 {
        self.battery_capacity_kwh * self.current_charge_percent / 100.0
    }
}

fn invalid(field: &str, reason: &str) -> ChargenavError {
    ChargenavError::InvalidProfile { field: field.to_string(), reason: reason.to_string() }
}
