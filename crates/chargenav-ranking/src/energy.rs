//! Energy, cost and reachability projections
//!
//! All functions are pure; a negative remaining charge means the destination
//! is out of range and is reported as such rather than clamped. Reachability
//! is always decided against [`range_km`], and the arrival charge is kept on
//! the same side of zero as that decision.

use chargenav_core::models::VehicleProfile;
use serde::{Deserialize, Serialize};

/// Energy needed to drive `distance_km`, in kWh
pub fn consumption_kwh(distance_km: f64, profile: &VehicleProfile) -> f64 {
    distance_km * profile.average_consumption_per_100km / 100.0
}

/// Cost of `consumption_kwh` at the profile's energy price
pub fn trip_cost(consumption_kwh: f64, profile: &VehicleProfile) -> f64 {
    consumption_kwh * profile.unit_energy_price
}

/// State of charge left after consuming `consumed_kwh`, as a percentage of capacity
pub fn remaining_charge_percent(consumed_kwh: f64, profile: &VehicleProfile) -> f64 {
    let remaining_kwh = profile.current_energy_kwh() - consumed_kwh;
    remaining_kwh / profile.battery_capacity_kwh * 100.0
}

/// Distance drivable on the current charge, in kilometers
pub fn range_km(profile: &VehicleProfile) -> f64 {
    profile.current_energy_kwh() / profile.average_consumption_per_100km * 100.0
}

/// Whether `distance_km` can be driven on the current charge
pub fn is_reachable(distance_km: f64, profile: &VehicleProfile) -> bool {
    distance_km <= range_km(profile)
}

/// Energy projection for a single trip
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TripEstimate {
    pub distance_km: f64,
    pub consumption_kwh: f64,
    pub cost: f64,
    pub arrival_charge_percent: f64,
    pub is_within_range: bool,
}

impl TripEstimate {
    /// Project consumption, cost and arrival charge for `distance_km`
    pub fn for_distance(distance_km: f64, profile: &VehicleProfile) -> Self {
        let consumption = consumption_kwh(distance_km, profile);
        let is_within_range = is_reachable(distance_km, profile);
        let remaining = remaining_charge_percent(consumption, profile);
        // Rounding near the range boundary must not flip the sign
        let arrival_charge_percent =
            if is_within_range { remaining.max(0.0) } else { remaining.min(0.0) };
        Self {
            distance_km,
            consumption_kwh: consumption,
            cost: trip_cost(consumption, profile),
            arrival_charge_percent,
            is_within_range,
        }
    }
}
