//! Estimate command implementation

use crate::cli::EstimateArgs;
use crate::errors;
use crate::output::OutputWriter;
use crate::output_types::EstimateOutput;
use anyhow::Result;
use chargenav_core::config::LayeredConfig;
use chargenav_ranking::arrival::format_clock;
use chargenav_ranking::energy::range_km;
use chargenav_ranking::{estimated_arrival, estimated_duration_minutes, TripEstimate};
use chrono::{Local, Timelike};

pub fn execute(args: EstimateArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    if !args.distance_km.is_finite() || args.distance_km < 0.0 {
        return Err(errors::invalid_distance(args.distance_km).into());
    }

    let profile = config
        .vehicle_profile()
        .map_err(|e| errors::invalid_profile(&e.to_string()))?;

    let now = Local::now().naive_local();
    let departure = match args.hour {
        Some(hour) => now.date().and_hms_opt(hour, 0, 0).unwrap_or(now),
        None => now,
    };
    let departure_hour = departure.hour();

    let trip = TripEstimate::for_distance(args.distance_km, &profile);
    let minutes = estimated_duration_minutes(args.distance_km, departure_hour);
    let result = EstimateOutput {
        distance_km: trip.distance_km,
        departure_hour,
        consumption_kwh: trip.consumption_kwh,
        cost: trip.cost,
        arrival_charge_percent: trip.arrival_charge_percent,
        is_within_range: trip.is_within_range,
        range_km: range_km(&profile),
        estimated_duration_minutes: minutes,
        estimated_arrival: format_clock(&estimated_arrival(departure, minutes)),
    };

    if output.is_json() {
        output.result(result)?;
        return Ok(());
    }

    output.section(format!("Trip of {:.1} km", result.distance_km));
    output.kv("Consumption", format!("{:.2} kWh", result.consumption_kwh));
    output.kv("Cost", format!("{:.2}", result.cost));
    output.kv(
        "Charge on arrival",
        format!("{:.1}%", result.arrival_charge_percent.max(0.0)),
    );
    output.kv("Duration", format!("{} min (departing {})", minutes, format_clock(&departure)));
    output.kv("Arrival", &result.estimated_arrival);
    output.kv("Range", format!("{:.1} km", result.range_km));

    if !result.is_within_range {
        output.warning(format!(
            "Out of range: the trip needs {:.1}% more charge",
            -result.arrival_charge_percent
        ));
    }

    Ok(())
}
