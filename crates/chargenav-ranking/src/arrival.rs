//! Travel time and arrival clock estimation
//!
//! Speed depends on trip length and a time-of-day traffic multiplier. This is
//! the only arrival estimator; the ranking engine and the CLI both call it.

use chrono::{NaiveDateTime, TimeDelta};

/// Average speed assumed for a trip of `distance_km`
pub fn estimated_speed_kmh(distance_km: f64) -> f64 {
    if distance_km < 5.0 {
        30.0 // city
    } else if distance_km < 20.0 {
        45.0 // suburban
    } else {
        80.0 // highway
    }
}

/// Congestion factor for the local hour of day (0-23)
///
/// Rush hours 8-10 and 17-19 are the slowest; the shoulders of the working
/// day (7, 11-16 and 20) are moderately slower; nights are free flowing.
pub fn traffic_multiplier(hour: u32) -> f64 {
    match hour {
        8..=10 | 17..=19 => 1.5,
        7 | 11..=16 | 20 => 1.2,
        _ => 1.0,
    }
}

/// Travel time in whole minutes for `distance_km` departing at `hour`
pub fn estimated_duration_minutes(distance_km: f64, hour: u32) -> u32 {
    let hours = distance_km / estimated_speed_kmh(distance_km) * traffic_multiplier(hour);
    (hours * 60.0).round().max(0.0) as u32
}

/// Wall-clock arrival after `minutes` of driving
pub fn estimated_arrival(now: NaiveDateTime, minutes: u32) -> NaiveDateTime {
    now + TimeDelta::minutes(i64::from(minutes))
}

/// Format an arrival time as `HH:MM`
pub fn format_clock(time: &NaiveDateTime) -> String {
    time.format("%H:%M").to_string()
}
