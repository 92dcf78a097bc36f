use chargenav_core::models::{
    Coordinate, RankedStation, RankingOutcome, Station, StationFilter, VehicleProfile,
};
use chargenav_geo::distance_km;
use chrono::{NaiveDateTime, Timelike};

use crate::arrival::{estimated_arrival, estimated_duration_minutes};
use crate::energy::TripEstimate;
use crate::models::RankingRequest;

/// Annotate a single station relative to `origin`
pub fn annotate(
    station: &Station,
    origin: &Coordinate,
    profile: &VehicleProfile,
    now: NaiveDateTime,
) -> RankedStation {
    let distance = distance_km(origin, &station.coordinate);
    let duration = estimated_duration_minutes(distance, now.hour());
    let trip = TripEstimate::for_distance(distance, profile);

    RankedStation {
        station: station.clone(),
        distance_km: distance,
        estimated_duration_minutes: duration,
        estimated_arrival: estimated_arrival(now, duration),
        consumption_kwh: trip.consumption_kwh,
        cost_estimate: trip.cost,
        arrival_charge_percent: trip.arrival_charge_percent,
        is_within_range: trip.is_within_range,
        real_distance_km: None,
        real_duration_minutes: None,
    }
}

/// Filter, annotate and order stations by distance, keeping the nearest `limit`
///
/// The sort is stable, so stations at equal distance keep their input order.
pub fn rank_nearest(
    stations: &[Station],
    origin: &Coordinate,
    profile: &VehicleProfile,
    filter: &StationFilter,
    limit: usize,
    now: NaiveDateTime,
) -> Vec<RankedStation> {
    let mut ranked: Vec<RankedStation> = stations
        .iter()
        .filter(|station| filter.matches(station))
        .map(|station| annotate(station, origin, profile, now))
        .collect();

    let matched = ranked.len();
    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked.truncate(limit);

    tracing::debug!(
        total = stations.len(),
        matched,
        kept = ranked.len(),
        "Ranked stations around {}",
        origin
    );

    ranked
}

/// Rank for the request's location, or report that no location is known yet
pub fn rank(request: &RankingRequest<'_>) -> RankingOutcome {
    let (Some(origin), Some(location_quality)) =
        (request.location.coordinate(), request.location.quality())
    else {
        return RankingOutcome::NotReady;
    };

    if request.location.is_degraded() {
        tracing::warn!("Ranking from fallback location {}", origin);
    }

    let stations = rank_nearest(
        request.stations,
        &origin,
        request.profile,
        &request.filter,
        request.limit,
        request.now,
    );

    RankingOutcome::Ranked { stations, location_quality }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chargenav_core::models::{LocationQuality, UserLocation};
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    fn origin() -> Coordinate {
        Coordinate::new(0.0, 0.0)
    }

    /// Station due north of the origin at roughly `km` kilometers
    fn station_at(id: &str, km: f64) -> Station {
        let latitude = km / 111.19;
        Station::new(id, format!("Station {}", id), Coordinate::new(latitude, 0.0)).with_dc(2, 1)
    }

    #[test]
    fn test_closer_station_ranks_first() {
        let stations = vec![station_at("a", 5.0), station_at("b", 3.0)];
        let profile = VehicleProfile::default();

        let ranked =
            rank_nearest(&stations, &origin(), &profile, &StationFilter::default(), 10, noon());

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].station.id.as_str(), "b");
        assert_eq!(ranked[1].station.id.as_str(), "a");
        assert!((ranked[0].distance_km - 3.0).abs() < 0.01);
    }

    #[test]
    fn test_annotation_fields() {
        let station = station_at("a", 40.0);
        let ranked = annotate(&station, &origin(), &VehicleProfile::default(), noon());

        assert!((ranked.distance_km - 40.0).abs() < 0.01);
        assert!((ranked.consumption_kwh - 6.6).abs() < 0.01);
        assert!((ranked.cost_estimate - 52.8).abs() < 0.1);
        assert!(ranked.is_within_range);
        // 40 km highway at noon: 30 min * 1.2
        assert_eq!(ranked.estimated_duration_minutes, 36);
        assert_eq!(ranked.arrival_clock(), "12:36");
        assert!(!ranked.has_route());
    }

    #[test]
    fn test_limit_truncates() {
        let stations: Vec<Station> =
            (0..15).map(|i| station_at(&i.to_string(), 1.0 + i as f64)).collect();

        let ranked = rank_nearest(
            &stations,
            &origin(),
            &VehicleProfile::default(),
            &StationFilter::default(),
            10,
            noon(),
        );

        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked.last().unwrap().station.id.as_str(), "9");
    }

    #[test]
    fn test_empty_station_list() {
        let ranked = rank_nearest(
            &[],
            &origin(),
            &VehicleProfile::default(),
            &StationFilter::default(),
            10,
            noon(),
        );
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_unknown_location_is_not_ready() {
        let stations = vec![station_at("a", 1.0)];
        let location = UserLocation::Unknown;
        let profile = VehicleProfile::default();

        let outcome = rank(&RankingRequest::new(&stations, &location, &profile, noon()));
        assert_eq!(outcome, RankingOutcome::NotReady);
    }

    #[test]
    fn test_fallback_location_is_tagged() {
        let stations = vec![station_at("a", 1.0)];
        let location = UserLocation::fallback(origin(), "timeout");
        let profile = VehicleProfile::default();

        let outcome = rank(&RankingRequest::new(&stations, &location, &profile, noon()));
        assert!(outcome.is_degraded());
        assert_eq!(outcome.stations().len(), 1);
        assert!(matches!(
            outcome,
            RankingOutcome::Ranked { location_quality: LocationQuality::Fallback, .. }
        ));
    }
}
