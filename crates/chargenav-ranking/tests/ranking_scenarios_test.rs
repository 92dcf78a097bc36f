//! End-to-end ranking scenarios

use chargenav_core::models::{
    Coordinate, LocationQuality, RankingOutcome, Station, StationFilter, UserLocation,
    VehicleProfile,
};
use chargenav_ranking::energy::{range_km, TripEstimate};
use chargenav_ranking::{rank, rank_nearest, RankingRequest};
use chrono::{NaiveDate, NaiveDateTime};

const ANKARA: Coordinate = Coordinate::new(39.925533, 32.866287);

fn morning() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(9, 0, 0).unwrap()
}

fn sample_stations() -> Vec<Station> {
    vec![
        Station::new("1", "Kızılay Şarj", Coordinate::new(39.920763, 32.854110))
            .with_dc(4, 2)
            .with_ac(2, 1),
        Station::new("2", "Ulus Şarj", Coordinate::new(39.941442, 32.854412)).with_dc(2, 0),
        Station::new("3", "Çankaya Şarj", Coordinate::new(39.900833, 32.860556))
            .with_dc(2, 0)
            .with_faults(1, 1),
        Station::new("4", "Bahçeli AC", Coordinate::new(39.919966, 32.828000)).with_ac(3, 3),
    ]
}

#[test]
fn test_twenty_km_energy_scenario() {
    let profile = VehicleProfile::new(60.0, 80.0, 16.5, 8.0).unwrap();
    let estimate = TripEstimate::for_distance(20.0, &profile);

    assert!((estimate.consumption_kwh - 3.3).abs() < 1e-10);
    assert!((estimate.cost - 26.4).abs() < 1e-10);
    assert!((estimate.arrival_charge_percent - 74.5).abs() < 1e-10);
    assert!(estimate.is_within_range);
    assert!((range_km(&profile) - 290.9).abs() < 0.01);
}

#[test]
fn test_three_km_station_precedes_five_km_station() {
    let origin = Coordinate::new(0.0, 0.0);
    let five = Station::new("five", "Five", Coordinate::new(5.0 / 111.19, 0.0)).with_dc(1, 1);
    let three = Station::new("three", "Three", Coordinate::new(0.0, 3.0 / 111.19)).with_dc(1, 1);

    let ranked = rank_nearest(
        &[five, three],
        &origin,
        &VehicleProfile::default(),
        &StationFilter::default(),
        10,
        morning(),
    );

    let ids: Vec<&str> = ranked.iter().map(|r| r.station.id.as_str()).collect();
    assert_eq!(ids, vec!["three", "five"]);
    assert!(ranked[0].distance_km < ranked[1].distance_km);
}

#[test]
fn test_only_available_dc_excludes_station_with_only_free_ac() {
    let filter = StationFilter::new().only_available(true).show_dc(true).show_ac(false);
    let station = Station::new("x", "Busy DC", ANKARA).with_dc(2, 0).with_ac(2, 2);

    let ranked =
        rank_nearest(&[station], &ANKARA, &VehicleProfile::default(), &filter, 10, morning());
    assert!(ranked.is_empty());
}

#[test]
fn test_filtered_ranking_of_sample_stations() {
    let stations = sample_stations();
    let profile = VehicleProfile::default();

    let available = StationFilter::new().only_available(true);
    let ranked = rank_nearest(&stations, &ANKARA, &profile, &available, 10, morning());
    let mut ids: Vec<&str> = ranked.iter().map(|r| r.station.id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["1", "4"]);

    let dc_only = StationFilter::new().show_ac(false);
    let ranked = rank_nearest(&stations, &ANKARA, &profile, &dc_only, 10, morning());
    assert!(ranked.iter().all(|r| r.station.has_dc()));
    assert_eq!(ranked.len(), 3);
}

#[test]
fn test_ranking_is_idempotent() {
    let stations = sample_stations();
    let location = UserLocation::live(ANKARA);
    let profile = VehicleProfile::default();
    let request = RankingRequest::new(&stations, &location, &profile, morning()).with_limit(3);

    let first = rank(&request);
    let second = rank(&request);

    assert_eq!(first, second);
    assert_eq!(first.stations().len(), 3);
    assert!(matches!(
        first,
        RankingOutcome::Ranked { location_quality: LocationQuality::Live, .. }
    ));
}

#[test]
fn test_profile_change_recomputes_reachability() {
    let stations = sample_stations();
    let location = UserLocation::live(Coordinate::new(39.0, 32.0));

    let full = VehicleProfile::default();
    let outcome = rank(&RankingRequest::new(&stations, &location, &full, morning()));
    assert!(outcome.stations().iter().all(|r| r.is_within_range));

    // ~125 km away with barely any charge left
    let nearly_empty = VehicleProfile::new(60.0, 2.0, 16.5, 8.0).unwrap();
    let outcome = rank(&RankingRequest::new(&stations, &location, &nearly_empty, morning()));
    assert!(outcome.stations().iter().all(|r| !r.is_within_range));
    assert!(outcome.stations().iter().all(|r| r.arrival_charge_percent < 0.0));
    assert!(outcome.stations().iter().all(|r| r.display_arrival_charge_percent() == 0.0));
}

#[test]
fn test_ranked_station_serializes_flat_coordinates() {
    let stations = sample_stations();
    let ranked = rank_nearest(
        &stations,
        &ANKARA,
        &VehicleProfile::default(),
        &StationFilter::default(),
        1,
        morning(),
    );

    let json = serde_json::to_value(&ranked[0]).unwrap();
    assert!(json["station"]["latitude"].is_number());
    assert!(json["distance_km"].is_number());
    assert!(json.get("real_distance_km").is_none());
}
