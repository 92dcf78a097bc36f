//! End-to-end session flow: location, ranking, selection and routing

use async_trait::async_trait;
use chargenav_core::error::{ChargenavError, Result};
use chargenav_core::models::{Coordinate, RouteResult, Station, StationId, VehicleProfile};
use chargenav_routing::{RouteCoordinator, RouteOutcome, Router};
use chargenav_session::{
    apply, Action, AppState, GeolocationEvent, MarkerIcon, Notice, PanelEvent, PanelState,
    RouteFailure,
};
use chrono::{NaiveDate, NaiveDateTime};

const DEFAULT: Coordinate = Coordinate::new(39.925533, 32.866287);

/// Router that draws a straight two-point line, or fails for station "down"
struct StraightLineRouter;

#[async_trait]
impl Router for StraightLineRouter {
    async fn route(&self, origin: Coordinate, destination: &Station) -> Result<RouteResult> {
        if destination.id.as_str() == "down" {
            return Err(ChargenavError::RouteUnavailable { reason: "NoRoute".to_string() });
        }
        Ok(RouteResult {
            station_id: destination.id.clone(),
            path: vec![origin, destination.coordinate],
            real_distance_km: 3.4,
            real_duration_seconds: 420,
        })
    }

    fn name(&self) -> &str {
        "straight-line"
    }
}

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(8, 15, 0).unwrap()
}

fn stations() -> Vec<Station> {
    vec![
        Station::new("up", "Kızılay", Coordinate::new(39.920763, 32.854110)).with_dc(2, 1),
        Station::new("down", "Ulus", Coordinate::new(39.941442, 32.854412)).with_dc(2, 0),
    ]
}

async fn select(
    state: AppState,
    coordinator: &RouteCoordinator<StraightLineRouter>,
    id: &str,
) -> AppState {
    let station_id = StationId::new(id);
    let state = apply(state, Action::StationSelected { station_id: station_id.clone() }, now());

    let origin = state.location().coordinate().unwrap();
    let station = state.stations.iter().find(|s| s.id == station_id).unwrap().clone();

    match coordinator.fetch_route(origin, &station).await {
        Ok(RouteOutcome::Applied(route)) => apply(state, Action::RouteLoaded { route }, now()),
        Ok(RouteOutcome::Superseded) => state,
        Err(e) => apply(
            state,
            Action::RouteFailed { station_id, failure: RouteFailure::from_error(&e) },
            now(),
        ),
    }
}

#[tokio::test]
async fn test_denied_location_then_route_selection() {
    let coordinator = RouteCoordinator::new(StraightLineRouter);

    let state = AppState::new(DEFAULT, VehicleProfile::default());
    let state = apply(state, Action::StationsLoaded { stations: stations() }, now());
    assert!(!state.ranking.is_ready());

    let state =
        apply(state, Action::Geolocation { event: GeolocationEvent::PermissionDenied }, now());
    assert!(state.ranking.is_degraded());
    assert!(state.user_marker().unwrap().is_fallback);
    assert!(matches!(state.notices[0], Notice::LocationUnavailable { .. }));

    let state = select(state, &coordinator, "up").await;
    let selected = state.selected_station().unwrap();
    assert_eq!(selected.real_distance_km, Some(3.4));
    assert_eq!(selected.real_duration_minutes, Some(7));
    assert_eq!(coordinator.current_route(), state.route);

    let markers = state.markers();
    let up = markers.iter().find(|m| m.station_id.as_str() == "up").unwrap();
    assert_eq!(up.icon, MarkerIcon::Selected);

    let state = select(state, &coordinator, "down").await;
    assert_eq!(state.route, None);
    assert!(state.ranking.stations().iter().all(|r| !r.has_route()));
    assert!(matches!(state.notices.last(), Some(Notice::RouteUnavailable { .. })));
}

#[test]
fn test_panel_actions() {
    let state = AppState::new(DEFAULT, VehicleProfile::default());
    assert_eq!(state.panel.state(), PanelState::Half);

    let state = apply(state, Action::Panel { event: PanelEvent::DragStarted { y: 600.0 } }, now());
    let state = apply(state, Action::Panel { event: PanelEvent::DragMoved { y: 850.0 } }, now());
    assert_eq!(state.panel.state(), PanelState::Half);

    let state = apply(
        state,
        Action::Panel { event: PanelEvent::DragReleased { viewport_height: 900.0 } },
        now(),
    );
    assert_eq!(state.panel.state(), PanelState::Closed);

    let state = apply(state, Action::Panel { event: PanelEvent::Toggled }, now());
    assert_eq!(state.panel.state(), PanelState::Half);
}

#[test]
fn test_state_is_serializable() {
    let state = AppState::new(DEFAULT, VehicleProfile::default()).with_limit(5);
    let state = apply(state, Action::StationsLoaded { stations: stations() }, now());
    let event = GeolocationEvent::Position { coordinate: DEFAULT, accuracy_m: Some(8.0) };
    let state = apply(state, Action::Geolocation { event }, now());

    let json = serde_json::to_string(&state).unwrap();
    let restored: AppState = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, state);

    let value = serde_json::to_value(&state).unwrap();
    assert_eq!(value["ranking"]["state"], "ranked");
    assert_eq!(value["ranking"]["location_quality"], "live");
}

#[test]
fn test_actions_deserialize_from_tagged_json() {
    let action: Action = serde_json::from_str(
        r#"{"type": "filter_changed", "filter": {"only_available": true, "show_ac": false}}"#,
    )
    .unwrap();
    let state = AppState::new(DEFAULT, VehicleProfile::default());
    let state = apply(state, action, now());

    assert!(state.filter.only_available);
    assert!(state.filter.show_dc);
    assert!(!state.filter.show_ac);
}
