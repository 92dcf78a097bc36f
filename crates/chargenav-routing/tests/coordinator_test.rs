//! Concurrency tests for route coordination
//!
//! A scripted router holds each request open until the test releases it, so
//! answers can be delivered out of order.

use async_trait::async_trait;
use chargenav_core::error::{ChargenavError, Result};
use chargenav_core::models::{Coordinate, RouteResult, Station, StationId};
use chargenav_routing::{RouteCoordinator, RouteOutcome, Router};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

type Gate = oneshot::Receiver<Result<RouteResult>>;

struct ScriptedRouter {
    gates: Mutex<HashMap<StationId, Gate>>,
    started: mpsc::UnboundedSender<StationId>,
}

impl ScriptedRouter {
    fn new() -> (Self, mpsc::UnboundedReceiver<StationId>) {
        let (started, started_rx) = mpsc::unbounded_channel();
        (Self { gates: Mutex::new(HashMap::new()), started }, started_rx)
    }

    /// Register a pending answer for `station_id` and return its release handle
    fn script(&self, station_id: &str) -> oneshot::Sender<Result<RouteResult>> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(StationId::new(station_id), rx);
        tx
    }
}

#[async_trait]
impl Router for ScriptedRouter {
    async fn route(&self, _origin: Coordinate, destination: &Station) -> Result<RouteResult> {
        let gate = self.gates.lock().unwrap().remove(&destination.id);
        let _ = self.started.send(destination.id.clone());

        match gate {
            Some(gate) => gate.await.unwrap_or_else(|_| {
                Err(ChargenavError::RouteUnavailable { reason: "gate dropped".to_string() })
            }),
            None => Err(ChargenavError::RouteUnavailable { reason: "unscripted".to_string() }),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

const ORIGIN: Coordinate = Coordinate::new(39.925533, 32.866287);

fn station(id: &str, latitude: f64) -> Station {
    Station::new(id, format!("Station {}", id), Coordinate::new(latitude, 32.86)).with_dc(2, 1)
}

fn route_to(station: &Station, km: f64) -> RouteResult {
    RouteResult {
        station_id: station.id.clone(),
        path: vec![ORIGIN, station.coordinate],
        real_distance_km: km,
        real_duration_seconds: (km * 90.0) as u64,
    }
}

#[tokio::test]
async fn test_late_answer_for_previous_selection_is_superseded() {
    let (router, mut started) = ScriptedRouter::new();
    let a = station("A", 39.93);
    let b = station("B", 39.91);

    let release_a = router.script("A");
    let release_b = router.script("B");
    let coordinator = Arc::new(RouteCoordinator::new(router));

    // Select A; its answer is held back
    let pending_a = tokio::spawn({
        let coordinator = Arc::clone(&coordinator);
        let a = a.clone();
        async move { coordinator.fetch_route(ORIGIN, &a).await }
    });
    assert_eq!(started.recv().await, Some(StationId::new("A")));

    // Select B before A answers; B answers immediately
    release_b.send(Ok(route_to(&b, 2.5))).unwrap();
    let outcome_b = coordinator.fetch_route(ORIGIN, &b).await.unwrap();
    assert_eq!(outcome_b, RouteOutcome::Applied(route_to(&b, 2.5)));

    // A finally answers and must be ignored
    release_a.send(Ok(route_to(&a, 1.2))).unwrap();
    let outcome_a = pending_a.await.unwrap().unwrap();
    assert_eq!(outcome_a, RouteOutcome::Superseded);

    assert_eq!(coordinator.current_route(), Some(route_to(&b, 2.5)));
    assert_eq!(coordinator.selection(), Some(StationId::new("B")));
}

#[tokio::test]
async fn test_late_error_does_not_clear_newer_route() {
    let (router, mut started) = ScriptedRouter::new();
    let a = station("A", 39.93);
    let b = station("B", 39.91);

    let release_a = router.script("A");
    let release_b = router.script("B");
    let coordinator = Arc::new(RouteCoordinator::new(router));

    let pending_a = tokio::spawn({
        let coordinator = Arc::clone(&coordinator);
        let a = a.clone();
        async move { coordinator.fetch_route(ORIGIN, &a).await }
    });
    started.recv().await;

    release_b.send(Ok(route_to(&b, 2.5))).unwrap();
    coordinator.fetch_route(ORIGIN, &b).await.unwrap();

    release_a
        .send(Err(ChargenavError::RouteUnavailable { reason: "timeout".to_string() }))
        .unwrap();
    assert_eq!(pending_a.await.unwrap().unwrap(), RouteOutcome::Superseded);
    assert_eq!(coordinator.current_route(), Some(route_to(&b, 2.5)));
}

#[tokio::test]
async fn test_rate_limited_fetch_keeps_previous_route() {
    let (router, _started) = ScriptedRouter::new();
    let a = station("A", 39.93);

    let first = router.script("A");
    let coordinator = RouteCoordinator::new(router);
    first.send(Ok(route_to(&a, 1.2))).unwrap();
    coordinator.fetch_route(ORIGIN, &a).await.unwrap();

    let second = coordinator.router().script("A");
    second.send(Err(ChargenavError::RateLimited { retry_after_secs: None })).unwrap();
    let result = coordinator.fetch_route(ORIGIN, &a).await;

    assert!(matches!(result, Err(ChargenavError::RateLimited { .. })));
    assert_eq!(coordinator.current_route(), Some(route_to(&a, 1.2)));
}

#[tokio::test]
async fn test_unavailable_fetch_clears_route() {
    let (router, _started) = ScriptedRouter::new();
    let a = station("A", 39.93);

    let first = router.script("A");
    let coordinator = RouteCoordinator::new(router);
    first.send(Ok(route_to(&a, 1.2))).unwrap();
    coordinator.fetch_route(ORIGIN, &a).await.unwrap();

    // Nothing scripted for the second attempt
    let result = coordinator.fetch_route(ORIGIN, &a).await;

    assert!(matches!(result, Err(ChargenavError::RouteUnavailable { .. })));
    assert_eq!(coordinator.current_route(), None);
}
