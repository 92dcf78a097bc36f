//! Last-request-wins coordination of route fetches
//!
//! Every request gets a ticket with a sequence number. Only the answer for the
//! newest ticket is applied; answers for older tickets, successful or not,
//! are discarded when they arrive. The state lock is never held across an
//! `.await`, so a coordinator can be shared between tasks behind an `Arc`.

use chargenav_core::error::Result;
use chargenav_core::models::{Coordinate, RouteResult, Station, StationId};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::ports::Router;

/// Identity of an in-flight route request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTicket {
    seq: u64,
    station_id: StationId,
}

impl RouteTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn station_id(&self) -> &StationId {
        &self.station_id
    }
}

/// What happened to a route answer
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    /// The answer belonged to the latest request and is now displayed
    Applied(RouteResult),
    /// A newer request was issued; the answer was dropped
    Superseded,
}

#[derive(Debug, Default)]
struct CoordinatorState {
    latest_seq: u64,
    selection: Option<StationId>,
    route: Option<RouteResult>,
}

/// Coordinates route requests so that only the latest one is displayed
pub struct RouteCoordinator<R: Router> {
    router: R,
    state: Mutex<CoordinatorState>,
}

impl<R: Router> RouteCoordinator<R> {
    /// Create a new coordinator around a router
    pub fn new(router: R) -> Self {
        Self { router, state: Mutex::new(CoordinatorState::default()) }
    }

    /// Get the underlying router
    pub fn router(&self) -> &R {
        &self.router
    }

    /// Start a request for `station_id`, superseding any pending one
    ///
    /// Selecting a different station clears the displayed route.
    pub fn begin(&self, station_id: &StationId) -> RouteTicket {
        let mut state = self.lock();
        state.latest_seq += 1;

        if state.selection.as_ref() != Some(station_id) {
            state.route = None;
            state.selection = Some(station_id.clone());
        }

        RouteTicket { seq: state.latest_seq, station_id: station_id.clone() }
    }

    /// Deliver the answer for `ticket`
    ///
    /// Stale answers yield `Superseded` even when they are errors. For the
    /// latest ticket, `RouteUnavailable` clears the displayed route and
    /// `RateLimited` leaves it as it was; both are returned to the caller.
    pub fn complete(
        &self,
        ticket: RouteTicket,
        result: Result<RouteResult>,
    ) -> Result<RouteOutcome> {
        let mut state = self.lock();

        if ticket.seq != state.latest_seq {
            tracing::debug!(
                "Discarding route answer for station {} (request {} superseded by {})",
                ticket.station_id,
                ticket.seq,
                state.latest_seq
            );
            return Ok(RouteOutcome::Superseded);
        }

        match result {
            Ok(route) => {
                state.route = Some(route.clone());
                Ok(RouteOutcome::Applied(route))
            }
            Err(err) if err.is_transient() => {
                tracing::warn!("{}; keeping the current route", err);
                Err(err)
            }
            Err(err) => {
                tracing::warn!("Route to station {} unavailable: {}", ticket.station_id, err);
                state.route = None;
                Err(err)
            }
        }
    }

    /// Fetch a route to `station` and apply it if no newer request was made meanwhile
    pub async fn fetch_route(&self, origin: Coordinate, station: &Station) -> Result<RouteOutcome> {
        let ticket = self.begin(&station.id);
        let result = self.router.route(origin, station).await;
        self.complete(ticket, result)
    }

    /// Drop the selection and route, invalidating any pending request
    pub fn clear(&self) {
        let mut state = self.lock();
        state.latest_seq += 1;
        state.selection = None;
        state.route = None;
    }

    /// Route currently displayed, if any
    pub fn current_route(&self) -> Option<RouteResult> {
        self.lock().route.clone()
    }

    /// Station the latest request was made for
    pub fn selection(&self) -> Option<StationId> {
        self.lock().selection.clone()
    }

    fn lock(&self) -> MutexGuard<'_, CoordinatorState> {
        // The state is plain data and stays consistent even if a holder panicked
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
