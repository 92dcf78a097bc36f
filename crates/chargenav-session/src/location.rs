//! Geolocation tracking with fallback to a default coordinate
//!
//! Position events become a live location. Permission denial is terminal;
//! after it the tracker stays on the fallback coordinate and ignores further
//! events. Every fallback comes with a notice so the degraded ranking is
//! visible to the user.

use chargenav_core::models::{Coordinate, UserLocation};
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::notice::Notice;

/// How long to wait for the first fix before falling back
pub const DEFAULT_FIX_TIMEOUT: Duration = Duration::from_secs(10);

/// Event reported by the geolocation collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeolocationEvent {
    Position { coordinate: Coordinate, accuracy_m: Option<f64> },
    PermissionDenied,
    Timeout,
    PositionUnavailable,
}

/// Wait up to `timeout` for the next event from a position feed
///
/// A feed that closes without reporting yields `PositionUnavailable`; one
/// that stays silent yields `Timeout`.
pub async fn next_fix_event<S>(events: &mut S, timeout: Duration) -> GeolocationEvent
where
    S: Stream<Item = GeolocationEvent> + Unpin,
{
    match tokio::time::timeout(timeout, events.next()).await {
        Ok(Some(event)) => event,
        Ok(None) => GeolocationEvent::PositionUnavailable,
        Err(_) => GeolocationEvent::Timeout,
    }
}

/// Folds geolocation events into the user's location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationTracker {
    default_location: Coordinate,
    location: UserLocation,
    permission_denied: bool,
}

impl LocationTracker {
    /// Create a tracker with no fix yet
    pub fn new(default_location: Coordinate) -> Self {
        Self { default_location, location: UserLocation::Unknown, permission_denied: false }
    }

    pub fn location(&self) -> &UserLocation {
        &self.location
    }

    pub fn default_location(&self) -> Coordinate {
        self.default_location
    }

    pub fn is_permission_denied(&self) -> bool {
        self.permission_denied
    }

    /// Apply one event, returning a notice when the tracker falls back
    pub fn handle(&mut self, event: GeolocationEvent) -> Option<Notice> {
        if self.permission_denied {
            tracing::debug!("Ignoring geolocation event after permission denial: {:?}", event);
            return None;
        }

        match event {
            GeolocationEvent::Position { coordinate, accuracy_m } if coordinate.is_finite() => {
                self.location = UserLocation::Live { coordinate, accuracy_m };
                None
            }
            GeolocationEvent::Position { .. } => self.position_unavailable(),
            GeolocationEvent::PermissionDenied => {
                self.permission_denied = true;
                Some(self.fall_back("permission denied"))
            }
            GeolocationEvent::Timeout => Some(self.fall_back("timed out")),
            GeolocationEvent::PositionUnavailable => self.position_unavailable(),
        }
    }

    /// Wait for the first event, falling back if none arrives within `timeout`
    pub async fn acquire_first_fix<S>(
        &mut self,
        events: &mut S,
        timeout: Duration,
    ) -> Option<Notice>
    where
        S: Stream<Item = GeolocationEvent> + Unpin,
    {
        let event = next_fix_event(events, timeout).await;
        self.handle(event)
    }

    fn position_unavailable(&mut self) -> Option<Notice> {
        // A previous fix is better than the default coordinate
        if matches!(self.location, UserLocation::Live { .. }) {
            return None;
        }
        Some(self.fall_back("position unavailable"))
    }

    fn fall_back(&mut self, reason: &str) -> Notice {
        tracing::warn!(
            "Geolocation {}; using default location {}",
            reason,
            self.default_location
        );
        self.location = UserLocation::fallback(self.default_location, reason);
        Notice::LocationUnavailable { reason: reason.to_string() }
    }
}
