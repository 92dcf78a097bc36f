//! Routing port definitions

use async_trait::async_trait;
use chargenav_core::error::Result;
use chargenav_core::models::{Coordinate, RouteResult, Station};

/// Port for fetching a driving route to a station
#[async_trait]
pub trait Router: Send + Sync {
    /// Fetch a route from `origin` to `destination`
    ///
    /// Fails with `RateLimited` when the service throttles the caller and with
    /// `RouteUnavailable` for every other failure.
    async fn route(&self, origin: Coordinate, destination: &Station) -> Result<RouteResult>;

    /// Get the name of the routing backend
    fn name(&self) -> &str;
}
