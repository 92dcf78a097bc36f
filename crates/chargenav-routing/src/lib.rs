//! Chargenav Routing - Route requests to an external routing service
//!
//! This crate defines the router port, an OSRM adapter, and the coordinator
//! that keeps only the most recent route request's answer.

pub mod coordinator;
pub mod directions;
pub mod osrm;
pub mod ports;

pub use coordinator::{RouteCoordinator, RouteOutcome, RouteTicket};
pub use directions::directions_url;
pub use osrm::OsrmRouter;
pub use ports::Router;
