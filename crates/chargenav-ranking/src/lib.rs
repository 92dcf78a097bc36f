//! Chargenav Ranking - Nearest-station ranking with trip projections
//!
//! This crate turns a station list, a user location and a vehicle profile into
//! an ordered nearest-N list annotated with distance, travel time, arrival
//! clock, energy use, cost and reachability.

pub mod arrival;
pub mod energy;
pub mod engine;
pub mod models;

pub use arrival::{estimated_arrival, estimated_duration_minutes, traffic_multiplier};
pub use energy::TripEstimate;
pub use engine::{annotate, rank, rank_nearest};
pub use models::{RankingRequest, DEFAULT_LIMIT};
