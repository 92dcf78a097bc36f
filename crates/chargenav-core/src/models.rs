pub mod coordinate;
pub mod filter;
pub mod location;
pub mod profile;
pub mod ranking;
pub mod route;
pub mod station;

pub use coordinate::Coordinate;
pub use filter::StationFilter;
pub use location::{LocationQuality, UserLocation};
pub use profile::VehicleProfile;
pub use ranking::{RankedStation, RankingOutcome};
pub use route::RouteResult;
pub use station::{Station, StationId, StationStatus};
