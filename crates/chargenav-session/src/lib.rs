//! Chargenav Session - UI-facing state for a charging map
//!
//! This crate holds the state machines a front end drives: the bottom-sheet
//! panel, the geolocation tracker with its fallback, declarative marker
//! descriptors, and the application state reducer that ties them to ranking
//! and routing results.

pub mod location;
pub mod markers;
pub mod notice;
pub mod panel;
pub mod state;

pub use location::{next_fix_event, GeolocationEvent, LocationTracker};
pub use markers::{station_markers, user_marker, MarkerDescriptor, MarkerIcon, UserMarker};
pub use notice::Notice;
pub use panel::{PanelEvent, PanelMachine, PanelState};
pub use state::{apply, Action, AppState, RouteFailure};
