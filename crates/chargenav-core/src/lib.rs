//! chargenav Core - Domain models, errors, and configuration
//!
//! This crate contains the station, vehicle and route models shared by the
//! ranking engine, the route coordinator and the adapters.

pub mod config;
pub mod error;
pub mod models;

pub use error::{ChargenavError, Result};
