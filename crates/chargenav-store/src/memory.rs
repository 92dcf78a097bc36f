//! In-memory station source for tests and the built-in sample list.

use async_trait::async_trait;
use chargenav_core::error::Result;
use chargenav_core::models::Station;
use std::sync::{Arc, PoisonError, RwLock};

use crate::ports::StationSource;

/// In-memory implementation of StationSource
#[derive(Debug, Clone, Default)]
pub struct MemoryStationSource {
    stations: Arc<RwLock<Vec<Station>>>,
}

impl MemoryStationSource {
    /// Create a source holding `stations`
    pub fn new(stations: Vec<Station>) -> Self {
        Self { stations: Arc::new(RwLock::new(stations)) }
    }

    /// Replace the whole list, as a live feed refresh would
    pub fn replace(&self, stations: Vec<Station>) {
        *self.stations.write().unwrap_or_else(PoisonError::into_inner) = stations;
    }

    /// Number of stations held
    pub fn len(&self) -> usize {
        self.stations.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl StationSource for MemoryStationSource {
    async fn fetch_stations(&self) -> Result<Vec<Station>> {
        let stations = self.stations.read().unwrap_or_else(PoisonError::into_inner);
        Ok(stations.clone())
    }

    fn describe(&self) -> String {
        format!("memory ({} stations)", self.len())
    }
}
