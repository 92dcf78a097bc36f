use async_trait::async_trait;
use chargenav_core::error::{ChargenavError, Result};
use chargenav_core::models::Station;
use std::path::{Path, PathBuf};

use crate::payload::parse_station_payload;
use crate::ports::StationSource;

/// Station source backed by a JSON file
#[derive(Debug, Clone)]
pub struct FileStationSource {
    path: PathBuf,
}

impl FileStationSource {
    /// Create a source reading `path` on every fetch
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StationSource for FileStationSource {
    async fn fetch_stations(&self) -> Result<Vec<Station>> {
        let body = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ChargenavError::StationFetchFailed {
                reason: format!("Failed to read {}: {}", self.path.display(), e),
            }
        })?;

        let stations = parse_station_payload(&body)?;
        tracing::info!("Loaded {} stations from {}", stations.len(), self.path.display());
        Ok(stations)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
