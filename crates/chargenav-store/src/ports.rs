use async_trait::async_trait;
use chargenav_core::error::Result;
use chargenav_core::models::Station;

/// Port for loading the station list
#[async_trait]
pub trait StationSource: Send + Sync {
    /// Fetch the current station list
    ///
    /// Individual malformed records are skipped; only a failure to obtain the
    /// list as a whole is reported as `StationFetchFailed`.
    async fn fetch_stations(&self) -> Result<Vec<Station>>;

    /// Human-readable description of where stations come from
    fn describe(&self) -> String;
}
