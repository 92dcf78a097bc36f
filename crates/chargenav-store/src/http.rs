use async_trait::async_trait;
use chargenav_core::error::{ChargenavError, Result};
use chargenav_core::models::Station;

use crate::payload::parse_station_payload;
use crate::ports::StationSource;

/// Station source backed by an HTTP endpoint
pub struct HttpStationSource {
    /// Endpoint returning the station list
    url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpStationSource {
    /// Create a new HTTP station source
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), client: reqwest::Client::new() }
    }

    /// Use a preconfigured HTTP client
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }
}

#[async_trait]
impl StationSource for HttpStationSource {
    async fn fetch_stations(&self) -> Result<Vec<Station>> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            ChargenavError::StationFetchFailed {
                reason: format!("Failed to reach station feed at {}: {}", self.url, e),
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ChargenavError::StationFetchFailed {
                reason: format!("Station feed error ({}): {}", status, error_text),
            });
        }

        let body = response.text().await.map_err(|e| ChargenavError::StationFetchFailed {
            reason: format!("Failed to read station feed: {}", e),
        })?;

        let stations = parse_station_payload(&body)?;
        tracing::info!("Fetched {} stations from {}", stations.len(), self.url);
        Ok(stations)
    }

    fn describe(&self) -> String {
        format!("http {}", self.url)
    }
}
