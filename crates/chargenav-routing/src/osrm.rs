use async_trait::async_trait;
use chargenav_core::config::DEFAULT_ROUTER_URL;
use chargenav_core::error::{ChargenavError, Result};
use chargenav_core::models::{Coordinate, RouteResult, Station, StationId};
use chargenav_geo::{normalize_lng_lat_path, path_length_km, validate_path};
use reqwest::header::RETRY_AFTER;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::ports::Router;

/// OSRM-compatible HTTP router
pub struct OsrmRouter {
    /// Base URL of the service (e.g., "https://router.project-osrm.org")
    base_url: String,

    /// Routing profile, "driving" unless overridden
    profile: String,

    /// HTTP client
    client: reqwest::Client,
}

impl OsrmRouter {
    /// Create a new OSRM router
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            profile: "driving".to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Create with the public demo server
    pub fn public() -> Self {
        Self::new(DEFAULT_ROUTER_URL)
    }

    /// Use a different routing profile
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Use a preconfigured HTTP client
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Request URL for a route between two coordinates
    pub fn route_url(&self, origin: &Coordinate, destination: &Coordinate) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}?overview=full&geometries=geojson",
            self.base_url,
            self.profile,
            origin.longitude,
            origin.latitude,
            destination.longitude,
            destination.latitude
        )
    }
}

#[async_trait]
impl Router for OsrmRouter {
    async fn route(&self, origin: Coordinate, destination: &Station) -> Result<RouteResult> {
        let url = self.route_url(&origin, &destination.coordinate);
        tracing::debug!("Requesting route to station {}: {}", destination.id, url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            ChargenavError::RouteUnavailable {
                reason: format!("Failed to reach routing service at {}: {}", self.base_url, e),
            }
        })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse::<u64>().ok());
            return Err(ChargenavError::RateLimited { retry_after_secs });
        }

        let body = response.text().await.map_err(|e| ChargenavError::RouteUnavailable {
            reason: format!("Failed to read routing response: {}", e),
        })?;

        if !status.is_success() {
            // OSRM reports NoRoute and friends with a 400 and a JSON message
            let reason = serde_json::from_str::<OsrmResponse>(&body)
                .ok()
                .and_then(|r| r.message)
                .unwrap_or(body);
            return Err(ChargenavError::RouteUnavailable {
                reason: format!("Routing service error ({}): {}", status, reason),
            });
        }

        parse_route_response(&destination.id, &body)
    }

    fn name(&self) -> &str {
        "osrm"
    }
}

/// Parse an OSRM `route` response body into a route for `station_id`
///
/// Uses the first route. Geometry must be GeoJSON with `[lng, lat]` positions.
pub fn parse_route_response(station_id: &StationId, body: &str) -> Result<RouteResult> {
    let response: OsrmResponse =
        serde_json::from_str(body).map_err(|e| ChargenavError::RouteUnavailable {
            reason: format!("Failed to parse routing response: {}", e),
        })?;

    if response.code != "Ok" {
        return Err(ChargenavError::RouteUnavailable {
            reason: format!(
                "{}: {}",
                response.code,
                response.message.unwrap_or_else(|| "no route found".to_string())
            ),
        });
    }

    let route = response.routes.into_iter().next().ok_or_else(|| ChargenavError::RouteUnavailable {
        reason: "Routing service returned no routes".to_string(),
    })?;

    let pairs = match route.geometry.value {
        geojson::Value::LineString(positions) => positions
            .into_iter()
            .filter(|p| p.len() >= 2)
            .map(|p| [p[0], p[1]])
            .collect::<Vec<_>>(),
        _ => {
            return Err(ChargenavError::RouteUnavailable {
                reason: "Expected LineString route geometry".to_string(),
            })
        }
    };

    let path = normalize_lng_lat_path(&pairs);
    let validation = validate_path(&path);
    if !validation.is_valid {
        return Err(ChargenavError::RouteUnavailable { reason: validation.summary() });
    }

    if !(route.distance.is_finite() && route.distance >= 0.0)
        || !(route.duration.is_finite() && route.duration >= 0.0)
    {
        return Err(ChargenavError::RouteUnavailable {
            reason: "Routing service returned an invalid distance or duration".to_string(),
        });
    }

    let real_distance_km = route.distance / 1000.0;
    let geometry_km = path_length_km(&path);
    if geometry_km > real_distance_km * 1.5 + 0.1 {
        tracing::warn!(
            "Route to station {} reports {:.2} km but its geometry spans {:.2} km",
            station_id,
            real_distance_km,
            geometry_km
        );
    }

    Ok(RouteResult {
        station_id: station_id.clone(),
        path,
        real_distance_km,
        real_duration_seconds: route.duration.round() as u64,
    })
}

/// Response from the OSRM route API
#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: geojson::Geometry,
    /// Meters
    distance: f64,
    /// Seconds
    duration: f64,
}
