//! Error types for chargenav

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChargenavError {
    // Location errors
    #[error("Location unavailable: {reason}")]
    LocationUnavailable { reason: String },

    // Routing errors
    #[error("Route unavailable: {reason}")]
    RouteUnavailable { reason: String },

    #[error("Routing service rate limit reached{}", retry_hint(.retry_after_secs))]
    RateLimited { retry_after_secs: Option<u64> },

    // Station source errors
    #[error("Station list could not be fetched: {reason}")]
    StationFetchFailed { reason: String },

    #[error("Invalid station {id}: {reason}")]
    InvalidStation { id: String, reason: String },

    // Vehicle profile errors
    #[error("Invalid vehicle profile field {field}: {reason}")]
    InvalidProfile { field: String, reason: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

fn retry_hint(retry_after_secs: &Option<u64>) -> String {
    match retry_after_secs {
        Some(secs) => format!(", retry after {}s", secs),
        None => String::new(),
    }
}

impl ChargenavError {
    /// Whether the failure is transient and the previous state should be kept
    pub fn is_transient(&self) -> bool {
        matches!(self, ChargenavError::RateLimited { .. })
    }
}

impl From<serde_json::Error> for ChargenavError {
    fn from(err: serde_json::Error) -> Self {
        ChargenavError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ChargenavError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_message() {
        let err = ChargenavError::RateLimited { retry_after_secs: Some(30) };
        assert_eq!(err.to_string(), "Routing service rate limit reached, retry after 30s");

        let err = ChargenavError::RateLimited { retry_after_secs: None };
        assert_eq!(err.to_string(), "Routing service rate limit reached");
        assert!(err.is_transient());
    }

    #[test]
    fn test_route_unavailable_is_not_transient() {
        let err = ChargenavError::RouteUnavailable { reason: "timeout".to_string() };
        assert!(!err.is_transient());
        assert_eq!(err.to_string(), "Route unavailable: timeout");
    }
}
