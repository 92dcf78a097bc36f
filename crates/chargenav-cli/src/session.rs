//! Application state for a single command invocation
//!
//! Commands drive the same reducer a map front end would: stations are
//! loaded, the position is reported, and the ranking follows from those
//! actions.

use anyhow::{Context, Result};
use chargenav_core::config::LayeredConfig;
use chargenav_core::error::ChargenavError;
use chargenav_core::models::{Coordinate, StationFilter};
use chargenav_session::{apply, next_fix_event, Action, AppState, GeolocationEvent};
use chargenav_store::open_source;
use chrono::{Local, NaiveDateTime};
use futures::stream::{self, BoxStream, StreamExt};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use crate::cli::PositionArgs;
use crate::errors;

pub struct Session {
    pub state: AppState,
    /// Description of the station source
    pub source: String,
    pub now: NaiveDateTime,
}

impl Session {
    /// Run one more action through the reducer
    pub fn dispatch(mut self, action: Action) -> Self {
        self.state = apply(self.state, action, self.now);
        self
    }
}

/// Load stations and position into a fresh state
pub async fn load(
    config: &LayeredConfig,
    position: &PositionArgs,
    filter: StationFilter,
) -> Result<Session> {
    let profile = config
        .vehicle_profile()
        .map_err(|e| errors::invalid_profile(&e.to_string()))?;

    let now = Local::now().naive_local();
    let state = AppState::new(config.default_location.value, profile)
        .with_limit(config.nearest_limit.value);

    let source = open_source(config.stations.value.as_deref());
    let session = Session { state, source: source.describe(), now }
        .dispatch(Action::FilterChanged { filter });

    let stations = match source.fetch_stations().await {
        Ok(stations) => Action::StationsLoaded { stations },
        Err(ChargenavError::StationFetchFailed { reason }) => Action::StationsFailed { reason },
        Err(other) => Action::StationsFailed { reason: other.to_string() },
    };
    let timeout = Duration::from_secs(config.location_timeout_secs.value);
    let event = position_event(position, timeout).await?;
    Ok(session.dispatch(stations).dispatch(Action::Geolocation { event }))
}

/// Without an explicit position or feed there is no fix, so the tracker falls back
async fn position_event(position: &PositionArgs, timeout: Duration) -> Result<GeolocationEvent> {
    if let Some(path) = &position.position_stream {
        let mut events = open_position_stream(path).await?;
        return Ok(next_fix_event(&mut events, timeout).await);
    }

    Ok(match (position.lat, position.lng) {
        (Some(latitude), Some(longitude)) => GeolocationEvent::Position {
            coordinate: Coordinate::new(latitude, longitude),
            accuracy_m: position.accuracy,
        },
        _ => GeolocationEvent::PositionUnavailable,
    })
}

async fn open_position_stream(path: &str) -> Result<BoxStream<'static, GeolocationEvent>> {
    let reader: Box<dyn AsyncRead + Send + Unpin> = if path == "-" {
        Box::new(tokio::io::stdin())
    } else {
        let file = tokio::fs::File::open(path)
            .await
            .with_context(|| format!("Failed to open position stream {}", path))?;
        Box::new(file)
    };
    Ok(geolocation_events(reader))
}

/// Decode one event per line, skipping blank and malformed lines
fn geolocation_events<R>(reader: R) -> BoxStream<'static, GeolocationEvent>
where
    R: AsyncRead + Send + Unpin + 'static,
{
    let lines = BufReader::new(reader).lines();
    stream::unfold(lines, |mut lines| async move {
        loop {
            match lines.next_line().await {
                Ok(Some(line)) if line.trim().is_empty() => continue,
                Ok(Some(line)) => match serde_json::from_str::<GeolocationEvent>(&line) {
                    Ok(event) => return Some((event, lines)),
                    Err(e) => tracing::warn!("Skipping malformed geolocation event: {}", e),
                },
                Ok(None) => return None,
                Err(e) => {
                    tracing::warn!("Position stream failed: {}", e);
                    return None;
                }
            }
        }
    })
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chargenav_core::models::LocationQuality;
    use chargenav_session::Notice;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_explicit_position_ranks_live() {
        let config = LayeredConfig::with_defaults();
        let position = PositionArgs {
            lat: Some(39.92),
            lng: Some(32.85),
            accuracy: Some(12.0),
            position_stream: None,
        };

        let session = load(&config, &position, StationFilter::default()).await.unwrap();

        assert!(session.state.ranking.is_ready());
        assert!(!session.state.ranking.is_degraded());
        assert!(session.state.notices.is_empty());
        assert!(session.source.starts_with("memory"));
    }

    #[tokio::test]
    async fn test_missing_position_falls_back_with_notice() {
        let config = LayeredConfig::with_defaults();

        let session =
            load(&config, &PositionArgs::default(), StationFilter::default()).await.unwrap();

        assert!(session.state.ranking.is_degraded());
        assert_eq!(session.state.location().quality(), Some(LocationQuality::Fallback));
        assert!(matches!(session.state.notices[..], [Notice::LocationUnavailable { .. }]));
    }

    #[tokio::test]
    async fn test_unreadable_station_file_yields_empty_ranking() {
        let mut config = LayeredConfig::with_defaults();
        config.update_from_cli(chargenav_core::config::CliConfigOverrides {
            stations: Some("/definitely/not/here.json".to_string()),
            ..Default::default()
        });
        let position = PositionArgs {
            lat: Some(39.92),
            lng: Some(32.85),
            accuracy: None,
            position_stream: None,
        };

        let session = load(&config, &position, StationFilter::default()).await.unwrap();

        assert!(session.state.ranking.stations().is_empty());
        assert!(matches!(session.state.notices[..], [Notice::StationFetchFailed { .. }]));
    }

    #[tokio::test]
    async fn test_position_stream_first_event_wins() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file).unwrap();
        writeln!(file, "not json").unwrap();
        let fix = GeolocationEvent::Position {
            coordinate: Coordinate::new(39.93, 32.86),
            accuracy_m: Some(8.0),
        };
        writeln!(file, "{}", serde_json::to_string(&fix).unwrap()).unwrap();
        writeln!(file, r#"{{"type": "permission_denied"}}"#).unwrap();
        let position = PositionArgs {
            position_stream: Some(file.path().display().to_string()),
            ..Default::default()
        };

        let session = load(&LayeredConfig::with_defaults(), &position, StationFilter::default())
            .await
            .unwrap();

        assert_eq!(session.state.location().quality(), Some(LocationQuality::Live));
        assert_eq!(session.state.location().coordinate(), Some(Coordinate::new(39.93, 32.86)));
        assert!(session.state.notices.is_empty());
    }

    #[tokio::test]
    async fn test_empty_position_stream_falls_back() {
        let file = NamedTempFile::new().unwrap();
        let position = PositionArgs {
            position_stream: Some(file.path().display().to_string()),
            ..Default::default()
        };

        let session = load(&LayeredConfig::with_defaults(), &position, StationFilter::default())
            .await
            .unwrap();

        assert!(session.state.ranking.is_degraded());
        assert!(matches!(session.state.notices[..], [Notice::LocationUnavailable { .. }]));
    }

    #[tokio::test]
    async fn test_silent_position_feed_times_out() {
        let (_writer, reader) = tokio::io::duplex(64);
        let mut events = geolocation_events(reader);

        let event = next_fix_event(&mut events, Duration::from_millis(20)).await;
        assert_eq!(event, GeolocationEvent::Timeout);
    }

    #[tokio::test]
    async fn test_missing_position_stream_is_an_error() {
        let position = PositionArgs {
            position_stream: Some("/definitely/not/here.jsonl".to_string()),
            ..Default::default()
        };
        let result =
            load(&LayeredConfig::with_defaults(), &position, StationFilter::default()).await;
        assert!(result.is_err());
    }
}
