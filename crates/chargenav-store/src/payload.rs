//! Station feed payload parsing
//!
//! Feeds deliver either an envelope `{"status": "success", "data": [...]}` or
//! a bare array of station records.

use chargenav_core::error::{ChargenavError, Result};
use chargenav_core::models::Station;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StationPayload {
    Bare(Vec<Value>),
    Envelope {
        status: Option<String>,
        message: Option<String>,
        #[serde(default)]
        data: Vec<Value>,
    },
}

/// Parse a station feed body, skipping records that fail to decode or validate
pub fn parse_station_payload(body: &str) -> Result<Vec<Station>> {
    let payload: StationPayload =
        serde_json::from_str(body).map_err(|e| ChargenavError::StationFetchFailed {
            reason: format!("Failed to parse station list: {}", e),
        })?;

    let records = match payload {
        StationPayload::Bare(records) => records,
        StationPayload::Envelope { status, message, data } => {
            if let Some(status) = status.filter(|s| !is_success(s)) {
                return Err(ChargenavError::StationFetchFailed {
                    reason: format!(
                        "Station feed reported '{}': {}",
                        status,
                        message.unwrap_or_else(|| "no details".to_string())
                    ),
                });
            }
            data
        }
    };

    let total = records.len();
    let stations: Vec<Station> =
        records.into_iter().enumerate().filter_map(decode_record).collect();

    if stations.len() < total {
        tracing::warn!("Dropped {} of {} station records", total - stations.len(), total);
    }

    Ok(stations)
}

fn decode_record((index, record): (usize, Value)) -> Option<Station> {
    let station: Station = match serde_json::from_value(record) {
        Ok(station) => station,
        Err(e) => {
            tracing::warn!("Skipping station record {}: {}", index, e);
            return None;
        }
    };

    match station.validate() {
        Ok(()) => Some(station),
        Err(e) => {
            tracing::warn!("Skipping station record {}: {}", index, e);
            None
        }
    }
}

fn is_success(status: &str) -> bool {
    status.eq_ignore_ascii_case("success") || status.eq_ignore_ascii_case("ok")
}
