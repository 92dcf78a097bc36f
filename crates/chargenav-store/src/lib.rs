//! Chargenav Store - Station list sources
//!
//! This crate defines the station source port and provides adapters for an
//! in-memory list, a JSON fixture file and an HTTP endpoint.

pub mod file;
pub mod fixture;
pub mod http;
pub mod memory;
pub mod payload;
pub mod ports;

pub use file::FileStationSource;
pub use fixture::sample_stations;
pub use http::HttpStationSource;
pub use memory::MemoryStationSource;
pub use payload::parse_station_payload;
pub use ports::StationSource;

/// Pick a source for a configured location
///
/// `http://` and `https://` locations are fetched over HTTP, anything else is
/// read as a file, and no location falls back to the built-in sample list.
pub fn open_source(location: Option<&str>) -> Box<dyn StationSource> {
    match location {
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
            Box::new(HttpStationSource::new(url))
        }
        Some(path) => Box::new(FileStationSource::new(path)),
        None => Box::new(MemoryStationSource::new(sample_stations())),
    }
}
