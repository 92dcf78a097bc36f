use serde::{Deserialize, Serialize};
use std::fmt;

/// WGS 84 position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Build from a `[longitude, latitude]` pair as emitted by GeoJSON services
    pub fn from_lng_lat(pair: [f64; 2]) -> Self {
        Self::new(pair[1], pair[0])
    }

    /// `[longitude, latitude]` order, used when talking to routing services
    pub fn to_lng_lat(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lng_lat_order() {
        let coord = Coordinate::from_lng_lat([32.866287, 39.925533]);
        assert_eq!(coord.latitude, 39.925533);
        assert_eq!(coord.longitude, 32.866287);
        assert_eq!(coord.to_lng_lat(), [32.866287, 39.925533]);
    }

    #[test]
    fn test_display_is_lat_lng() {
        let coord = Coordinate::new(39.93, 32.87);
        assert_eq!(coord.to_string(), "39.930000,32.870000");
    }

    #[test]
    fn test_serialization_field_names() {
        let json = serde_json::to_value(Coordinate::new(1.0, 2.0)).unwrap();
        assert_eq!(json["latitude"], 1.0);
        assert_eq!(json["longitude"], 2.0);
    }

    #[test]
    fn test_non_finite() {
        assert!(!Coordinate::new(f64::NAN, 0.0).is_finite());
        assert!(Coordinate::new(-90.0, 180.0).is_finite());
    }
}
