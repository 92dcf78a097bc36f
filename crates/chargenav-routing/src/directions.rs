use chargenav_core::models::Coordinate;

const DIRECTIONS_BASE: &str = "https://www.google.com/maps/dir/";

/// Deep link that opens turn-by-turn driving directions in Google Maps
pub fn directions_url(origin: &Coordinate, destination: &Coordinate) -> String {
    format!(
        "{}?api=1&origin={}&destination={}&travelmode=driving",
        DIRECTIONS_BASE, origin, destination
    )
}
