//! Defaults shared across modules (internal).
//!
//! Policy
//! - Fixed constants, taken from how the map front end behaves today.
//!   Callers that need something else pass explicit values instead.

use crate::coord::Coordinate;

/// Seoul City Hall; initial map center and the center of an empty point set.
pub const DEFAULT_CENTER: Coordinate = Coordinate {
    lat: 37.5665,
    lng: 126.978,
};
/// Zoom level of a freshly created map.
pub const DEFAULT_ZOOM: u8 = 12;
/// Zoom level at which the map shows roughly a 100 m scale bar.
pub const ZOOM_100M: u8 = 16;
/// Mean Earth radius in metres (haversine).
pub const EARTH_RADIUS_M: f64 = 6371e3;
/// Minimum vertex count of a drawable polygon.
pub const MIN_POLYGON_POINTS: usize = 3;
/// Default zone fill color.
pub const DEFAULT_COLOR: &str = "#FF6B6B";
/// Colors offered by the zone and marker pickers.
pub const PALETTE: [&str; 6] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#FFA07A", "#98D8C8", "#F7DC6F",
];
