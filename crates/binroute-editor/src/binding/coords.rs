//! Coordinate order at the map seam.
//!
//! Map libraries hand out `[latitude, longitude]`; the engine works in
//! `[longitude, latitude]`. [`to_point`] and [`to_lat_lng`] are the only
//! places the two orders meet.

use binroute_core::Point;
use serde::{Deserialize, Serialize};

/// A position in map-library order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// `[lat, lng]` as emitted by draw tools.
impl From<[f64; 2]> for LatLng {
    fn from(pair: [f64; 2]) -> Self {
        LatLng::new(pair[0], pair[1])
    }
}

/// Map-library position to engine point.
pub fn to_point(position: LatLng) -> Point {
    Point::new(position.lng, position.lat)
}

/// Engine point to map-library position.
pub fn to_lat_lng(point: Point) -> LatLng {
    LatLng::new(point.lat, point.lon)
}

/// Converts a draw-tool path into raw `[lon, lat]` pairs.
pub fn path_to_raw(path: &[LatLng]) -> Vec<[f64; 2]> {
    path.iter().map(|&p| to_point(p).to_array()).collect()
}

pub fn path_to_points(path: &[LatLng]) -> Vec<Point> {
    path.iter().copied().map(to_point).collect()
}

pub fn points_to_path(points: &[Point]) -> Vec<LatLng> {
    points.iter().copied().map(to_lat_lng).collect()
}
