//! Geographic data model
//!
//! All coordinates are `[longitude, latitude]` pairs of double precision
//! degrees, matching the GeoJSON convention of the collection-management API.
//! Map libraries that work in `[latitude, longitude]` order convert at the
//! binding seam; nothing in this module knows about that order.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::GeometryError;
use crate::geometry::close_ring;

/// A geographic position. Serialized as `[lon, lat]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    /// Longitude in degrees
    pub lon: f64,
    /// Latitude in degrees
    pub lat: f64,
}

impl Point {
    /// Creates a point from longitude and latitude.
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// True when both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }

    /// Returns the point as a `[lon, lat]` array.
    pub fn to_array(self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

impl From<[f64; 2]> for Point {
    fn from(pair: [f64; 2]) -> Self {
        Point::new(pair[0], pair[1])
    }
}

impl From<Point> for [f64; 2] {
    fn from(point: Point) -> Self {
        point.to_array()
    }
}

impl From<(f64, f64)> for Point {
    fn from((lon, lat): (f64, f64)) -> Self {
        Point::new(lon, lat)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.6}, {:.6}]", self.lon, self.lat)
    }
}

/// A closed boundary ring.
///
/// The first and last point are always coordinate-equal and the ring holds
/// at least three distinct vertices. Instances only come out of
/// [`close_ring`], so the invariant holds for every value of this type,
/// including deserialized ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct Polygon {
    ring: Vec<Point>,
}

impl Polygon {
    /// Wraps a ring that has already been closed and validated.
    pub(crate) fn from_closed_ring(ring: Vec<Point>) -> Self {
        debug_assert!(ring.len() > crate::constants::MIN_RING_VERTICES);
        debug_assert_eq!(ring.first(), ring.last());
        Self { ring }
    }

    /// The closed ring, including the repeated closing point.
    pub fn ring(&self) -> &[Point] {
        &self.ring
    }

    /// The vertices without the repeated closing point.
    pub fn vertices(&self) -> &[Point] {
        &self.ring[..self.ring.len() - 1]
    }

    /// Number of vertices, not counting the closing point.
    pub fn vertex_count(&self) -> usize {
        self.ring.len() - 1
    }

    /// GeoJSON-style ring set with this polygon as the only (outer) ring.
    pub fn to_rings(&self) -> Vec<Vec<Point>> {
        vec![self.ring.clone()]
    }

    /// Consumes the polygon and returns the closed ring.
    pub fn into_ring(self) -> Vec<Point> {
        self.ring
    }
}

impl TryFrom<Vec<Point>> for Polygon {
    type Error = GeometryError;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        close_ring(points)
    }
}

impl From<Polygon> for Vec<Point> {
    fn from(polygon: Polygon) -> Self {
        polygon.ring
    }
}

/// Which route anchor a waypoint designates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaypointKind {
    /// Where the collector starts
    Start,
    /// Where the collector finishes
    End,
}

impl fmt::Display for WaypointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::End => write!(f, "end"),
        }
    }
}

/// Read-only projection of a bin supplied by the host.
///
/// The engine never creates or deletes bins; it displays them and tracks
/// which one is selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinMarker {
    /// Bin identifier as issued by the API
    pub id: String,
    /// Bin position
    pub location: Point,
    /// Fill level shown on the map, in percent
    pub display_fill_level: f64,
    /// Street address, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Waste stream (general, recyclable, organic, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waste_type: Option<String>,
}

impl BinMarker {
    /// Creates a marker with no address or waste type.
    pub fn new(id: impl Into<String>, location: Point, display_fill_level: f64) -> Self {
        Self {
            id: id.into(),
            location,
            display_fill_level,
            address: None,
            waste_type: None,
        }
    }
}

/// Axis-aligned geographic extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl Bounds {
    /// Zero-area bounds around a single point.
    pub fn from_point(point: Point) -> Self {
        Self {
            min_lon: point.lon,
            min_lat: point.lat,
            max_lon: point.lon,
            max_lat: point.lat,
        }
    }

    /// Grows the bounds to include `point`.
    pub fn extend(&mut self, point: Point) {
        self.min_lon = self.min_lon.min(point.lon);
        self.min_lat = self.min_lat.min(point.lat);
        self.max_lon = self.max_lon.max(point.lon);
        self.max_lat = self.max_lat.max(point.lat);
    }

    /// Midpoint of the bounds.
    pub fn center(&self) -> Point {
        Point::new(
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }

    pub fn south_west(&self) -> Point {
        Point::new(self.min_lon, self.min_lat)
    }

    pub fn north_east(&self) -> Point {
        Point::new(self.max_lon, self.max_lat)
    }

    /// True when the bounds collapse to a line or a point.
    pub fn is_degenerate(&self) -> bool {
        self.min_lon >= self.max_lon || self.min_lat >= self.max_lat
    }
}
