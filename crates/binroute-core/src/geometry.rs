//! Geometry layer
//!
//! Pure functions over the `[longitude, latitude]` data model: ring
//! normalisation and validation, great-circle distances and bounds. Nothing
//! here holds state, performs I/O or knows about viewports.

use std::collections::HashSet;

use serde_json::Value;

use crate::constants::{DISTANCE_DECIMALS, EARTH_RADIUS_KM, MIN_RING_VERTICES};
use crate::error::GeometryError;
use crate::types::{Bounds, Point, Polygon};

/// Closes a ring and checks it has enough distinct vertices.
///
/// If the first and last point differ (exact comparison, no epsilon) a copy
/// of the first point is appended. An input that is already closed keeps its
/// length.
///
/// # Errors
/// [`GeometryError::InvalidGeometry`] when a coordinate is not finite or
/// fewer than three distinct points are present.
pub fn close_ring(mut points: Vec<Point>) -> Result<Polygon, GeometryError> {
    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        return Err(GeometryError::invalid(format!(
            "vertex {index} has a non-finite coordinate"
        )));
    }

    let distinct = distinct_count(&points);
    if distinct < MIN_RING_VERTICES {
        return Err(GeometryError::invalid(format!(
            "ring needs at least {MIN_RING_VERTICES} distinct vertices, got {distinct}"
        )));
    }

    if points.first() != points.last() {
        points.push(points[0]);
    }

    Ok(Polygon::from_closed_ring(points))
}

/// Builds a closed ring from loosely typed coordinate pairs.
///
/// Each element must hold exactly two finite numbers in `[lon, lat]` order.
/// This is the entry point for anything that did not come from a typed
/// source: draw tools, free-text input, external payloads.
pub fn ring_from_raw_coordinates<R: AsRef<[f64]>>(coords: &[R]) -> Result<Polygon, GeometryError> {
    let mut points = Vec::with_capacity(coords.len() + 1);
    for (index, raw) in coords.iter().enumerate() {
        match raw.as_ref() {
            &[lon, lat] if lon.is_finite() && lat.is_finite() => points.push(Point::new(lon, lat)),
            &[_, _] => {
                return Err(GeometryError::invalid(format!(
                    "coordinate {index} is not a finite number pair"
                )))
            }
            other => {
                return Err(GeometryError::invalid(format!(
                    "coordinate {index} has {} components, expected 2",
                    other.len()
                )))
            }
        }
    }
    close_ring(points)
}

/// Parses a boundary typed by hand as JSON.
///
/// Accepts either a bare ring (`[[lon, lat], ...]`) or a GeoJSON ring set
/// (`[[[lon, lat], ...], ...]`), in which case only the outer ring is used.
pub fn ring_from_json(text: &str) -> Result<Polygon, GeometryError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| GeometryError::invalid(format!("not valid JSON: {e}")))?;

    let Value::Array(items) = value else {
        return Err(GeometryError::invalid("expected an array of coordinates"));
    };

    let ring = match items.first() {
        Some(Value::Array(first)) if matches!(first.first(), Some(Value::Array(_))) => {
            if items.len() > 1 {
                tracing::debug!("Ignoring {} inner ring(s) in boundary input", items.len() - 1);
            }
            first.clone()
        }
        _ => items,
    };

    let coords = ring
        .iter()
        .enumerate()
        .map(|(index, item)| json_pair(index, item))
        .collect::<Result<Vec<_>, _>>()?;

    ring_from_raw_coordinates(&coords)
}

fn json_pair(index: usize, item: &Value) -> Result<Vec<f64>, GeometryError> {
    let Value::Array(parts) = item else {
        return Err(GeometryError::invalid(format!(
            "coordinate {index} is not an array"
        )));
    };
    parts
        .iter()
        .map(|part| {
            part.as_f64().ok_or_else(|| {
                GeometryError::invalid(format!("coordinate {index} contains a non-number"))
            })
        })
        .collect()
}

/// Great-circle distance between two points in kilometres.
pub fn haversine_distance_km(a: Point, b: Point) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair above 1 for antipodal points.
    let h = h.min(1.0);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Length of a polyline in kilometres, rounded to two decimals.
///
/// Zero for empty and single-point routes.
pub fn route_distance_km(points: &[Point]) -> f64 {
    let total: f64 = points
        .windows(2)
        .map(|pair| haversine_distance_km(pair[0], pair[1]))
        .sum();
    round_to(total, DISTANCE_DECIMALS)
}

/// Bounding box of a point sequence.
///
/// # Errors
/// [`GeometryError::EmptyGeometry`] when `points` is empty.
pub fn bounds_of(points: &[Point]) -> Result<Bounds, GeometryError> {
    let (first, rest) = points.split_first().ok_or(GeometryError::EmptyGeometry)?;
    let mut bounds = Bounds::from_point(*first);
    for point in rest {
        bounds.extend(*point);
    }
    Ok(bounds)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn distinct_count(points: &[Point]) -> usize {
    // Adding 0.0 folds -0.0 into 0.0 so the bit patterns agree with `==`.
    points
        .iter()
        .map(|p| ((p.lon + 0.0).to_bits(), (p.lat + 0.0).to_bits()))
        .collect::<HashSet<_>>()
        .len()
}
