use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use binroute_core::BindingError;
use binroute_settings::ShapeStyle;

use super::coords::LatLng;
use super::surface::{MapSurface, MarkerSpec, ShapeHandle};

/// A shape as the surface was asked to draw it.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawnShape {
    Polygon { ring: Vec<LatLng>, style: ShapeStyle },
    Polyline { path: Vec<LatLng>, style: ShapeStyle },
    Marker { at: LatLng, spec: MarkerSpec },
}

/// Viewport change requested through the surface.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewRequest {
    Fit {
        south_west: LatLng,
        north_east: LatLng,
        padding_px: u32,
    },
    Center { center: LatLng, zoom: u8 },
}

/// In-memory surface that records what is visible.
///
/// Used for headless dry runs and tests.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    visible: BTreeMap<ShapeHandle, DrawnShape>,
    next_handle: u64,
    views: Vec<ViewRequest>,
    releases: Arc<AtomicUsize>,
    fail_draws: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter of `release` calls, readable after the surface is gone.
    pub fn release_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.releases)
    }

    /// Makes every draw call fail.
    pub fn set_fail_draws(&mut self, fail: bool) {
        self.fail_draws = fail;
    }

    pub fn visible(&self) -> impl Iterator<Item = &DrawnShape> {
        self.visible.values()
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn polygons(&self) -> Vec<&[LatLng]> {
        self.visible()
            .filter_map(|shape| match shape {
                DrawnShape::Polygon { ring, .. } => Some(ring.as_slice()),
                _ => None,
            })
            .collect()
    }

    pub fn polylines(&self) -> Vec<&[LatLng]> {
        self.visible()
            .filter_map(|shape| match shape {
                DrawnShape::Polyline { path, .. } => Some(path.as_slice()),
                _ => None,
            })
            .collect()
    }

    pub fn markers(&self) -> Vec<(LatLng, &MarkerSpec)> {
        self.visible()
            .filter_map(|shape| match shape {
                DrawnShape::Marker { at, spec } => Some((*at, spec)),
                _ => None,
            })
            .collect()
    }

    pub fn views(&self) -> &[ViewRequest] {
        &self.views
    }

    pub fn last_view(&self) -> Option<&ViewRequest> {
        self.views.last()
    }

    fn add(&mut self, shape: DrawnShape) -> Result<ShapeHandle, BindingError> {
        if self.fail_draws {
            return Err(BindingError::Surface {
                reason: "drawing disabled".to_string(),
            });
        }
        self.next_handle += 1;
        let handle = ShapeHandle(self.next_handle);
        self.visible.insert(handle, shape);
        Ok(handle)
    }
}

impl MapSurface for RecordingSurface {
    fn draw_polygon(&mut self, ring: &[LatLng], style: &ShapeStyle) -> Result<ShapeHandle, BindingError> {
        self.add(DrawnShape::Polygon {
            ring: ring.to_vec(),
            style: style.clone(),
        })
    }

    fn draw_polyline(&mut self, path: &[LatLng], style: &ShapeStyle) -> Result<ShapeHandle, BindingError> {
        self.add(DrawnShape::Polyline {
            path: path.to_vec(),
            style: style.clone(),
        })
    }

    fn draw_marker(&mut self, at: LatLng, spec: &MarkerSpec) -> Result<ShapeHandle, BindingError> {
        self.add(DrawnShape::Marker {
            at,
            spec: spec.clone(),
        })
    }

    fn remove(&mut self, handle: ShapeHandle) {
        self.visible.remove(&handle);
    }

    fn fit_bounds(&mut self, south_west: LatLng, north_east: LatLng, padding_px: u32) {
        self.views.push(ViewRequest::Fit {
            south_west,
            north_east,
            padding_px,
        });
    }

    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.views.push(ViewRequest::Center { center, zoom });
    }

    fn release(&mut self) {
        self.visible.clear();
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
}
