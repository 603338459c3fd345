//! The map-library side of the binding.

use binroute_core::{BindingError, WaypointKind};
use binroute_settings::ShapeStyle;

use super::coords::LatLng;

/// Opaque id of a shape drawn on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeHandle(pub u64);

/// What a marker stands for.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerRole {
    /// A route anchor. Surfaces report drags of it as
    /// [`DrawGesture::MarkerDragged`](super::DrawGesture::MarkerDragged).
    Anchor(WaypointKind),
    /// A bin. Surfaces report clicks as
    /// [`DrawGesture::MarkerClicked`](super::DrawGesture::MarkerClicked).
    Bin { id: String },
}

/// How to draw one marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub role: MarkerRole,
    pub color: String,
    /// Whether the drag-end handler is attached
    pub draggable: bool,
    pub highlighted: bool,
    /// Popup text
    pub label: Option<String>,
}

/// A concrete interactive map.
///
/// Implementations wrap a rendering library. They draw what they are told,
/// hand back handles, and turn user input into
/// [`DrawGesture`](super::DrawGesture)s for the binding. They hold no
/// session data of their own.
pub trait MapSurface {
    fn draw_polygon(&mut self, ring: &[LatLng], style: &ShapeStyle) -> Result<ShapeHandle, BindingError>;

    fn draw_polyline(&mut self, path: &[LatLng], style: &ShapeStyle) -> Result<ShapeHandle, BindingError>;

    fn draw_marker(&mut self, at: LatLng, spec: &MarkerSpec) -> Result<ShapeHandle, BindingError>;

    /// Removes a shape. Unknown handles are ignored.
    fn remove(&mut self, handle: ShapeHandle);

    /// Shows the given extent with `padding_px` pixels to spare on each side.
    fn fit_bounds(&mut self, south_west: LatLng, north_east: LatLng, padding_px: u32);

    fn set_view(&mut self, center: LatLng, zoom: u8);

    /// Frees everything the surface holds. Called exactly once.
    fn release(&mut self);
}
