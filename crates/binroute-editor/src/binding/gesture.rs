//! Decoded draw-tool and pointer gestures.

use binroute_core::WaypointKind;

use super::coords::LatLng;

/// Which drawing tool produced a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawTool {
    /// Polygon tool of the area editor
    Boundary,
    /// Polyline tool of the route editor
    Route,
}

/// A completed user gesture, still in map-library coordinates.
///
/// Surfaces report these once a gesture finishes; a draw that is cancelled
/// before completion is reported as [`DrawGesture::DrawCancelled`] and
/// leaves the session alone.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawGesture {
    ShapeCreated { tool: DrawTool, path: Vec<LatLng> },
    /// Always the full edited shape, never only the moved vertices.
    ShapeEdited { tool: DrawTool, path: Vec<LatLng> },
    ShapeDeleted { tool: DrawTool },
    MarkerDragged { anchor: WaypointKind, to: LatLng },
    MarkerClicked { bin_id: String },
    MapClicked,
    DrawCancelled,
}

/// What happened to a gesture handed to the binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Applied to the session and rendered.
    Applied,
    /// Held until the map surface is ready.
    Queued,
    /// Nothing to do (cancelled draws).
    Ignored,
}
