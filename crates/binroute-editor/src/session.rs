//! Edit session state
//!
//! The data one editing surface works on: at most one boundary polygon, two
//! route anchors, one route polyline and the bins supplied by the host, plus
//! the per-entity dirty flags.

use binroute_core::{route_distance_km, BinMarker, Point, Polygon, WaypointKind};
use serde::{Deserialize, Serialize};

/// A route polyline with its derived length.
///
/// The distance is computed when the route is built and never set
/// independently, so the two can't drift apart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    points: Vec<Point>,
    distance_km: f64,
}

impl Route {
    pub fn new(points: Vec<Point>) -> Self {
        let distance_km = route_distance_km(&points);
        Self {
            points,
            distance_km,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Great-circle length in kilometres, two decimals.
    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Which sub-entities changed since the last external load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DirtyFlags {
    pub boundary: bool,
    pub start: bool,
    pub end: bool,
    pub route: bool,
}

impl DirtyFlags {
    pub fn any(&self) -> bool {
        self.boundary || self.start || self.end || self.route
    }

    pub(crate) fn mark_waypoint(&mut self, which: WaypointKind) {
        match which {
            WaypointKind::Start => self.start = true,
            WaypointKind::End => self.end = true,
        }
    }
}

/// Session-level lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SessionState {
    /// No external load yet; commands still work on an empty session.
    #[default]
    Uninitialized,
    /// At least one `load` happened.
    Loaded,
}

/// Read-only copy of an editing session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EditSession {
    pub boundary: Option<Polygon>,
    pub start: Option<Point>,
    pub end: Option<Point>,
    pub route: Option<Route>,
    pub bins: Vec<BinMarker>,
    pub selected_bin: Option<String>,
    pub dirty: DirtyFlags,
}

impl EditSession {
    /// The anchor designated by `which`.
    pub fn waypoint(&self, which: WaypointKind) -> Option<Point> {
        match which {
            WaypointKind::Start => self.start,
            WaypointKind::End => self.end,
        }
    }

    pub(crate) fn waypoint_mut(&mut self, which: WaypointKind) -> &mut Option<Point> {
        match which {
            WaypointKind::Start => &mut self.start,
            WaypointKind::End => &mut self.end,
        }
    }

    /// Route points, empty when there is no route.
    pub fn route_points(&self) -> &[Point] {
        self.route.as_ref().map(Route::points).unwrap_or_default()
    }

    pub fn bin(&self, id: &str) -> Option<&BinMarker> {
        self.bins.iter().find(|bin| bin.id == id)
    }

    /// The marker currently selected, if it still exists.
    pub fn selected_marker(&self) -> Option<&BinMarker> {
        self.selected_bin.as_deref().and_then(|id| self.bin(id))
    }

    /// True when nothing at all would be drawn.
    pub fn is_empty(&self) -> bool {
        self.boundary.is_none()
            && self.start.is_none()
            && self.end.is_none()
            && self.route_points().is_empty()
            && self.bins.is_empty()
    }
}

/// Data a host page pushes into a session.
///
/// Field names follow the host page props; the shorter names are accepted
/// as well. Only the outer ring of `boundary` is used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionLoad {
    #[serde(alias = "initialBoundary")]
    pub boundary: Option<Vec<Vec<Point>>>,
    #[serde(alias = "initialStartLocation")]
    pub start: Option<Point>,
    #[serde(alias = "initialEndLocation")]
    pub end: Option<Point>,
    #[serde(alias = "routePolyline")]
    pub route: Option<Vec<Point>>,
    #[serde(alias = "routeBins")]
    pub bins: Vec<BinMarker>,
}

impl SessionLoad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_boundary(mut self, ring: Vec<Point>) -> Self {
        self.boundary = Some(vec![ring]);
        self
    }

    pub fn with_start(mut self, point: Point) -> Self {
        self.start = Some(point);
        self
    }

    pub fn with_end(mut self, point: Point) -> Self {
        self.end = Some(point);
        self
    }

    pub fn with_route(mut self, points: Vec<Point>) -> Self {
        self.route = Some(points);
        self
    }

    pub fn with_bins(mut self, bins: Vec<BinMarker>) -> Self {
        self.bins = bins;
        self
    }
}
