//! Edit session controller
//!
//! Owns one [`EditSession`] and is the only thing allowed to mutate it.
//! Every successful command publishes exactly one [`EditEvent`] on the
//! controller's bus before returning; a rejected command publishes nothing
//! and leaves the session untouched.

use binroute_core::{
    close_ring, ring_from_json, ring_from_raw_coordinates, EditEvent, EventBus, GeometryError,
    Point, Polygon, WaypointKind,
};

use crate::selection::SelectionManager;
use crate::session::{DirtyFlags, EditSession, Route, SessionLoad, SessionState};

/// Command surface for one editing session
#[derive(Debug, Default)]
pub struct EditSessionController {
    session: EditSession,
    state: SessionState,
    selection: SelectionManager,
    bus: EventBus,
}

impl EditSessionController {
    /// Creates a controller over an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a controller whose broadcast receivers may lag `capacity`
    /// events behind.
    pub fn with_channel_capacity(capacity: usize) -> Self {
        Self {
            bus: EventBus::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Bus on which this controller publishes its notifications.
    pub fn event_bus(&self) -> &EventBus {
        &self.bus
    }

    /// Replaces the whole session with externally supplied data.
    ///
    /// Nothing from the previous session survives: absent fields become
    /// absent, dirty flags and the selection are cleared. Invalid parts of
    /// the input (a degenerate boundary, non-finite anchors or route points)
    /// are dropped with a warning rather than failing the load.
    pub fn load(&mut self, initial: SessionLoad) {
        let boundary = initial
            .boundary
            .and_then(|rings| rings.into_iter().next())
            .and_then(|outer| match close_ring(outer) {
                Ok(polygon) => Some(polygon),
                Err(e) => {
                    tracing::warn!("Dropping initial boundary: {}", e);
                    None
                }
            });

        let route = initial.route.and_then(|points| {
            if points.iter().all(Point::is_finite) {
                Some(Route::new(points))
            } else {
                tracing::warn!("Dropping initial route with non-finite coordinates");
                None
            }
        });

        self.selection.clear();
        self.session = EditSession {
            boundary,
            start: finite_or_warn(initial.start, WaypointKind::Start),
            end: finite_or_warn(initial.end, WaypointKind::End),
            route,
            bins: initial.bins,
            selected_bin: None,
            dirty: DirtyFlags::default(),
        };
        self.state = SessionState::Loaded;

        self.emit(EditEvent::SessionReplaced);
    }

    /// Replaces the boundary with a ring given as raw `[lon, lat]` pairs.
    ///
    /// # Errors
    /// [`GeometryError::InvalidGeometry`] for malformed or degenerate rings;
    /// the current boundary is kept.
    pub fn set_boundary<R: AsRef<[f64]>>(&mut self, raw: &[R]) -> Result<(), GeometryError> {
        let polygon = ring_from_raw_coordinates(raw).inspect_err(|e| {
            tracing::warn!("Rejected boundary: {}", e);
        })?;
        self.replace_boundary(polygon);
        Ok(())
    }

    /// Replaces the boundary with a ring typed as JSON text.
    pub fn set_boundary_json(&mut self, text: &str) -> Result<(), GeometryError> {
        let polygon = ring_from_json(text).inspect_err(|e| {
            tracing::warn!("Rejected boundary text: {}", e);
        })?;
        self.replace_boundary(polygon);
        Ok(())
    }

    fn replace_boundary(&mut self, polygon: Polygon) {
        self.session.boundary = Some(polygon.clone());
        self.session.dirty.boundary = true;
        self.emit(EditEvent::BoundaryChanged {
            boundary: Some(polygon),
        });
    }

    /// Removes the boundary.
    pub fn clear_boundary(&mut self) {
        self.session.boundary = None;
        self.session.dirty.boundary = true;
        self.emit(EditEvent::BoundaryChanged { boundary: None });
    }

    /// Moves a route anchor.
    ///
    /// Any finite point is accepted, including one outside the boundary.
    pub fn set_waypoint(&mut self, which: WaypointKind, point: Point) -> Result<(), GeometryError> {
        if !point.is_finite() {
            return Err(GeometryError::invalid(format!(
                "{which} waypoint has a non-finite coordinate"
            )));
        }

        *self.session.waypoint_mut(which) = Some(point);
        self.session.dirty.mark_waypoint(which);
        self.emit(EditEvent::WaypointChanged { which, point });
        Ok(())
    }

    /// Replaces the route and recomputes its distance.
    ///
    /// Returns the new distance in kilometres.
    pub fn set_route(&mut self, points: Vec<Point>) -> Result<f64, GeometryError> {
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(GeometryError::invalid(format!(
                "route point {index} has a non-finite coordinate"
            )));
        }

        let route = Route::new(points);
        let distance_km = route.distance_km();
        let event = EditEvent::RouteChanged {
            points: route.points().to_vec(),
            distance_km,
        };
        self.session.route = Some(route);
        self.session.dirty.route = true;
        self.emit(event);
        Ok(distance_km)
    }

    /// Selects a bin by id.
    ///
    /// An id missing from the current bin list clears the selection. A
    /// notification is published on every call, even when the selection
    /// did not change.
    pub fn select_bin(&mut self, bin_id: &str) -> Option<&str> {
        self.selection.select(bin_id, &self.session.bins);
        self.publish_selection();
        self.session.selected_bin.as_deref()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.publish_selection();
    }

    fn publish_selection(&mut self) {
        self.session.selected_bin = self.selection.selected_id().map(str::to_string);
        self.emit(EditEvent::SelectionChanged {
            bin_id: self.session.selected_bin.clone(),
        });
    }

    /// Read-only copy of the session for rendering.
    pub fn snapshot(&self) -> EditSession {
        self.session.clone()
    }

    pub fn boundary(&self) -> Option<&Polygon> {
        self.session.boundary.as_ref()
    }

    pub fn waypoint(&self, which: WaypointKind) -> Option<Point> {
        self.session.waypoint(which)
    }

    pub fn route(&self) -> Option<&Route> {
        self.session.route.as_ref()
    }

    /// Stored route distance; zero when there is no route.
    pub fn route_distance_km(&self) -> f64 {
        self.session.route.as_ref().map_or(0.0, Route::distance_km)
    }

    pub fn selected_bin(&self) -> Option<&str> {
        self.session.selected_bin.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.state == SessionState::Loaded
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn dirty(&self) -> DirtyFlags {
        self.session.dirty
    }

    /// True when anything changed since the last load.
    pub fn is_dirty(&self) -> bool {
        self.session.dirty.any()
    }

    fn emit(&self, event: EditEvent) {
        let listeners = self.bus.publish(event);
        tracing::trace!("Notified {} listener(s)", listeners);
    }
}

fn finite_or_warn(point: Option<Point>, which: WaypointKind) -> Option<Point> {
    match point {
        Some(p) if !p.is_finite() => {
            tracing::warn!("Dropping initial {} waypoint with non-finite coordinates", which);
            None
        }
        other => other,
    }
}
