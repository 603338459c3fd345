//! Host page callbacks
//!
//! Hosts receive plain geographic data, one call per controller
//! notification, and must treat every call as a full replacement.

use binroute_core::{EditEvent, EventBus, EventCategory, EventFilter, Point, SubscriptionId, WaypointKind};

type RingsCallback = Box<dyn Fn(Vec<Vec<Point>>) + Send + Sync>;
type PointCallback = Box<dyn Fn(Point) + Send + Sync>;
type RouteCallback = Box<dyn Fn(Vec<Point>, f64) + Send + Sync>;

/// The `on*Change` callbacks a host page registers.
#[derive(Default)]
pub struct HostCallbacks {
    on_boundary_change: Option<RingsCallback>,
    on_start_location_change: Option<PointCallback>,
    on_end_location_change: Option<PointCallback>,
    on_route_change: Option<RouteCallback>,
}

impl HostCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with the boundary as a ring set; empty when cleared.
    pub fn on_boundary_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(Vec<Vec<Point>>) + Send + Sync + 'static,
    {
        self.on_boundary_change = Some(Box::new(callback));
        self
    }

    pub fn on_start_location_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(Point) + Send + Sync + 'static,
    {
        self.on_start_location_change = Some(Box::new(callback));
        self
    }

    pub fn on_end_location_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(Point) + Send + Sync + 'static,
    {
        self.on_end_location_change = Some(Box::new(callback));
        self
    }

    /// Called with the full route and its distance in kilometres.
    pub fn on_route_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(Vec<Point>, f64) + Send + Sync + 'static,
    {
        self.on_route_change = Some(Box::new(callback));
        self
    }

    /// Routes one notification to the matching callback.
    ///
    /// Session loads and selection changes have no host callback.
    pub fn dispatch(&self, event: EditEvent) {
        match event {
            EditEvent::BoundaryChanged { boundary } => {
                if let Some(callback) = &self.on_boundary_change {
                    callback(boundary.map(|p| p.to_rings()).unwrap_or_default());
                }
            }
            EditEvent::WaypointChanged { which, point } => {
                let callback = match which {
                    WaypointKind::Start => &self.on_start_location_change,
                    WaypointKind::End => &self.on_end_location_change,
                };
                if let Some(callback) = callback {
                    callback(point);
                }
            }
            EditEvent::RouteChanged {
                points,
                distance_km,
            } => {
                if let Some(callback) = &self.on_route_change {
                    callback(points, distance_km);
                }
            }
            EditEvent::SessionReplaced | EditEvent::SelectionChanged { .. } => {}
        }
    }

    /// Subscribes these callbacks to a controller's bus.
    pub fn attach(self, bus: &EventBus) -> SubscriptionId {
        bus.subscribe(
            EventFilter::Categories(vec![
                EventCategory::Boundary,
                EventCategory::Waypoint,
                EventCategory::Route,
            ]),
            move |event| self.dispatch(event.clone()),
        )
    }
}

impl std::fmt::Debug for HostCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostCallbacks")
            .field("on_boundary_change", &self.on_boundary_change.is_some())
            .field("on_start_location_change", &self.on_start_location_change.is_some())
            .field("on_end_location_change", &self.on_end_location_change.is_some())
            .field("on_route_change", &self.on_route_change.is_some())
            .finish()
    }
}
