//! Event type definitions for the event bus.
//!
//! Events carry full replacement values, never deltas. They are cloneable
//! and serializable for logging/replay.

use serde::{Deserialize, Serialize};

use crate::types::{Point, Polygon, WaypointKind};

/// Notification emitted by a session controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EditEvent {
    /// The whole session was replaced by an external load.
    SessionReplaced,
    /// The boundary polygon was set or cleared.
    BoundaryChanged {
        /// New boundary, `None` when cleared.
        boundary: Option<Polygon>,
    },
    /// A route anchor moved.
    WaypointChanged {
        /// Which anchor.
        which: WaypointKind,
        /// Its new position.
        point: Point,
    },
    /// The route polyline was replaced.
    RouteChanged {
        /// Full polyline.
        points: Vec<Point>,
        /// Derived length in kilometres.
        distance_km: f64,
    },
    /// The selected bin changed (or was re-selected).
    SelectionChanged {
        /// Selected bin id, `None` when nothing is selected.
        bin_id: Option<String>,
    },
}

impl EditEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            EditEvent::SessionReplaced => EventCategory::Session,
            EditEvent::BoundaryChanged { .. } => EventCategory::Boundary,
            EditEvent::WaypointChanged { .. } => EventCategory::Waypoint,
            EditEvent::RouteChanged { .. } => EventCategory::Route,
            EditEvent::SelectionChanged { .. } => EventCategory::Selection,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            EditEvent::SessionReplaced => "Session replaced".to_string(),
            EditEvent::BoundaryChanged { boundary: Some(p) } => {
                format!("Boundary set ({} vertices)", p.vertex_count())
            }
            EditEvent::BoundaryChanged { boundary: None } => "Boundary cleared".to_string(),
            EditEvent::WaypointChanged { which, point } => {
                format!("Waypoint {} moved to {}", which, point)
            }
            EditEvent::RouteChanged {
                points,
                distance_km,
            } => format!("Route set ({} points, {:.2} km)", points.len(), distance_km),
            EditEvent::SelectionChanged { bin_id: Some(id) } => format!("Bin {} selected", id),
            EditEvent::SelectionChanged { bin_id: None } => "Selection cleared".to_string(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Whole-session loads.
    Session,
    /// Boundary polygon changes.
    Boundary,
    /// Start/end anchor changes.
    Waypoint,
    /// Route polyline changes.
    Route,
    /// Bin selection changes.
    Selection,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Session => write!(f, "Session"),
            EventCategory::Boundary => write!(f, "Boundary"),
            EventCategory::Waypoint => write!(f, "Waypoint"),
            EventCategory::Route => write!(f, "Route"),
            EventCategory::Selection => write!(f, "Selection"),
        }
    }
}
