//! # BinRoute Core
//!
//! Core types, geometry and events for BinRoute.
//! Provides the fundamental abstractions shared by the session controller
//! and the map binding: the `[longitude, latitude]` data model, the pure
//! geometry layer, the error taxonomy and the per-session event bus.

pub mod constants;
pub mod error;
pub mod event_bus;
pub mod geometry;
pub mod types;

pub use error::{BindingError, Error, GeometryError, Result};

pub use event_bus::{EditEvent, EventBus, EventCategory, EventFilter, SubscriptionId};

pub use geometry::{
    bounds_of, close_ring, haversine_distance_km, ring_from_json, ring_from_raw_coordinates,
    route_distance_km,
};

pub use types::{BinMarker, Bounds, Point, Polygon, WaypointKind};
