//! Request bodies for the area and schedule APIs.
//!
//! This crate never sends them. Host pages build them from the current
//! session when the user saves, and post them with their own HTTP client.

use binroute_core::GeometryError;
use binroute_settings::RouteSettings;
use serde::{Deserialize, Serialize};

use crate::session::EditSession;

/// Body of an area create/update call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaPayload {
    pub name: String,
    /// Closed outer ring as `[lon, lat]` pairs
    pub coordinates: Vec<[f64; 2]>,
    pub dump_id: String,
}

impl AreaPayload {
    /// Builds the payload from the session boundary.
    ///
    /// # Errors
    /// [`GeometryError::EmptyGeometry`] when no boundary has been drawn.
    pub fn from_session(
        session: &EditSession,
        name: impl Into<String>,
        dump_id: impl Into<String>,
    ) -> Result<Self, GeometryError> {
        let boundary = session.boundary.as_ref().ok_or(GeometryError::EmptyGeometry)?;
        Ok(Self {
            name: name.into(),
            coordinates: boundary.ring().iter().map(|p| p.to_array()).collect(),
            dump_id: dump_id.into(),
        })
    }
}

/// Body of a schedule create/update call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePayload {
    pub route: Vec<[f64; 2]>,
    /// Kilometres, as stored by the controller
    pub distance: f64,
    /// Estimated minutes
    pub duration: u32,
    pub bin_sequence: Vec<String>,
}

impl SchedulePayload {
    /// Builds the payload from the session route and bins.
    ///
    /// The duration is driving time at the configured average speed plus a
    /// fixed service time per bin, rounded to whole minutes.
    pub fn from_session(session: &EditSession, settings: &RouteSettings) -> Self {
        let distance = session.route.as_ref().map_or(0.0, |r| r.distance_km());
        let driving = distance / settings.average_speed_kmh * 60.0;
        let service = settings.service_minutes_per_bin * session.bins.len() as f64;

        Self {
            route: session.route_points().iter().map(|p| p.to_array()).collect(),
            distance,
            duration: (driving + service).round() as u32,
            bin_sequence: session.bins.iter().map(|bin| bin.id.clone()).collect(),
        }
    }
}
