//! # BinRoute
//!
//! Geospatial editing engine behind the waste-collection dashboard's area
//! and route editors:
//! - Area boundaries drawn as closed polygons
//! - Start and end anchors for collection routes
//! - Route polylines with great-circle distances
//! - Bin markers coloured by fill level, with single selection
//!
//! ## Architecture
//!
//! BinRoute is organized as a workspace with multiple crates:
//!
//! 1. **binroute-core** - Points, polygons, pure geometry, errors, events
//! 2. **binroute-settings** - Map defaults, layer styles, config files
//! 3. **binroute-editor** - Edit-session controller, host callbacks,
//!    API payloads and the map binding
//! 4. **binroute** - This crate; logging setup and the `binroute` binary

pub use binroute_core::{
    bounds_of, close_ring, haversine_distance_km, ring_from_json, ring_from_raw_coordinates,
    route_distance_km, BinMarker, BindingError, Bounds, EditEvent, Error, EventBus,
    GeometryError, Point, Polygon, Result, WaypointKind,
};
pub use binroute_editor::{
    AreaPayload, EditSession, EditSessionController, HostCallbacks, MapBinding, MapSurface,
    RecordingSurface, SchedulePayload, SessionLoad,
};
pub use binroute_settings::{EditorConfig, SettingsError};

use serde::Serialize;

/// What a session looks like once loaded, as printed by the binary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub boundary_vertices: usize,
    pub has_start: bool,
    pub has_end: bool,
    pub route_points: usize,
    pub route_distance_km: f64,
    pub bin_count: usize,
    pub bounds: Option<Bounds>,
    /// Shapes a map would show for this session
    pub drawn_shapes: usize,
    pub schedule: SchedulePayload,
}

/// Loads `initial` into a fresh controller and renders it headlessly.
pub fn summarize(initial: SessionLoad, config: &EditorConfig) -> Result<SessionSummary> {
    let mut binding = MapBinding::new(EditSessionController::new(), config.clone());
    binding.load(initial);
    binding.attach(RecordingSurface::new())?;

    let session = binding.controller().snapshot();
    let mut points: Vec<Point> = session
        .boundary
        .as_ref()
        .map(|p| p.ring().to_vec())
        .unwrap_or_default();
    points.extend_from_slice(session.route_points());
    points.extend(session.bins.iter().map(|bin| bin.location));
    points.extend(session.start);
    points.extend(session.end);

    let drawn_shapes = binding.surface().map_or(0, RecordingSurface::visible_count);
    binding.teardown();

    Ok(SessionSummary {
        boundary_vertices: session.boundary.as_ref().map_or(0, Polygon::vertex_count),
        has_start: session.start.is_some(),
        has_end: session.end.is_some(),
        route_points: session.route_points().len(),
        route_distance_km: session.route.as_ref().map_or(0.0, |r| r.distance_km()),
        bin_count: session.bins.len(),
        bounds: bounds_of(&points).ok(),
        drawn_shapes,
        schedule: SchedulePayload::from_session(&session, &config.route),
    })
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, so stdout stays machine-readable
/// - RUST_LOG environment variable support
/// - JSON lines instead of pretty output when `BINROUTE_LOG_FORMAT=json`
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let json = std::env::var("BINROUTE_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    if json {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .json();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true)
            .pretty();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
