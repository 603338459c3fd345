//! Map binding
//!
//! Wires an [`EditSessionController`] to a concrete [`MapSurface`].
//!
//! The binding is the only part of the engine that knows about a rendering
//! library. It has two jobs:
//!
//! 1. Decode user gestures ([`DrawGesture`]) into controller commands,
//!    converting map-library `[lat, lng]` positions into engine points on
//!    the way in.
//! 2. Keep the map in step with the session. Every controller notification
//!    names the layers it invalidates; each of those layers is destroyed and
//!    rebuilt from a fresh snapshot. The binding keeps shape handles only,
//!    so the whole map can be rebuilt from session state at any time.
//!
//! ## Lifecycle
//!
//! ```text
//! Loading ──attach(surface)──▶ Ready ──teardown()──▶ TornDown
//!    └───────────────teardown()──────────────────────▶
//! ```
//!
//! Gestures that arrive while the map library is still loading are queued
//! (up to `binding.pending_queue_capacity`) and replayed on attach. The
//! surface is released exactly once, whichever way the binding ends.

mod coords;
mod fit;
mod gesture;
mod recording;
mod registry;
mod surface;

pub use coords::{path_to_points, path_to_raw, points_to_path, to_lat_lng, to_point, LatLng};
pub use fit::{fit_points, FitTarget};
pub use gesture::{DrawGesture, DrawTool, GestureOutcome};
pub use recording::{DrawnShape, RecordingSurface, ViewRequest};
pub use registry::{LayerKind, LayerRegistry};
pub use surface::{MapSurface, MarkerRole, MarkerSpec, ShapeHandle};

use std::collections::{BTreeSet, VecDeque};
use std::sync::Arc;

use binroute_core::{
    bounds_of, BinMarker, BindingError, EditEvent, EventFilter, GeometryError, Result,
    SubscriptionId, WaypointKind,
};
use binroute_settings::{EditorConfig, LayerStyles, MarkerStyles};
use parking_lot::Mutex;

use crate::controller::EditSessionController;
use crate::session::{EditSession, SessionLoad};

/// Where the binding is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    /// Waiting for the map library; gestures are queued.
    Loading,
    /// Surface attached and rendering.
    Ready,
    /// Surface released; every command is refused.
    TornDown,
}

/// Adapter between one editing session and one map surface.
pub struct MapBinding<S: MapSurface> {
    controller: EditSessionController,
    surface: Option<S>,
    state: BindingState,
    registry: LayerRegistry,
    inbox: Arc<Mutex<VecDeque<EditEvent>>>,
    subscription: Option<SubscriptionId>,
    pending: VecDeque<DrawGesture>,
    active_segment: Option<usize>,
    config: EditorConfig,
}

impl<S: MapSurface> MapBinding<S> {
    /// Creates a binding in the `Loading` state.
    pub fn new(controller: EditSessionController, config: EditorConfig) -> Self {
        let inbox = Arc::new(Mutex::new(VecDeque::new()));
        let sink = Arc::clone(&inbox);
        let subscription = controller
            .event_bus()
            .subscribe(EventFilter::All, move |event| sink.lock().push_back(event.clone()));

        Self {
            controller,
            surface: None,
            state: BindingState::Loading,
            registry: LayerRegistry::new(),
            inbox,
            subscription: Some(subscription),
            pending: VecDeque::new(),
            active_segment: None,
            config,
        }
    }

    pub fn state(&self) -> BindingState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == BindingState::Ready
    }

    pub fn controller(&self) -> &EditSessionController {
        &self.controller
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn registry(&self) -> &LayerRegistry {
        &self.registry
    }

    /// Number of gestures waiting for the surface.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn active_segment(&self) -> Option<usize> {
        self.active_segment
    }

    /// Hands over the surface once the map library has loaded.
    ///
    /// Queued gestures are replayed in order, every layer is drawn and the
    /// viewport is fitted (or set to the configured default when there is
    /// nothing to fit). A surface offered after teardown, or while another
    /// is attached, is released straight away.
    pub fn attach(&mut self, mut surface: S) -> Result<()> {
        match self.state {
            BindingState::Loading => {}
            BindingState::Ready => {
                surface.release();
                return Err(BindingError::Surface {
                    reason: "a surface is already attached".to_string(),
                }
                .into());
            }
            BindingState::TornDown => {
                tracing::info!("Surface became ready after teardown, releasing it");
                surface.release();
                return Err(BindingError::TornDown.into());
            }
        }

        self.surface = Some(surface);
        self.state = BindingState::Ready;
        tracing::info!(
            "Map surface attached, replaying {} queued gesture(s)",
            self.pending.len()
        );

        while let Some(gesture) = self.pending.pop_front() {
            if let Err(e) = self.apply_gesture(gesture) {
                tracing::warn!("Queued gesture rejected: {}", e);
            }
        }

        // A full render supersedes whatever was published while loading.
        self.inbox.lock().clear();
        let snapshot = self.controller.snapshot();
        self.clamp_active_segment(&snapshot);
        for kind in LayerKind::ALL {
            self.render_layer(kind, &snapshot);
        }

        if self.fit_to_content().is_err() {
            let center = to_lat_lng(self.config.map.default_center);
            let zoom = self.config.map.default_zoom;
            if let Some(surface) = self.surface.as_mut() {
                surface.set_view(center, zoom);
            }
        }
        Ok(())
    }

    /// Applies a user gesture, or queues it while the surface is loading.
    ///
    /// # Errors
    /// - geometry errors from the controller (session unchanged)
    /// - [`BindingError::QueueFull`] when loading and the queue is full
    /// - [`BindingError::TornDown`] after teardown
    pub fn handle_gesture(&mut self, gesture: DrawGesture) -> Result<GestureOutcome> {
        match self.state {
            BindingState::TornDown => Err(BindingError::TornDown.into()),
            BindingState::Loading => {
                if gesture == DrawGesture::DrawCancelled {
                    return Ok(GestureOutcome::Ignored);
                }
                let capacity = self.config.binding.pending_queue_capacity;
                if self.pending.len() >= capacity {
                    tracing::warn!("Map not ready, gesture queue full ({})", capacity);
                    return Err(BindingError::QueueFull { capacity }.into());
                }
                tracing::debug!("Map not ready, queueing {:?}", gesture);
                self.pending.push_back(gesture);
                Ok(GestureOutcome::Queued)
            }
            BindingState::Ready => {
                let outcome = self.apply_gesture(gesture)?;
                self.sync();
                Ok(outcome)
            }
        }
    }

    fn apply_gesture(&mut self, gesture: DrawGesture) -> Result<GestureOutcome> {
        let controller = &mut self.controller;
        match gesture {
            DrawGesture::ShapeCreated {
                tool: DrawTool::Boundary,
                path,
            }
            | DrawGesture::ShapeEdited {
                tool: DrawTool::Boundary,
                path,
            } => controller.set_boundary(&path_to_raw(&path))?,
            DrawGesture::ShapeCreated {
                tool: DrawTool::Route,
                path,
            }
            | DrawGesture::ShapeEdited {
                tool: DrawTool::Route,
                path,
            } => {
                controller.set_route(path_to_points(&path))?;
            }
            DrawGesture::ShapeDeleted {
                tool: DrawTool::Boundary,
            } => controller.clear_boundary(),
            DrawGesture::ShapeDeleted {
                tool: DrawTool::Route,
            } => {
                controller.set_route(Vec::new())?;
            }
            DrawGesture::MarkerDragged { anchor, to } => controller.set_waypoint(anchor, to_point(to))?,
            DrawGesture::MarkerClicked { bin_id } => {
                controller.select_bin(&bin_id);
            }
            DrawGesture::MapClicked => controller.clear_selection(),
            DrawGesture::DrawCancelled => return Ok(GestureOutcome::Ignored),
        }
        Ok(GestureOutcome::Applied)
    }

    /// Replaces the session with external data and redraws.
    pub fn load(&mut self, initial: SessionLoad) {
        self.controller.load(initial);
        self.sync();
    }

    /// Runs commands directly against the controller, then redraws what
    /// they changed.
    pub fn update<T>(&mut self, f: impl FnOnce(&mut EditSessionController) -> T) -> T {
        let result = f(&mut self.controller);
        self.sync();
        result
    }

    /// Marks the route leg starting at `index` as the one being edited.
    pub fn focus_segment(&mut self, index: Option<usize>) {
        self.active_segment = index;
    }

    /// Fits the viewport to the most relevant geometry.
    ///
    /// # Errors
    /// - [`BindingError::NotReady`] / [`BindingError::TornDown`] without a surface
    /// - [`GeometryError::EmptyGeometry`] when the session has nothing to show
    pub fn fit_to_content(&mut self) -> Result<FitTarget> {
        self.ensure_ready()?;

        let snapshot = self.controller.snapshot();
        let (target, points) =
            fit_points(&snapshot, self.active_segment).ok_or(GeometryError::EmptyGeometry)?;
        let bounds = bounds_of(&points)?;
        let padding = self.config.map.fit_padding_px;

        if let Some(surface) = self.surface.as_mut() {
            surface.fit_bounds(
                to_lat_lng(bounds.south_west()),
                to_lat_lng(bounds.north_east()),
                padding,
            );
        }
        tracing::debug!("Fitted viewport to {:?}", target);
        Ok(target)
    }

    /// Redraws every layer invalidated by notifications since the last
    /// sync. Commands issued through the binding sync on their own.
    pub fn sync(&mut self) {
        let events: Vec<EditEvent> = self.inbox.lock().drain(..).collect();
        if self.state != BindingState::Ready || events.is_empty() {
            return;
        }

        let layers: BTreeSet<LayerKind> = events
            .iter()
            .flat_map(|event| LayerKind::affected_by(event).iter().copied())
            .collect();

        let snapshot = self.controller.snapshot();
        self.clamp_active_segment(&snapshot);
        for kind in layers {
            self.render_layer(kind, &snapshot);
        }
    }

    /// Releases the surface. Safe to call any number of times; only the
    /// first call does anything. Returns whether this call tore down.
    pub fn teardown(&mut self) -> bool {
        if self.state == BindingState::TornDown {
            return false;
        }

        if let Some(mut surface) = self.surface.take() {
            surface.release();
        }
        self.registry.clear();
        self.pending.clear();
        self.inbox.lock().clear();
        if let Some(id) = self.subscription.take() {
            self.controller.event_bus().unsubscribe(id);
        }

        tracing::info!("Map binding torn down (was {:?})", self.state);
        self.state = BindingState::TornDown;
        true
    }

    fn ensure_ready(&self) -> Result<()> {
        match self.state {
            BindingState::Ready => Ok(()),
            BindingState::Loading => Err(BindingError::NotReady.into()),
            BindingState::TornDown => Err(BindingError::TornDown.into()),
        }
    }

    fn clamp_active_segment(&mut self, session: &EditSession) {
        if let Some(index) = self.active_segment {
            // A leg needs a point after `index`.
            if index >= session.route_points().len().saturating_sub(1) {
                self.active_segment = None;
            }
        }
    }

    fn render_layer(&mut self, kind: LayerKind, session: &EditSession) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        for handle in self.registry.take(kind) {
            surface.remove(handle);
        }

        match draw_layer(surface, kind, session, &self.config.styles) {
            Ok(handles) => self.registry.insert(kind, handles),
            Err(e) => tracing::warn!("Could not draw {:?} layer: {}", kind, e),
        }
    }
}

impl<S: MapSurface> Drop for MapBinding<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Draws one layer. On failure, shapes already drawn for it are removed so
/// nothing untracked stays on the map.
fn draw_layer<S: MapSurface>(
    surface: &mut S,
    kind: LayerKind,
    session: &EditSession,
    styles: &LayerStyles,
) -> std::result::Result<Vec<ShapeHandle>, BindingError> {
    let mut handles = Vec::new();
    if let Err(e) = draw_shapes(surface, kind, session, styles, &mut handles) {
        for handle in handles {
            surface.remove(handle);
        }
        return Err(e);
    }
    Ok(handles)
}

fn draw_shapes<S: MapSurface>(
    surface: &mut S,
    kind: LayerKind,
    session: &EditSession,
    styles: &LayerStyles,
    handles: &mut Vec<ShapeHandle>,
) -> std::result::Result<(), BindingError> {
    match kind {
        LayerKind::Boundary => {
            if let Some(boundary) = &session.boundary {
                let ring = points_to_path(boundary.vertices());
                handles.push(surface.draw_polygon(&ring, &styles.boundary)?);
            }
        }
        LayerKind::Route => {
            let points = session.route_points();
            if points.len() >= 2 {
                handles.push(surface.draw_polyline(&points_to_path(points), &styles.route)?);
            }
        }
        LayerKind::StartAnchor | LayerKind::EndAnchor => {
            let which = if kind == LayerKind::StartAnchor {
                WaypointKind::Start
            } else {
                WaypointKind::End
            };
            if let Some(point) = session.waypoint(which) {
                let spec = anchor_spec(which, &styles.markers);
                handles.push(surface.draw_marker(to_lat_lng(point), &spec)?);
            }
        }
        LayerKind::Bins => {
            let selected = session.selected_bin.as_deref();
            for bin in &session.bins {
                let spec = bin_spec(bin, selected == Some(bin.id.as_str()), &styles.markers);
                handles.push(surface.draw_marker(to_lat_lng(bin.location), &spec)?);
            }
        }
    }
    Ok(())
}

// Anchors are redrawn with the drag handler every time; a rebuilt marker
// is a new marker as far as the map library is concerned.
fn anchor_spec(which: WaypointKind, markers: &MarkerStyles) -> MarkerSpec {
    let color = match which {
        WaypointKind::Start => &markers.start_color,
        WaypointKind::End => &markers.end_color,
    };
    MarkerSpec {
        role: MarkerRole::Anchor(which),
        color: color.clone(),
        draggable: true,
        highlighted: false,
        label: Some(format!("{which} location")),
    }
}

fn bin_spec(bin: &BinMarker, selected: bool, markers: &MarkerStyles) -> MarkerSpec {
    let color = if selected {
        markers.selected_color.clone()
    } else {
        markers.bin_color(bin.display_fill_level).to_string()
    };
    let mut label = format!("Bin {} ({:.0}% full)", bin.id, bin.display_fill_level);
    if let Some(address) = &bin.address {
        label.push_str(" - ");
        label.push_str(address);
    }
    if let Some(waste_type) = &bin.waste_type {
        label.push_str(&format!(" [{waste_type}]"));
    }
    MarkerSpec {
        role: MarkerRole::Bin { id: bin.id.clone() },
        color,
        draggable: false,
        highlighted: selected,
        label: Some(label),
    }
}
