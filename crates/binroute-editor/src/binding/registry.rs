//! Handles of drawn shapes, grouped by layer.

use std::collections::HashMap;

use binroute_core::{EditEvent, WaypointKind};

use super::surface::ShapeHandle;

/// A group of shapes that is always redrawn as a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerKind {
    Boundary,
    Route,
    StartAnchor,
    EndAnchor,
    Bins,
}

impl LayerKind {
    pub const ALL: [LayerKind; 5] = [
        LayerKind::Boundary,
        LayerKind::Route,
        LayerKind::StartAnchor,
        LayerKind::EndAnchor,
        LayerKind::Bins,
    ];

    pub fn anchor(which: WaypointKind) -> Self {
        match which {
            WaypointKind::Start => LayerKind::StartAnchor,
            WaypointKind::End => LayerKind::EndAnchor,
        }
    }

    /// Layers whose drawing is out of date after `event`.
    pub fn affected_by(event: &EditEvent) -> &'static [LayerKind] {
        match event {
            EditEvent::SessionReplaced => &Self::ALL,
            EditEvent::BoundaryChanged { .. } => &[LayerKind::Boundary],
            EditEvent::WaypointChanged {
                which: WaypointKind::Start,
                ..
            } => &[LayerKind::StartAnchor],
            EditEvent::WaypointChanged {
                which: WaypointKind::End,
                ..
            } => &[LayerKind::EndAnchor],
            EditEvent::RouteChanged { .. } => &[LayerKind::Route],
            EditEvent::SelectionChanged { .. } => &[LayerKind::Bins],
        }
    }
}

/// Shapes currently on the map, per layer.
///
/// The binding owns the only copy. Redrawing a layer takes its handles out,
/// removes them from the surface and stores the new ones.
#[derive(Debug, Default)]
pub struct LayerRegistry {
    layers: HashMap<LayerKind, Vec<ShapeHandle>>,
}

impl LayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns the handles of one layer.
    pub fn take(&mut self, kind: LayerKind) -> Vec<ShapeHandle> {
        self.layers.remove(&kind).unwrap_or_default()
    }

    pub fn insert(&mut self, kind: LayerKind, handles: Vec<ShapeHandle>) {
        if !handles.is_empty() {
            self.layers.insert(kind, handles);
        }
    }

    pub fn handles(&self, kind: LayerKind) -> &[ShapeHandle] {
        self.layers.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    /// Total number of shapes across layers.
    pub fn len(&self) -> usize {
        self.layers.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.layers.clear();
    }
}
