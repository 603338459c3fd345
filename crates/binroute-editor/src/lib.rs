//! # BinRoute Editor
//!
//! Editing state and map binding for the area and route editors.
//!
//! - [`controller`]: the [`EditSessionController`], sole owner of session state
//! - [`session`]: session data, dirty flags and the external load shape
//! - [`selection`]: single bin-marker selection
//! - [`callbacks`]: host-page `on*Change` callbacks
//! - [`payloads`]: request bodies for the area and schedule APIs
//! - [`binding`]: the [`MapBinding`] adapter between a controller and a map

pub mod binding;
pub mod callbacks;
pub mod controller;
pub mod payloads;
pub mod selection;
pub mod session;

pub use binding::{
    BindingState, DrawGesture, DrawTool, FitTarget, GestureOutcome, LatLng, LayerKind,
    MapBinding, MapSurface, MarkerRole, MarkerSpec, RecordingSurface, ShapeHandle,
};
pub use callbacks::HostCallbacks;
pub use controller::EditSessionController;
pub use payloads::{AreaPayload, SchedulePayload};
pub use selection::SelectionManager;
pub use session::{DirtyFlags, EditSession, Route, SessionLoad, SessionState};
