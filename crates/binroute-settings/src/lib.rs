//! BinRoute Settings Crate
//!
//! Editor configuration: map defaults, layer styles, binding limits and the
//! figures used to estimate collection durations.

pub mod config;
pub mod error;

pub use config::{
    BindingSettings, EditorConfig, LayerStyles, MapSettings, MarkerStyles, RouteSettings,
    ShapeStyle,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
