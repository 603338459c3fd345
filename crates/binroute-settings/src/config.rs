//! Configuration for the geospatial editor
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML files; the format is picked from the file extension.
//!
//! Configuration is organized into logical sections:
//! - Map defaults (initial centre and zoom, fit padding)
//! - Layer styles (boundary, route, anchors, bin markers)
//! - Binding limits (commands queued before the map is ready)
//! - Route figures used for schedule duration estimates

use binroute_core::constants::VIEW_PADDING_PX;
use binroute_core::Point;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};

/// Map defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    /// Pixel margin kept around content when fitting the viewport
    pub fit_padding_px: u32,
    /// Centre shown when a session has nothing to fit, `[lon, lat]`
    pub default_center: Point,
    /// Zoom level shown when a session has nothing to fit
    pub default_zoom: u8,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            fit_padding_px: VIEW_PADDING_PX,
            default_center: Point::new(79.8612, 6.9271),
            default_zoom: 13,
        }
    }
}

/// Stroke and fill of a drawn shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub stroke_color: String,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(default)]
    pub fill_opacity: f64,
    #[serde(default)]
    pub dashed: bool,
}

/// Colours for point markers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyles {
    pub start_color: String,
    pub end_color: String,
    pub bin_low_color: String,
    pub bin_medium_color: String,
    pub bin_high_color: String,
    pub selected_color: String,
    /// Fill level (percent) at which a bin is drawn as medium
    pub medium_threshold: f64,
    /// Fill level (percent) at which a bin is drawn as high
    pub high_threshold: f64,
}

impl Default for MarkerStyles {
    fn default() -> Self {
        Self {
            start_color: "#16a34a".to_string(),
            end_color: "#dc2626".to_string(),
            bin_low_color: "#22c55e".to_string(),
            bin_medium_color: "#f59e0b".to_string(),
            bin_high_color: "#ef4444".to_string(),
            selected_color: "#2563eb".to_string(),
            medium_threshold: 50.0,
            high_threshold: 80.0,
        }
    }
}

impl MarkerStyles {
    /// Marker colour for a bin at the given fill level.
    pub fn bin_color(&self, fill_level: f64) -> &str {
        if fill_level >= self.high_threshold {
            &self.bin_high_color
        } else if fill_level >= self.medium_threshold {
            &self.bin_medium_color
        } else {
            &self.bin_low_color
        }
    }
}

/// Styles for every drawable layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerStyles {
    pub boundary: ShapeStyle,
    pub route: ShapeStyle,
    pub markers: MarkerStyles,
}

impl Default for LayerStyles {
    fn default() -> Self {
        Self {
            boundary: ShapeStyle {
                stroke_color: "#3388ff".to_string(),
                weight: 2.0,
                fill_color: Some("#3388ff".to_string()),
                fill_opacity: 0.2,
                dashed: false,
            },
            route: ShapeStyle {
                stroke_color: "#7c3aed".to_string(),
                weight: 4.0,
                fill_color: None,
                fill_opacity: 0.0,
                dashed: false,
            },
            markers: MarkerStyles::default(),
        }
    }
}

/// Map binding limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingSettings {
    /// Gestures held while the map library is still loading
    pub pending_queue_capacity: usize,
}

impl Default for BindingSettings {
    fn default() -> Self {
        Self {
            pending_queue_capacity: 64,
        }
    }
}

/// Figures for schedule duration estimates
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteSettings {
    /// Average collection vehicle speed between stops
    pub average_speed_kmh: f64,
    /// Time spent emptying one bin
    pub service_minutes_per_bin: f64,
}

impl Default for RouteSettings {
    fn default() -> Self {
        Self {
            average_speed_kmh: 25.0,
            service_minutes_per_bin: 3.0,
        }
    }
}

/// Complete editor configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EditorConfig {
    pub map: MapSettings,
    pub styles: LayerStyles,
    pub binding: BindingSettings,
    pub route: RouteSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> ConfigResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

fn out_of_range(key: &str, value: impl ToString) -> ConfigError {
    ConfigError::ValueOutOfRange {
        key: key.to_string(),
        value: value.to_string(),
    }
}

impl EditorConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform location of the config file, e.g.
    /// `~/.config/binroute/config.toml` on Linux.
    pub fn default_path() -> ConfigResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("binroute").join("config.toml"))
            .ok_or(ConfigError::NoConfigDirectory)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    /// Load from `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let center = self.map.default_center;
        if !center.is_finite() || center.lon.abs() > 180.0 || center.lat.abs() > 90.0 {
            return Err(out_of_range("map.default_center", center));
        }

        if self.map.default_zoom > 22 {
            return Err(out_of_range("map.default_zoom", self.map.default_zoom));
        }

        if self.binding.pending_queue_capacity == 0 {
            return Err(out_of_range("binding.pending_queue_capacity", 0));
        }

        if !(self.route.average_speed_kmh > 0.0) {
            return Err(out_of_range(
                "route.average_speed_kmh",
                self.route.average_speed_kmh,
            ));
        }

        if !(self.route.service_minutes_per_bin >= 0.0) {
            return Err(out_of_range(
                "route.service_minutes_per_bin",
                self.route.service_minutes_per_bin,
            ));
        }

        let markers = &self.styles.markers;
        if markers.medium_threshold > markers.high_threshold {
            return Err(out_of_range(
                "styles.markers.medium_threshold",
                markers.medium_threshold,
            ));
        }

        Ok(())
    }
}
