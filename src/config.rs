//! Viewer configuration.
//!
//! YAML file with every field optional; missing fields take the built-in
//! defaults. Looked up at `$XDG_CONFIG_HOME/trueno-wave/config.yaml` (or the
//! platform equivalent) unless a path is given.
//!
//! ```yaml
//! canvas: { width: 1600, height: 800 }
//! zoom: { min: 0.5, max: 20.0 }
//! theme:
//!   high: "#00ff00"
//! ```

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::render::{RowLayout, WaveformTheme};
use crate::viewport::{Padding, Viewport};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_width() -> u32 {
    1200
}
fn default_height() -> u32 {
    600
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

/// Zoom bounds and wheel behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomConfig {
    /// Lower zoom bound.
    #[serde(default = "default_min_zoom")]
    pub min: f64,
    /// Upper zoom bound.
    #[serde(default = "default_max_zoom")]
    pub max: f64,
    /// Zoom a view opens with.
    #[serde(default = "default_initial_zoom")]
    pub initial: f64,
    /// Multiplicative step per wheel notch.
    #[serde(default = "default_wheel_step")]
    pub wheel_step: f64,
}

fn default_min_zoom() -> f64 {
    crate::viewport::DEFAULT_MIN_ZOOM
}
fn default_max_zoom() -> f64 {
    crate::viewport::DEFAULT_MAX_ZOOM
}
fn default_initial_zoom() -> f64 {
    1.0
}
fn default_wheel_step() -> f64 {
    crate::viewport::DEFAULT_WHEEL_STEP
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min: default_min_zoom(),
            max: default_max_zoom(),
            initial: default_initial_zoom(),
            wheel_step: default_wheel_step(),
        }
    }
}

/// Plot margins in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddingConfig {
    /// Label gutter.
    #[serde(default = "default_pad_left")]
    pub left: f64,
    /// Top margin.
    #[serde(default = "default_pad_top")]
    pub top: f64,
    /// Right margin.
    #[serde(default = "default_pad_right")]
    pub right: f64,
    /// Axis label margin.
    #[serde(default = "default_pad_bottom")]
    pub bottom: f64,
}

fn default_pad_left() -> f64 {
    150.0
}
fn default_pad_top() -> f64 {
    40.0
}
fn default_pad_right() -> f64 {
    20.0
}
fn default_pad_bottom() -> f64 {
    30.0
}

impl Default for PaddingConfig {
    fn default() -> Self {
        Self {
            left: default_pad_left(),
            top: default_pad_top(),
            right: default_pad_right(),
            bottom: default_pad_bottom(),
        }
    }
}

/// Row geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowsConfig {
    /// Row height.
    #[serde(default = "default_row_height")]
    pub height: f64,
    /// Gap between rows.
    #[serde(default = "default_row_spacing")]
    pub spacing: f64,
}

fn default_row_height() -> f64 {
    30.0
}
fn default_row_spacing() -> f64 {
    10.0
}

impl Default for RowsConfig {
    fn default() -> Self {
        Self {
            height: default_row_height(),
            spacing: default_row_spacing(),
        }
    }
}

/// Theme colors as `#rrggbb` or `#rrggbbaa` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct ThemeConfig {
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_plot")]
    pub plot: String,
    #[serde(default = "default_grid")]
    pub grid: String,
    #[serde(default = "default_label")]
    pub label: String,
    #[serde(default = "default_high")]
    pub high: String,
    #[serde(default = "default_low")]
    pub low: String,
    #[serde(default = "default_unknown")]
    pub unknown: String,
    #[serde(default = "default_cursor")]
    pub cursor: String,
}

fn default_background() -> String {
    "#1e1e1e".to_string()
}
fn default_plot() -> String {
    "#252526".to_string()
}
fn default_grid() -> String {
    "#333333".to_string()
}
fn default_label() -> String {
    "#D4D4D4".to_string()
}
fn default_high() -> String {
    "#569CD6".to_string()
}
fn default_low() -> String {
    "#CE9178".to_string()
}
fn default_unknown() -> String {
    "#808080".to_string()
}
fn default_cursor() -> String {
    "#FFD700".to_string()
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            plot: default_plot(),
            grid: default_grid(),
            label: default_label(),
            high: default_high(),
            low: default_low(),
            unknown: default_unknown(),
            cursor: default_cursor(),
        }
    }
}

impl ThemeConfig {
    fn entries(&self) -> [(&'static str, &str); 8] {
        [
            ("theme.background", &self.background),
            ("theme.plot", &self.plot),
            ("theme.grid", &self.grid),
            ("theme.label", &self.label),
            ("theme.high", &self.high),
            ("theme.low", &self.low),
            ("theme.unknown", &self.unknown),
            ("theme.cursor", &self.cursor),
        ]
    }
}

/// Complete viewer configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Canvas size.
    #[serde(default)]
    pub canvas: CanvasConfig,
    /// Zoom policy.
    #[serde(default)]
    pub zoom: ZoomConfig,
    /// Plot margins.
    #[serde(default)]
    pub padding: PaddingConfig,
    /// Row geometry.
    #[serde(default)]
    pub rows: RowsConfig,
    /// Colors.
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl ViewerConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config location: `<config dir>/trueno-wave/config.yaml`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("trueno-wave").join("config.yaml"))
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;

        Self::parse(&content)
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            Error::ConfigParse {
                line,
                message: e.to_string(),
            }
        })
    }

    /// Serializes to YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml_ng::to_string(self).map_err(|e| Error::ConfigInvalid {
            key: "<root>".to_string(),
            message: e.to_string(),
        })
    }

    /// Checks value ranges and color syntax.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigInvalid`] naming the first offending key.
    pub fn validate(&self) -> Result<()> {
        let invalid = |key: &str, message: &str| Error::ConfigInvalid {
            key: key.to_string(),
            message: message.to_string(),
        };

        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(invalid("canvas", "width and height must be positive"));
        }
        if !(self.zoom.min.is_finite() && self.zoom.min > 0.0) {
            return Err(invalid("zoom.min", "must be a positive number"));
        }
        if !(self.zoom.max.is_finite() && self.zoom.max >= self.zoom.min) {
            return Err(invalid("zoom.max", "must not be below zoom.min"));
        }
        if !(self.zoom.min..=self.zoom.max).contains(&self.zoom.initial) {
            return Err(invalid("zoom.initial", "must lie within [zoom.min, zoom.max]"));
        }
        if !(self.zoom.wheel_step.is_finite() && self.zoom.wheel_step > 1.0) {
            return Err(invalid("zoom.wheel_step", "must be greater than 1"));
        }
        let pad = &self.padding;
        if [pad.left, pad.top, pad.right, pad.bottom]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(invalid("padding", "margins must be non-negative"));
        }
        if !(self.rows.height.is_finite() && self.rows.height > 0.0) {
            return Err(invalid("rows.height", "must be positive"));
        }
        if !(self.rows.spacing.is_finite() && self.rows.spacing >= 0.0) {
            return Err(invalid("rows.spacing", "must be non-negative"));
        }
        for (key, value) in self.theme.entries() {
            Rgba::from_hex(value).map_err(|e| invalid(key, &e.to_string()))?;
        }
        Ok(())
    }

    /// Viewport for the configured canvas, zoom policy and margins.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        let width = i32::try_from(self.canvas.width).unwrap_or(i32::MAX);
        let height = i32::try_from(self.canvas.height).unwrap_or(i32::MAX);
        let mut viewport = Viewport::new(width, height)
            .with_padding(Padding {
                left: self.padding.left,
                top: self.padding.top,
                right: self.padding.right,
                bottom: self.padding.bottom,
            })
            .with_zoom_limits(self.zoom.min, self.zoom.max)
            .with_wheel_step(self.zoom.wheel_step);
        let left = viewport.plot_left();
        viewport.zoom_at(self.zoom.initial, Some(left));
        viewport
    }

    /// Renderer theme.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] for a malformed color string.
    pub fn theme(&self) -> Result<WaveformTheme> {
        let t = &self.theme;
        Ok(WaveformTheme {
            background: Rgba::from_hex(&t.background)?,
            plot: Rgba::from_hex(&t.plot)?,
            grid: Rgba::from_hex(&t.grid)?,
            label: Rgba::from_hex(&t.label)?,
            high: Rgba::from_hex(&t.high)?,
            low: Rgba::from_hex(&t.low)?,
            unknown: Rgba::from_hex(&t.unknown)?,
            cursor: Rgba::from_hex(&t.cursor)?,
        })
    }

    /// Row layout with the configured geometry.
    #[must_use]
    pub fn layout(&self) -> RowLayout {
        RowLayout {
            height: self.rows.height,
            spacing: self.rows.spacing,
            ..RowLayout::default()
        }
    }
}
