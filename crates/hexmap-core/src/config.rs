//! Map configuration.

use crate::color::Rgb;
use crate::grid::{GridKind, Orientation};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default unit colors: blue, red, cyan, green, amber, violet.
pub const DEFAULT_PALETTE: [&str; 6] = [
    "#3b82f6", "#ef4444", "#06b6d4", "#10b981", "#f59e0b", "#8b5cf6",
];

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings a battlemap starts from. Every field has a default, so a
/// config file only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Hex radius (center to corner) in world pixels. Square cells are
    /// twice this wide.
    pub hex_size: f64,
    /// Radius of the bounded map.
    pub map_radius: u32,
    /// Initial hex orientation.
    pub orientation: Orientation,
    /// Initial grid topology.
    pub grid_kind: GridKind,
    /// Colors handed out round-robin to new units.
    pub palette: Vec<String>,
    /// Minimum allowed zoom level.
    pub min_zoom: f64,
    /// Maximum allowed zoom level.
    pub max_zoom: f64,
    /// Zoom factor applied per wheel notch.
    pub wheel_zoom_step: f64,
    /// Pointer travel in screen pixels before a press counts as a pan.
    pub pan_threshold: f64,
    /// Aura opacity of newly placed units.
    pub default_aura_opacity: f64,
    /// Area radius of newly placed units (the area starts hidden).
    pub default_area_radius: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            hex_size: 30.0,
            map_radius: 10,
            orientation: Orientation::Pointy,
            grid_kind: GridKind::Hex,
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            min_zoom: 0.1,
            max_zoom: 5.0,
            wheel_zoom_step: 1.1,
            pan_threshold: 2.0,
            default_aura_opacity: 0.5,
            default_area_radius: 1,
        }
    }
}

impl MapConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded map config from {}", path.display());
        Ok(config)
    }

    /// Check the invariants the rest of the crate relies on.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.hex_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "hex_size must be positive, got {}",
                self.hex_size
            )));
        }
        if self.palette.is_empty() {
            return Err(ConfigError::Invalid("palette must not be empty".to_string()));
        }
        if let Some(bad) = self.palette.iter().find(|c| c.parse::<Rgb>().is_err()) {
            return Err(ConfigError::Invalid(format!("bad palette color {bad:?}")));
        }
        if !(self.min_zoom > 0.0) || self.min_zoom > self.max_zoom {
            return Err(ConfigError::Invalid(format!(
                "zoom range [{}, {}] is empty",
                self.min_zoom, self.max_zoom
            )));
        }
        if !(self.wheel_zoom_step > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "wheel_zoom_step must be positive, got {}",
                self.wheel_zoom_step
            )));
        }
        Ok(())
    }

    /// The palette as parsed colors.
    pub fn palette_colors(&self) -> Vec<Rgb> {
        self.palette.iter().map(|c| Rgb::parse_or_default(c)).collect()
    }
}
