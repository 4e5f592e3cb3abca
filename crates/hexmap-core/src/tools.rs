//! Interaction modes and the control values placement reads from.

use crate::color::{DEFAULT_BLUE, Rgb};
use crate::config::MapConfig;
use serde::{Deserialize, Serialize};

/// Available interaction modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Mode {
    /// Select units; move/paint the selected unit.
    #[default]
    View,
    PlaceUnit,
    PlaceMarker,
    PlaceNumber,
    PlaceArrow,
    /// Grid options are open; clicks behave as in view mode.
    GridSettings,
    /// Dragging pans the camera.
    PanZoom,
}

impl Mode {
    /// Get display name for this mode.
    pub fn name(self) -> &'static str {
        match self {
            Mode::View => "View",
            Mode::PlaceUnit => "Place unit",
            Mode::PlaceMarker => "Place marker",
            Mode::PlaceNumber => "Place number",
            Mode::PlaceArrow => "Place arrow",
            Mode::GridSettings => "Grid settings",
            Mode::PanZoom => "Pan / zoom",
        }
    }
}

/// Values held by the editor's controls: color picker, opacity slider,
/// number input, plus the palette new units draw from.
#[derive(Debug, Clone)]
pub struct ToolSettings {
    /// Color picker value, as typed. Parsed leniently when used.
    pub color: String,
    /// Opacity slider value (0.0 - 1.0).
    pub opacity: f64,
    /// Text stamped by the number tool.
    pub number_value: String,
    /// Aura opacity of newly placed units.
    pub unit_aura_opacity: f64,
    /// Area radius of newly placed units.
    pub unit_area_radius: u32,
    palette: Vec<Rgb>,
    next_color: usize,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self::from_config(&MapConfig::default())
    }
}

impl ToolSettings {
    pub fn from_config(config: &MapConfig) -> Self {
        let mut palette = config.palette_colors();
        if palette.is_empty() {
            palette.push(DEFAULT_BLUE);
        }
        Self {
            color: DEFAULT_BLUE.to_hex(),
            opacity: 0.5,
            number_value: "1".to_string(),
            unit_aura_opacity: config.default_aura_opacity,
            unit_area_radius: config.default_area_radius,
            palette,
            next_color: 0,
        }
    }

    /// The color picker value as a color.
    pub fn current_color(&self) -> Rgb {
        Rgb::parse_or_default(&self.color)
    }

    /// The color the next placed unit will get.
    pub fn peek_unit_color(&self) -> Rgb {
        self.palette[self.next_color % self.palette.len()]
    }

    /// Take the next palette color, round-robin.
    pub fn next_unit_color(&mut self) -> Rgb {
        let color = self.peek_unit_color();
        self.next_color = (self.next_color + 1) % self.palette.len();
        color
    }

    pub fn palette(&self) -> &[Rgb] {
        &self.palette
    }
}
