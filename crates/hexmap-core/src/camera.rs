//! Camera module for pan/zoom transforms.

use kurbo::{Affine, Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Zoom level that corresponds to "100%" in the UI.
pub const BASE_ZOOM: f64 = 1.0;

/// Camera manages the view transform for the map.
///
/// The map origin is drawn at the center of the screen, shifted by the pan
/// offset: `screen = world * zoom + screen_center + offset`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan), in screen pixels.
    pub offset: Vec2,
    /// Current zoom level (BASE_ZOOM = 100% in UI).
    pub zoom: f64,
    /// Minimum allowed zoom level.
    pub min_zoom: f64,
    /// Maximum allowed zoom level.
    pub max_zoom: f64,
    /// Center of the viewport in screen pixels.
    pub screen_center: Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: BASE_ZOOM,
            min_zoom: 0.1,
            max_zoom: 5.0,
            screen_center: Vec2::new(400.0, 300.0),
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera with custom zoom limits.
    ///
    /// Limits that are not finite, not positive or out of order fall back
    /// to the defaults.
    pub fn with_zoom_limits(min_zoom: f64, max_zoom: f64) -> Self {
        let camera = Self::default();
        let valid = min_zoom.is_finite()
            && max_zoom.is_finite()
            && min_zoom > 0.0
            && min_zoom <= max_zoom;
        if !valid {
            log::warn!("Invalid zoom limits {min_zoom}..{max_zoom}, using defaults");
            return camera;
        }
        Self {
            min_zoom,
            max_zoom,
            ..camera
        }
    }

    /// Center the map origin in a viewport of the given size.
    pub fn set_viewport_size(&mut self, size: Size) {
        self.screen_center = Vec2::new(size.width / 2.0, size.height / 2.0);
    }

    /// Get the affine transform for rendering.
    ///
    /// This transform converts world coordinates to screen coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.screen_center + self.offset) * Affine::scale(self.zoom)
    }

    /// Get the inverse transform for input handling.
    ///
    /// This transform converts screen coordinates to world coordinates.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-(self.screen_center + self.offset))
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Multiply the zoom by `factor`, keeping the given screen point fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        self.set_zoom_at(screen_point, self.zoom * factor);
    }

    /// Set the zoom (clamped), keeping the world point under `anchor` fixed.
    pub fn set_zoom_at(&mut self, anchor: Point, zoom: f64) {
        if !zoom.is_finite() {
            log::debug!("Ignoring non-finite zoom {zoom}");
            return;
        }
        let new_zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        // Convert anchor to world before zoom
        let world_point = self.screen_to_world(anchor);

        self.zoom = new_zoom;

        // Solve anchor = world * zoom + center + offset for offset
        self.offset = anchor.to_vec2() - self.screen_center - world_point.to_vec2() * self.zoom;
    }

    /// Set the zoom from a UI percentage, anchored at the screen center.
    pub fn set_zoom_percent(&mut self, percent: f64) {
        let center = self.screen_center.to_point();
        self.set_zoom_at(center, percent / 100.0 * BASE_ZOOM);
    }

    /// Current zoom as a whole UI percentage.
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom / BASE_ZOOM * 100.0).round() as u32
    }

    /// Reset camera to default position and zoom.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = BASE_ZOOM;
    }
}
