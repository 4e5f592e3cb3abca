//! Renderer trait abstraction.

use hexmap_core::Battlemap;
use kurbo::{Circle, Line, Point, Rect, Size};
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Invalid viewport: {0}")]
    InvalidViewport(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Outline of a shape.
#[derive(Debug, Clone, Copy)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
}

/// Fill and/or outline of a shape. A style with neither draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeStyle {
    pub fill: Option<Color>,
    pub stroke: Option<StrokeStyle>,
}

impl ShapeStyle {
    pub fn filled(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
        }
    }

    /// Stroke only, no fill.
    pub fn stroked(color: Color, width: f64) -> Self {
        Self {
            fill: None,
            stroke: Some(StrokeStyle { color, width }),
        }
    }

    /// Add an outline.
    pub fn with_stroke(mut self, color: Color, width: f64) -> Self {
        self.stroke = Some(StrokeStyle { color, width });
        self
    }
}

/// Text with an outline drawn under the fill.
#[derive(Debug, Clone)]
pub struct TextStyle {
    pub font_size: f64,
    pub bold: bool,
    pub fill: Color,
    pub outline: Option<StrokeStyle>,
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The battlemap to render.
    pub map: &'a Battlemap,
    /// Viewport size in pixels.
    pub viewport_size: Size,
    /// Background color.
    pub background_color: Color,
    /// Fill of empty grid cells.
    pub cell_fill: Color,
    /// Outline of grid cells.
    pub cell_line: Color,
    /// Whether to draw the placement ghost under the pointer.
    pub show_ghost: bool,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(map: &'a Battlemap, viewport_size: Size) -> Self {
        Self {
            map,
            viewport_size,
            background_color: Color::WHITE,
            cell_fill: Color::WHITE,
            cell_line: Color::BLACK,
            show_ghost: true,
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the grid cell fill and line colors.
    pub fn with_cell_colors(mut self, fill: Color, line: Color) -> Self {
        self.cell_fill = fill;
        self.cell_line = line;
        self
    }

    /// Enable or disable the placement ghost.
    pub fn with_ghost(mut self, show: bool) -> Self {
        self.show_ghost = show;
        self
    }

    /// Check the viewport can be drawn into.
    pub fn validate(&self) -> RenderResult<()> {
        let Size { width, height } = self.viewport_size;
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(RendererError::InvalidViewport(format!("{width}x{height}")));
        }
        Ok(())
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Build the drawing commands for a frame.
    ///
    /// This method is called once per frame and should prepare all drawing commands.
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}

/// Drawing primitives a backend provides. All geometry is in screen
/// pixels.
pub trait Painter {
    /// Clear a region to a solid color.
    fn clear(&mut self, rect: Rect, color: Color);

    /// Draw a closed polygon.
    fn polygon(&mut self, points: &[Point], style: &ShapeStyle);

    fn circle(&mut self, circle: Circle, style: &ShapeStyle);

    /// Draw a straight line with butt caps.
    fn line(&mut self, line: Line, stroke: StrokeStyle);

    /// Draw text centered on `position`.
    fn text(&mut self, position: Point, text: &str, style: &TextStyle);

    /// Draw a line ending in a filled arrowhead.
    fn arrow(&mut self, shaft: Line, head: &[Point], color: Color, width: f64) {
        self.line(shaft, StrokeStyle { color, width });
        self.polygon(head, &ShapeStyle::filled(color));
    }
}
