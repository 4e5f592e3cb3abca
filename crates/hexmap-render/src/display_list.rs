//! Display-list renderer: records primitives instead of rasterizing them.

use crate::frame::FrameBuilder;
use crate::renderer::{Painter, RenderContext, RenderResult, Renderer, ShapeStyle, StrokeStyle, TextStyle};
use kurbo::{Circle, Line, Point, Rect};
use peniko::Color;

/// One recorded drawing primitive, in screen pixels.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    Clear { rect: Rect, color: Color },
    Polygon { points: Vec<Point>, style: ShapeStyle },
    Circle { circle: Circle, style: ShapeStyle },
    Line { line: Line, stroke: StrokeStyle },
    Text { position: Point, text: String, style: TextStyle },
}

/// Renderer that keeps the last frame as a list of [`DrawCommand`]s.
#[derive(Debug, Default)]
pub struct DisplayListRenderer {
    commands: Vec<DrawCommand>,
}

impl DisplayListRenderer {
    /// Create a new renderer with an empty display list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands of the last built frame.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take ownership of the display list, leaving an empty one.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Painter for DisplayListRenderer {
    fn clear(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Clear { rect, color });
    }

    fn polygon(&mut self, points: &[Point], style: &ShapeStyle) {
        if points.len() < 3 {
            return;
        }
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            style: *style,
        });
    }

    fn circle(&mut self, circle: Circle, style: &ShapeStyle) {
        self.commands.push(DrawCommand::Circle { circle, style: *style });
    }

    fn line(&mut self, line: Line, stroke: StrokeStyle) {
        self.commands.push(DrawCommand::Line { line, stroke });
    }

    fn text(&mut self, position: Point, text: &str, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            position,
            text: text.to_string(),
            style: style.clone(),
        });
    }
}

impl Renderer for DisplayListRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        ctx.validate()?;
        self.commands.clear();
        FrameBuilder::new(self, ctx).build();
        log::debug!("Built frame with {} draw commands", self.commands.len());
        Ok(())
    }
}
