//! Hexmap Render Library
//!
//! Renderer abstraction for hexmap. The bundled implementation records a
//! display list that can be inspected or exported as SVG.

mod display_list;
mod frame;
mod renderer;
pub mod svg_export;

pub use display_list::{DisplayListRenderer, DrawCommand};
pub use frame::{FrameBuilder, arrow_geometry};
pub use renderer::{
    Painter, RenderContext, RenderResult, Renderer, RendererError, ShapeStyle, StrokeStyle,
    TextStyle,
};
