//! SVG export of a recorded frame.

use crate::display_list::DrawCommand;
use crate::renderer::{ShapeStyle, StrokeStyle};
use kurbo::Size;
use peniko::Color;
use svg::Document;
use svg::node::element::{Circle, Line, Polygon, Rectangle, Text};

/// CSS color and opacity of a peniko color.
fn paint(color: Color) -> (String, f64) {
    let rgba = color.to_rgba8();
    (
        format!("rgb({},{},{})", rgba.r, rgba.g, rgba.b),
        f64::from(rgba.a) / 255.0,
    )
}

fn fill_attrs<T>(mut node: T, style: &ShapeStyle) -> T
where
    T: svg::Node,
{
    match style.fill {
        Some(color) => {
            let (fill, opacity) = paint(color);
            node.assign("fill", fill);
            node.assign("fill-opacity", opacity);
        }
        None => node.assign("fill", "none"),
    }
    if let Some(stroke) = style.stroke {
        node = stroke_attrs(node, stroke);
    }
    node
}

fn stroke_attrs<T>(mut node: T, stroke: StrokeStyle) -> T
where
    T: svg::Node,
{
    let (color, opacity) = paint(stroke.color);
    node.assign("stroke", color);
    node.assign("stroke-opacity", opacity);
    node.assign("stroke-width", stroke.width);
    node
}

/// Build an SVG document from a display list.
pub fn to_svg(commands: &[DrawCommand], size: Size) -> Document {
    let mut document = Document::new()
        .set("viewBox", (0.0, 0.0, size.width, size.height))
        .set("width", size.width)
        .set("height", size.height);

    for command in commands {
        document = match command {
            DrawCommand::Clear { rect, color } => {
                let (fill, opacity) = paint(*color);
                document.add(
                    Rectangle::new()
                        .set("x", rect.x0)
                        .set("y", rect.y0)
                        .set("width", rect.width())
                        .set("height", rect.height())
                        .set("fill", fill)
                        .set("fill-opacity", opacity),
                )
            }
            DrawCommand::Polygon { points, style } => {
                let points: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();
                document.add(fill_attrs(Polygon::new().set("points", points), style))
            }
            DrawCommand::Circle { circle, style } => document.add(fill_attrs(
                Circle::new()
                    .set("cx", circle.center.x)
                    .set("cy", circle.center.y)
                    .set("r", circle.radius),
                style,
            )),
            DrawCommand::Line { line, stroke } => document.add(stroke_attrs(
                Line::new()
                    .set("x1", line.p0.x)
                    .set("y1", line.p0.y)
                    .set("x2", line.p1.x)
                    .set("y2", line.p1.y),
                *stroke,
            )),
            DrawCommand::Text {
                position,
                text,
                style,
            } => {
                let (fill, _) = paint(style.fill);
                let mut node = Text::new()
                    .set("x", position.x)
                    .set("y", position.y)
                    .set("font-size", style.font_size)
                    .set("font-family", "sans-serif")
                    .set("text-anchor", "middle")
                    .set("dominant-baseline", "middle")
                    .set("fill", fill)
                    .add(svg::node::Text::new(text.as_str()));
                if style.bold {
                    node = node.set("font-weight", "bold");
                }
                if let Some(outline) = style.outline {
                    node = stroke_attrs(node, outline).set("paint-order", "stroke");
                }
                document.add(node)
            }
        };
    }
    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::TextStyle;
    use kurbo::{Point, Rect};

    #[test]
    fn test_svg_contains_primitives() {
        let commands = vec![
            DrawCommand::Clear {
                rect: Rect::new(0.0, 0.0, 100.0, 50.0),
                color: Color::WHITE,
            },
            DrawCommand::Polygon {
                points: vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(5.0, 8.0)],
                style: ShapeStyle::stroked(Color::BLACK, 2.0),
            },
            DrawCommand::Text {
                position: Point::new(50.0, 25.0),
                text: "12".to_string(),
                style: TextStyle {
                    font_size: 20.0,
                    bold: true,
                    fill: Color::BLACK,
                    outline: None,
                },
            },
        ];
        let svg = to_svg(&commands, Size::new(100.0, 50.0)).to_string();
        assert!(svg.contains("<rect"));
        assert!(svg.contains("<polygon"));
        assert!(svg.contains("fill=\"none\""));
        assert!(svg.contains(">12<") || svg.contains(">\n12\n<"));
        assert!(svg.contains("font-weight=\"bold\""));
    }

    #[test]
    fn test_paint_splits_alpha() {
        let (color, opacity) = paint(Color::from_rgba8(16, 185, 129, 51));
        assert_eq!(color, "rgb(16,185,129)");
        assert!((opacity - 0.2).abs() < 1e-9);
    }
}
