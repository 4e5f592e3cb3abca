//! Frame assembly: walks the active board and emits primitives in draw
//! order.
//!
//! Draw order is grid, area rings, markers, arrows, auras, units,
//! numbers, arrow-start highlight and finally the placement ghost.

use crate::renderer::{Painter, RenderContext, ShapeStyle, StrokeStyle, TextStyle};
use hexmap_core::scene::Unit;
use hexmap_core::{Battlemap, BoardVisitor, Grid, Mode, Resolver, Scene};
use kurbo::{Affine, Circle, Line, Point, Rect};
use peniko::Color;
use std::collections::BTreeSet;

const AMBER: Color = Color::from_rgba8(245, 158, 11, 255);
const AMBER_TINT: Color = Color::from_rgba8(245, 158, 11, 51);
const GREEN: Color = Color::from_rgba8(16, 185, 129, 255);
const GREEN_TINT: Color = Color::from_rgba8(16, 185, 129, 51);
const BLUE: Color = Color::from_rgba8(59, 130, 246, 255);
const GLYPH_LINE: Color = Color::from_rgba8(51, 51, 51, 255);

/// Marker and selection halo radius, relative to the cell radius.
const DISC_SCALE: f64 = 0.8;

const ARROW_INSET: f64 = 8.0;
const ARROW_HEAD_LENGTH: f64 = 14.0;
const ARROW_WIDTH: f64 = 10.0;
const ARROW_HEAD: [(f64, f64); 3] = [(4.0, 0.0), (-16.0, 12.0), (-16.0, -12.0)];

const NUMBER_FONT_SIZE: f64 = 20.0;
const NUMBER_OUTLINE: f64 = 3.0;

/// Opacity of the placement ghost.
const GHOST_OPACITY: f64 = 0.5;

/// Shaft and head of an arrow between two world points, before the camera
/// transform. `None` if the points are too close to draw.
pub fn arrow_geometry(from: Point, to: Point) -> Option<(Line, [Point; 3])> {
    let d = to - from;
    let length = d.hypot();
    if (length - 2.0 * ARROW_INSET).max(0.0) == 0.0 {
        return None;
    }
    let dir = d / length;
    let angle = d.y.atan2(d.x);

    let start = from + dir * ARROW_INSET;
    let line_end = to - dir * (ARROW_INSET + ARROW_HEAD_LENGTH);
    let tip = to - dir * ARROW_INSET;

    let head_transform = Affine::translate(tip.to_vec2()) * Affine::rotate(angle);
    let head = ARROW_HEAD.map(|(x, y)| head_transform * Point::new(x, y));
    Some((Line::new(start, line_end), head))
}

/// Emits one frame of a battlemap into a [`Painter`].
pub struct FrameBuilder<'p, P: Painter + ?Sized> {
    painter: &'p mut P,
    map: &'p Battlemap,
    transform: Affine,
    zoom: f64,
    viewport: Rect,
    background: Color,
    cell_fill: Color,
    cell_line: Color,
    show_ghost: bool,
}

impl<'p, P: Painter + ?Sized> FrameBuilder<'p, P> {
    pub fn new(painter: &'p mut P, ctx: &RenderContext<'p>) -> Self {
        let camera = ctx.map.camera();
        Self {
            painter,
            map: ctx.map,
            transform: camera.transform(),
            zoom: camera.zoom,
            viewport: Rect::from_origin_size(Point::ZERO, ctx.viewport_size),
            background: ctx.background_color,
            cell_fill: ctx.cell_fill,
            cell_line: ctx.cell_line,
            show_ghost: ctx.show_ghost,
        }
    }

    /// Draw the frame.
    pub fn build(self) {
        let map = self.map;
        map.board().visit(self);
    }

    fn outline<G: Grid>(&self, grid: &G, cell: G::Cell) -> Vec<Point> {
        grid.corners(cell)
            .into_iter()
            .map(|p| self.transform * p)
            .collect()
    }

    fn center<G: Grid>(&self, grid: &G, cell: G::Cell) -> Point {
        self.transform * grid.to_pixel(cell)
    }

    fn cell<G: Grid>(&mut self, grid: &G, cell: G::Cell, style: ShapeStyle) {
        let outline = self.outline(grid, cell);
        self.painter.polygon(&outline, &style);
    }

    fn line_style(&self) -> StrokeStyle {
        StrokeStyle {
            color: self.cell_line,
            width: self.zoom,
        }
    }

    fn draw_grid<G: Grid>(&mut self, grid: &G, scene: &Scene<G::Cell>) {
        let map_radius = self.map.map_radius();
        let targets: BTreeSet<G::Cell> = Resolver::new(grid, map_radius)
            .move_targets(scene)
            .into_iter()
            .collect();

        for cell in grid.map_cells(map_radius) {
            let style = if targets.contains(&cell) {
                ShapeStyle::filled(self.cell_fill).with_stroke(GREEN, 2.0 * self.zoom)
            } else {
                let line = self.line_style();
                ShapeStyle::filled(self.cell_fill).with_stroke(line.color, line.width)
            };
            self.cell(grid, cell, style);
            if targets.contains(&cell) {
                self.cell(grid, cell, ShapeStyle::filled(GREEN_TINT));
            }
        }
    }

    fn draw_area_rings<G: Grid>(&mut self, grid: &G, scene: &Scene<G::Cell>) {
        for unit in scene.units() {
            let style = ShapeStyle::stroked(unit.color.into(), 2.0 * self.zoom);
            for ring in unit.area_rings(grid) {
                for cell in ring {
                    self.cell(grid, cell, style);
                }
            }
        }
    }

    fn disc_radius<G: Grid>(&self, grid: &G) -> f64 {
        grid.cell_radius() * DISC_SCALE * self.zoom
    }

    fn draw_markers<G: Grid>(&mut self, grid: &G, scene: &Scene<G::Cell>) {
        let radius = self.disc_radius(grid);
        for marker in scene.markers() {
            let circle = Circle::new(self.center(grid, marker.position), radius);
            let style = ShapeStyle::filled(marker.color.with_opacity(marker.opacity));
            self.painter.circle(circle, &style);
        }
    }

    fn draw_arrows<G: Grid>(&mut self, grid: &G, scene: &Scene<G::Cell>) {
        for arrow in scene.arrows() {
            let from = grid.to_pixel(arrow.from);
            let to = grid.to_pixel(arrow.to);
            let Some((shaft, head)) = arrow_geometry(from, to) else {
                continue;
            };
            let shaft = Line::new(self.transform * shaft.p0, self.transform * shaft.p1);
            let head = head.map(|p| self.transform * p);
            self.painter
                .arrow(shaft, &head, arrow.color.into(), ARROW_WIDTH * self.zoom);
        }
    }

    fn draw_auras<G: Grid>(&mut self, grid: &G, scene: &Scene<G::Cell>) {
        let line = self.line_style();
        for unit in scene.units() {
            let style = ShapeStyle::filled(unit.color.with_opacity(unit.aura_opacity))
                .with_stroke(line.color, line.width);
            for cell in unit.aura_cells(grid) {
                self.cell(grid, cell, style);
            }
        }
    }

    fn draw_unit<G: Grid>(&mut self, grid: &G, unit: &Unit<G::Cell>, selected: bool, opacity: f64) {
        let center = self.center(grid, unit.position);
        if selected {
            let halo = Circle::new(center, self.disc_radius(grid));
            self.painter
                .circle(halo, &ShapeStyle::filled(AMBER_TINT).with_stroke(AMBER, 3.0 * self.zoom));
        }

        let glyph = Affine::translate(center.to_vec2())
            * Affine::scale(self.zoom)
            * Affine::rotate(grid.heading(unit.rotation));
        let blade = [(10.0, 0.0), (-5.0, 6.0), (-5.0, -6.0)].map(|(x, y)| glyph * Point::new(x, y));
        self.painter
            .polygon(&blade, &ShapeStyle::filled(unit.color.with_opacity(opacity)));

        let stroke = StrokeStyle {
            color: GLYPH_LINE.multiply_alpha(opacity as f32),
            width: 2.0 * self.zoom,
        };
        let hilt = Line::new(glyph * Point::new(-5.0, 0.0), glyph * Point::new(-12.0, 0.0));
        let guard = Line::new(glyph * Point::new(-8.0, -4.0), glyph * Point::new(-8.0, 4.0));
        self.painter.line(hilt, stroke);
        self.painter.line(guard, stroke);
    }

    fn draw_units<G: Grid>(&mut self, grid: &G, scene: &Scene<G::Cell>) {
        for (index, unit) in scene.units().iter().enumerate() {
            self.draw_unit(grid, unit, scene.selected() == Some(index), 1.0);
        }
    }

    fn draw_numbers<G: Grid>(&mut self, grid: &G, scene: &Scene<G::Cell>) {
        let style = TextStyle {
            font_size: NUMBER_FONT_SIZE * self.zoom,
            bold: true,
            fill: Color::BLACK,
            outline: Some(StrokeStyle {
                color: Color::WHITE,
                width: NUMBER_OUTLINE * self.zoom,
            }),
        };
        for number in scene.numbers() {
            let position = self.center(grid, number.position);
            self.painter.text(position, &number.value, &style);
        }
    }

    fn draw_arrow_start<G: Grid>(&mut self, grid: &G, scene: &Scene<G::Cell>) {
        if self.map.mode() != Mode::PlaceArrow {
            return;
        }
        if let Some(start) = scene.arrow_start() {
            self.cell(grid, start, ShapeStyle::stroked(BLUE, 3.0 * self.zoom));
        }
    }

    fn draw_ghost<G: Grid>(&mut self, grid: &G, scene: &Scene<G::Cell>) {
        if !self.show_ghost {
            return;
        }
        let Some(cell) = scene.hovered() else {
            return;
        };
        if !grid.in_bounds(cell, self.map.map_radius()) {
            return;
        }
        let map = self.map;
        let tools = map.tools();
        match map.mode() {
            Mode::PlaceUnit => {
                let ghost = Unit::new(cell, tools.peek_unit_color());
                self.draw_unit(grid, &ghost, false, GHOST_OPACITY);
            }
            Mode::PlaceMarker => {
                let color = tools.current_color();
                let circle = Circle::new(self.center(grid, cell), self.disc_radius(grid));
                let style = ShapeStyle::filled(color.with_opacity(tools.opacity * GHOST_OPACITY));
                self.painter.circle(circle, &style);
            }
            _ => {}
        }
    }
}

impl<P: Painter + ?Sized> BoardVisitor for FrameBuilder<'_, P> {
    type Output = ();

    fn visit<G: Grid>(mut self, grid: &G, scene: &Scene<G::Cell>) {
        self.painter.clear(self.viewport, self.background);
        self.draw_grid(grid, scene);
        self.draw_area_rings(grid, scene);
        self.draw_markers(grid, scene);
        self.draw_arrows(grid, scene);
        self.draw_auras(grid, scene);
        self.draw_units(grid, scene);
        self.draw_numbers(grid, scene);
        self.draw_arrow_start(grid, scene);
        self.draw_ghost(grid, scene);
    }
}
