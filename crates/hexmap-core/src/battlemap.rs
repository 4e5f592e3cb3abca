//! The battlemap: active board, camera, mode and control values.
//!
//! [`Battlemap`] is the single owned state object every entry point goes
//! through. It is what the widget layer drives and what the renderer
//! reads.

use crate::camera::Camera;
use crate::color::Rgb;
use crate::config::MapConfig;
use crate::grid::{Grid, GridKind, Hex, HexGrid, Orientation, SquareCell, SquareGrid};
use crate::input::{InputState, MouseButton, PointerEvent};
use crate::interaction::{self, ClickOutcome, Resolver};
use crate::scene::{EntityCounts, Scene, UnitAction};
use crate::tools::{Mode, ToolSettings};
use kurbo::{Point, Size};
use serde::Serialize;

/// The active grid topology together with the entities placed on it.
#[derive(Debug, Clone)]
pub enum Board {
    Hex { grid: HexGrid, scene: Scene<Hex> },
    Square { grid: SquareGrid, scene: Scene<SquareCell> },
}

/// Run `$body` with `$grid` and `$scene` bound to the active board.
macro_rules! on_board {
    ($board:expr, |$grid:ident, $scene:ident| $body:expr) => {
        match $board {
            Board::Hex {
                grid: ref $grid,
                scene: ref $scene,
            } => $body,
            Board::Square {
                grid: ref $grid,
                scene: ref $scene,
            } => $body,
        }
    };
}

/// Like `on_board!`, with the scene borrowed mutably.
macro_rules! on_board_mut {
    ($board:expr, |$grid:ident, $scene:ident| $body:expr) => {
        match $board {
            Board::Hex {
                grid: ref $grid,
                scene: ref mut $scene,
            } => $body,
            Board::Square {
                grid: ref $grid,
                scene: ref mut $scene,
            } => $body,
        }
    };
}

/// Code that runs against whichever topology is active.
pub trait BoardVisitor {
    type Output;

    fn visit<G: Grid>(self, grid: &G, scene: &Scene<G::Cell>) -> Self::Output;
}

impl Board {
    /// An empty board of the given topology.
    pub fn new(kind: GridKind, orientation: Orientation, hex_size: f64) -> Self {
        match kind {
            GridKind::Hex => Board::Hex {
                grid: HexGrid::new(orientation, hex_size),
                scene: Scene::new(),
            },
            GridKind::Square => Board::Square {
                grid: SquareGrid::from_hex_size(hex_size),
                scene: Scene::new(),
            },
        }
    }

    pub fn kind(&self) -> GridKind {
        match self {
            Board::Hex { .. } => GridKind::Hex,
            Board::Square { .. } => GridKind::Square,
        }
    }

    pub fn visit<V: BoardVisitor>(&self, visitor: V) -> V::Output {
        on_board!(*self, |grid, scene| visitor.visit(grid, scene))
    }
}

/// Properties of the selected unit shown by the unit panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitProperties {
    pub color: Rgb,
    pub rotation: i32,
    pub aura_opacity: f64,
    pub aura_size: usize,
    pub show_area: bool,
    pub area_radius: u32,
    pub action: UnitAction,
}

/// The whole editor state.
#[derive(Debug, Clone)]
pub struct Battlemap {
    board: Board,
    camera: Camera,
    mode: Mode,
    tools: ToolSettings,
    input: InputState,
    map_radius: u32,
    orientation: Orientation,
    hex_size: f64,
    wheel_zoom_step: f64,
}

impl Default for Battlemap {
    fn default() -> Self {
        Self::new(&MapConfig::default())
    }
}

impl Battlemap {
    pub fn new(config: &MapConfig) -> Self {
        Self {
            board: Board::new(config.grid_kind, config.orientation, config.hex_size),
            camera: Camera::with_zoom_limits(config.min_zoom, config.max_zoom),
            mode: Mode::View,
            tools: ToolSettings::from_config(config),
            input: InputState::new(config.pan_threshold),
            map_radius: config.map_radius,
            orientation: config.orientation,
            hex_size: config.hex_size,
            wheel_zoom_step: config.wheel_zoom_step,
        }
    }

    // --- Read accessors ---

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn tools(&self) -> &ToolSettings {
        &self.tools
    }

    pub fn grid_kind(&self) -> GridKind {
        self.board.kind()
    }

    pub fn map_radius(&self) -> u32 {
        self.map_radius
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn zoom_percent(&self) -> u32 {
        self.camera.zoom_percent()
    }

    pub fn pointer_position(&self) -> Option<Point> {
        self.input.pointer_position
    }

    /// Whether a pan drag is in progress.
    pub fn is_panning(&self) -> bool {
        self.input.pan.is_active()
    }

    pub fn selected_index(&self) -> Option<usize> {
        on_board!(self.board, |_grid, scene| scene.selected())
    }

    pub fn unit_action(&self) -> UnitAction {
        on_board!(self.board, |_grid, scene| scene.action())
    }

    pub fn entity_counts(&self) -> EntityCounts {
        on_board!(self.board, |_grid, scene| scene.counts())
    }

    pub fn selected_unit_properties(&self) -> Option<UnitProperties> {
        on_board!(self.board, |_grid, scene| {
            scene.selected_unit().map(|unit| UnitProperties {
                color: unit.color,
                rotation: unit.rotation,
                aura_opacity: unit.aura_opacity,
                aura_size: unit.aura().len(),
                show_area: unit.show_area,
                area_radius: unit.area_radius,
                action: scene.action(),
            })
        })
    }

    /// The hex scene, if the hex topology is active.
    pub fn hex_scene(&self) -> Option<&Scene<Hex>> {
        match &self.board {
            Board::Hex { scene, .. } => Some(scene),
            Board::Square { .. } => None,
        }
    }

    /// The square scene, if the square topology is active.
    pub fn square_scene(&self) -> Option<&Scene<SquareCell>> {
        match &self.board {
            Board::Square { scene, .. } => Some(scene),
            Board::Hex { .. } => None,
        }
    }

    // --- Modes ---

    /// Switch to `mode`, dropping the selection and any pending arrow.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        on_board_mut!(self.board, |_grid, scene| {
            scene.clear_selection();
            scene.set_arrow_start(None);
        });
    }

    /// Toolbar button behavior: enter `mode`, or go back to view mode if
    /// it is already active.
    pub fn toggle_mode(&mut self, mode: Mode) {
        let next = if self.mode == mode { Mode::View } else { mode };
        self.set_mode(next);
    }

    // --- Grid settings ---

    /// Switch topology. This discards every entity.
    pub fn set_grid_type(&mut self, kind: GridKind) {
        if kind == self.board.kind() {
            return;
        }
        let counts = self.entity_counts();
        log::info!(
            "Switching grid to {}, discarding {} units, {} markers, {} numbers, {} arrows",
            kind.name(),
            counts.units,
            counts.markers,
            counts.numbers,
            counts.arrows
        );
        self.board = Board::new(kind, self.orientation, self.hex_size);
        self.input.pan.cancel();
    }

    pub fn toggle_grid_type(&mut self) {
        self.set_grid_type(self.board.kind().toggled());
    }

    /// Resize the bounded map. Entities outside the new bounds are kept.
    pub fn set_map_radius(&mut self, radius: u32) {
        log::info!("Map radius {} -> {}", self.map_radius, radius);
        self.map_radius = radius;
    }

    /// Change the hex orientation. Entities keep their cells.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
        if let Board::Hex { grid, .. } = &mut self.board {
            grid.layout.orientation = orientation;
        }
    }

    pub fn toggle_orientation(&mut self) {
        self.set_orientation(self.orientation.toggled());
    }

    // --- Camera ---

    pub fn set_viewport_size(&mut self, size: Size) {
        self.camera.set_viewport_size(size);
    }

    /// Set the zoom from a UI percentage, anchored at the screen center.
    pub fn set_zoom(&mut self, percent: f64) {
        self.camera.set_zoom_percent(percent);
    }

    pub fn zoom_in(&mut self) {
        let center = self.camera.screen_center.to_point();
        self.camera.zoom_at(center, self.wheel_zoom_step);
    }

    pub fn zoom_out(&mut self) {
        let center = self.camera.screen_center.to_point();
        self.camera.zoom_at(center, 1.0 / self.wheel_zoom_step);
    }

    pub fn reset_view(&mut self) {
        self.camera.reset();
    }

    // --- Control values ---

    /// Set the color picker value. The selected unit takes the color too.
    pub fn set_color(&mut self, color: &str) {
        self.tools.color = color.to_string();
        self.set_selected_color(color);
    }

    /// Set the opacity slider value. The selected unit's aura takes it too.
    pub fn set_opacity(&mut self, opacity: f64) {
        self.tools.opacity = opacity;
        self.set_selected_opacity(opacity);
    }

    pub fn set_number_value(&mut self, value: &str) {
        self.tools.number_value = value.to_string();
    }

    // --- Selected unit ---

    fn with_selected_unit(&mut self, f: impl FnOnce(&mut UnitFields<'_>)) -> bool {
        on_board_mut!(self.board, |_grid, scene| match scene.selected_unit_mut() {
            Some(unit) => {
                let mut fields = UnitFields {
                    color: &mut unit.color,
                    aura_opacity: &mut unit.aura_opacity,
                    show_area: &mut unit.show_area,
                    area_radius: &mut unit.area_radius,
                };
                f(&mut fields);
                true
            }
            None => false,
        })
    }

    pub fn set_selected_color(&mut self, color: &str) -> bool {
        let rgb = Rgb::parse_or_default(color);
        self.with_selected_unit(|unit| *unit.color = rgb)
    }

    pub fn set_selected_opacity(&mut self, opacity: f64) -> bool {
        self.with_selected_unit(|unit| *unit.aura_opacity = opacity)
    }

    pub fn set_selected_show_area(&mut self, show: bool) -> bool {
        self.with_selected_unit(|unit| *unit.show_area = show)
    }

    pub fn set_selected_area_radius(&mut self, radius: u32) -> bool {
        self.with_selected_unit(|unit| *unit.area_radius = radius)
    }

    pub fn rotate_cw(&mut self) -> bool {
        let map_radius = self.map_radius;
        on_board_mut!(self.board, |grid, scene| {
            Resolver::new(grid, map_radius).rotate_selected(scene, 1)
        })
    }

    pub fn rotate_ccw(&mut self) -> bool {
        let map_radius = self.map_radius;
        on_board_mut!(self.board, |grid, scene| {
            Resolver::new(grid, map_radius).rotate_selected(scene, -1)
        })
    }

    pub fn toggle_move(&mut self) {
        on_board_mut!(self.board, |_grid, scene| interaction::toggle_move(scene))
    }

    pub fn toggle_paint(&mut self) {
        on_board_mut!(self.board, |_grid, scene| interaction::toggle_paint(scene))
    }

    pub fn delete_selected(&mut self) -> bool {
        on_board_mut!(self.board, |_grid, scene| interaction::delete_selected(scene))
    }

    /// Close the unit panel: drop the selection and any move/paint action.
    pub fn close_selection(&mut self) {
        on_board_mut!(self.board, |_grid, scene| scene.clear_selection())
    }

    // --- Pointer input ---

    /// Resolve a click at a screen position.
    pub fn click_at(&mut self, screen: Point) -> ClickOutcome {
        let world = self.camera.screen_to_world(screen);
        let map_radius = self.map_radius;
        on_board_mut!(self.board, |grid, scene| {
            let cell = grid.from_pixel(world);
            Resolver::new(grid, map_radius).click(scene, &mut self.mode, &mut self.tools, cell)
        })
    }

    fn hover_at(&mut self, screen: Point) {
        let world = self.camera.screen_to_world(screen);
        on_board_mut!(self.board, |grid, scene| {
            scene.set_hovered(Some(grid.from_pixel(world)))
        })
    }

    /// Handle a pointer event. Returns the outcome if the event completed
    /// a click.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) -> Option<ClickOutcome> {
        let released = self.input.handle_pointer_event(event);
        match *event {
            PointerEvent::Down { position, button } => {
                if self.mode == Mode::PanZoom && button == MouseButton::Left {
                    self.input.pan.begin(position);
                }
                None
            }
            PointerEvent::Move { position } => {
                if let Some(delta) = self.input.pan.update(position) {
                    self.camera.pan(delta);
                }
                self.hover_at(position);
                None
            }
            PointerEvent::Up { position, button } => {
                if self.input.pan.is_active() && self.input.pan.end() {
                    log::debug!("Pan ended, click suppressed");
                    return None;
                }
                if !released || button != MouseButton::Left {
                    return None;
                }
                Some(self.click_at(position))
            }
            PointerEvent::Scroll { position, delta } => {
                if delta.y < 0.0 {
                    self.camera.zoom_at(position, self.wheel_zoom_step);
                } else if delta.y > 0.0 {
                    self.camera.zoom_at(position, 1.0 / self.wheel_zoom_step);
                }
                None
            }
            PointerEvent::Leave => {
                on_board_mut!(self.board, |_grid, scene| scene.set_hovered(None));
                None
            }
        }
    }
}

/// Mutable view of the selected unit's panel fields, independent of the
/// cell type.
struct UnitFields<'a> {
    color: &'a mut Rgb,
    aura_opacity: &'a mut f64,
    show_area: &'a mut bool,
    area_radius: &'a mut u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;

    fn battlemap() -> Battlemap {
        let mut map = Battlemap::default();
        map.set_viewport_size(Size::new(800.0, 600.0));
        map
    }

    fn hex_screen(map: &Battlemap, cell: Hex) -> Point {
        let grid = HexGrid::new(map.orientation(), 30.0);
        map.camera().world_to_screen(grid.to_pixel(cell))
    }

    fn square_screen(map: &Battlemap, cell: SquareCell) -> Point {
        map.camera().world_to_screen(SquareGrid::new(60.0).to_pixel(cell))
    }

    fn click(map: &mut Battlemap, position: Point) -> Option<ClickOutcome> {
        map.handle_pointer_event(&PointerEvent::Down {
            position,
            button: MouseButton::Left,
        });
        map.handle_pointer_event(&PointerEvent::Up {
            position,
            button: MouseButton::Left,
        })
    }

    fn click_hex(map: &mut Battlemap, cell: Hex) -> Option<ClickOutcome> {
        let position = hex_screen(map, cell);
        click(map, position)
    }

    fn click_square(map: &mut Battlemap, cell: SquareCell) -> Option<ClickOutcome> {
        let position = square_screen(map, cell);
        click(map, position)
    }

    fn hex(q: i32, r: i32, s: i32) -> Hex {
        Hex::from_cube(q, r, s).unwrap()
    }

    #[test]
    fn test_default_state() {
        let map = battlemap();
        assert_eq!(map.mode(), Mode::View);
        assert_eq!(map.grid_kind(), GridKind::Hex);
        assert_eq!(map.map_radius(), 10);
        assert_eq!(map.zoom_percent(), 100);
        assert_eq!(map.selected_index(), None);
    }

    #[test]
    fn test_click_places_unit_at_pointer_cell() {
        let mut map = battlemap();
        map.set_mode(Mode::PlaceUnit);
        let target = hex(2, -1, -1);
        let position = hex_screen(&map, target);

        assert_eq!(click(&mut map, position), Some(ClickOutcome::UnitPlaced(0)));
        assert_eq!(map.hex_scene().unwrap().units()[0].position, target);
    }

    #[test]
    fn test_hex_move_scenario() {
        let mut map = battlemap();
        map.set_mode(Mode::PlaceUnit);
        click_hex(&mut map, Hex::ORIGIN);
        map.set_mode(Mode::View);
        click_hex(&mut map, Hex::ORIGIN);
        assert_eq!(map.selected_index(), Some(0));

        map.toggle_move();
        click_hex(&mut map, hex(2, -2, 0));
        assert_eq!(map.hex_scene().unwrap().units()[0].position, Hex::ORIGIN);
        assert_eq!(map.unit_action(), UnitAction::Idle);

        map.toggle_move();
        click_hex(&mut map, hex(1, -1, 0));
        assert_eq!(map.hex_scene().unwrap().units()[0].position, hex(1, -1, 0));
        assert_eq!(map.unit_action(), UnitAction::Idle);
    }

    #[test]
    fn test_aura_round_trip() {
        let mut map = battlemap();
        map.set_mode(Mode::PlaceUnit);
        click_hex(&mut map, Hex::ORIGIN);
        map.set_mode(Mode::View);
        click_hex(&mut map, Hex::ORIGIN);

        map.toggle_paint();
        let relative = hex(1, 0, -1);
        click_hex(&mut map, relative);
        map.close_selection();

        click_hex(&mut map, Hex::ORIGIN);
        map.rotate_cw();
        map.rotate_cw();

        let Board::Hex { grid, scene } = map.board() else {
            panic!("expected hex board");
        };
        let unit = &scene.units()[0];
        assert_eq!(unit.aura().iter().copied().collect::<Vec<_>>(), vec![relative]);
        assert_eq!(unit.aura_cells(grid), vec![Hex::ORIGIN + relative.rotate(2)]);
    }

    #[test]
    fn test_grid_switch_reset() {
        let mut map = battlemap();
        map.set_mode(Mode::PlaceUnit);
        for cell in [hex(0, 0, 0), hex(1, 0, -1), hex(0, 1, -1)] {
            click_hex(&mut map, cell);
        }
        map.set_mode(Mode::PlaceMarker);
        for cell in [hex(2, 0, -2), hex(-1, 0, 1)] {
            click_hex(&mut map, cell);
        }
        map.set_mode(Mode::View);
        click_hex(&mut map, Hex::ORIGIN);
        assert_eq!(map.selected_index(), Some(0));
        assert_eq!(map.entity_counts().units, 3);
        assert_eq!(map.entity_counts().markers, 2);

        map.set_grid_type(GridKind::Square);
        assert_eq!(map.grid_kind(), GridKind::Square);
        assert_eq!(map.entity_counts(), EntityCounts::default());
        assert_eq!(map.selected_index(), None);
        assert!(map.hex_scene().is_none());
    }

    #[test]
    fn test_grid_switch_to_same_kind_keeps_entities() {
        let mut map = battlemap();
        map.set_mode(Mode::PlaceUnit);
        click_hex(&mut map, Hex::ORIGIN);
        map.set_grid_type(GridKind::Hex);
        assert_eq!(map.entity_counts().units, 1);
    }

    #[test]
    fn test_square_topology_clicks() {
        let mut map = battlemap();
        map.toggle_grid_type();
        map.set_mode(Mode::PlaceUnit);
        click_square(&mut map, SquareCell::new(0, 0));
        map.set_mode(Mode::View);
        click_square(&mut map, SquareCell::new(0, 0));

        map.toggle_move();
        click_square(&mut map, SquareCell::new(1, 1));
        let unit = &map.square_scene().unwrap().units()[0];
        assert_eq!(unit.position, SquareCell::new(1, 1));

        for _ in 0..5 {
            map.rotate_cw();
        }
        assert_eq!(map.selected_unit_properties().unwrap().rotation, 1);
    }

    #[test]
    fn test_toggle_mode_clears_selection_and_arrow_start() {
        let mut map = battlemap();
        map.set_mode(Mode::PlaceArrow);
        click_hex(&mut map, Hex::ORIGIN);
        assert_eq!(map.hex_scene().unwrap().arrow_start(), Some(Hex::ORIGIN));

        map.toggle_mode(Mode::PlaceArrow);
        assert_eq!(map.mode(), Mode::View);
        assert_eq!(map.hex_scene().unwrap().arrow_start(), None);

        map.toggle_mode(Mode::GridSettings);
        assert_eq!(map.mode(), Mode::GridSettings);
    }

    #[test]
    fn test_marker_toggle_idempotence() {
        let mut map = battlemap();
        map.set_mode(Mode::PlaceMarker);
        let position = hex_screen(&map, hex(3, -1, -2));
        click(&mut map, position);
        click(&mut map, position);
        assert_eq!(map.entity_counts().markers, 0);
    }

    #[test]
    fn test_selected_unit_setters() {
        let mut map = battlemap();
        assert!(!map.set_selected_show_area(true));

        map.set_mode(Mode::PlaceUnit);
        click_hex(&mut map, Hex::ORIGIN);
        map.set_mode(Mode::View);
        click_hex(&mut map, Hex::ORIGIN);

        map.set_color("#10b981");
        map.set_opacity(0.8);
        assert!(map.set_selected_show_area(true));
        assert!(map.set_selected_area_radius(3));

        let props = map.selected_unit_properties().unwrap();
        assert_eq!(props.color, Rgb::new(0x10, 0xb9, 0x81));
        assert!((props.aura_opacity - 0.8).abs() < f64::EPSILON);
        assert!(props.show_area);
        assert_eq!(props.area_radius, 3);
        assert_eq!(map.tools().color, "#10b981");
    }

    #[test]
    fn test_delete_and_close() {
        let mut map = battlemap();
        map.set_mode(Mode::PlaceUnit);
        click_hex(&mut map, Hex::ORIGIN);
        map.set_mode(Mode::View);
        click_hex(&mut map, Hex::ORIGIN);
        map.toggle_paint();

        map.close_selection();
        assert_eq!(map.selected_index(), None);
        assert_eq!(map.unit_action(), UnitAction::Idle);
        assert!(!map.delete_selected());

        click_hex(&mut map, Hex::ORIGIN);
        assert!(map.delete_selected());
        assert_eq!(map.entity_counts().units, 0);
    }

    #[test]
    fn test_pan_suppresses_click() {
        let mut map = battlemap();
        map.set_mode(Mode::PanZoom);
        let start = Point::new(400.0, 300.0);
        map.handle_pointer_event(&PointerEvent::Down {
            position: start,
            button: MouseButton::Left,
        });
        map.handle_pointer_event(&PointerEvent::Move {
            position: Point::new(450.0, 320.0),
        });
        let outcome = map.handle_pointer_event(&PointerEvent::Up {
            position: Point::new(450.0, 320.0),
            button: MouseButton::Left,
        });

        assert_eq!(outcome, None);
        assert!((map.camera().offset.x - 50.0).abs() < 1e-9);
        assert!((map.camera().offset.y - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_small_drag_still_clicks() {
        let mut map = battlemap();
        map.set_mode(Mode::PanZoom);
        let start = Point::new(400.0, 300.0);
        map.handle_pointer_event(&PointerEvent::Down {
            position: start,
            button: MouseButton::Left,
        });
        map.handle_pointer_event(&PointerEvent::Move {
            position: Point::new(401.0, 300.0),
        });
        let outcome = map.handle_pointer_event(&PointerEvent::Up {
            position: Point::new(401.0, 300.0),
            button: MouseButton::Left,
        });
        assert_eq!(outcome, Some(ClickOutcome::SelectionCleared));
        assert_eq!(map.camera().offset, Vec2::ZERO);
    }

    #[test]
    fn test_leave_releases_pan() {
        let mut map = battlemap();
        map.set_mode(Mode::PanZoom);
        map.handle_pointer_event(&PointerEvent::Down {
            position: Point::new(400.0, 300.0),
            button: MouseButton::Left,
        });
        map.handle_pointer_event(&PointerEvent::Leave);
        assert!(!map.is_panning());

        map.handle_pointer_event(&PointerEvent::Move {
            position: Point::new(500.0, 300.0),
        });
        assert_eq!(map.camera().offset, Vec2::ZERO);
    }

    #[test]
    fn test_wheel_zoom_keeps_pointer_anchor() {
        let mut map = battlemap();
        let anchor = Point::new(620.0, 150.0);
        let before = map.camera().screen_to_world(anchor);
        map.handle_pointer_event(&PointerEvent::Scroll {
            position: anchor,
            delta: Vec2::new(0.0, -1.0),
        });
        assert_eq!(map.zoom_percent(), 110);
        let after = map.camera().screen_to_world(anchor);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);

        map.handle_pointer_event(&PointerEvent::Scroll {
            position: anchor,
            delta: Vec2::ZERO,
        });
        assert_eq!(map.zoom_percent(), 110);
    }

    #[test]
    fn test_set_zoom_and_reset() {
        let mut map = battlemap();
        map.set_zoom(250.0);
        assert_eq!(map.zoom_percent(), 250);
        map.set_zoom(1000.0);
        assert_eq!(map.zoom_percent(), 500);
        map.reset_view();
        assert_eq!(map.zoom_percent(), 100);
    }

    #[test]
    fn test_nan_zoom_keeps_clicks_on_target() {
        let mut map = battlemap();
        map.set_zoom(120.0);
        map.set_zoom(f64::NAN);
        assert_eq!(map.zoom_percent(), 120);

        map.set_mode(Mode::PlaceMarker);
        let target = hex(1, -1, 0);
        assert_eq!(click_hex(&mut map, target), Some(ClickOutcome::MarkerAdded));
        assert_eq!(map.hex_scene().unwrap().markers()[0].position, target);
    }

    #[test]
    fn test_unvalidated_zoom_limits_do_not_panic() {
        let config = MapConfig {
            min_zoom: 2.0,
            max_zoom: 1.0,
            ..MapConfig::default()
        };
        let mut map = Battlemap::new(&config);
        map.set_zoom(150.0);
        assert_eq!(map.zoom_percent(), 150);
    }

    #[test]
    fn test_hover_tracks_pointer() {
        let mut map = battlemap();
        let cell = hex(-2, 1, 1);
        let position = hex_screen(&map, cell);
        map.handle_pointer_event(&PointerEvent::Move { position });
        assert_eq!(map.hex_scene().unwrap().hovered(), Some(cell));

        map.handle_pointer_event(&PointerEvent::Leave);
        assert_eq!(map.hex_scene().unwrap().hovered(), None);
    }

    #[test]
    fn test_toggle_orientation_keeps_entities() {
        let mut map = battlemap();
        map.set_mode(Mode::PlaceUnit);
        click_hex(&mut map, hex(1, 0, -1));
        map.toggle_orientation();
        assert_eq!(map.orientation(), Orientation::Flat);
        assert_eq!(map.hex_scene().unwrap().units()[0].position, hex(1, 0, -1));

        // Clicks now resolve with the flat layout
        map.set_mode(Mode::View);
        let outcome = click_hex(&mut map, hex(1, 0, -1));
        assert_eq!(outcome, Some(ClickOutcome::Selected(0)));
    }
}
