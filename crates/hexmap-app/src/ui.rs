//! Widget layer contract: actions the controls emit and the state they
//! display.

use hexmap_core::{
    Battlemap, EntityCounts, GridKind, Mode, Orientation, UnitAction, UnitProperties,
};
use serde::{Deserialize, Serialize};

/// Actions that can be triggered from the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UiAction {
    /// Enter a mode unconditionally.
    SetMode(Mode),
    /// Toolbar button: enter a mode, or leave it for view mode.
    ToggleMode(Mode),
    /// Switch grid topology (discards all entities).
    SetGridType(GridKind),
    ToggleGridType,
    SetMapRadius(u32),
    SetOrientation(Orientation),
    ToggleOrientation,
    /// Set zoom percentage, anchored at the screen center.
    SetZoom(f64),
    ZoomIn,
    ZoomOut,
    /// Reset pan and zoom.
    ResetView,
    /// Color picker value. Also recolors the selected unit.
    SetColor(String),
    /// Opacity slider value. Also sets the selected unit's aura opacity.
    SetOpacity(f64),
    /// Number input value.
    SetNumberValue(String),
    SetUnitShowArea(bool),
    SetUnitAreaRadius(u32),
    RotateCw,
    RotateCcw,
    ToggleMove,
    TogglePaint,
    DeleteUnit,
    /// Close the unit panel.
    CloseUnitPanel,
}

/// Apply a UI action to the battlemap.
pub fn apply_action(map: &mut Battlemap, action: &UiAction) {
    log::debug!("UI action: {:?}", action);
    match action {
        UiAction::SetMode(mode) => map.set_mode(*mode),
        UiAction::ToggleMode(mode) => map.toggle_mode(*mode),
        UiAction::SetGridType(kind) => map.set_grid_type(*kind),
        UiAction::ToggleGridType => map.toggle_grid_type(),
        UiAction::SetMapRadius(radius) => map.set_map_radius(*radius),
        UiAction::SetOrientation(orientation) => map.set_orientation(*orientation),
        UiAction::ToggleOrientation => map.toggle_orientation(),
        UiAction::SetZoom(percent) => map.set_zoom(*percent),
        UiAction::ZoomIn => map.zoom_in(),
        UiAction::ZoomOut => map.zoom_out(),
        UiAction::ResetView => map.reset_view(),
        UiAction::SetColor(color) => map.set_color(color),
        UiAction::SetOpacity(opacity) => map.set_opacity(*opacity),
        UiAction::SetNumberValue(value) => map.set_number_value(value),
        UiAction::SetUnitShowArea(show) => {
            map.set_selected_show_area(*show);
        }
        UiAction::SetUnitAreaRadius(radius) => {
            map.set_selected_area_radius(*radius);
        }
        UiAction::RotateCw => {
            map.rotate_cw();
        }
        UiAction::RotateCcw => {
            map.rotate_ccw();
        }
        UiAction::ToggleMove => map.toggle_move(),
        UiAction::TogglePaint => map.toggle_paint(),
        UiAction::DeleteUnit => {
            map.delete_selected();
        }
        UiAction::CloseUnitPanel => map.close_selection(),
    }
}

/// What the controls show, read back from the battlemap after each event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UiState {
    pub mode: Mode,
    pub grid_kind: GridKind,
    pub orientation: Orientation,
    pub map_radius: u32,
    pub zoom_percent: u32,
    pub selected: Option<usize>,
    /// Present while a unit is selected.
    pub unit_panel: Option<UnitProperties>,
    pub grid_options_visible: bool,
    pub paint_options_visible: bool,
    pub number_options_visible: bool,
    pub counts: EntityCounts,
}

impl UiState {
    pub fn from_map(map: &Battlemap) -> Self {
        let mode = map.mode();
        let painting = map.unit_action() == UnitAction::Painting;
        Self {
            mode,
            grid_kind: map.grid_kind(),
            orientation: map.orientation(),
            map_radius: map.map_radius(),
            zoom_percent: map.zoom_percent(),
            selected: map.selected_index(),
            unit_panel: map.selected_unit_properties(),
            grid_options_visible: mode == Mode::GridSettings,
            paint_options_visible: painting
                || matches!(mode, Mode::PlaceMarker | Mode::PlaceArrow),
            number_options_visible: mode == Mode::PlaceNumber,
            counts: map.entity_counts(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexmap_core::{MouseButton, PointerEvent};
    use kurbo::{Point, Size};

    fn map_with_selected_unit() -> Battlemap {
        let mut map = Battlemap::default();
        map.set_viewport_size(Size::new(800.0, 600.0));
        let center = Point::new(400.0, 300.0);
        for mode in [Mode::PlaceUnit, Mode::View] {
            apply_action(&mut map, &UiAction::SetMode(mode));
            map.handle_pointer_event(&PointerEvent::Down {
                position: center,
                button: MouseButton::Left,
            });
            map.handle_pointer_event(&PointerEvent::Up {
                position: center,
                button: MouseButton::Left,
            });
        }
        map
    }

    #[test]
    fn test_action_json() {
        let action: UiAction = serde_json::from_str(r#"{"ToggleMode": "PlaceArrow"}"#).unwrap();
        assert_eq!(action, UiAction::ToggleMode(Mode::PlaceArrow));
        let action: UiAction = serde_json::from_str(r#""RotateCw""#).unwrap();
        assert_eq!(action, UiAction::RotateCw);
    }

    #[test]
    fn test_panel_visibility() {
        let mut map = Battlemap::default();
        apply_action(&mut map, &UiAction::ToggleMode(Mode::GridSettings));
        let state = UiState::from_map(&map);
        assert!(state.grid_options_visible);
        assert!(!state.paint_options_visible);

        apply_action(&mut map, &UiAction::ToggleMode(Mode::PlaceNumber));
        let state = UiState::from_map(&map);
        assert!(state.number_options_visible);
        assert!(!state.grid_options_visible);

        apply_action(&mut map, &UiAction::ToggleMode(Mode::PlaceNumber));
        assert_eq!(UiState::from_map(&map).mode, Mode::View);
    }

    #[test]
    fn test_unit_panel_actions() {
        let mut map = map_with_selected_unit();
        let state = UiState::from_map(&map);
        assert_eq!(state.selected, Some(0));
        assert!(state.unit_panel.is_some());

        apply_action(&mut map, &UiAction::RotateCcw);
        apply_action(&mut map, &UiAction::SetUnitShowArea(true));
        apply_action(&mut map, &UiAction::SetUnitAreaRadius(2));
        apply_action(&mut map, &UiAction::TogglePaint);

        let state = UiState::from_map(&map);
        let panel = state.unit_panel.unwrap();
        assert_eq!(panel.rotation, 5);
        assert!(panel.show_area);
        assert_eq!(panel.area_radius, 2);
        assert!(state.paint_options_visible);

        apply_action(&mut map, &UiAction::CloseUnitPanel);
        let state = UiState::from_map(&map);
        assert!(state.unit_panel.is_none());
        assert!(!state.paint_options_visible);
    }

    #[test]
    fn test_delete_unit() {
        let mut map = map_with_selected_unit();
        apply_action(&mut map, &UiAction::DeleteUnit);
        let state = UiState::from_map(&map);
        assert_eq!(state.counts.units, 0);
        assert_eq!(state.selected, None);
    }

    #[test]
    fn test_grid_actions() {
        let mut map = map_with_selected_unit();
        apply_action(&mut map, &UiAction::SetMapRadius(4));
        apply_action(&mut map, &UiAction::ToggleOrientation);
        apply_action(&mut map, &UiAction::SetZoom(150.0));
        let state = UiState::from_map(&map);
        assert_eq!(state.map_radius, 4);
        assert_eq!(state.orientation, Orientation::Flat);
        assert_eq!(state.zoom_percent, 150);
        assert_eq!(state.counts.units, 1);

        apply_action(&mut map, &UiAction::ToggleGridType);
        let state = UiState::from_map(&map);
        assert_eq!(state.grid_kind, GridKind::Square);
        assert_eq!(state.counts.units, 0);
    }
}
