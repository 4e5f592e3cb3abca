//! Interaction resolver: turns a clicked cell into a scene mutation.
//!
//! Every operation here is generic over [`Grid`], so the hex and square
//! topologies share one implementation. Invalid interactions (out of
//! bounds, nothing selected, non-adjacent targets) are no-ops and only
//! show up in the debug log.

use crate::grid::Grid;
use crate::scene::{Arrow, Marker, NumberLabel, Scene, Unit, UnitAction};
use crate::tools::{Mode, ToolSettings};
use serde::Serialize;

/// What a click did to the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClickOutcome {
    /// The click had no effect.
    Ignored,
    UnitPlaced(usize),
    MarkerAdded,
    MarkerRemoved,
    /// A number was stamped. `replaced` is set if one was already there.
    NumberStamped { replaced: bool },
    NumberRemoved,
    ArrowStarted,
    ArrowCancelled,
    ArrowAdded,
    ArrowRemoved,
    UnitMoved,
    /// A move attempt to a non-adjacent cell ended the move. Carries the
    /// newly selected unit, if the target held one.
    MoveCancelled(Option<usize>),
    /// A cell was toggled in the selected unit's aura.
    AuraToggled { added: bool },
    Selected(usize),
    SelectionCleared,
}

/// Grid and bounds a click is resolved against.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a, G: Grid> {
    pub grid: &'a G,
    pub map_radius: u32,
}

impl<'a, G: Grid> Resolver<'a, G> {
    pub fn new(grid: &'a G, map_radius: u32) -> Self {
        Self { grid, map_radius }
    }

    fn in_bounds(&self, cell: G::Cell) -> bool {
        self.grid.in_bounds(cell, self.map_radius)
    }

    /// Resolve a click at `cell`.
    ///
    /// Placement modes take precedence, then the selected unit's move or
    /// paint action, then plain selection.
    pub fn click(
        &self,
        scene: &mut Scene<G::Cell>,
        mode: &mut Mode,
        tools: &mut ToolSettings,
        cell: G::Cell,
    ) -> ClickOutcome {
        let outcome = match *mode {
            Mode::PlaceNumber => self.stamp_number(scene, tools, cell),
            Mode::PlaceArrow => self.arrow_click(scene, tools, cell),
            Mode::PlaceUnit => self.place_unit(scene, tools, cell),
            Mode::PlaceMarker => self.toggle_marker(scene, tools, cell),
            _ if scene.selected().is_some() && scene.is_moving() => self.move_selected(scene, cell),
            _ if scene.selected().is_some() && scene.is_painting() => {
                self.paint_aura(scene, cell)
            }
            _ => self.select_at(scene, mode, cell),
        };
        log::debug!("Click at {:?} in {} mode: {:?}", cell, mode.name(), outcome);
        outcome
    }

    fn stamp_number(
        &self,
        scene: &mut Scene<G::Cell>,
        tools: &ToolSettings,
        cell: G::Cell,
    ) -> ClickOutcome {
        if !self.in_bounds(cell) {
            return ClickOutcome::Ignored;
        }
        let replaced = match scene.number_at(cell) {
            Some(index) => scene.remove_number(index).is_some(),
            None => false,
        };
        if tools.number_value.trim().is_empty() {
            return if replaced {
                ClickOutcome::NumberRemoved
            } else {
                ClickOutcome::Ignored
            };
        }
        scene.add_number(NumberLabel {
            position: cell,
            value: tools.number_value.clone(),
        });
        ClickOutcome::NumberStamped { replaced }
    }

    fn arrow_click(
        &self,
        scene: &mut Scene<G::Cell>,
        tools: &ToolSettings,
        cell: G::Cell,
    ) -> ClickOutcome {
        if !self.in_bounds(cell) {
            return ClickOutcome::Ignored;
        }
        let Some(start) = scene.arrow_start() else {
            scene.set_arrow_start(Some(cell));
            return ClickOutcome::ArrowStarted;
        };
        scene.set_arrow_start(None);
        if start == cell {
            return ClickOutcome::ArrowCancelled;
        }
        match scene.arrow_between(start, cell) {
            Some(index) => {
                scene.remove_arrow(index);
                ClickOutcome::ArrowRemoved
            }
            None => {
                scene.add_arrow(Arrow {
                    from: start,
                    to: cell,
                    color: tools.current_color(),
                });
                ClickOutcome::ArrowAdded
            }
        }
    }

    fn place_unit(
        &self,
        scene: &mut Scene<G::Cell>,
        tools: &mut ToolSettings,
        cell: G::Cell,
    ) -> ClickOutcome {
        if !self.in_bounds(cell) {
            return ClickOutcome::Ignored;
        }
        let mut unit = Unit::new(cell, tools.next_unit_color());
        unit.aura_opacity = tools.unit_aura_opacity;
        unit.area_radius = tools.unit_area_radius;
        ClickOutcome::UnitPlaced(scene.add_unit(unit))
    }

    fn toggle_marker(
        &self,
        scene: &mut Scene<G::Cell>,
        tools: &ToolSettings,
        cell: G::Cell,
    ) -> ClickOutcome {
        if !self.in_bounds(cell) {
            return ClickOutcome::Ignored;
        }
        match scene.marker_at(cell) {
            Some(index) => {
                scene.remove_marker(index);
                ClickOutcome::MarkerRemoved
            }
            None => {
                scene.add_marker(Marker {
                    position: cell,
                    color: tools.current_color(),
                    opacity: tools.opacity,
                });
                ClickOutcome::MarkerAdded
            }
        }
    }

    fn move_selected(&self, scene: &mut Scene<G::Cell>, cell: G::Cell) -> ClickOutcome {
        if !self.in_bounds(cell) {
            return ClickOutcome::Ignored;
        }
        let Some(unit) = scene.selected_unit_mut() else {
            return ClickOutcome::Ignored;
        };
        if self.grid.is_adjacent(unit.position, cell) {
            unit.position = cell;
            scene.set_action(UnitAction::Idle);
            return ClickOutcome::UnitMoved;
        }

        scene.set_action(UnitAction::Idle);
        let other = scene.unit_at(cell);
        if let Some(index) = other {
            scene.select(index);
        }
        ClickOutcome::MoveCancelled(other)
    }

    fn paint_aura(&self, scene: &mut Scene<G::Cell>, cell: G::Cell) -> ClickOutcome {
        if !self.in_bounds(cell) {
            return ClickOutcome::Ignored;
        }
        let Some(unit) = scene.selected_unit_mut() else {
            return ClickOutcome::Ignored;
        };
        // Store in the unit's unrotated frame
        let steps = self.grid.step_count() - unit.rotation;
        let relative = self.grid.rotate(cell - unit.position, steps);
        let added = unit.toggle_aura(relative);
        ClickOutcome::AuraToggled { added }
    }

    fn select_at(&self, scene: &mut Scene<G::Cell>, mode: &mut Mode, cell: G::Cell) -> ClickOutcome {
        match scene.unit_at(cell) {
            Some(index) => {
                *mode = Mode::View;
                scene.select(index);
                ClickOutcome::Selected(index)
            }
            None => {
                scene.clear_selection();
                ClickOutcome::SelectionCleared
            }
        }
    }

    /// Rotate the selected unit by `steps`, wrapping. Returns whether a unit
    /// was rotated.
    pub fn rotate_selected(&self, scene: &mut Scene<G::Cell>, steps: i32) -> bool {
        let Some(unit) = scene.selected_unit_mut() else {
            log::debug!("Rotate ignored: no unit selected");
            return false;
        };
        unit.rotation = self.grid.normalize_rotation(unit.rotation + steps);
        true
    }

    /// In-bounds cells the selected unit can move to.
    pub fn move_targets(&self, scene: &Scene<G::Cell>) -> Vec<G::Cell> {
        match scene.selected_unit() {
            Some(unit) if scene.is_moving() => self
                .grid
                .neighbors(unit.position)
                .into_iter()
                .filter(|&cell| self.in_bounds(cell))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Remove the selected unit. Returns whether a unit was removed.
pub fn delete_selected<C: Copy + Ord>(scene: &mut Scene<C>) -> bool {
    match scene.selected() {
        Some(index) => scene.remove_unit(index).is_some(),
        None => false,
    }
}

/// Toggle moving for the selected unit; painting stops.
pub fn toggle_move<C: Copy + Ord>(scene: &mut Scene<C>) {
    let next = if scene.is_moving() {
        UnitAction::Idle
    } else {
        UnitAction::Moving
    };
    scene.set_action(next);
}

/// Toggle painting for the selected unit; moving stops.
pub fn toggle_paint<C: Copy + Ord>(scene: &mut Scene<C>) {
    let next = if scene.is_painting() {
        UnitAction::Idle
    } else {
        UnitAction::Painting
    };
    scene.set_action(next);
}
