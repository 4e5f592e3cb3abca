//! Placed entities and per-map interaction state.
//!
//! A [`Scene`] is generic over the cell type of the active topology. It
//! holds no validation logic; bounds and adjacency checks belong to the
//! interaction resolver.

use crate::color::Rgb;
use crate::grid::Grid;
use serde::Serialize;
use std::collections::BTreeSet;
use std::ops::Add;

/// A unit placed on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unit<C: Ord> {
    pub position: C,
    /// Rotation step, in `[0, step_count)`.
    pub rotation: i32,
    pub color: Rgb,
    pub aura_opacity: f64,
    /// Aura cells relative to the unit, in its unrotated frame.
    aura: BTreeSet<C>,
    pub show_area: bool,
    pub area_radius: u32,
}

impl<C: Copy + Ord + Add<Output = C>> Unit<C> {
    pub fn new(position: C, color: Rgb) -> Self {
        Self {
            position,
            rotation: 0,
            color,
            aura_opacity: 0.5,
            aura: BTreeSet::new(),
            show_area: false,
            area_radius: 1,
        }
    }

    /// Aura cells in the unit's local, unrotated frame.
    pub fn aura(&self) -> &BTreeSet<C> {
        &self.aura
    }

    /// Add `relative` to the aura if absent, remove it if present.
    /// Returns whether the cell is in the aura afterwards.
    pub fn toggle_aura(&mut self, relative: C) -> bool {
        if self.aura.remove(&relative) {
            false
        } else {
            self.aura.insert(relative);
            true
        }
    }

    /// Aura cells placed on the map: each relative cell is rotated by the
    /// unit's current rotation, then offset by its position.
    pub fn aura_cells<G: Grid<Cell = C>>(&self, grid: &G) -> Vec<C> {
        self.aura
            .iter()
            .map(|&relative| self.position + grid.rotate(relative, self.rotation))
            .collect()
    }

    /// Rings 1 through `area_radius` around the unit, if the area is shown.
    pub fn area_rings<G: Grid<Cell = C>>(&self, grid: &G) -> Vec<Vec<C>> {
        if !self.show_area {
            return Vec::new();
        }
        (1..=self.area_radius)
            .map(|radius| grid.ring(self.position, radius))
            .collect()
    }
}

/// A colored circle marking a cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker<C> {
    pub position: C,
    pub color: Rgb,
    pub opacity: f64,
}

/// A text label stamped on a cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberLabel<C> {
    pub position: C,
    pub value: String,
}

/// A directional arrow between two cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Arrow<C> {
    pub from: C,
    pub to: C,
    pub color: Rgb,
}

/// What the selected unit is doing. Moving and painting exclude each
/// other and only exist while a unit is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum UnitAction {
    #[default]
    Idle,
    Moving,
    Painting,
}

/// Entity counts, for status display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct EntityCounts {
    pub units: usize,
    pub markers: usize,
    pub numbers: usize,
    pub arrows: usize,
}

/// All entities on one map plus transient interaction state.
#[derive(Debug, Clone, Serialize)]
pub struct Scene<C: Ord> {
    units: Vec<Unit<C>>,
    markers: Vec<Marker<C>>,
    numbers: Vec<NumberLabel<C>>,
    arrows: Vec<Arrow<C>>,
    selected: Option<usize>,
    action: UnitAction,
    arrow_start: Option<C>,
    hovered: Option<C>,
}

impl<C: Ord> Default for Scene<C> {
    fn default() -> Self {
        Self {
            units: Vec::new(),
            markers: Vec::new(),
            numbers: Vec::new(),
            arrows: Vec::new(),
            selected: None,
            action: UnitAction::Idle,
            arrow_start: None,
            hovered: None,
        }
    }
}

impl<C: Copy + Ord> Scene<C> {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Units ---

    pub fn units(&self) -> &[Unit<C>] {
        &self.units
    }

    pub fn unit(&self, index: usize) -> Option<&Unit<C>> {
        self.units.get(index)
    }

    pub fn unit_mut(&mut self, index: usize) -> Option<&mut Unit<C>> {
        self.units.get_mut(index)
    }

    /// Append a unit and return its index.
    pub fn add_unit(&mut self, unit: Unit<C>) -> usize {
        self.units.push(unit);
        self.units.len() - 1
    }

    /// Remove a unit, keeping the selection pointing at the same unit (or
    /// clearing it if that unit was removed).
    pub fn remove_unit(&mut self, index: usize) -> Option<Unit<C>> {
        if index >= self.units.len() {
            return None;
        }
        let unit = self.units.remove(index);
        match self.selected {
            Some(selected) if selected == index => self.clear_selection(),
            Some(selected) if selected > index => self.selected = Some(selected - 1),
            _ => {}
        }
        Some(unit)
    }

    /// Index of the first unit standing on `cell`.
    pub fn unit_at(&self, cell: C) -> Option<usize> {
        self.units.iter().position(|u| u.position == cell)
    }

    // --- Markers ---

    pub fn markers(&self) -> &[Marker<C>] {
        &self.markers
    }

    pub fn marker_at(&self, cell: C) -> Option<usize> {
        self.markers.iter().position(|m| m.position == cell)
    }

    pub fn add_marker(&mut self, marker: Marker<C>) {
        self.markers.push(marker);
    }

    pub fn remove_marker(&mut self, index: usize) -> Option<Marker<C>> {
        (index < self.markers.len()).then(|| self.markers.remove(index))
    }

    // --- Numbers ---

    pub fn numbers(&self) -> &[NumberLabel<C>] {
        &self.numbers
    }

    pub fn number_at(&self, cell: C) -> Option<usize> {
        self.numbers.iter().position(|n| n.position == cell)
    }

    pub fn add_number(&mut self, number: NumberLabel<C>) {
        self.numbers.push(number);
    }

    pub fn remove_number(&mut self, index: usize) -> Option<NumberLabel<C>> {
        (index < self.numbers.len()).then(|| self.numbers.remove(index))
    }

    // --- Arrows ---

    pub fn arrows(&self) -> &[Arrow<C>] {
        &self.arrows
    }

    /// Index of the arrow going from `from` to `to` (direction matters).
    pub fn arrow_between(&self, from: C, to: C) -> Option<usize> {
        self.arrows.iter().position(|a| a.from == from && a.to == to)
    }

    pub fn add_arrow(&mut self, arrow: Arrow<C>) {
        self.arrows.push(arrow);
    }

    pub fn remove_arrow(&mut self, index: usize) -> Option<Arrow<C>> {
        (index < self.arrows.len()).then(|| self.arrows.remove(index))
    }

    pub fn arrow_start(&self) -> Option<C> {
        self.arrow_start
    }

    pub fn set_arrow_start(&mut self, cell: Option<C>) {
        self.arrow_start = cell;
    }

    // --- Selection ---

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_unit(&self) -> Option<&Unit<C>> {
        self.selected.and_then(|i| self.units.get(i))
    }

    pub fn selected_unit_mut(&mut self) -> Option<&mut Unit<C>> {
        self.selected.and_then(|i| self.units.get_mut(i))
    }

    /// Select a unit. Any move/paint action of the previous selection ends.
    pub fn select(&mut self, index: usize) {
        if index < self.units.len() {
            self.selected = Some(index);
            self.action = UnitAction::Idle;
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.action = UnitAction::Idle;
    }

    pub fn action(&self) -> UnitAction {
        self.action
    }

    /// Set the selected unit's action. Without a selection the action stays
    /// idle.
    pub fn set_action(&mut self, action: UnitAction) {
        self.action = if self.selected.is_some() {
            action
        } else {
            UnitAction::Idle
        };
    }

    pub fn is_moving(&self) -> bool {
        self.action == UnitAction::Moving
    }

    pub fn is_painting(&self) -> bool {
        self.action == UnitAction::Painting
    }

    // --- Hover ---

    pub fn hovered(&self) -> Option<C> {
        self.hovered
    }

    pub fn set_hovered(&mut self, cell: Option<C>) {
        self.hovered = cell;
    }

    // --- Whole scene ---

    pub fn counts(&self) -> EntityCounts {
        EntityCounts {
            units: self.units.len(),
            markers: self.markers.len(),
            numbers: self.numbers.len(),
            arrows: self.arrows.len(),
        }
    }

    /// Check if the scene has no entities.
    pub fn is_empty(&self) -> bool {
        self.counts() == EntityCounts::default()
    }

    /// Remove every entity and all transient interaction state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
