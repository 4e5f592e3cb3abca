//! Grid topologies and the capability interface shared by them.
//!
//! Two topologies exist: a hexagonal grid in cube coordinates and a
//! square grid in column/row coordinates. Everything above this module
//! (scene, interaction, rendering) is written against the [`Grid`] trait
//! so that it never branches on which topology is active.

mod hex;
mod square;

pub use hex::{Hex, HexGrid, HexLayout, hex_round};
pub use square::{SquareCell, SquareGrid};

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;
use std::ops::{Add, Sub};

/// Which grid topology is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GridKind {
    #[default]
    Hex,
    Square,
}

impl GridKind {
    /// The other topology.
    pub fn toggled(self) -> Self {
        match self {
            GridKind::Hex => GridKind::Square,
            GridKind::Square => GridKind::Hex,
        }
    }

    /// Get display name for this topology.
    pub fn name(self) -> &'static str {
        match self {
            GridKind::Hex => "Hex",
            GridKind::Square => "Square",
        }
    }
}

/// Hexagon orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// A corner points up; rows are horizontal.
    #[default]
    Pointy,
    /// An edge is on top; columns are vertical.
    Flat,
}

impl Orientation {
    /// Flip between pointy and flat.
    pub fn toggled(self) -> Self {
        match self {
            Orientation::Pointy => Orientation::Flat,
            Orientation::Flat => Orientation::Pointy,
        }
    }
}

/// Capability interface of a grid topology.
///
/// Cells are plain values: `a + b` translates, `a - b` gives the offset
/// from `b` to `a`. All world-space positions are relative to the map
/// origin, before the camera transform is applied.
pub trait Grid {
    /// Cell coordinate type of this topology.
    type Cell: Copy
        + Eq
        + Ord
        + Hash
        + Debug
        + Serialize
        + Add<Output = Self::Cell>
        + Sub<Output = Self::Cell>;

    /// Number of rotation steps in a full turn (6 for hex, 4 for square).
    fn step_count(&self) -> i32;

    /// Center of a cell in world pixels.
    fn to_pixel(&self, cell: Self::Cell) -> Point;

    /// The cell containing a world-pixel position.
    fn from_pixel(&self, point: Point) -> Self::Cell;

    /// Center-to-corner radius of a hex, half the side of a square.
    fn cell_radius(&self) -> f64;

    /// Outline of a cell in world pixels, in drawing order.
    fn corners(&self, cell: Self::Cell) -> Vec<Point>;

    /// Cells adjacent to `cell`.
    fn neighbors(&self, cell: Self::Cell) -> Vec<Self::Cell>;

    /// Cells at exactly `radius` from `center`. Radius 0 is `[center]`.
    fn ring(&self, center: Self::Cell, radius: u32) -> Vec<Self::Cell>;

    /// Rotate a cell about the origin by `steps` clockwise steps.
    /// Negative steps rotate counter-clockwise.
    fn rotate(&self, cell: Self::Cell, steps: i32) -> Self::Cell;

    /// Grid distance between two cells.
    fn distance(&self, a: Self::Cell, b: Self::Cell) -> u32;

    /// Whether a cell lies inside a bounded map of the given radius.
    fn in_bounds(&self, cell: Self::Cell, map_radius: u32) -> bool;

    /// Every cell of a bounded map of the given radius.
    fn map_cells(&self, map_radius: u32) -> Vec<Self::Cell>;

    /// Heading in radians of a unit with the given rotation step.
    fn heading(&self, rotation: i32) -> f64;

    /// Whether two cells are one step apart.
    fn is_adjacent(&self, a: Self::Cell, b: Self::Cell) -> bool {
        self.distance(a, b) == 1
    }

    /// Normalize a rotation step into `[0, step_count)`.
    fn normalize_rotation(&self, rotation: i32) -> i32 {
        rotation.rem_euclid(self.step_count())
    }
}
