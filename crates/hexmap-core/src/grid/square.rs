//! Square cells in column/row coordinates.

use super::Grid;
use kurbo::Point;
use serde::Serialize;
use std::fmt;
use std::ops::{Add, Sub};

/// A square cell. Columns grow to the right, rows grow downwards.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SquareCell {
    pub col: i32,
    pub row: i32,
}

impl SquareCell {
    pub const ORIGIN: Self = Self::new(0, 0);

    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Rotate 90° clockwise about the origin: `(c, r) -> (-r, c)`.
    pub fn rotate90(self) -> Self {
        Self::new(-self.row, self.col)
    }

    /// Rotate by `times` 90° clockwise steps, reduced into `[0, 4)` first.
    pub fn rotate(self, times: i32) -> Self {
        (0..times.rem_euclid(4)).fold(self, |cell, _| cell.rotate90())
    }

    /// Chebyshev distance; diagonal steps count as one.
    pub fn distance(self, other: SquareCell) -> u32 {
        let d = self - other;
        d.col.unsigned_abs().max(d.row.unsigned_abs())
    }

    /// Offsets within `[-radius, radius]²` whose Euclidean length rounds to
    /// exactly `radius`, added to `self`. This draws an approximate circle,
    /// not a Chebyshev ring, so cells near the diagonals may be skipped at
    /// larger radii. Empty if `radius` does not fit a coordinate.
    pub fn ring(self, radius: u32) -> Vec<SquareCell> {
        if radius == 0 {
            return vec![self];
        }

        let Ok(r) = i32::try_from(radius) else {
            log::warn!("Ring radius {radius} out of range");
            return Vec::new();
        };
        let mut cells = Vec::new();
        for row in -r..=r {
            for col in -r..=r {
                let squared = i64::from(col).pow(2) + i64::from(row).pow(2);
                let length = (squared as f64).sqrt().round() as i64;
                if length == i64::from(r) {
                    cells.push(self + SquareCell::new(col, row));
                }
            }
        }
        cells
    }

    /// Full square of cells with `|col|, |row| <= radius`, row by row.
    pub fn grid(radius: u32) -> Vec<SquareCell> {
        let r = radius as i32;
        (-r..=r)
            .flat_map(|row| (-r..=r).map(move |col| SquareCell::new(col, row)))
            .collect()
    }
}

impl Add for SquareCell {
    type Output = SquareCell;

    fn add(self, rhs: SquareCell) -> SquareCell {
        SquareCell::new(self.col + rhs.col, self.row + rhs.row)
    }
}

impl Sub for SquareCell {
    type Output = SquareCell;

    fn sub(self, rhs: SquareCell) -> SquareCell {
        SquareCell::new(self.col - rhs.col, self.row - rhs.row)
    }
}

impl fmt::Debug for SquareCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({}, {})", self.col, self.row)
    }
}

impl fmt::Display for SquareCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// The square topology.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquareGrid {
    /// Side length of a cell in world pixels.
    pub cell_width: f64,
}

impl SquareGrid {
    pub fn new(cell_width: f64) -> Self {
        Self { cell_width }
    }

    /// Square grid whose cells line up visually with hexes of `hex_size`.
    pub fn from_hex_size(hex_size: f64) -> Self {
        Self::new(2.0 * hex_size)
    }
}

impl Grid for SquareGrid {
    type Cell = SquareCell;

    fn step_count(&self) -> i32 {
        4
    }

    fn to_pixel(&self, cell: SquareCell) -> Point {
        Point::new(
            cell.col as f64 * self.cell_width,
            cell.row as f64 * self.cell_width,
        )
    }

    fn from_pixel(&self, point: Point) -> SquareCell {
        SquareCell::new(
            (point.x / self.cell_width).round() as i32,
            (point.y / self.cell_width).round() as i32,
        )
    }

    fn cell_radius(&self) -> f64 {
        self.cell_width / 2.0
    }

    fn corners(&self, cell: SquareCell) -> Vec<Point> {
        let center = self.to_pixel(cell);
        let half = self.cell_radius();
        vec![
            Point::new(center.x - half, center.y - half),
            Point::new(center.x + half, center.y - half),
            Point::new(center.x + half, center.y + half),
            Point::new(center.x - half, center.y + half),
        ]
    }

    fn neighbors(&self, cell: SquareCell) -> Vec<SquareCell> {
        let mut cells = Vec::with_capacity(8);
        for row in -1..=1 {
            for col in -1..=1 {
                if col != 0 || row != 0 {
                    cells.push(cell + SquareCell::new(col, row));
                }
            }
        }
        cells
    }

    fn ring(&self, center: SquareCell, radius: u32) -> Vec<SquareCell> {
        center.ring(radius)
    }

    fn rotate(&self, cell: SquareCell, steps: i32) -> SquareCell {
        cell.rotate(steps)
    }

    fn distance(&self, a: SquareCell, b: SquareCell) -> u32 {
        a.distance(b)
    }

    fn in_bounds(&self, cell: SquareCell, map_radius: u32) -> bool {
        cell.col.unsigned_abs() <= map_radius && cell.row.unsigned_abs() <= map_radius
    }

    fn map_cells(&self, map_radius: u32) -> Vec<SquareCell> {
        SquareCell::grid(map_radius)
    }

    fn heading(&self, rotation: i32) -> f64 {
        (-90.0 + 90.0 * self.normalize_rotation(rotation) as f64).to_radians()
    }
}
