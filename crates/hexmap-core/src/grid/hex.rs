//! Hexagonal cells in cube coordinates.
//!
//! See <https://www.redblobgames.com/grids/hexagons/> for the coordinate
//! system. Only `q` and `r` are stored; `s` is derived, so every `Hex`
//! satisfies `q + r + s == 0` by construction.

use super::{Grid, Orientation};
use kurbo::Point;
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Neg, Sub};

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// A hexagonal cell in cube coordinates.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hex {
    q: i32,
    r: i32,
}

/// The six unit steps, indexed 0-5. Direction `i + 1` is direction `i`
/// turned 60° clockwise.
pub const DIRECTIONS: [Hex; 6] = [
    Hex::new(1, -1),
    Hex::new(1, 0),
    Hex::new(0, 1),
    Hex::new(-1, 1),
    Hex::new(-1, 0),
    Hex::new(0, -1),
];

impl Hex {
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Construct from `q` and `r`; `s` is `-q - r`.
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Construct from all three cube components, rejecting triples that
    /// do not sum to zero.
    pub fn from_cube(q: i32, r: i32, s: i32) -> Option<Self> {
        (q + r + s == 0).then_some(Self::new(q, r))
    }

    pub fn q(&self) -> i32 {
        self.q
    }

    pub fn r(&self) -> i32 {
        self.r
    }

    pub fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// Multiply every component by `k`.
    pub fn scale(self, k: i32) -> Self {
        Self::new(self.q * k, self.r * k)
    }

    /// Rotate 60° clockwise about the origin: `(q, r, s) -> (-r, -s, -q)`.
    pub fn rotate60(self) -> Self {
        Self::new(-self.r, -self.s())
    }

    /// Rotate by `times` 60° clockwise steps. Any integer is accepted; it is
    /// reduced into `[0, 6)` first.
    pub fn rotate(self, times: i32) -> Self {
        (0..times.rem_euclid(6)).fold(self, |hex, _| hex.rotate60())
    }

    /// The adjacent cell in direction `direction` (taken modulo 6).
    pub fn neighbor(self, direction: usize) -> Self {
        self + DIRECTIONS[direction % 6]
    }

    /// Number of steps between two cells.
    pub fn distance(self, other: Hex) -> u32 {
        let d = self - other;
        (d.q.unsigned_abs() + d.r.unsigned_abs() + d.s().unsigned_abs()) / 2
    }

    /// Cells at exactly `radius` steps from `self`, walking six sides of
    /// length `radius` starting from `direction[4] * radius`. Empty if
    /// `radius` does not fit a coordinate.
    pub fn ring(self, radius: u32) -> Vec<Hex> {
        if radius == 0 {
            return vec![self];
        }

        let Ok(steps) = i32::try_from(radius) else {
            log::warn!("Ring radius {radius} out of range");
            return Vec::new();
        };
        let mut cells = Vec::new();
        let mut cursor = self + DIRECTIONS[4].scale(steps);
        for side in 0..6 {
            for _ in 0..radius {
                cells.push(cursor);
                cursor = cursor.neighbor(side);
            }
        }
        cells
    }

    /// Rings 0 through `max_radius` around `self`, concatenated.
    pub fn spiral(self, max_radius: u32) -> Vec<Hex> {
        (0..=max_radius).flat_map(|radius| self.ring(radius)).collect()
    }
}

impl Add for Hex {
    type Output = Hex;

    fn add(self, rhs: Hex) -> Hex {
        Hex::new(self.q + rhs.q, self.r + rhs.r)
    }
}

impl Sub for Hex {
    type Output = Hex;

    fn sub(self, rhs: Hex) -> Hex {
        Hex::new(self.q - rhs.q, self.r - rhs.r)
    }
}

impl Neg for Hex {
    type Output = Hex;

    fn neg(self) -> Hex {
        Hex::new(-self.q, -self.r)
    }
}

impl fmt::Debug for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hex({}, {}, {})", self.q, self.r, self.s())
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.q, self.r, self.s())
    }
}

impl Serialize for Hex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.q, self.r, self.s()].serialize(serializer)
    }
}

/// Round a fractional cube coordinate to the nearest valid cell.
///
/// Each axis is rounded independently, then the axis with the largest
/// rounding error is recomputed from the other two so the result sums to
/// zero.
pub fn hex_round(q: f64, r: f64, s: f64) -> Hex {
    let mut rq = q.round();
    let mut rr = r.round();
    let rs = s.round();

    let q_diff = (rq - q).abs();
    let r_diff = (rr - r).abs();
    let s_diff = (rs - s).abs();

    if q_diff > r_diff && q_diff > s_diff {
        rq = -rr - rs;
    } else if r_diff > s_diff {
        rr = -rq - rs;
    }
    // Otherwise s absorbs the error, and s is derived anyway.

    Hex::new(rq as i32, rr as i32)
}

/// Pixel layout of a hex grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexLayout {
    pub orientation: Orientation,
    /// Distance from a hex center to any of its corners.
    pub size: f64,
}

impl HexLayout {
    pub fn new(orientation: Orientation, size: f64) -> Self {
        Self { orientation, size }
    }

    /// Center of a hex in world pixels.
    pub fn hex_to_pixel(&self, hex: Hex) -> Point {
        let q = hex.q as f64;
        let r = hex.r as f64;
        match self.orientation {
            Orientation::Pointy => Point::new(
                self.size * (SQRT_3 * q + SQRT_3 / 2.0 * r),
                self.size * (1.5 * r),
            ),
            Orientation::Flat => Point::new(
                self.size * (1.5 * q),
                self.size * (SQRT_3 / 2.0 * q + SQRT_3 * r),
            ),
        }
    }

    /// The hex containing a world-pixel position.
    pub fn pixel_to_hex(&self, point: Point) -> Hex {
        let (q, r) = match self.orientation {
            Orientation::Pointy => (
                (SQRT_3 / 3.0 * point.x - point.y / 3.0) / self.size,
                (2.0 / 3.0 * point.y) / self.size,
            ),
            Orientation::Flat => (
                (2.0 / 3.0 * point.x) / self.size,
                (-point.x / 3.0 + SQRT_3 / 3.0 * point.y) / self.size,
            ),
        };
        hex_round(q, r, -q - r)
    }

    /// The six corners of a hex, clockwise.
    pub fn corners(&self, hex: Hex) -> [Point; 6] {
        let center = self.hex_to_pixel(hex);
        let start = match self.orientation {
            Orientation::Pointy => 30.0,
            Orientation::Flat => 0.0,
        };
        std::array::from_fn(|i| {
            let angle = (start + 60.0 * i as f64).to_radians();
            Point::new(
                center.x + self.size * angle.cos(),
                center.y + self.size * angle.sin(),
            )
        })
    }
}

/// The hexagonal topology.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexGrid {
    pub layout: HexLayout,
}

impl HexGrid {
    pub fn new(orientation: Orientation, size: f64) -> Self {
        Self {
            layout: HexLayout::new(orientation, size),
        }
    }
}

impl Grid for HexGrid {
    type Cell = Hex;

    fn step_count(&self) -> i32 {
        6
    }

    fn to_pixel(&self, cell: Hex) -> Point {
        self.layout.hex_to_pixel(cell)
    }

    fn from_pixel(&self, point: Point) -> Hex {
        self.layout.pixel_to_hex(point)
    }

    fn cell_radius(&self) -> f64 {
        self.layout.size
    }

    fn corners(&self, cell: Hex) -> Vec<Point> {
        self.layout.corners(cell).to_vec()
    }

    fn neighbors(&self, cell: Hex) -> Vec<Hex> {
        (0..6).map(|dir| cell.neighbor(dir)).collect()
    }

    fn ring(&self, center: Hex, radius: u32) -> Vec<Hex> {
        center.ring(radius)
    }

    fn rotate(&self, cell: Hex, steps: i32) -> Hex {
        cell.rotate(steps)
    }

    fn distance(&self, a: Hex, b: Hex) -> u32 {
        a.distance(b)
    }

    /// Cube distance is 1 exactly when the component differences sum to 2.
    fn is_adjacent(&self, a: Hex, b: Hex) -> bool {
        let d = a - b;
        d.q.abs() + d.r.abs() + d.s().abs() == 2
    }

    fn in_bounds(&self, cell: Hex, map_radius: u32) -> bool {
        cell.q.unsigned_abs() <= map_radius
            && cell.r.unsigned_abs() <= map_radius
            && cell.s().unsigned_abs() <= map_radius
    }

    fn map_cells(&self, map_radius: u32) -> Vec<Hex> {
        Hex::ORIGIN.spiral(map_radius)
    }

    fn heading(&self, rotation: i32) -> f64 {
        let base = match self.layout.orientation {
            Orientation::Pointy => -60.0,
            Orientation::Flat => -90.0,
        };
        (base + 60.0 * self.normalize_rotation(rotation) as f64).to_radians()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sums_to_zero(hex: Hex) -> bool {
        hex.q() + hex.r() + hex.s() == 0
    }

    #[test]
    fn test_from_cube_rejects_invalid() {
        assert_eq!(Hex::from_cube(1, -1, 0), Some(Hex::new(1, -1)));
        assert_eq!(Hex::from_cube(1, 1, 1), None);
    }

    #[test]
    fn test_arithmetic_keeps_invariant() {
        let a = Hex::new(2, -5);
        let b = Hex::new(-3, 1);
        for hex in [a + b, a - b, a.scale(3), -a, a.rotate(4), a.neighbor(2)] {
            assert!(sums_to_zero(hex), "{hex:?}");
        }
    }

    #[test]
    fn test_rotate60() {
        let hex = Hex::from_cube(1, 0, -1).unwrap();
        assert_eq!(hex.rotate60(), Hex::from_cube(0, 1, -1).unwrap());
    }

    #[test]
    fn test_rotate_group() {
        let hex = Hex::new(3, -1);
        assert_eq!(hex.rotate(0), hex);
        assert_eq!(hex.rotate(6), hex);
        for a in -7..7 {
            for b in -7..7 {
                assert_eq!(hex.rotate(a).rotate(b), hex.rotate((a + b).rem_euclid(6)));
            }
        }
    }

    #[test]
    fn test_rotate_negative() {
        let hex = Hex::new(1, -1);
        assert_eq!(hex.rotate(-1), hex.rotate(5));
        assert_eq!(hex.rotate(1).rotate(-1), hex);
    }

    #[test]
    fn test_rotating_direction_advances_index() {
        for (i, dir) in DIRECTIONS.iter().enumerate() {
            assert_eq!(dir.rotate60(), DIRECTIONS[(i + 1) % 6]);
        }
    }

    #[test]
    fn test_ring_radius_zero() {
        let center = Hex::new(2, 1);
        assert_eq!(center.ring(0), vec![center]);
    }

    #[test]
    fn test_ring_radius_out_of_range() {
        assert!(Hex::ORIGIN.ring(u32::MAX).is_empty());
    }

    #[test]
    fn test_ring_cardinality_and_distance() {
        let center = Hex::new(-1, 3);
        for radius in 1..6 {
            let ring = center.ring(radius);
            assert_eq!(ring.len(), 6 * radius as usize);
            for hex in &ring {
                assert!(sums_to_zero(*hex));
                assert_eq!(hex.distance(center), radius);
            }
            let mut unique = ring.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), ring.len());
        }
    }

    #[test]
    fn test_ring_starts_at_direction_four() {
        let ring = Hex::ORIGIN.ring(2);
        assert_eq!(ring[0], DIRECTIONS[4].scale(2));
    }

    #[test]
    fn test_spiral_size() {
        // 3r² + 3r + 1 cells
        assert_eq!(Hex::ORIGIN.spiral(0).len(), 1);
        assert_eq!(Hex::ORIGIN.spiral(1).len(), 7);
        assert_eq!(Hex::ORIGIN.spiral(3).len(), 37);
        assert_eq!(Hex::ORIGIN.spiral(3)[0], Hex::ORIGIN);
    }

    #[test]
    fn test_distance_symmetric() {
        let a = Hex::new(4, -2);
        let b = Hex::new(-1, 3);
        assert_eq!(a.distance(b), b.distance(a));
        assert_eq!(a.distance(a), 0);
    }

    #[test]
    fn test_hex_round_restores_invariant() {
        // Independent rounding of (0.4, 0.4, -0.8) gives (0, 0, -1).
        let hex = hex_round(0.4, 0.4, -0.8);
        assert!(sums_to_zero(hex));
        assert_eq!(hex, Hex::new(0, 1));
    }

    #[test]
    fn test_pixel_round_trip_both_orientations() {
        for orientation in [Orientation::Pointy, Orientation::Flat] {
            let layout = HexLayout::new(orientation, 30.0);
            for hex in Hex::ORIGIN.spiral(10) {
                assert_eq!(layout.pixel_to_hex(layout.hex_to_pixel(hex)), hex);
            }
        }
    }

    #[test]
    fn test_pixel_near_center_resolves_to_cell() {
        let layout = HexLayout::new(Orientation::Pointy, 30.0);
        let hex = Hex::new(2, -1);
        let center = layout.hex_to_pixel(hex);
        let nudged = Point::new(center.x + 10.0, center.y - 8.0);
        assert_eq!(layout.pixel_to_hex(nudged), hex);
    }

    #[test]
    fn test_corners_at_hex_size() {
        let layout = HexLayout::new(Orientation::Flat, 20.0);
        let hex = Hex::new(1, 1);
        let center = layout.hex_to_pixel(hex);
        for corner in layout.corners(hex) {
            assert!((corner.distance(center) - 20.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_in_bounds() {
        let grid = HexGrid::new(Orientation::Pointy, 30.0);
        assert!(grid.in_bounds(Hex::new(3, -3), 3));
        assert!(!grid.in_bounds(Hex::new(3, 1), 3)); // s = -4
        assert!(grid.map_cells(3).iter().all(|h| grid.in_bounds(*h, 3)));
    }

    #[test]
    fn test_adjacency_matches_distance() {
        let grid = HexGrid::new(Orientation::Pointy, 30.0);
        let origin = Hex::ORIGIN;
        for hex in origin.spiral(3) {
            assert_eq!(grid.is_adjacent(origin, hex), origin.distance(hex) == 1);
        }
    }
}
