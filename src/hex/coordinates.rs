//! Cube coordinates for hex cells
//!
//! See <https://www.redblobgames.com/grids/hexagons/#coordinates-cube> for the
//! background. Only `x` and `z` are stored since `x + y + z = 0` always holds.

use std::fmt;

use glam::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::HexDirection;
use crate::metrics::HexMetrics;

/// Largest axial component [`HexCoordinates::from_position`] produces (2^28)
pub const MAX_AXIAL: f32 = 268_435_456.0;

/// Immutable cube coordinate of a cell
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HexCoordinates {
    x: i32,
    z: i32,
}

impl HexCoordinates {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Convert offset grid indices (column, row) into cube coordinates.
    ///
    /// Every other row is shifted half a cell, so the column has to be
    /// un-skewed by half the row index.
    pub const fn from_offset(col: i32, row: i32) -> Self {
        Self::new(col - row / 2, row)
    }

    /// Find the coordinate of the cell containing a world-space position.
    ///
    /// The position is projected onto the axial axes and each component is
    /// rounded. When rounding breaks the zero-sum invariant, the component with
    /// the largest rounding error is rebuilt from the other two, so the result
    /// is a valid cube coordinate for any input.
    ///
    /// Positions further than [`MAX_AXIAL`] cells from the origin are clamped
    /// onto that range, and a NaN component counts as 0.
    pub fn from_position(position: Vec3, metrics: &HexMetrics) -> Self {
        let mut x = position.x / (metrics.inner_radius() * 2.0);
        let mut y = -x;

        // y only mirrors x along the z = 0 row; shift both as z grows
        let offset = position.z / (metrics.outer_radius * 3.0);
        x -= offset;
        y -= offset;

        // Keeps every sum of the rounded components inside i32
        let x = x.clamp(-MAX_AXIAL, MAX_AXIAL);
        let y = y.clamp(-MAX_AXIAL, MAX_AXIAL);
        let z = -x - y;

        let mut ix = x.round_ties_even() as i32;
        let iy = y.round_ties_even() as i32;
        let mut iz = z.round_ties_even() as i32;

        if ix + iy + iz != 0 {
            let dx = (x - ix as f32).abs();
            let dy = (y - iy as f32).abs();
            let dz = (z - iz as f32).abs();

            if dx > dy && dx > dz {
                ix = -iy - iz;
            } else if dz > dy {
                iz = -ix - iy;
            }
        }

        Self::new(ix, iz)
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        -self.x - self.z
    }

    #[inline]
    pub fn z(&self) -> i32 {
        self.z
    }

    /// Offset grid indices (column, row) of this coordinate
    #[inline]
    pub fn to_offset(&self) -> (i32, i32) {
        (self.x + self.z / 2, self.z)
    }

    /// Linear index into a row-major cell array of the given width.
    ///
    /// Only meaningful for coordinates that came from a grid of that width.
    #[inline]
    pub fn to_offset_index(&self, width: i32) -> i32 {
        self.x + self.z * width + self.z / 2
    }

    /// The adjacent coordinate in `direction`
    pub fn neighbor(&self, direction: HexDirection) -> Self {
        let (dx, dz) = match direction {
            HexDirection::NE => (0, 1),
            HexDirection::E => (1, 0),
            HexDirection::SE => (1, -1),
            HexDirection::SW => (0, -1),
            HexDirection::W => (-1, 0),
            HexDirection::NW => (-1, 1),
        };
        Self::new(self.x + dx, self.z + dz)
    }

    /// Number of cell steps between two coordinates
    pub fn distance_to(&self, other: HexCoordinates) -> u32 {
        let dx = (self.x() - other.x()).unsigned_abs();
        let dy = (self.y() - other.y()).unsigned_abs();
        let dz = (self.z() - other.z()).unsigned_abs();
        dx.max(dy).max(dz)
    }

    /// `x`, `y` and `z` on three lines, for per-cell labels
    pub fn to_string_on_separate_lines(&self) -> String {
        format!("{}\n{}\n{}", self.x(), self.y(), self.z())
    }
}

impl fmt::Display for HexCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x(), self.y(), self.z())
    }
}
