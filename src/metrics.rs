//! Geometric metrics of a hex cell
//!
//! Everything here is a pure function of the configured [`HexMetrics`]: corner
//! and bridge offsets, terrace interpolation, edge classification and vertex
//! perturbation.

use glam::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::hex::{EdgeType, HexDirection};
use crate::mesh::{lerp_color, HexColor};
use crate::noise::NoiseSource;

/// Ratio between the inner radius (center to edge midpoint) and the outer
/// radius (center to corner), i.e. `√3 / 2`
pub const OUTER_TO_INNER: f32 = 0.866025404;

/// Corners of a unit hexagon, first corner pointing along +Z then clockwise
/// seen from above. The seventh entry repeats the first so `direction + 1` never
/// needs to wrap.
const UNIT_CORNERS: [Vec3; 7] = [
    Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(OUTER_TO_INNER, 0.0, 0.5),
    Vec3::new(OUTER_TO_INNER, 0.0, -0.5),
    Vec3::new(0.0, 0.0, -1.0),
    Vec3::new(-OUTER_TO_INNER, 0.0, -0.5),
    Vec3::new(-OUTER_TO_INNER, 0.0, 0.5),
    Vec3::new(0.0, 0.0, 1.0),
];

/// Which end of the edge facing a direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    /// The corner shared with the previous direction's edge
    First,
    /// The corner shared with the next direction's edge
    Second,
}

/// Measurements shared by every cell of a grid
///
/// Use [`HexMetricsBuilder`](crate::config::HexMetricsBuilder) to create a
/// validated instance with non-default values.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexMetrics {
    /// Distance from a cell center to each of its corners
    pub outer_radius: f32,

    /// Fraction of the corner vector that keeps the pure cell color
    ///
    /// The remaining `1 - solid_factor` is used by the blended connections
    /// between cells.
    pub solid_factor: f32,

    /// World units along Y per elevation level
    pub elevation_step: f32,

    /// Number of flat terraces on a slope between two adjacent levels
    pub terraces_per_slope: u32,

    /// Maximum horizontal jitter applied to perturbed vertices
    pub cell_perturb_strength: f32,

    /// Scale from world XZ to noise UV coordinates
    ///
    /// Small values keep the jitter smooth enough not to break terraces.
    pub noise_scale: f32,
}

impl Default for HexMetrics {
    fn default() -> Self {
        Self {
            outer_radius: 10.0,
            solid_factor: 0.8,
            elevation_step: 3.0,
            terraces_per_slope: 2,
            cell_perturb_strength: 4.0,
            noise_scale: 0.003,
        }
    }
}

impl HexMetrics {
    /// Distance from a cell center to the middle of each edge
    #[inline]
    pub fn inner_radius(&self) -> f32 {
        self.outer_radius * OUTER_TO_INNER
    }

    #[inline]
    pub fn blend_factor(&self) -> f32 {
        1.0 - self.solid_factor
    }

    /// Interpolation steps on a slope: one per terrace plus one per rise
    #[inline]
    pub fn terrace_steps(&self) -> u32 {
        self.terraces_per_slope * 2 + 1
    }

    #[inline]
    pub fn horizontal_terrace_step_size(&self) -> f32 {
        1.0 / self.terrace_steps() as f32
    }

    #[inline]
    pub fn vertical_terrace_step_size(&self) -> f32 {
        1.0 / (self.terraces_per_slope + 1) as f32
    }

    /// Offset from a cell center to one of the corners of the edge facing
    /// `direction`
    #[inline]
    pub fn corner(&self, direction: HexDirection, which: Corner) -> Vec3 {
        let index = match which {
            Corner::First => direction.index(),
            Corner::Second => direction.index() + 1,
        };
        UNIT_CORNERS[index] * self.outer_radius
    }

    #[inline]
    pub fn first_corner(&self, direction: HexDirection) -> Vec3 {
        self.corner(direction, Corner::First)
    }

    #[inline]
    pub fn second_corner(&self, direction: HexDirection) -> Vec3 {
        self.corner(direction, Corner::Second)
    }

    /// Corner offset shrunk to the unblended region of the cell
    #[inline]
    pub fn solid_corner(&self, direction: HexDirection, which: Corner) -> Vec3 {
        self.corner(direction, which) * self.solid_factor
    }

    #[inline]
    pub fn first_solid_corner(&self, direction: HexDirection) -> Vec3 {
        self.solid_corner(direction, Corner::First)
    }

    #[inline]
    pub fn second_solid_corner(&self, direction: HexDirection) -> Vec3 {
        self.solid_corner(direction, Corner::Second)
    }

    /// Offset from a cell's solid edge to the matching solid edge of the
    /// neighbor in `direction`
    #[inline]
    pub fn bridge(&self, direction: HexDirection) -> Vec3 {
        (self.first_corner(direction) + self.second_corner(direction)) * self.blend_factor()
    }

    /// Interpolate a position along a terraced slope.
    ///
    /// X and Z advance evenly with every step while Y only rises on odd
    /// steps, which yields flat treads separated by rises.
    pub fn terrace_lerp(&self, a: Vec3, b: Vec3, step: u32) -> Vec3 {
        let h = step as f32 * self.horizontal_terrace_step_size();
        let v = ((step + 1) / 2) as f32 * self.vertical_terrace_step_size();
        Vec3::new(
            a.x + (b.x - a.x) * h,
            a.y + (b.y - a.y) * v,
            a.z + (b.z - a.z) * h,
        )
    }

    /// Interpolate a color along a terraced slope as if it were flat
    pub fn terrace_lerp_color(&self, a: HexColor, b: HexColor, step: u32) -> HexColor {
        lerp_color(a, b, step as f32 * self.horizontal_terrace_step_size())
    }

    /// Sample the noise field at a world position, using X and Z as UV
    pub fn sample_noise<N: NoiseSource + ?Sized>(&self, position: Vec3, noise: &N) -> glam::Vec4 {
        noise.sample_bilinear(position.x * self.noise_scale, position.z * self.noise_scale)
    }

    /// Jitter a position horizontally using the first noise channel.
    ///
    /// Y is left untouched so cells stay flat.
    pub fn perturb<N: NoiseSource + ?Sized>(&self, position: Vec3, noise: &N) -> Vec3 {
        let sample = self.sample_noise(position, noise);
        let offset = (sample.x * 2.0 - 1.0) * self.cell_perturb_strength;
        Vec3::new(position.x + offset, position.y, position.z + offset)
    }

    /// World position of the center of the cell at offset (`col`, `row`)
    pub fn cell_position(&self, col: i32, row: i32, elevation: i32) -> Vec3 {
        // Odd rows shift half a cell to the right
        let x = (col as f32 + row as f32 * 0.5 - (row / 2) as f32) * (self.inner_radius() * 2.0);
        let z = row as f32 * (self.outer_radius * 1.5);
        Vec3::new(x, elevation as f32 * self.elevation_step, z)
    }
}

/// Classify the connection between two elevations
pub fn classify_edge(elevation1: i32, elevation2: i32) -> EdgeType {
    match elevation1.abs_diff(elevation2) {
        0 => EdgeType::Flat,
        1 => EdgeType::Slope,
        _ => EdgeType::Cliff,
    }
}
