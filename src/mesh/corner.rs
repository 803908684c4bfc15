//! Triangulation of the corner where three cells meet
//!
//! The three cells are first rotated so the lowest one comes first, then the
//! pair of edge types from that cell selects one of the [`CornerCase`]s.

use glam::Vec3;
use log::trace;

use super::{lerp_color, HexColor, Triangulator};
use crate::cell::HexCell;
use crate::hex::EdgeType;
use crate::metrics::classify_edge;
use crate::noise::NoiseSource;

/// How a three-cell corner is filled
///
/// Names refer to the corner after normalization: `bottom` is the lowest
/// cell, `left` and `right` follow in clockwise order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerCase {
    /// Both legs from the bottom are slopes; terraces climb both at once
    DoubleTerrace,
    /// Slope to the left, flat to the right; terraces descend from the left cell
    TerracesFromLeft,
    /// Flat to the left, slope to the right; terraces descend from the right cell
    TerracesFromRight,
    /// Slope to the left, cliff to the right
    TerracesCliff,
    /// Cliff to the left, slope to the right
    CliffTerraces,
    /// No slope from the bottom, but a slope between left and right with the
    /// right cell higher
    CliffsSlopeRightHigher,
    /// No slope from the bottom, but a slope between left and right with the
    /// left cell higher
    CliffsSlopeLeftHigher,
    /// Nothing to terrace: one triangle blending the three colors
    Single,
}

/// Pick the corner case for elevations given in normalized order (`bottom`
/// must be the lowest).
pub fn classify_corner(bottom: i32, left: i32, right: i32) -> CornerCase {
    let left_edge = classify_edge(bottom, left);
    let right_edge = classify_edge(bottom, right);

    match (left_edge, right_edge) {
        (EdgeType::Slope, EdgeType::Slope) => CornerCase::DoubleTerrace,
        (EdgeType::Slope, EdgeType::Flat) => CornerCase::TerracesFromLeft,
        (EdgeType::Slope, EdgeType::Cliff) => CornerCase::TerracesCliff,
        (EdgeType::Flat, EdgeType::Slope) => CornerCase::TerracesFromRight,
        (EdgeType::Cliff, EdgeType::Slope) => CornerCase::CliffTerraces,
        _ if classify_edge(left, right) == EdgeType::Slope => {
            if left < right {
                CornerCase::CliffsSlopeRightHigher
            } else {
                CornerCase::CliffsSlopeLeftHigher
            }
        }
        _ => CornerCase::Single,
    }
}

/// One of the three corners of the gap, with the cell it belongs to
#[derive(Debug, Clone, Copy)]
pub(super) struct CornerVertex<'c> {
    pub position: Vec3,
    pub cell: &'c HexCell,
}

impl<'c> CornerVertex<'c> {
    pub fn new(position: Vec3, cell: &'c HexCell) -> Self {
        Self { position, cell }
    }

    #[inline]
    fn elevation(&self) -> i32 {
        self.cell.elevation()
    }

    #[inline]
    fn color(&self) -> HexColor {
        self.cell.color
    }
}

/// Rotate three clockwise corners so the lowest comes first.
///
/// Ties prefer the current cell, then the edge neighbor. Only cyclic rotations
/// are used so the winding order is kept.
pub(super) fn lowest_first<'c>(
    cell: CornerVertex<'c>,
    neighbor: CornerVertex<'c>,
    next: CornerVertex<'c>,
) -> (CornerVertex<'c>, CornerVertex<'c>, CornerVertex<'c>) {
    if cell.elevation() <= neighbor.elevation() {
        if cell.elevation() <= next.elevation() {
            (cell, neighbor, next)
        } else {
            (next, cell, neighbor)
        }
    } else if neighbor.elevation() <= next.elevation() {
        (neighbor, next, cell)
    } else {
        (next, cell, neighbor)
    }
}

/// Fraction along a cliff, from `begin`, at which terraces collapse onto it:
/// one elevation level up from `begin`.
///
/// # Panics
///
/// Panics if both cells share an elevation; corner classification never
/// routes such a pair here.
fn boundary_fraction(begin: &HexCell, far: &HexCell) -> f32 {
    // Cliff pairs are walked from the top, so the difference can be negative
    let delta = begin.elevation().abs_diff(far.elevation());
    assert!(
        delta != 0,
        "boundary between cells of equal elevation at {}",
        begin.coordinates
    );
    1.0 / delta as f32
}

impl<'a, N: NoiseSource + ?Sized> Triangulator<'a, N> {
    pub(super) fn triangulate_corner(
        &mut self,
        bottom: CornerVertex<'a>,
        left: CornerVertex<'a>,
        right: CornerVertex<'a>,
    ) {
        let case = classify_corner(bottom.elevation(), left.elevation(), right.elevation());
        trace!("corner {:?} at {}", case, bottom.cell.coordinates);

        match case {
            CornerCase::DoubleTerrace => self.triangulate_corner_terraces(bottom, left, right),
            CornerCase::TerracesFromLeft => self.triangulate_corner_terraces(left, right, bottom),
            CornerCase::TerracesFromRight => self.triangulate_corner_terraces(right, bottom, left),
            CornerCase::TerracesCliff => {
                self.triangulate_corner_terraces_cliff(bottom, left, right)
            }
            CornerCase::CliffTerraces => {
                self.triangulate_corner_cliff_terraces(bottom, left, right)
            }
            CornerCase::CliffsSlopeRightHigher => {
                self.triangulate_corner_cliff_terraces(right, bottom, left)
            }
            CornerCase::CliffsSlopeLeftHigher => {
                self.triangulate_corner_terraces_cliff(left, right, bottom)
            }
            CornerCase::Single => {
                self.add_triangle(bottom.position, left.position, right.position);
                self.data
                    .add_triangle_colors(bottom.color(), left.color(), right.color());
            }
        }
    }

    /// Step up both legs from `begin` at once
    fn triangulate_corner_terraces(
        &mut self,
        begin: CornerVertex<'a>,
        left: CornerVertex<'a>,
        right: CornerVertex<'a>,
    ) {
        let metrics = self.metrics;
        let mut v3 = metrics.terrace_lerp(begin.position, left.position, 1);
        let mut v4 = metrics.terrace_lerp(begin.position, right.position, 1);
        let mut c3 = metrics.terrace_lerp_color(begin.color(), left.color(), 1);
        let mut c4 = metrics.terrace_lerp_color(begin.color(), right.color(), 1);

        self.add_triangle(begin.position, v3, v4);
        self.data.add_triangle_colors(begin.color(), c3, c4);

        for step in 2..metrics.terrace_steps() {
            let (v1, v2, c1, c2) = (v3, v4, c3, c4);
            v3 = metrics.terrace_lerp(begin.position, left.position, step);
            v4 = metrics.terrace_lerp(begin.position, right.position, step);
            c3 = metrics.terrace_lerp_color(begin.color(), left.color(), step);
            c4 = metrics.terrace_lerp_color(begin.color(), right.color(), step);
            self.add_quad(v1, v2, v3, v4);
            self.data.add_quad_colors(c1, c2, c3, c4);
        }

        self.add_quad(v3, v4, left.position, right.position);
        self.data
            .add_quad_colors(c3, c4, left.color(), right.color());
    }

    /// Terraces on the left leg, cliff on the right leg
    fn triangulate_corner_terraces_cliff(
        &mut self,
        begin: CornerVertex<'a>,
        left: CornerVertex<'a>,
        right: CornerVertex<'a>,
    ) {
        let b = boundary_fraction(begin.cell, right.cell);
        let boundary = self.perturb(begin.position).lerp(self.perturb(right.position), b);
        let boundary_color = lerp_color(begin.color(), right.color(), b);

        self.triangulate_boundary_triangle(begin, left, boundary, boundary_color);
        self.close_boundary(left, right, boundary, boundary_color);
    }

    /// Cliff on the left leg, terraces on the right leg
    fn triangulate_corner_cliff_terraces(
        &mut self,
        begin: CornerVertex<'a>,
        left: CornerVertex<'a>,
        right: CornerVertex<'a>,
    ) {
        let b = boundary_fraction(begin.cell, left.cell);
        let boundary = self.perturb(begin.position).lerp(self.perturb(left.position), b);
        let boundary_color = lerp_color(begin.color(), left.color(), b);

        self.triangulate_boundary_triangle(right, begin, boundary, boundary_color);
        self.close_boundary(left, right, boundary, boundary_color);
    }

    /// Fill the top of a boundary corner between `left` and `right`
    fn close_boundary(
        &mut self,
        left: CornerVertex<'a>,
        right: CornerVertex<'a>,
        boundary: Vec3,
        boundary_color: HexColor,
    ) {
        if left.cell.edge_type_to(right.cell) == EdgeType::Slope {
            self.triangulate_boundary_triangle(left, right, boundary, boundary_color);
        } else {
            let l = self.perturb(left.position);
            let r = self.perturb(right.position);
            self.data.add_triangle_unperturbed(l, r, boundary);
            self.data
                .add_triangle_colors(left.color(), right.color(), boundary_color);
        }
    }

    /// Collapse the terraces from `begin` to `left` onto a single boundary
    /// point.
    ///
    /// The boundary point is already perturbed; the triangles here are not,
    /// so the seam with the cliff face stays closed.
    fn triangulate_boundary_triangle(
        &mut self,
        begin: CornerVertex<'a>,
        left: CornerVertex<'a>,
        boundary: Vec3,
        boundary_color: HexColor,
    ) {
        let metrics = self.metrics;
        let mut v2 = self.perturb(metrics.terrace_lerp(begin.position, left.position, 1));
        let mut c2 = metrics.terrace_lerp_color(begin.color(), left.color(), 1);

        let start = self.perturb(begin.position);
        self.data.add_triangle_unperturbed(start, v2, boundary);
        self.data.add_triangle_colors(begin.color(), c2, boundary_color);

        for step in 2..metrics.terrace_steps() {
            let v1 = v2;
            let c1 = c2;
            v2 = self.perturb(metrics.terrace_lerp(begin.position, left.position, step));
            c2 = metrics.terrace_lerp_color(begin.color(), left.color(), step);
            self.data.add_triangle_unperturbed(v1, v2, boundary);
            self.data.add_triangle_colors(c1, c2, boundary_color);
        }

        let end = self.perturb(left.position);
        self.data.add_triangle_unperturbed(v2, end, boundary);
        self.data.add_triangle_colors(c2, left.color(), boundary_color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::HexCoordinates;
    use crate::mesh::WHITE;
    use crate::metrics::HexMetrics;

    fn cell_at(elevation: i32) -> HexCell {
        let mut cell = HexCell::new(HexCoordinates::new(0, 0), Vec3::ZERO, WHITE);
        cell.set_elevation(elevation, &HexMetrics::default());
        cell
    }

    #[test]
    fn test_decision_table() {
        assert_eq!(classify_corner(0, 1, 1), CornerCase::DoubleTerrace);
        assert_eq!(classify_corner(0, 1, 0), CornerCase::TerracesFromLeft);
        assert_eq!(classify_corner(0, 1, 3), CornerCase::TerracesCliff);
        assert_eq!(classify_corner(0, 0, 1), CornerCase::TerracesFromRight);
        assert_eq!(classify_corner(0, 2, 1), CornerCase::CliffTerraces);
        assert_eq!(classify_corner(0, 2, 3), CornerCase::CliffsSlopeRightHigher);
        assert_eq!(classify_corner(0, 3, 2), CornerCase::CliffsSlopeLeftHigher);
        assert_eq!(classify_corner(0, 2, 2), CornerCase::Single);
        assert_eq!(classify_corner(0, 2, 5), CornerCase::Single);
        assert_eq!(classify_corner(0, 0, 0), CornerCase::Single);
    }

    #[test]
    fn test_flat_flat_cliff_is_single_triangle() {
        // Elevations 0, 0, 3 in every rotation
        let cells = [cell_at(0), cell_at(0), cell_at(3)];
        for shift in 0..3 {
            let v = |i: usize| CornerVertex::new(Vec3::ZERO, &cells[(i + shift) % 3]);
            let (bottom, left, right) = lowest_first(v(0), v(1), v(2));
            assert_eq!(bottom.elevation(), 0);
            assert_eq!(
                classify_corner(bottom.elevation(), left.elevation(), right.elevation()),
                CornerCase::Single
            );
        }
    }

    #[test]
    fn test_lowest_first_rotates() {
        let cells = [cell_at(2), cell_at(0), cell_at(1)];
        let v = |i: usize| CornerVertex::new(Vec3::splat(i as f32), &cells[i]);

        let (bottom, left, right) = lowest_first(v(0), v(1), v(2));
        assert_eq!(
            [bottom.elevation(), left.elevation(), right.elevation()],
            [0, 1, 2]
        );
        // Still the clockwise order cell -> neighbor -> next, rotated
        assert_eq!(bottom.position, Vec3::splat(1.0));
        assert_eq!(left.position, Vec3::splat(2.0));
        assert_eq!(right.position, Vec3::splat(0.0));
    }

    #[test]
    fn test_lowest_first_ties_prefer_current_cell() {
        let cells = [cell_at(1), cell_at(1), cell_at(1)];
        let v = |i: usize| CornerVertex::new(Vec3::splat(i as f32), &cells[i]);
        let (bottom, _, _) = lowest_first(v(0), v(1), v(2));
        assert_eq!(bottom.position, Vec3::ZERO);

        let cells = [cell_at(2), cell_at(1), cell_at(1)];
        let v = |i: usize| CornerVertex::new(Vec3::splat(i as f32), &cells[i]);
        let (bottom, _, _) = lowest_first(v(0), v(1), v(2));
        assert_eq!(bottom.position, Vec3::splat(1.0));
    }

    #[test]
    fn test_boundary_fraction_is_positive() {
        assert_eq!(boundary_fraction(&cell_at(0), &cell_at(4)), 0.25);
        assert_eq!(boundary_fraction(&cell_at(3), &cell_at(1)), 0.5);

        let fraction = boundary_fraction(&cell_at(i32::MIN), &cell_at(i32::MAX));
        assert!(fraction > 0.0 && fraction < 1e-9);
        let fraction = boundary_fraction(&cell_at(i32::MAX), &cell_at(i32::MIN));
        assert!(fraction > 0.0 && fraction < 1e-9);
    }

    #[test]
    #[should_panic]
    fn test_boundary_fraction_rejects_equal_elevations() {
        boundary_fraction(&cell_at(2), &cell_at(2));
    }
}
