//! Hex Cell Structure
//!
//! One terrain tile of the grid: coordinates, color, elevation and links to
//! up to six neighbors.

use glam::Vec3;

use crate::hex::{EdgeType, HexCoordinates, HexDirection};
use crate::mesh::HexColor;
use crate::metrics::{classify_edge, HexMetrics};

/// A single hexagonal terrain tile
///
/// Cells live in a flat arena (a slice or `Vec`). Neighbors are stored as
/// indices into that arena, so the cyclic neighbor graph needs no shared
/// ownership.
///
/// # Invariants
///
/// Neighbor links are symmetric: if `a` records `b` in direction `d`, then `b`
/// records `a` in `d.opposite()`. Use [`link_neighbors`] to maintain this.
#[derive(Debug, Clone, PartialEq)]
pub struct HexCell {
    /// Cube coordinate of the cell
    pub coordinates: HexCoordinates,

    /// Color of the unblended center of the cell
    pub color: HexColor,

    elevation: i32,

    /// Center of the cell in world space; Y follows the elevation
    position: Vec3,

    neighbors: [Option<usize>; 6],
}

impl HexCell {
    /// Create an unlinked cell at elevation 0.
    ///
    /// The Y component of `position` is reset to match elevation 0.
    pub fn new(coordinates: HexCoordinates, position: Vec3, color: HexColor) -> Self {
        Self {
            coordinates,
            color,
            elevation: 0,
            position: Vec3::new(position.x, 0.0, position.z),
            neighbors: [None; 6],
        }
    }

    #[inline]
    pub fn elevation(&self) -> i32 {
        self.elevation
    }

    /// Change the elevation and move the cell center to the matching height.
    ///
    /// The mesh has to be triangulated again afterwards.
    pub fn set_elevation(&mut self, elevation: i32, metrics: &HexMetrics) {
        self.elevation = elevation;
        self.position.y = elevation as f32 * metrics.elevation_step;
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Arena index of the neighbor in `direction`, `None` at the grid boundary
    #[inline]
    pub fn neighbor(&self, direction: HexDirection) -> Option<usize> {
        self.neighbors[direction.index()]
    }

    #[inline]
    pub fn neighbors(&self) -> &[Option<usize>; 6] {
        &self.neighbors
    }

    /// Edge type between this cell and any other cell, adjacent or not
    #[inline]
    pub fn edge_type_to(&self, other: &HexCell) -> EdgeType {
        classify_edge(self.elevation, other.elevation)
    }
}

/// Link `cells[index]` to `cells[neighbor]` in `direction`, and back again in
/// the opposite direction.
///
/// # Panics
///
/// Panics if either index is out of bounds.
pub fn link_neighbors(
    cells: &mut [HexCell],
    index: usize,
    direction: HexDirection,
    neighbor: usize,
) {
    cells[index].neighbors[direction.index()] = Some(neighbor);
    cells[neighbor].neighbors[direction.opposite().index()] = Some(index);
}

/// Whether every neighbor link in the arena has a matching link back
pub fn neighbors_are_symmetric(cells: &[HexCell]) -> bool {
    cells.iter().enumerate().all(|(index, cell)| {
        HexDirection::ALL.into_iter().all(|direction| match cell.neighbor(direction) {
            Some(other) => cells
                .get(other)
                .map(|n| n.neighbor(direction.opposite()) == Some(index))
                .unwrap_or(false),
            None => true,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::WHITE;

    fn cell(col: i32, row: i32) -> HexCell {
        let metrics = HexMetrics::default();
        HexCell::new(
            HexCoordinates::from_offset(col, row),
            metrics.cell_position(col, row, 0),
            WHITE,
        )
    }

    #[test]
    fn test_cell_creation() {
        let c = cell(1, 2);
        assert_eq!(c.elevation(), 0);
        assert_eq!(c.position().y, 0.0);
        assert!(c.neighbors().iter().all(Option::is_none));
    }

    #[test]
    fn test_set_elevation_moves_center() {
        let metrics = HexMetrics::default();
        let mut c = cell(0, 0);
        c.set_elevation(4, &metrics);
        assert_eq!(c.elevation(), 4);
        assert_eq!(c.position().y, 12.0);
        c.set_elevation(-1, &metrics);
        assert_eq!(c.position().y, -3.0);
    }

    #[test]
    fn test_link_neighbors_is_symmetric() {
        let mut cells = vec![cell(0, 0), cell(1, 0)];
        link_neighbors(&mut cells, 1, HexDirection::W, 0);
        assert_eq!(cells[1].neighbor(HexDirection::W), Some(0));
        assert_eq!(cells[0].neighbor(HexDirection::E), Some(1));
        assert!(neighbors_are_symmetric(&cells));
    }

    #[test]
    fn test_detects_asymmetry() {
        let mut cells = vec![cell(0, 0), cell(1, 0)];
        cells[0].neighbors[HexDirection::E.index()] = Some(1);
        assert!(!neighbors_are_symmetric(&cells));
        cells[0].neighbors[HexDirection::E.index()] = Some(7);
        assert!(!neighbors_are_symmetric(&cells));
    }

    #[test]
    fn test_edge_type_to() {
        let metrics = HexMetrics::default();
        let a = cell(0, 0);
        let mut b = cell(1, 0);
        assert_eq!(a.edge_type_to(&b), EdgeType::Flat);
        b.set_elevation(1, &metrics);
        assert_eq!(a.edge_type_to(&b), EdgeType::Slope);
        b.set_elevation(3, &metrics);
        assert_eq!(a.edge_type_to(&b), EdgeType::Cliff);
    }
}
