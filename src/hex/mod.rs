//! Hexagon grid primitives
//!
//! Directions, edge classification and the cube coordinate system shared by the
//! grid, the metrics and the triangulation engine.

mod coordinates;
mod direction;

pub use coordinates::{HexCoordinates, MAX_AXIAL};
pub use direction::HexDirection;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Relationship between the elevations of two cells
///
/// Never stored; always recomputed from the two elevations with
/// [`classify_edge`](crate::metrics::classify_edge).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeType {
    /// Both cells share the same elevation
    Flat,
    /// Elevations differ by exactly one level; connected with terraces
    Slope,
    /// Elevations differ by two or more levels; connected with a single face
    Cliff,
}
