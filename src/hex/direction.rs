//! The six neighbor directions of a pointy-topped hexagon

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the six directions from a cell to its neighbors
///
/// The order is fixed and cyclic (clockwise when looking down on the grid).
/// Triangulation relies on it: only the first three directions own the
/// connection strips between two cells.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HexDirection {
    NE,
    E,
    SE,
    SW,
    W,
    NW,
}

impl HexDirection {
    /// All directions in cyclic order, starting at `NE`
    pub const ALL: [HexDirection; 6] = [
        HexDirection::NE,
        HexDirection::E,
        HexDirection::SE,
        HexDirection::SW,
        HexDirection::W,
        HexDirection::NW,
    ];

    /// Position of this direction in [`HexDirection::ALL`]
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The direction pointing the other way (rotated by three steps)
    #[inline]
    pub fn opposite(self) -> Self {
        Self::ALL[(self.index() + 3) % 6]
    }

    /// The previous direction, wrapping from `NE` to `NW`
    #[inline]
    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + 5) % 6]
    }

    /// The next direction, wrapping from `NW` to `NE`
    #[inline]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % 6]
    }

    /// Whether a cell builds the connection strip towards this direction.
    ///
    /// Every shared edge is owned by exactly one of its two cells.
    #[inline]
    pub fn owns_connection(self) -> bool {
        self <= HexDirection::SE
    }

    /// Whether a cell fills the three-cell corner between this direction and
    /// the next one.
    #[inline]
    pub fn owns_corner(self) -> bool {
        self <= HexDirection::E
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite() {
        assert_eq!(HexDirection::NE.opposite(), HexDirection::SW);
        assert_eq!(HexDirection::E.opposite(), HexDirection::W);
        assert_eq!(HexDirection::SE.opposite(), HexDirection::NW);
        for direction in HexDirection::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
        }
    }

    #[test]
    fn test_next_previous_wrap() {
        assert_eq!(HexDirection::NW.next(), HexDirection::NE);
        assert_eq!(HexDirection::NE.previous(), HexDirection::NW);
        for direction in HexDirection::ALL {
            assert_eq!(direction.next().previous(), direction);
        }
    }

    #[test]
    fn test_ownership() {
        let connections: Vec<_> = HexDirection::ALL
            .into_iter()
            .filter(|d| d.owns_connection())
            .collect();
        assert_eq!(connections, vec![HexDirection::NE, HexDirection::E, HexDirection::SE]);

        let corners: Vec<_> = HexDirection::ALL
            .into_iter()
            .filter(|d| d.owns_corner())
            .collect();
        assert_eq!(corners, vec![HexDirection::NE, HexDirection::E]);
    }
}
