//! Grid coordinates and cardinal directions

use core::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// A cell coordinate on the room grid
///
/// Signed so that neighbours of edge cells can be expressed and then
/// rejected by bounds checks instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridIndex {
    pub x: i32,
    pub y: i32,
}

impl GridIndex {
    /// The absolute origin of the grid
    pub const ZERO: GridIndex = GridIndex { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell one step away in `direction`
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The four axis-aligned neighbours, in placement order
    pub fn neighbors(self) -> impl Iterator<Item = (Direction, GridIndex)> {
        Direction::PLACEMENT_ORDER
            .into_iter()
            .map(move |dir| (dir, self.step(dir)))
    }

    /// Whether `other` differs by exactly one unit along a single axis
    pub fn is_adjacent(self, other: GridIndex) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

impl fmt::Display for GridIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal direction on the grid. North is +y.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Order in which a frontier cell tries its neighbours: left, right, up, down
    pub const PLACEMENT_ORDER: [Direction; 4] = [
        Direction::West,
        Direction::East,
        Direction::North,
        Direction::South,
    ];

    /// Grid delta for one step in this direction
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_step_and_opposite() {
        let origin = GridIndex::new(5, 5);
        for dir in Direction::iter() {
            let there = origin.step(dir);
            assert!(origin.is_adjacent(there));
            assert_eq!(there.step(dir.opposite()), origin);
        }
    }

    #[test]
    fn test_placement_order() {
        let cells: Vec<_> = GridIndex::new(2, 2).neighbors().map(|(_, c)| c).collect();
        assert_eq!(
            cells,
            vec![
                GridIndex::new(1, 2),
                GridIndex::new(3, 2),
                GridIndex::new(2, 3),
                GridIndex::new(2, 1),
            ]
        );
    }

    #[test]
    fn test_adjacency() {
        let a = GridIndex::new(0, 0);
        assert!(a.is_adjacent(GridIndex::new(0, -1)));
        assert!(!a.is_adjacent(GridIndex::new(1, 1)));
        assert!(!a.is_adjacent(a));
    }
}
