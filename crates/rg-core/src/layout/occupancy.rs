//! Occupancy grid
//!
//! Fixed-size boolean grid recording which cells hold a room. Cells are only
//! ever set; the whole grid is wiped at once on regeneration.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

use super::index::GridIndex;
use super::room::{RoomSize, WorldPoint};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyGrid {
    width: u32,
    height: u32,
    /// Indexed `[x][y]`
    cells: Vec<Vec<bool>>,
    occupied: usize,
}

impl OccupancyGrid {
    /// Create an empty grid of `width × height` cells
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![false; height as usize]; width as usize],
            occupied: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The configured center cell, `(width / 2, height / 2)`
    pub fn center(&self) -> GridIndex {
        GridIndex::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// Whether `index` lies inside the grid
    pub fn contains(&self, index: GridIndex) -> bool {
        index.x >= 0
            && index.y >= 0
            && (index.x as u32) < self.width
            && (index.y as u32) < self.height
    }

    /// Whether a room occupies `index`. False outside the grid.
    pub fn is_occupied(&self, index: GridIndex) -> bool {
        if !self.contains(index) {
            return false;
        }
        self.cells[index.x as usize][index.y as usize]
    }

    /// Mark `index` as holding a room
    ///
    /// # Errors
    /// `OutOfBounds` outside the grid, `AlreadyOccupied` if the cell is set.
    pub fn mark_occupied(&mut self, index: GridIndex) -> Result<()> {
        if !self.contains(index) {
            return Err(LayoutError::OutOfBounds { index });
        }
        let cell = &mut self.cells[index.x as usize][index.y as usize];
        if *cell {
            return Err(LayoutError::AlreadyOccupied { index });
        }
        *cell = true;
        self.occupied += 1;
        Ok(())
    }

    /// Number of occupied axis-aligned neighbours of `index`, in `0..=4`
    pub fn neighbor_count(&self, index: GridIndex) -> usize {
        index
            .neighbors()
            .filter(|&(_, cell)| self.is_occupied(cell))
            .count()
    }

    /// Total number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.occupied
    }

    /// Iterate over every occupied cell, column by column
    pub fn occupied_cells(&self) -> impl Iterator<Item = GridIndex> + '_ {
        self.cells.iter().enumerate().flat_map(|(x, column)| {
            column
                .iter()
                .enumerate()
                .filter(|&(_, &set)| set)
                .map(move |(y, _)| GridIndex::new(x as i32, y as i32))
        })
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        for column in &mut self.cells {
            column.fill(false);
        }
        self.occupied = 0;
    }

    /// World-space anchor of a cell, with the grid center at the origin
    ///
    /// Uses integer division for the center so that the mapping is stable
    /// across generations.
    pub fn world_position(&self, index: GridIndex, room: RoomSize) -> WorldPoint {
        let half_x = (self.width / 2) as i32;
        let half_y = (self.height / 2) as i32;
        WorldPoint::new(
            (room.width as i32 * (index.x - half_x)) as f32,
            (room.height as i32 * (index.y - half_y)) as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let grid = OccupancyGrid::new(10, 8);
        assert!(grid.contains(GridIndex::new(0, 0)));
        assert!(grid.contains(GridIndex::new(9, 7)));
        assert!(!grid.contains(GridIndex::new(10, 0)));
        assert!(!grid.contains(GridIndex::new(0, 8)));
        assert!(!grid.contains(GridIndex::new(-1, 3)));
        assert!(!grid.is_occupied(GridIndex::new(-1, 3)));
    }

    #[test]
    fn test_mark_occupied() {
        let mut grid = OccupancyGrid::new(4, 4);
        let cell = GridIndex::new(1, 2);
        assert!(grid.mark_occupied(cell).is_ok());
        assert!(grid.is_occupied(cell));
        assert_eq!(grid.occupied_count(), 1);
        assert_eq!(
            grid.mark_occupied(cell),
            Err(LayoutError::AlreadyOccupied { index: cell })
        );
        assert_eq!(
            grid.mark_occupied(GridIndex::new(4, 0)),
            Err(LayoutError::OutOfBounds {
                index: GridIndex::new(4, 0)
            })
        );
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn test_neighbor_count() {
        let mut grid = OccupancyGrid::new(5, 5);
        let center = grid.center();
        assert_eq!(grid.neighbor_count(center), 0);
        for (_, cell) in center.neighbors() {
            grid.mark_occupied(cell).unwrap();
        }
        assert_eq!(grid.neighbor_count(center), 4);
        // Corner cell only sees in-bounds neighbours
        grid.mark_occupied(GridIndex::new(1, 0)).unwrap();
        assert_eq!(grid.neighbor_count(GridIndex::new(0, 0)), 1);
    }

    #[test]
    fn test_clear() {
        let mut grid = OccupancyGrid::new(3, 3);
        grid.mark_occupied(GridIndex::new(0, 0)).unwrap();
        grid.mark_occupied(GridIndex::new(2, 1)).unwrap();
        assert_eq!(grid.occupied_cells().count(), 2);
        grid.clear();
        assert_eq!(grid.occupied_count(), 0);
        assert_eq!(grid.occupied_cells().count(), 0);
    }

    #[test]
    fn test_world_position() {
        let grid = OccupancyGrid::new(10, 10);
        let size = RoomSize::new(60, 36);
        assert_eq!(
            grid.world_position(GridIndex::new(5, 5), size),
            WorldPoint::new(0.0, 0.0)
        );
        assert_eq!(
            grid.world_position(GridIndex::new(6, 4), size),
            WorldPoint::new(60.0, -36.0)
        );
        assert_eq!(
            grid.world_position(GridIndex::new(0, 0), size),
            WorldPoint::new(-300.0, -180.0)
        );
    }
}
