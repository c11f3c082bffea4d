//! Door wiring between a newly placed room and its placed neighbours
//!
//! Doors always come in pairs: opening the east door of one room opens the
//! west door of the room next to it.

use crate::error::{LayoutError, Result};

use super::index::{Direction, GridIndex};
use super::occupancy::OccupancyGrid;
use super::room::RoomSet;

/// Open a matching door pair between the room at `index` and each occupied neighbour
///
/// Returns the number of pairs opened.
///
/// # Errors
/// `MissingNeighbor` when the grid marks a cell occupied but no room is
/// tracked there. This means the grid and the room set disagree and the
/// generation cannot continue.
pub fn wire_doors(index: GridIndex, grid: &OccupancyGrid, rooms: &mut RoomSet) -> Result<usize> {
    if rooms.get(index).is_none() {
        return Err(LayoutError::MissingNeighbor { index });
    }

    let mut opened = 0;
    for (direction, neighbor) in index.neighbors() {
        if !grid.is_occupied(neighbor) {
            continue;
        }
        open_pair(rooms, index, direction, neighbor)?;
        opened += 1;
    }
    Ok(opened)
}

fn open_pair(
    rooms: &mut RoomSet,
    index: GridIndex,
    direction: Direction,
    neighbor: GridIndex,
) -> Result<()> {
    let other = rooms
        .get_mut(neighbor)
        .ok_or(LayoutError::MissingNeighbor { index: neighbor })?;
    other.open_door(direction.opposite());

    let room = rooms
        .get_mut(index)
        .ok_or(LayoutError::MissingNeighbor { index })?;
    room.open_door(direction);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::room::{RoomEntity, RoomSize};
    use strum::IntoEnumIterator;

    fn place(grid: &mut OccupancyGrid, rooms: &mut RoomSet, x: i32, y: i32) -> GridIndex {
        let index = GridIndex::new(x, y);
        grid.mark_occupied(index).unwrap();
        let size = RoomSize::new(60, 36);
        let pos = grid.world_position(index, size);
        rooms
            .insert(RoomEntity::new(format!("Room-{}", rooms.len() + 1), index, pos, size))
            .unwrap();
        index
    }

    #[test]
    fn test_pair_is_symmetric() {
        let mut grid = OccupancyGrid::new(10, 10);
        let mut rooms = RoomSet::new();
        let a = place(&mut grid, &mut rooms, 5, 5);
        let b = place(&mut grid, &mut rooms, 6, 5);

        assert_eq!(wire_doors(b, &grid, &mut rooms), Ok(1));

        let room_a = rooms.get(a).unwrap();
        let room_b = rooms.get(b).unwrap();
        assert!(room_a.door_state(Direction::East));
        assert!(room_b.door_state(Direction::West));
        for dir in Direction::iter().filter(|&d| d != Direction::East) {
            assert!(!room_a.door_state(dir));
        }
        for dir in Direction::iter().filter(|&d| d != Direction::West) {
            assert!(!room_b.door_state(dir));
        }
    }

    #[test]
    fn test_isolated_room_gets_no_doors() {
        let mut grid = OccupancyGrid::new(10, 10);
        let mut rooms = RoomSet::new();
        let a = place(&mut grid, &mut rooms, 0, 0);
        assert_eq!(wire_doors(a, &grid, &mut rooms), Ok(0));
        assert_eq!(rooms.get(a).unwrap().door_count(), 0);
    }

    #[test]
    fn test_vertical_pair() {
        let mut grid = OccupancyGrid::new(10, 10);
        let mut rooms = RoomSet::new();
        let low = place(&mut grid, &mut rooms, 3, 3);
        let high = place(&mut grid, &mut rooms, 3, 4);
        wire_doors(high, &grid, &mut rooms).unwrap();
        assert!(rooms.get(low).unwrap().door_state(Direction::North));
        assert!(rooms.get(high).unwrap().door_state(Direction::South));
    }

    #[test]
    fn test_untracked_neighbor_is_fatal() {
        let mut grid = OccupancyGrid::new(10, 10);
        let mut rooms = RoomSet::new();
        grid.mark_occupied(GridIndex::new(4, 5)).unwrap();
        let b = place(&mut grid, &mut rooms, 5, 5);
        assert_eq!(
            wire_doors(b, &grid, &mut rooms),
            Err(LayoutError::MissingNeighbor {
                index: GridIndex::new(4, 5)
            })
        );
    }
}
