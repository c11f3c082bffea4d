//! A finished layout and the queries collaborators run against it

use serde::{Serialize, Serializer};

use crate::error::{LayoutError, Result};

use super::index::{Direction, GridIndex};
use super::occupancy::OccupancyGrid;
use super::room::{RoomEntity, RoomSet, RoomSize};

/// Rooms produced by one successful generation
#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    seed: u64,
    attempts: u32,
    grid_size: (u32, u32),
    room_size: RoomSize,
    #[serde(serialize_with = "serialize_rooms")]
    rooms: RoomSet,
    #[serde(skip)]
    grid: OccupancyGrid,
}

fn serialize_rooms<S>(rooms: &RoomSet, serializer: S) -> core::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(rooms.iter())
}

impl Layout {
    pub(crate) fn new(
        rooms: RoomSet,
        grid: OccupancyGrid,
        room_size: RoomSize,
        seed: u64,
        attempts: u32,
    ) -> Self {
        Self {
            seed,
            attempts,
            grid_size: (grid.width(), grid.height()),
            room_size,
            rooms,
            grid,
        }
    }

    /// Seed of the RNG the layout was generated with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Attempts used, including the successful one
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    pub fn room_size(&self) -> RoomSize {
        self.room_size
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Rooms in creation order
    pub fn rooms(&self) -> impl Iterator<Item = &RoomEntity> {
        self.rooms.iter()
    }

    pub fn room_at(&self, index: GridIndex) -> Option<&RoomEntity> {
        self.rooms.get(index)
    }

    /// The room reached by walking through the open `direction` door of `index`
    pub fn neighbor_through(&self, index: GridIndex, direction: Direction) -> Option<&RoomEntity> {
        let room = self.room_at(index)?;
        if !room.door_state(direction) {
            return None;
        }
        self.room_at(index.step(direction))
    }

    /// Every connected pair of rooms, each pair listed once
    ///
    /// Pairs are reported from the west or south room of the two.
    pub fn door_pairs(&self) -> Vec<(GridIndex, GridIndex)> {
        self.rooms
            .iter()
            .flat_map(|room| {
                [Direction::East, Direction::North]
                    .into_iter()
                    .filter(|&dir| room.door_state(dir))
                    .map(move |dir| (room.index(), room.index().step(dir)))
            })
            .collect()
    }

    /// Total scattered elements across all rooms
    pub fn element_count(&self) -> usize {
        self.rooms.iter().map(|room| room.elements().len()).sum()
    }

    /// Verify the structural guarantees of a finished layout
    ///
    /// Checks that the grid and room set agree, that every door between two
    /// adjacent rooms is open on both sides and leads somewhere, that every
    /// element lies inside its room, and that every room has a scale.
    ///
    /// # Errors
    /// `MissingNeighbor` if an occupied cell has no room, otherwise
    /// `BrokenInvariant` naming the first room where the structure is broken.
    pub fn check_invariants(&self) -> Result<()> {
        if let Some(index) = self
            .grid
            .occupied_cells()
            .find(|&cell| self.rooms.get(cell).is_none())
        {
            return Err(LayoutError::MissingNeighbor { index });
        }
        if self.grid.occupied_count() != self.rooms.len() {
            return Err(LayoutError::broken(
                GridIndex::ZERO,
                format!(
                    "{} occupied cells for {} rooms",
                    self.grid.occupied_count(),
                    self.rooms.len()
                ),
            ));
        }

        for room in self.rooms.iter() {
            let index = room.index();
            if !self.grid.is_occupied(index) {
                return Err(LayoutError::broken(index, "room on an empty cell"));
            }
            for (direction, cell) in index.neighbors() {
                let there = self
                    .rooms
                    .get(cell)
                    .map(|other| other.door_state(direction.opposite()));
                match (room.door_state(direction), there) {
                    (true, Some(true)) | (false, None) => {}
                    (true, None) => {
                        return Err(LayoutError::broken(index, format!("{direction} door leads nowhere")));
                    }
                    (_, Some(_)) => {
                        return Err(LayoutError::broken(
                            index,
                            format!("{direction} door to {cell} is one-sided or missing"),
                        ));
                    }
                }
            }
            let bounds = room.bounds();
            if room.elements().iter().any(|e| !bounds.contains(e.position)) {
                return Err(LayoutError::broken(index, "element outside room bounds"));
            }
            if room.scale().is_none() {
                return Err(LayoutError::broken(index, "room was never scaled"));
            }
        }
        Ok(())
    }

    /// Hand every room and element to a spawner
    pub fn instantiate<S: super::spawn::RoomSpawner>(&self, spawner: &mut S) -> Vec<S::Handle> {
        super::spawn::instantiate(self, spawner)
    }
}
