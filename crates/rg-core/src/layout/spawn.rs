//! Hand-off to whatever turns layout data into visible objects
//!
//! The generator never calls a spawner itself; a finished [`Layout`] is
//! pushed through one after the fact.

use super::decorate::ElementPlacement;
use super::plan::Layout;
use super::room::RoomEntity;

/// Factory for the displayable counterparts of rooms and elements
pub trait RoomSpawner {
    /// Whatever the spawner uses to refer to a spawned room
    type Handle;

    /// Create the object for one room
    fn spawn_room(&mut self, room: &RoomEntity) -> Self::Handle;

    /// Create one element, parented to an already spawned room
    fn spawn_element(&mut self, parent: &Self::Handle, element: &ElementPlacement);
}

/// Spawn every room in creation order, each followed by its elements
pub fn instantiate<S: RoomSpawner>(layout: &Layout, spawner: &mut S) -> Vec<S::Handle> {
    layout
        .rooms()
        .map(|room| {
            let handle = spawner.spawn_room(room);
            for element in room.elements() {
                spawner.spawn_element(&handle, element);
            }
            handle
        })
        .collect()
}
