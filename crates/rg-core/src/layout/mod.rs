//! Room layout generation
//!
//! Contains the occupancy grid, frontier queue, rooms, door wiring,
//! decoration, and the scheduler tying them together.

mod decorate;
mod doors;
mod frontier;
mod index;
mod occupancy;
mod plan;
mod room;
mod scheduler;
mod spawn;

pub use decorate::{Decorator, ElementPlacement};
pub use doors::wire_doors;
pub use frontier::Frontier;
pub use index::{Direction, GridIndex};
pub use occupancy::OccupancyGrid;
pub use plan::Layout;
pub use room::{Doors, RoomEntity, RoomSet, RoomSize, WorldPoint, WorldRect};
pub use scheduler::{
    GenerationPhase, GenerationScheduler, GenerationState, Placement, RejectReason, StepResult,
    generate,
};
pub use spawn::{RoomSpawner, instantiate};
