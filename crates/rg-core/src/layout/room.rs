//! Placed rooms and their world-space geometry

use bitflags::bitflags;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::error::{LayoutError, Result};

use super::decorate::ElementPlacement;
use super::index::{Direction, GridIndex};

/// Width and height of one room in world units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSize {
    pub width: u32,
    pub height: u32,
}

impl RoomSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A point in world space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f32,
    pub y: f32,
}

impl WorldPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldRect {
    pub min: WorldPoint,
    pub max: WorldPoint,
}

impl WorldRect {
    /// Rectangle of `size` centered on `center`
    pub fn centered(center: WorldPoint, size: RoomSize) -> Self {
        let half_w = size.width as f32 / 2.0;
        let half_h = size.height as f32 / 2.0;
        Self {
            min: WorldPoint::new(center.x - half_w, center.y - half_h),
            max: WorldPoint::new(center.x + half_w, center.y + half_h),
        }
    }

    pub fn contains(&self, p: WorldPoint) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

bitflags! {
    /// Open door flags of a room, one per side
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Doors: u8 {
        const NORTH = 0x01;
        const SOUTH = 0x02;
        const EAST = 0x04;
        const WEST = 0x08;
    }
}

impl Doors {
    /// Flag for the door on the `direction` side
    pub const fn facing(direction: Direction) -> Self {
        match direction {
            Direction::North => Doors::NORTH,
            Direction::South => Doors::SOUTH,
            Direction::East => Doors::EAST,
            Direction::West => Doors::WEST,
        }
    }
}

// Manual serde impl for Doors
impl Serialize for Doors {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Doors {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(Doors::from_bits_truncate(bits))
    }
}

/// One placed room
///
/// Door flags only ever go from closed to open, and the scale is assigned
/// once after generation completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomEntity {
    name: String,
    index: GridIndex,
    doors: Doors,
    position: WorldPoint,
    size: RoomSize,
    scale: Option<f32>,
    elements: Vec<ElementPlacement>,
}

impl RoomEntity {
    pub fn new(name: String, index: GridIndex, position: WorldPoint, size: RoomSize) -> Self {
        Self {
            name,
            index,
            doors: Doors::empty(),
            position,
            size,
            scale: None,
            elements: Vec::new(),
        }
    }

    /// Display name, `Room-<n>` in creation order
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> GridIndex {
        self.index
    }

    /// World-space anchor (center) of the room
    pub fn position(&self) -> WorldPoint {
        self.position
    }

    pub fn size(&self) -> RoomSize {
        self.size
    }

    /// Unscaled world-space bounding box around the anchor
    pub fn bounds(&self) -> WorldRect {
        WorldRect::centered(self.position, self.size)
    }

    /// Whether the door on the `direction` side is open
    pub fn door_state(&self, direction: Direction) -> bool {
        self.doors.contains(Doors::facing(direction))
    }

    pub fn doors(&self) -> Doors {
        self.doors
    }

    /// Directions with an open door
    pub fn open_doors(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::iter().filter(|&dir| self.door_state(dir))
    }

    pub fn door_count(&self) -> usize {
        self.doors.bits().count_ones() as usize
    }

    /// Open the door on the `direction` side. Doors never close.
    pub(crate) fn open_door(&mut self, direction: Direction) {
        self.doors.insert(Doors::facing(direction));
    }

    /// Uniform scale factor, or `None` before the decoration pass
    pub fn scale(&self) -> Option<f32> {
        self.scale
    }

    pub(crate) fn set_scale(&mut self, scale: f32) {
        debug_assert!(self.scale.is_none(), "room {} scaled twice", self.index);
        self.scale = Some(scale);
    }

    /// Elements scattered inside this room
    pub fn elements(&self) -> &[ElementPlacement] {
        &self.elements
    }

    pub(crate) fn add_element(&mut self, element: ElementPlacement) {
        self.elements.push(element);
    }
}

/// All live rooms of one generation attempt, keyed by grid index
#[derive(Debug, Clone, Default)]
pub struct RoomSet {
    rooms: Vec<RoomEntity>,
    by_index: HashMap<GridIndex, usize>,
}

impl RoomSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a new room
    ///
    /// # Errors
    /// `AlreadyOccupied` if a room already sits at the same index.
    pub fn insert(&mut self, room: RoomEntity) -> Result<()> {
        let index = room.index();
        if self.by_index.contains_key(&index) {
            return Err(LayoutError::AlreadyOccupied { index });
        }
        self.by_index.insert(index, self.rooms.len());
        self.rooms.push(room);
        Ok(())
    }

    pub fn get(&self, index: GridIndex) -> Option<&RoomEntity> {
        self.by_index.get(&index).map(|&slot| &self.rooms[slot])
    }

    pub(crate) fn get_mut(&mut self, index: GridIndex) -> Option<&mut RoomEntity> {
        self.by_index.get(&index).map(|&slot| &mut self.rooms[slot])
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Rooms in creation order
    pub fn iter(&self) -> impl Iterator<Item = &RoomEntity> {
        self.rooms.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut RoomEntity> {
        self.rooms.iter_mut()
    }

    /// Drop every room together with its elements
    pub fn clear(&mut self) {
        self.rooms.clear();
        self.by_index.clear();
    }
}
