//! Decoration passes: element scatter and room scale
//!
//! Both passes only produce data. Turning an element into something visible
//! is the job of a [`super::RoomSpawner`].

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::rng::LayoutRng;

use super::room::{RoomEntity, RoomSet, WorldPoint};

/// A decorative element placed inside a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementPlacement {
    /// Catalog entry this element was drawn from
    pub kind: String,
    /// World-space position, inside the owning room's bounds
    pub position: WorldPoint,
}

/// Random decoration settings taken from the layout config
#[derive(Debug, Clone)]
pub struct Decorator {
    catalog: Vec<String>,
    max_elements: u32,
    min_scale: f32,
    max_scale: f32,
}

impl Decorator {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            catalog: config.element_catalog.clone(),
            max_elements: config.max_random_elements,
            min_scale: config.min_room_scale,
            max_scale: config.max_room_scale,
        }
    }

    /// Scatter between 1 and `max_elements` elements inside `room`
    ///
    /// Returns the number placed. An empty catalog places nothing and
    /// consumes no randomness.
    pub fn scatter_elements(&self, room: &mut RoomEntity, rng: &mut LayoutRng) -> usize {
        if self.catalog.is_empty() || self.max_elements == 0 {
            return 0;
        }

        let bounds = room.bounds();
        let count = rng.up_to(self.max_elements) as usize;
        for _ in 0..count {
            let Some(kind) = rng.choose(&self.catalog).cloned() else {
                break;
            };
            let x = rng.range_f32(bounds.min.x, bounds.max.x);
            let y = rng.range_f32(bounds.min.y, bounds.max.y);
            room.add_element(ElementPlacement {
                kind,
                position: WorldPoint::new(x, y),
            });
        }
        count
    }

    /// Give every room a uniform scale in `[min_scale, max_scale]`
    pub fn randomize_scales(&self, rooms: &mut RoomSet, rng: &mut LayoutRng) {
        for room in rooms.iter_mut() {
            let scale = rng.range_inclusive_f32(self.min_scale, self.max_scale);
            room.set_scale(scale);
        }
    }
}
