//! Generator settings
//!
//! Plain data: none of these values change how the algorithm works, only the
//! bounds it works within.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::layout::{GridIndex, RoomSize};

/// Default grid width in cells
pub const DEFAULT_GRID_SIZE_X: u32 = 10;
/// Default grid height in cells
pub const DEFAULT_GRID_SIZE_Y: u32 = 10;
/// Default room width in world units
pub const DEFAULT_ROOM_WIDTH: u32 = 60;
/// Default room height in world units
pub const DEFAULT_ROOM_HEIGHT: u32 = 36;
pub const DEFAULT_MIN_ROOMS: u32 = 10;
pub const DEFAULT_MAX_ROOMS: u32 = 15;
pub const DEFAULT_MIN_ROOM_SCALE: f32 = 1.0;
pub const DEFAULT_MAX_ROOM_SCALE: f32 = 3.0;
pub const DEFAULT_MAX_RANDOM_ELEMENTS: u32 = 3;
/// Default number of generation attempts before giving up on `min_rooms`
pub const DEFAULT_MAX_ATTEMPTS: u32 = 64;

/// Which cell skips the 50% placement coin flip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CenterBypass {
    /// The seed cell at the grid center
    #[default]
    Seed,
    /// The absolute `(0, 0)` cell, whatever the grid size
    ZeroIndex,
}

/// Configuration surface of the layout generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub grid_size_x: u32,
    pub grid_size_y: u32,
    pub room_width: u32,
    pub room_height: u32,
    pub min_rooms: u32,
    pub max_rooms: u32,
    pub min_room_scale: f32,
    pub max_room_scale: f32,
    pub max_random_elements: u32,
    /// Element kinds the decorator picks from
    pub element_catalog: Vec<String>,
    /// Retry budget for regenerations when `min_rooms` is not reached
    pub max_attempts: u32,
    pub center_bypass: CenterBypass,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            grid_size_x: DEFAULT_GRID_SIZE_X,
            grid_size_y: DEFAULT_GRID_SIZE_Y,
            room_width: DEFAULT_ROOM_WIDTH,
            room_height: DEFAULT_ROOM_HEIGHT,
            min_rooms: DEFAULT_MIN_ROOMS,
            max_rooms: DEFAULT_MAX_ROOMS,
            min_room_scale: DEFAULT_MIN_ROOM_SCALE,
            max_room_scale: DEFAULT_MAX_ROOM_SCALE,
            max_random_elements: DEFAULT_MAX_RANDOM_ELEMENTS,
            element_catalog: ["crate", "torch", "enemy", "chest"]
                .into_iter()
                .map(String::from)
                .collect(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            center_bypass: CenterBypass::Seed,
        }
    }
}

impl LayoutConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    /// `InvalidConfig` if the text is not valid JSON for this type.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| LayoutError::invalid_config(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| LayoutError::invalid_config(e.to_string()))
    }

    pub fn with_grid_size(mut self, x: u32, y: u32) -> Self {
        self.grid_size_x = x;
        self.grid_size_y = y;
        self
    }

    pub fn with_room_size(mut self, width: u32, height: u32) -> Self {
        self.room_width = width;
        self.room_height = height;
        self
    }

    pub fn with_room_bounds(mut self, min_rooms: u32, max_rooms: u32) -> Self {
        self.min_rooms = min_rooms;
        self.max_rooms = max_rooms;
        self
    }

    pub fn with_scale_range(mut self, min: f32, max: f32) -> Self {
        self.min_room_scale = min;
        self.max_room_scale = max;
        self
    }

    pub fn with_elements<I, S>(mut self, max_random_elements: u32, catalog: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.max_random_elements = max_random_elements;
        self.element_catalog = catalog.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_center_bypass(mut self, bypass: CenterBypass) -> Self {
        self.center_bypass = bypass;
        self
    }

    pub fn room_size(&self) -> RoomSize {
        RoomSize::new(self.room_width, self.room_height)
    }

    /// The cell generation starts from
    pub fn seed_index(&self) -> GridIndex {
        GridIndex::new((self.grid_size_x / 2) as i32, (self.grid_size_y / 2) as i32)
    }

    /// The cell exempt from the placement coin flip
    pub fn bypass_index(&self) -> GridIndex {
        match self.center_bypass {
            CenterBypass::Seed => self.seed_index(),
            CenterBypass::ZeroIndex => GridIndex::ZERO,
        }
    }

    /// Check the settings can drive a generation at all
    ///
    /// `min_rooms > max_rooms` is accepted here: it can never be satisfied
    /// and is reported once the retry budget runs out.
    ///
    /// # Errors
    /// `InvalidConfig` naming the first offending setting.
    pub fn validate(&self) -> Result<()> {
        if self.grid_size_x == 0 || self.grid_size_y == 0 {
            return Err(LayoutError::invalid_config(format!(
                "grid size must be non-zero, got {}x{}",
                self.grid_size_x, self.grid_size_y
            )));
        }
        if self.grid_size_x > i32::MAX as u32 || self.grid_size_y > i32::MAX as u32 {
            return Err(LayoutError::invalid_config("grid size does not fit in i32"));
        }
        if self.room_width == 0 || self.room_height == 0 {
            return Err(LayoutError::invalid_config(format!(
                "room size must be non-zero, got {}x{}",
                self.room_width, self.room_height
            )));
        }
        if self.max_rooms == 0 {
            return Err(LayoutError::invalid_config("max_rooms must be at least 1"));
        }
        if !self.min_room_scale.is_finite() || !self.max_room_scale.is_finite() {
            return Err(LayoutError::invalid_config("room scale range must be finite"));
        }
        if self.min_room_scale <= 0.0 || self.min_room_scale > self.max_room_scale {
            return Err(LayoutError::invalid_config(format!(
                "room scale range [{}, {}] must be positive and ordered",
                self.min_room_scale, self.max_room_scale
            )));
        }
        if self.max_random_elements == 0 && !self.element_catalog.is_empty() {
            return Err(LayoutError::invalid_config(
                "max_random_elements must be at least 1 when the element catalog is not empty",
            ));
        }
        if self.max_attempts == 0 {
            return Err(LayoutError::invalid_config("max_attempts must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = LayoutConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.seed_index(), GridIndex::new(5, 5));
        assert_eq!(config.bypass_index(), GridIndex::new(5, 5));
        assert_eq!(config.room_size(), RoomSize::new(60, 36));
    }

    #[test]
    fn test_zero_index_bypass() {
        let config = LayoutConfig::default().with_center_bypass(CenterBypass::ZeroIndex);
        assert_eq!(config.bypass_index(), GridIndex::ZERO);
    }

    #[test]
    fn test_validate_rejects() {
        let bad = [
            LayoutConfig::default().with_grid_size(0, 10),
            LayoutConfig::default().with_room_size(60, 0),
            LayoutConfig::default().with_room_bounds(0, 0),
            LayoutConfig::default().with_scale_range(3.0, 1.0),
            LayoutConfig::default().with_scale_range(0.0, 1.0),
            LayoutConfig::default().with_scale_range(1.0, f32::NAN),
            LayoutConfig::default().with_elements(0, ["torch"]),
            LayoutConfig::default().with_max_attempts(0),
        ];
        for config in bad {
            assert!(
                matches!(config.validate(), Err(LayoutError::InvalidConfig { .. })),
                "accepted {config:?}"
            );
        }
    }

    #[test]
    fn test_validate_accepts_unreachable_min() {
        let config = LayoutConfig::default().with_room_bounds(4, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_catalog_allows_zero_elements() {
        let config = LayoutConfig::default().with_elements(0, Vec::<String>::new());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config =
            LayoutConfig::from_json(r#"{ "max_rooms": 20, "center_bypass": "zero_index" }"#)
                .unwrap();
        assert_eq!(config.max_rooms, 20);
        assert_eq!(config.min_rooms, DEFAULT_MIN_ROOMS);
        assert_eq!(config.center_bypass, CenterBypass::ZeroIndex);

        let text = config.to_json().unwrap();
        assert_eq!(LayoutConfig::from_json(&text).unwrap(), config);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            LayoutConfig::from_json("{ not json"),
            Err(LayoutError::InvalidConfig { .. })
        ));
    }
}
