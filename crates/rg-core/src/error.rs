//! Error kinds surfaced by layout generation
//!
//! Rejected placements are not errors; they are ordinary control flow
//! reported through [`crate::layout::Placement`].

use thiserror::Error;

use crate::layout::GridIndex;

/// Fatal conditions of the generator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Invalid layout configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error(
        "Cannot satisfy min_rooms={min_rooms} within retry budget ({attempts} attempts, best {best} rooms)"
    )]
    RetryBudgetExhausted {
        min_rooms: u32,
        attempts: u32,
        best: u32,
    },

    #[error("Grid cell {index} is occupied but no room is tracked there")]
    MissingNeighbor { index: GridIndex },

    #[error("Layout invariant broken at {index}: {reason}")]
    BrokenInvariant { index: GridIndex, reason: String },

    #[error("Grid cell {index} is already occupied")]
    AlreadyOccupied { index: GridIndex },

    #[error("Grid cell {index} is outside the grid")]
    OutOfBounds { index: GridIndex },
}

impl LayoutError {
    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        LayoutError::InvalidConfig {
            reason: reason.into(),
        }
    }

    pub(crate) fn broken(index: GridIndex, reason: impl Into<String>) -> Self {
        LayoutError::BrokenInvariant {
            index,
            reason: reason.into(),
        }
    }

    /// Whether this error is a configuration problem rather than a broken invariant
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            LayoutError::InvalidConfig { .. } | LayoutError::RetryBudgetExhausted { .. }
        )
    }
}

/// Result alias for layout operations
pub type Result<T> = core::result::Result<T, LayoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = LayoutError::RetryBudgetExhausted {
            min_rooms: 4,
            attempts: 8,
            best: 1,
        };
        assert_eq!(
            err.to_string(),
            "Cannot satisfy min_rooms=4 within retry budget (8 attempts, best 1 rooms)"
        );

        let err = LayoutError::MissingNeighbor {
            index: GridIndex::new(3, 4),
        };
        assert_eq!(
            err.to_string(),
            "Grid cell (3, 4) is occupied but no room is tracked there"
        );
    }

    #[test]
    fn test_is_configuration() {
        assert!(LayoutError::invalid_config("bad").is_configuration());
        assert!(
            !LayoutError::AlreadyOccupied {
                index: GridIndex::new(0, 0)
            }
            .is_configuration()
        );
    }
}
