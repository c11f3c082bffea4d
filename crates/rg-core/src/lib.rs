//! rg-core: grid-based room layout generation
//!
//! Builds a connected set of rectangular rooms on a grid, links neighbours
//! with paired doors, and scatters decorative elements. Everything here is
//! pure data and logic; drawing the result is left to a [`layout::RoomSpawner`].

pub mod config;
pub mod error;
pub mod layout;

mod rng;

pub use config::{CenterBypass, LayoutConfig};
pub use error::{LayoutError, Result};
pub use layout::{GenerationScheduler, Layout, generate};
pub use rng::LayoutRng;
