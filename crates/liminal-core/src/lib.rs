//! Shared types for the liminal maze: directions, dimensions, ids, seeds and config.

pub mod config;
pub mod constants;
pub mod direction;
pub mod error;
pub mod rng;
pub mod types;

pub use config::MazeConfig;
pub use direction::{Direction, ALL_DIRECTIONS};
pub use error::MazeError;
pub use rng::{SeedSource, SeededRandom};
pub use types::{ChunkId, ChunkKind, GroupHandle, LightHandle, ResourceHandle};
