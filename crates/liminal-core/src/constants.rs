//! Default maze dimensions and streaming limits.
//! `MazeConfig::default()` is built from these values.

/// Length of a hallway chunk along its travel direction.
pub const HALLWAY_LENGTH: f32 = 16.0;

/// Width of a hallway chunk across its travel direction.
pub const HALLWAY_WIDTH: f32 = 3.5;

/// Side length of the square junction footprint.
pub const JUNCTION_SIZE: f32 = 4.0;

/// Maximum number of chunks holding render resources at once.
pub const MAX_LOADED_CHUNKS: usize = 12;

/// Hop distance from the current chunk within which chunks are kept loaded.
pub const STREAMING_HORIZON: u32 = 2;

/// Footprint inflation used when locating the observer's current chunk.
pub const LOCATOR_MARGIN: f32 = 1.0;

/// Inset from each hallway wall that the observer may not enter.
pub const WALL_MARGIN: f32 = 0.4;

/// Spacing between wall lamps along a hallway.
pub const LAMP_SPACING: f32 = 10.0;

/// Spacing between door slots along a hallway.
pub const DOOR_SPACING: f32 = 4.0;

/// Probability that a door slot actually holds a door.
pub const DOOR_CHANCE: f64 = 0.85;

/// Exclusive upper bound for chunk seeds.
pub const SEED_RANGE: u32 = 100_000;
