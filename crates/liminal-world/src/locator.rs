use crate::chunk_map::ChunkMap;
use glam::Vec2;
use liminal_core::types::ChunkId;
use liminal_core::MazeConfig;

/// Find the loaded chunk whose footprint, inflated by the locator margin,
/// contains `point`.
///
/// Only loaded chunks are considered. Where inflated footprints overlap at a
/// seam, the earliest-created chunk wins.
pub fn find_current_chunk(map: &ChunkMap, config: &MazeConfig, point: Vec2) -> Option<ChunkId> {
    map.loaded()
        .find(|chunk| {
            chunk
                .footprint(config)
                .inflate(config.locator_margin)
                .contains(point)
        })
        .map(|chunk| chunk.id)
}
