use crate::chunk_map::ChunkMap;
use glam::Vec2;
use liminal_core::MazeConfig;

/// True if `point` is outside every loaded walkable area.
///
/// Hallways are walkable over their full length and up to the wall margin
/// from each wall; junctions over their whole square. Linear in the number
/// of loaded chunks, no caching.
pub fn check_wall_collision(map: &ChunkMap, config: &MazeConfig, point: Vec2) -> bool {
    !map
        .loaded()
        .any(|chunk| chunk.walkable_area(config).contains(point))
}

/// Move from `from` toward `to`, one axis at a time, so the observer slides
/// along walls instead of stopping dead. Returns the accepted position.
pub fn try_move(map: &ChunkMap, config: &MazeConfig, from: Vec2, to: Vec2) -> Vec2 {
    let mut pos = from;
    if !check_wall_collision(map, config, Vec2::new(to.x, pos.y)) {
        pos.x = to.x;
    }
    if !check_wall_collision(map, config, Vec2::new(pos.x, to.y)) {
        pos.y = to.y;
    }
    pos
}
