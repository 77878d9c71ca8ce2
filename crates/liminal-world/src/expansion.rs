use crate::chunk_map::ChunkMap;
use glam::Vec2;
use liminal_core::types::ChunkId;
use liminal_core::Direction;

/// Grow the graph at every open connection of `id`.
///
/// Each open opening gets a hallway whose near end sits on the opening,
/// followed by a junction at the hallway's far end. The three chunks are
/// wired together as they are created. Nothing is loaded here.
///
/// Returns the number of openings that were grown. A fully connected or
/// unknown chunk yields 0 and leaves the store untouched.
pub fn expand(map: &mut ChunkMap, id: ChunkId) -> usize {
    let open: Vec<(Direction, Vec2)> = match map.get(id) {
        Some(chunk) => chunk
            .connections
            .iter()
            .filter(|c| !c.is_connected())
            .map(|c| (c.direction, chunk.opening_position(c)))
            .collect(),
        None => return 0,
    };

    let half_length = map.hallway_length() / 2.0;
    let junction_offset = map.hallway_length() + map.junction_size() / 2.0;

    for &(direction, opening) in &open {
        let v = direction.vector();

        let hallway = map.create_hallway(opening + v * half_length, direction);
        map.connect(id, direction, hallway);

        let junction_at = opening + v * junction_offset;
        let junction = map.create_junction(junction_at);
        map.connect(hallway, direction, junction);

        log::debug!(
            "Spawned {hallway} ({direction}) and {junction} at ({}, {}) from {id}",
            junction_at.x,
            junction_at.y
        );
    }
    open.len()
}
