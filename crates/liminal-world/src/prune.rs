use crate::chunk_map::ChunkMap;
use liminal_core::types::{ChunkId, ChunkKind};
use std::collections::BTreeSet;

/// Drop graph records more than `horizon` hops from every loaded chunk.
///
/// A surviving hallway always keeps both of its neighbors, so reopened
/// connections only ever sit on junctions; re-expanding them later puts new
/// hallways back on the same lattice. Returns the number of records dropped.
pub fn prune_distant(map: &mut ChunkMap, horizon: u32) -> usize {
    let mut keep: BTreeSet<ChunkId> = map.loaded_ids().collect();
    let mut frontier: Vec<ChunkId> = keep.iter().copied().collect();
    for _ in 0..horizon {
        let mut next = Vec::new();
        for id in frontier {
            for neighbor in map.neighbors(id) {
                if keep.insert(neighbor) {
                    next.push(neighbor);
                }
            }
        }
        frontier = next;
    }

    let hallways: Vec<ChunkId> = keep
        .iter()
        .copied()
        .filter(|id| map.get(*id).is_some_and(|c| c.kind() == ChunkKind::Hallway))
        .collect();
    for hallway in hallways {
        keep.extend(map.neighbors(hallway));
    }

    let doomed: Vec<ChunkId> = map
        .iter()
        .map(|c| c.id)
        .filter(|id| !keep.contains(id))
        .collect();
    let removed = map.remove_records(&doomed);
    if removed > 0 {
        log::info!("Pruned {removed} chunk records, {} remain", map.len());
    }
    removed
}
