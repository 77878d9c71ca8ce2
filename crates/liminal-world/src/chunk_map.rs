use crate::chunk::{Chunk, ChunkShape, ConnectionPoint};
use crate::lifecycle::RenderGroup;
use glam::Vec2;
use liminal_core::types::{ChunkId, LightHandle};
use liminal_core::{Direction, MazeConfig, SeedSource, ALL_DIRECTIONS};
use std::collections::{BTreeMap, BTreeSet};

/// Authoritative store of every chunk record, plus the set of loaded ids.
///
/// Records are keyed by a monotonically assigned [`ChunkId`], so iteration
/// order is creation order.
pub struct ChunkMap {
    chunks: BTreeMap<ChunkId, Chunk>,
    loaded: BTreeSet<ChunkId>,
    next_id: u64,
    seeds: SeedSource,
    hallway_length: f32,
    junction_size: f32,
}

impl ChunkMap {
    pub fn new(config: &MazeConfig, seeds: SeedSource) -> Self {
        Self {
            chunks: BTreeMap::new(),
            loaded: BTreeSet::new(),
            next_id: 0,
            seeds,
            hallway_length: config.hallway_length,
            junction_size: config.junction_size,
        }
    }

    pub fn hallway_length(&self) -> f32 {
        self.hallway_length
    }

    pub fn junction_size(&self) -> f32 {
        self.junction_size
    }

    fn alloc_id(&mut self) -> ChunkId {
        let id = ChunkId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Create an unloaded hallway centered at `position` running along `direction`.
    pub fn create_hallway(&mut self, position: Vec2, direction: Direction) -> ChunkId {
        let id = self.alloc_id();
        let reach = direction.vector() * (self.hallway_length / 2.0);
        let connections = vec![
            ConnectionPoint::open(direction, reach),
            ConnectionPoint::open(direction.opposite(), -reach),
        ];
        let seed = self.seeds.next_seed();
        let chunk = Chunk::new(
            id,
            ChunkShape::Hallway { direction },
            position,
            connections,
            seed,
        );
        self.chunks.insert(id, chunk);
        id
    }

    /// Create an unloaded junction centered at `position` with one opening per side.
    pub fn create_junction(&mut self, position: Vec2) -> ChunkId {
        let id = self.alloc_id();
        let half = self.junction_size / 2.0;
        let connections = ALL_DIRECTIONS
            .iter()
            .map(|&dir| ConnectionPoint::open(dir, dir.vector() * half))
            .collect();
        let seed = self.seeds.next_seed();
        let chunk = Chunk::new(id, ChunkShape::Junction, position, connections, seed);
        self.chunks.insert(id, chunk);
        id
    }

    /// Pair `a`'s opening facing `direction` with `b`'s opening facing the
    /// opposite way. Both sides are written together or not at all.
    /// Returns false if either chunk or either opening is missing.
    pub fn connect(&mut self, a: ChunkId, direction: Direction, b: ChunkId) -> bool {
        let opposite = direction.opposite();
        let a_has = self
            .chunks
            .get(&a)
            .is_some_and(|c| c.connection(direction).is_some());
        let b_has = self
            .chunks
            .get(&b)
            .is_some_and(|c| c.connection(opposite).is_some());
        if !a_has || !b_has || a == b {
            log::warn!("Cannot pair {a} ({direction}) with {b} ({opposite})");
            return false;
        }

        if let Some(conn) = self.chunks.get_mut(&a).and_then(|c| c.connection_mut(direction)) {
            conn.partner = Some(b);
        }
        if let Some(conn) = self.chunks.get_mut(&b).and_then(|c| c.connection_mut(opposite)) {
            conn.partner = Some(a);
        }
        log::debug!("Connected {a} --{direction}--> {b}");
        true
    }

    /// Connected neighbors that are present in the store. A partner id that
    /// is missing from the store is treated as not connected.
    pub fn neighbors(&self, id: ChunkId) -> Vec<ChunkId> {
        let Some(chunk) = self.chunks.get(&id) else {
            return Vec::new();
        };
        chunk
            .connections
            .iter()
            .filter_map(|c| c.partner)
            .filter(|partner| self.chunks.contains_key(partner))
            .collect()
    }

    pub fn get(&self, id: ChunkId) -> Option<&Chunk> {
        self.chunks.get(&id)
    }

    pub fn contains(&self, id: ChunkId) -> bool {
        self.chunks.contains_key(&id)
    }

    /// Iterator over all records in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// Iterator over loaded records in creation order.
    pub fn loaded(&self) -> impl Iterator<Item = &Chunk> {
        self.loaded.iter().filter_map(|id| self.chunks.get(id))
    }

    pub fn loaded_ids(&self) -> impl Iterator<Item = ChunkId> + '_ {
        self.loaded.iter().copied()
    }

    pub fn is_loaded(&self, id: ChunkId) -> bool {
        self.loaded.contains(&id)
    }

    /// Number of records in the store.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    /// Total ids handed out so far, including records that were pruned.
    pub fn allocated_count(&self) -> u64 {
        self.next_id
    }

    /// Give a chunk its render state and mark it loaded.
    pub(crate) fn attach_visual(
        &mut self,
        id: ChunkId,
        group: RenderGroup,
        lights: Vec<LightHandle>,
    ) -> bool {
        let Some(chunk) = self.chunks.get_mut(&id) else {
            return false;
        };
        chunk.group = Some(group);
        chunk.lights = lights;
        self.loaded.insert(id);
        true
    }

    /// Strip a chunk's render state and mark it unloaded. Returns what was
    /// stripped, or `None` if the chunk was not loaded.
    pub(crate) fn detach_visual(&mut self, id: ChunkId) -> Option<(RenderGroup, Vec<LightHandle>)> {
        let chunk = self.chunks.get_mut(&id)?;
        let group = chunk.group.take()?;
        let lights = std::mem::take(&mut chunk.lights);
        self.loaded.remove(&id);
        Some((group, lights))
    }

    /// Drop the given unloaded records and reopen every surviving connection
    /// that pointed at one of them. Loaded ids are skipped.
    pub(crate) fn remove_records(&mut self, ids: &[ChunkId]) -> usize {
        let mut removed = 0;
        for id in ids {
            if self.loaded.contains(id) {
                continue;
            }
            if self.chunks.remove(id).is_some() {
                removed += 1;
            }
        }
        if removed == 0 {
            return 0;
        }
        let present: BTreeSet<ChunkId> = self.chunks.keys().copied().collect();
        for chunk in self.chunks.values_mut() {
            for conn in &mut chunk.connections {
                if conn.partner.is_some_and(|p| !present.contains(&p)) {
                    conn.partner = None;
                }
            }
        }
        removed
    }
}
