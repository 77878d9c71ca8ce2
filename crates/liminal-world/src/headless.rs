//! Render backend with no GPU behind it.
//!
//! Builds placeholder groups whose resource and light counts follow the same
//! layout rules a real mesh builder uses, and keeps enough bookkeeping to
//! check for leaks. Used by the walk runner and by tests.

use crate::chunk::Chunk;
use crate::debug::DebugOverlay;
use crate::lifecycle::{BuiltVisual, DisposeError, MeshBuilder, RenderGroup, Scene};
use glam::Vec2;
use liminal_core::constants::{DOOR_CHANCE, DOOR_SPACING, LAMP_SPACING};
use liminal_core::types::{ChunkId, GroupHandle, LightHandle, ResourceHandle};
use liminal_core::{Direction, MazeConfig, SeededRandom};
use std::collections::{BTreeMap, BTreeSet};

/// Floor, ceiling, two walls and two wainscot strips, each with geometry
/// and material.
const HALLWAY_BASE_RESOURCES: usize = 12;
/// Floor, ceiling, corner walls and pillars.
const JUNCTION_BASE_RESOURCES: usize = 8;
const RESOURCES_PER_DOOR: usize = 3;
const RESOURCES_PER_LAMP: usize = 2;

/// Door placement along a hallway, derived entirely from the chunk seed.
#[derive(Debug, Clone, PartialEq)]
pub struct HallwayLayout {
    /// Door centers along the travel axis, relative to the hallway center.
    pub doors: Vec<f32>,
    pub room_number_base: u32,
    pub lamps: usize,
}

impl HallwayLayout {
    pub fn generate(seed: u32, hallway_length: f32) -> Self {
        let mut rng = SeededRandom::new(u64::from(seed));
        let half = hallway_length / 2.0;
        let start = -half + DOOR_SPACING / 2.0 + 1.0;
        let end = half - DOOR_SPACING / 2.0 - 1.0;

        let mut doors = Vec::new();
        let mut slot = start;
        while slot < end {
            if rng.chance(DOOR_CHANCE) {
                doors.push(slot);
            }
            slot += DOOR_SPACING;
        }

        Self {
            doors,
            room_number_base: 100 + seed % 900,
            lamps: (hallway_length / LAMP_SPACING).ceil() as usize,
        }
    }
}

/// In-memory scene and mesh builder.
#[derive(Debug)]
pub struct HeadlessBackend {
    hallway_length: f32,
    next_handle: u64,
    groups: BTreeMap<GroupHandle, Vec2>,
    resources: BTreeSet<ResourceHandle>,
    failing: BTreeSet<ResourceHandle>,
    overlays: BTreeMap<ChunkId, DebugOverlay>,
}

impl HeadlessBackend {
    pub fn new(config: &MazeConfig) -> Self {
        Self {
            hallway_length: config.hallway_length,
            next_handle: 1,
            groups: BTreeMap::new(),
            resources: BTreeSet::new(),
            failing: BTreeSet::new(),
            overlays: BTreeMap::new(),
        }
    }

    fn alloc(&mut self) -> u64 {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle
    }

    fn build(&mut self, resource_count: usize, light_count: usize) -> BuiltVisual {
        let handle = GroupHandle(self.alloc());
        let resources: Vec<ResourceHandle> = (0..resource_count)
            .map(|_| ResourceHandle(self.alloc()))
            .collect();
        self.resources.extend(resources.iter().copied());
        let lights = (0..light_count).map(|_| LightHandle(self.alloc())).collect();
        BuiltVisual {
            group: RenderGroup {
                handle,
                position: Vec2::ZERO,
                resources,
            },
            lights,
        }
    }

    /// Make every future disposal of `resource` fail.
    pub fn fail_disposal_of(&mut self, resource: ResourceHandle) {
        self.failing.insert(resource);
    }

    pub fn has_group(&self, handle: GroupHandle) -> bool {
        self.groups.contains_key(&handle)
    }

    pub fn group_position(&self, handle: GroupHandle) -> Option<Vec2> {
        self.groups.get(&handle).copied()
    }

    /// Groups currently in the scene.
    pub fn live_group_count(&self) -> usize {
        self.groups.len()
    }

    /// Resources built but not yet disposed, including leaked ones.
    pub fn live_resource_count(&self) -> usize {
        self.resources.len()
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    pub fn overlay(&self, chunk: ChunkId) -> Option<&DebugOverlay> {
        self.overlays.get(&chunk)
    }

    pub fn overlays(&self) -> impl Iterator<Item = &DebugOverlay> {
        self.overlays.values()
    }
}

impl MeshBuilder for HeadlessBackend {
    fn build_hallway(&mut self, chunk: &Chunk, _direction: Direction) -> BuiltVisual {
        let layout = HallwayLayout::generate(chunk.seed, self.hallway_length);
        let resources = HALLWAY_BASE_RESOURCES
            + layout.doors.len() * RESOURCES_PER_DOOR
            + layout.lamps * RESOURCES_PER_LAMP;
        self.build(resources, layout.lamps)
    }

    fn build_junction(&mut self, _chunk: &Chunk) -> BuiltVisual {
        self.build(JUNCTION_BASE_RESOURCES + RESOURCES_PER_LAMP, 1)
    }
}

impl Scene for HeadlessBackend {
    fn add_group(&mut self, group: &RenderGroup) {
        self.groups.insert(group.handle, group.position);
    }

    fn remove_group(&mut self, group: &RenderGroup) {
        self.groups.remove(&group.handle);
    }

    fn dispose(&mut self, resource: ResourceHandle) -> Result<(), DisposeError> {
        if self.failing.contains(&resource) {
            return Err(DisposeError {
                resource,
                reason: "disposal refused".into(),
            });
        }
        self.resources.remove(&resource);
        Ok(())
    }

    fn add_overlay(&mut self, overlay: &DebugOverlay) {
        self.overlays.insert(overlay.chunk, overlay.clone());
    }

    fn remove_overlay(&mut self, chunk: ChunkId) {
        self.overlays.remove(&chunk);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_deterministic_per_seed() {
        let a = HallwayLayout::generate(12_345, 16.0);
        let b = HallwayLayout::generate(12_345, 16.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_layout_slots_stay_inside_hallway() {
        for seed in 0..200 {
            let layout = HallwayLayout::generate(seed, 16.0);
            assert!(layout.doors.len() <= 3);
            for door in &layout.doors {
                assert!((-5.0..5.0).contains(door), "door at {door}");
            }
            assert_eq!(layout.lamps, 2);
            assert!((100..1000).contains(&layout.room_number_base));
        }
    }

    #[test]
    fn test_some_seeds_skip_doors() {
        let full = (0..200)
            .filter(|&seed| HallwayLayout::generate(seed, 16.0).doors.len() == 3)
            .count();
        assert!(full > 0 && full < 200);
    }

    #[test]
    fn test_failed_disposal_leaks_only_that_resource() {
        let config = MazeConfig::default();
        let mut backend = HeadlessBackend::new(&config);
        let visual = backend.build(3, 0);
        let bad = visual.group.resources[1];
        backend.fail_disposal_of(bad);
        let results: Vec<bool> = visual
            .group
            .resources
            .iter()
            .map(|r| backend.dispose(*r).is_ok())
            .collect();
        assert_eq!(results, vec![true, false, true]);
        assert_eq!(backend.live_resource_count(), 1);
    }
}
