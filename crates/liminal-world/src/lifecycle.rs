//! Loading and unloading of a chunk's render state.
//!
//! The world never builds geometry itself. Mesh construction and scene
//! management sit behind [`MeshBuilder`] and [`Scene`]; this module owns the
//! bookkeeping around them: which lights belong to which chunk, which debug
//! overlays are shown, and best-effort disposal on unload.

use crate::chunk::ChunkShape;
use crate::chunk_map::ChunkMap;
use crate::debug::{DebugOverlay, DebugOverlays};
use crate::lights::LightRegistry;
use crate::Chunk;
use glam::Vec2;
use liminal_core::types::{ChunkId, GroupHandle, LightHandle, ResourceHandle};
use liminal_core::Direction;
use thiserror::Error;

/// Renderable content for one chunk. Exclusively owned by that chunk while
/// it is loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderGroup {
    pub handle: GroupHandle,
    /// World placement, set to the chunk center on load.
    pub position: Vec2,
    /// Geometry and material resources to dispose on unload.
    pub resources: Vec<ResourceHandle>,
}

/// What a mesh builder hands back for a chunk.
#[derive(Debug, Clone)]
pub struct BuiltVisual {
    pub group: RenderGroup,
    pub lights: Vec<LightHandle>,
}

/// A single resource failed to release.
#[derive(Debug, Error)]
#[error("failed to dispose {resource:?}: {reason}")]
pub struct DisposeError {
    pub resource: ResourceHandle,
    pub reason: String,
}

/// Builds renderable content for chunks from their seed and shape.
pub trait MeshBuilder {
    fn build_hallway(&mut self, chunk: &Chunk, direction: Direction) -> BuiltVisual;
    fn build_junction(&mut self, chunk: &Chunk) -> BuiltVisual;
}

/// The scene that render groups and debug overlays are inserted into.
pub trait Scene {
    fn add_group(&mut self, group: &RenderGroup);
    fn remove_group(&mut self, group: &RenderGroup);
    fn dispose(&mut self, resource: ResourceHandle) -> Result<(), DisposeError>;
    fn add_overlay(&mut self, overlay: &DebugOverlay);
    fn remove_overlay(&mut self, chunk: ChunkId);
}

/// Everything the world needs from the rendering side.
pub trait RenderBackend: MeshBuilder + Scene {}

impl<T: MeshBuilder + Scene> RenderBackend for T {}

/// Per-world state tied to chunk load/unload.
pub struct ChunkLifecycle {
    lights: LightRegistry,
    overlays: DebugOverlays,
    failed_disposals: u64,
}

impl ChunkLifecycle {
    pub fn new(overlays: DebugOverlays) -> Self {
        Self {
            lights: LightRegistry::new(),
            overlays,
            failed_disposals: 0,
        }
    }

    pub fn lights(&self) -> &LightRegistry {
        &self.lights
    }

    pub fn lights_mut(&mut self) -> &mut LightRegistry {
        &mut self.lights
    }

    pub fn overlays(&self) -> &DebugOverlays {
        &self.overlays
    }

    /// Resource disposals that have failed over the lifetime of this world.
    pub fn failed_disposals(&self) -> u64 {
        self.failed_disposals
    }

    /// Build and insert the chunk's render group. No-op if the chunk is
    /// already loaded or unknown. Returns whether anything was loaded.
    pub fn load<B: RenderBackend + ?Sized>(
        &mut self,
        map: &mut ChunkMap,
        id: ChunkId,
        backend: &mut B,
    ) -> bool {
        let Some(chunk) = map.get(id) else {
            return false;
        };
        if chunk.is_loaded() {
            return false;
        }

        let mut visual = match chunk.shape {
            ChunkShape::Hallway { direction } => backend.build_hallway(chunk, direction),
            ChunkShape::Junction => backend.build_junction(chunk),
        };
        visual.group.position = chunk.position;
        backend.add_group(&visual.group);
        for light in &visual.lights {
            self.lights.register(*light);
        }
        let overlay = self
            .overlays
            .is_enabled()
            .then(|| self.overlays.build(chunk));

        log::trace!(
            "Loaded {id} ({} resources, {} lights)",
            visual.group.resources.len(),
            visual.lights.len()
        );
        map.attach_visual(id, visual.group, visual.lights);

        if let Some(overlay) = overlay {
            backend.add_overlay(&overlay);
            self.overlays.mark_shown(id);
        }
        true
    }

    /// Release the chunk's lights and resources and take its group out of the
    /// scene. Every resource gets a disposal attempt even if earlier ones
    /// fail, and the chunk ends up unloaded regardless.
    pub fn unload<B: RenderBackend + ?Sized>(
        &mut self,
        map: &mut ChunkMap,
        id: ChunkId,
        backend: &mut B,
    ) -> bool {
        let Some((group, lights)) = map.detach_visual(id) else {
            return false;
        };

        for light in &lights {
            self.lights.remove(*light);
        }

        for resource in &group.resources {
            if let Err(e) = backend.dispose(*resource) {
                self.failed_disposals += 1;
                log::warn!("Leaking resource while unloading {id}: {e}");
            }
        }
        backend.remove_group(&group);

        if self.overlays.mark_hidden(id) {
            backend.remove_overlay(id);
        }
        log::trace!("Unloaded {id}");
        true
    }

    /// Show or hide debug overlays for every loaded chunk.
    pub fn set_overlays_enabled<B: RenderBackend + ?Sized>(
        &mut self,
        map: &ChunkMap,
        enabled: bool,
        backend: &mut B,
    ) {
        if enabled == self.overlays.is_enabled() {
            return;
        }
        self.overlays.set_enabled(enabled);
        if enabled {
            for chunk in map.loaded() {
                let overlay = self.overlays.build(chunk);
                backend.add_overlay(&overlay);
                self.overlays.mark_shown(chunk.id);
            }
        } else {
            for id in self.overlays.take_shown() {
                backend.remove_overlay(id);
            }
        }
    }
}
