pub mod chunk;
pub mod chunk_map;
pub mod collision;
pub mod debug;
pub mod expansion;
pub mod headless;
pub mod lifecycle;
pub mod lights;
pub mod locator;
pub mod prune;
pub mod streaming;

pub use chunk::{Chunk, ChunkShape, ConnectionPoint, Footprint};
pub use chunk_map::ChunkMap;
pub use debug::{DebugOverlay, LineKind, OverlayLine};
pub use headless::HeadlessBackend;
pub use lifecycle::{BuiltVisual, DisposeError, MeshBuilder, RenderBackend, RenderGroup, Scene};
pub use lights::{LightRegistry, TrackedLight};
pub use streaming::{ChunkEvent, CurrentChunkInfo, StreamingUpdate};

use debug::DebugOverlays;
use expansion::expand;
use glam::Vec2;
use lifecycle::ChunkLifecycle;
use liminal_core::types::{ChunkId, ChunkKind};
use liminal_core::{MazeConfig, MazeError, SeedSource};
use streaming::StreamingController;

/// Primary public struct for the liminal-world crate.
/// Owns the chunk graph, its render lifecycle and the streaming state.
pub struct MazeWorld {
    config: MazeConfig,
    chunk_map: ChunkMap,
    lifecycle: ChunkLifecycle,
    streaming: StreamingController,
}

impl MazeWorld {
    /// Create an empty world. Fails if the config does not validate.
    pub fn new(config: MazeConfig, seeds: SeedSource) -> Result<Self, MazeError> {
        config.validate()?;
        let chunk_map = ChunkMap::new(&config, seeds);
        let lifecycle = ChunkLifecycle::new(DebugOverlays::new(&config));
        Ok(Self {
            config,
            chunk_map,
            lifecycle,
            streaming: StreamingController::new(),
        })
    }

    /// Build and load the starting neighborhood: the origin junction, its
    /// four hallways and the junctions at their far ends. Returns the
    /// observer's start position.
    pub fn initialize<B: RenderBackend + ?Sized>(&mut self, backend: &mut B) -> Vec2 {
        let origin = self.chunk_map.create_junction(Vec2::ZERO);
        expand(&mut self.chunk_map, origin);
        self.lifecycle.load(&mut self.chunk_map, origin, backend);

        for hallway in self.chunk_map.neighbors(origin) {
            self.lifecycle.load(&mut self.chunk_map, hallway, backend);
            expand(&mut self.chunk_map, hallway);
            for junction in self.chunk_map.neighbors(hallway) {
                self.lifecycle.load(&mut self.chunk_map, junction, backend);
            }
        }

        self.streaming.set_current(origin);
        log::info!(
            "Maze initialized: {} chunks, {} loaded",
            self.chunk_map.len(),
            self.chunk_map.loaded_count()
        );
        Vec2::ZERO
    }

    /// Run one streaming tick for an observer at `point`, then prune distant
    /// records if configured.
    pub fn update<B: RenderBackend + ?Sized>(
        &mut self,
        point: Vec2,
        backend: &mut B,
    ) -> Option<StreamingUpdate> {
        let update = self.streaming.update(
            &mut self.chunk_map,
            &mut self.lifecycle,
            backend,
            &self.config,
            point,
        )?;
        if let Some(horizon) = self.config.prune_horizon {
            prune::prune_distant(&mut self.chunk_map, horizon);
        }
        Some(update)
    }

    pub fn check_wall_collision(&self, point: Vec2) -> bool {
        collision::check_wall_collision(&self.chunk_map, &self.config, point)
    }

    pub fn try_move(&self, from: Vec2, to: Vec2) -> Vec2 {
        collision::try_move(&self.chunk_map, &self.config, from, to)
    }

    pub fn find_current_chunk(&self, point: Vec2) -> Option<ChunkId> {
        locator::find_current_chunk(&self.chunk_map, &self.config, point)
    }

    pub fn set_debug_overlays<B: RenderBackend + ?Sized>(&mut self, enabled: bool, backend: &mut B) {
        self.lifecycle
            .set_overlays_enabled(&self.chunk_map, enabled, backend);
    }

    pub fn debug_overlays_enabled(&self) -> bool {
        self.lifecycle.overlays().is_enabled()
    }

    pub fn lights(&self) -> &LightRegistry {
        self.lifecycle.lights()
    }

    pub fn lights_mut(&mut self) -> &mut LightRegistry {
        self.lifecycle.lights_mut()
    }

    pub fn failed_disposals(&self) -> u64 {
        self.lifecycle.failed_disposals()
    }

    /// Get the chunk map for reading.
    pub fn chunk_map(&self) -> &ChunkMap {
        &self.chunk_map
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn current_chunk(&self) -> Option<ChunkId> {
        self.streaming.current()
    }

    pub fn current_kind(&self) -> Option<ChunkKind> {
        self.current_chunk()
            .and_then(|id| self.chunk_map.get(id))
            .map(Chunk::kind)
    }
}
