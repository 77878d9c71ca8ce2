//! Per-tick streaming: locate the observer, grow the graph nearby, load the
//! neighborhood and evict the most distant chunks once over budget.

use crate::chunk_map::ChunkMap;
use crate::expansion::expand;
use crate::lifecycle::{ChunkLifecycle, RenderBackend};
use crate::locator::find_current_chunk;
use glam::Vec2;
use liminal_core::types::{ChunkId, ChunkKind};
use liminal_core::MazeConfig;
use std::collections::BTreeSet;

/// Metadata about the chunk the observer is standing in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentChunkInfo {
    pub id: ChunkId,
    pub kind: ChunkKind,
    /// The current chunk differs from the previous tick's.
    pub changed: bool,
    pub position: Vec2,
}

/// One-shot events for other subsystems (audio, UI) to react to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChunkEvent {
    /// The observer stepped into a junction other than the last one entered.
    JunctionEntered { id: ChunkId, position: Vec2 },
}

/// Outcome of one streaming tick.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamingUpdate {
    pub current: CurrentChunkInfo,
    pub event: Option<ChunkEvent>,
    /// Chunks loaded during this tick.
    pub loaded: usize,
    /// Chunks evicted during this tick.
    pub evicted: usize,
    /// Size of the keep set (current chunk plus its streaming neighborhood).
    pub kept: usize,
}

/// Tracks the observer's current chunk between ticks.
#[derive(Debug, Default)]
pub struct StreamingController {
    current: Option<ChunkId>,
    last_junction: Option<ChunkId>,
}

impl StreamingController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<ChunkId> {
        self.current
    }

    /// Record the starting chunk without reporting a change.
    pub fn set_current(&mut self, id: ChunkId) {
        self.current = Some(id);
    }

    /// Run one streaming tick for an observer at `point`.
    ///
    /// Returns `None` without touching the graph if the observer is outside
    /// every loaded chunk; callers keep their previous state in that case.
    pub fn update<B: RenderBackend + ?Sized>(
        &mut self,
        map: &mut ChunkMap,
        lifecycle: &mut ChunkLifecycle,
        backend: &mut B,
        config: &MazeConfig,
        point: Vec2,
    ) -> Option<StreamingUpdate> {
        let Some(current_id) = find_current_chunk(map, config, point) else {
            log::trace!("Observer at ({}, {}) is outside every loaded chunk", point.x, point.y);
            return None;
        };
        let current = map.get(current_id)?;
        let info = CurrentChunkInfo {
            id: current_id,
            kind: current.kind(),
            changed: self.current != Some(current_id),
            position: current.position,
        };
        self.current = Some(current_id);

        let event = self.junction_event(&info);

        expand(map, current_id);

        let mut keep = BTreeSet::from([current_id]);
        let mut loaded = 0;
        let mut frontier = vec![current_id];
        for hop in 1..=config.streaming_horizon {
            let mut next = Vec::new();
            for id in frontier {
                for neighbor in map.neighbors(id) {
                    if !keep.insert(neighbor) {
                        continue;
                    }
                    if lifecycle.load(map, neighbor, backend) {
                        loaded += 1;
                    }
                    if hop < config.streaming_horizon {
                        expand(map, neighbor);
                    }
                    next.push(neighbor);
                }
            }
            frontier = next;
        }

        let evicted = enforce_budget(
            map,
            lifecycle,
            backend,
            point,
            &keep,
            config.max_loaded_chunks,
        );

        if info.changed {
            log::debug!(
                "Entered {} {} ({} loaded, {} records)",
                info.kind,
                info.id,
                map.loaded_count(),
                map.len()
            );
        }

        Some(StreamingUpdate {
            current: info,
            event,
            loaded,
            evicted,
            kept: keep.len(),
        })
    }

    fn junction_event(&mut self, info: &CurrentChunkInfo) -> Option<ChunkEvent> {
        if !info.changed || info.kind != ChunkKind::Junction {
            return None;
        }
        if self.last_junction == Some(info.id) {
            return None;
        }
        self.last_junction = Some(info.id);
        Some(ChunkEvent::JunctionEntered {
            id: info.id,
            position: info.position,
        })
    }
}

/// Unload the loaded chunks furthest from `point` until at most `max_loaded`
/// remain, never touching anything in `keep`. Equally distant chunks are
/// evicted oldest first. Returns the number of chunks evicted.
pub fn enforce_budget<B: RenderBackend + ?Sized>(
    map: &mut ChunkMap,
    lifecycle: &mut ChunkLifecycle,
    backend: &mut B,
    point: Vec2,
    keep: &BTreeSet<ChunkId>,
    max_loaded: usize,
) -> usize {
    if map.loaded_count() <= max_loaded {
        return 0;
    }

    let mut ranked: Vec<(ChunkId, f32)> = map
        .loaded()
        .map(|c| (c.id, c.position.distance(point)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut evicted = 0;
    for (id, _) in ranked {
        if map.loaded_count() <= max_loaded {
            break;
        }
        if keep.contains(&id) {
            continue;
        }
        if lifecycle.unload(map, id, backend) {
            evicted += 1;
        }
    }

    if map.loaded_count() > max_loaded {
        log::debug!(
            "Keep set of {} holds {} chunks over the budget of {max_loaded}",
            keep.len(),
            map.loaded_count() - max_loaded
        );
    }
    evicted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::DebugOverlays;
    use crate::headless::HeadlessBackend;
    use liminal_core::{Direction, SeedSource};

    struct Fixture {
        config: MazeConfig,
        map: ChunkMap,
        lifecycle: ChunkLifecycle,
        backend: HeadlessBackend,
        streaming: StreamingController,
    }

    impl Fixture {
        fn new(config: MazeConfig) -> Self {
            let map = ChunkMap::new(&config, SeedSource::from_seed(21));
            let lifecycle = ChunkLifecycle::new(DebugOverlays::new(&config));
            let backend = HeadlessBackend::new(&config);
            Self {
                config,
                map,
                lifecycle,
                backend,
                streaming: StreamingController::new(),
            }
        }

        fn update(&mut self, point: Vec2) -> Option<StreamingUpdate> {
            self.streaming.update(
                &mut self.map,
                &mut self.lifecycle,
                &mut self.backend,
                &self.config,
                point,
            )
        }

        /// A single loaded junction at the origin, not yet expanded.
        fn with_origin(config: MazeConfig) -> (Self, ChunkId) {
            let mut f = Self::new(config);
            let origin = f.map.create_junction(Vec2::ZERO);
            f.lifecycle.load(&mut f.map, origin, &mut f.backend);
            (f, origin)
        }
    }

    #[test]
    fn test_miss_leaves_graph_untouched() {
        let (mut f, _) = Fixture::with_origin(MazeConfig::default());
        assert!(f.update(Vec2::new(100.0, 100.0)).is_none());
        assert_eq!(f.map.len(), 1);
        assert_eq!(f.streaming.current(), None);
    }

    #[test]
    fn test_first_tick_expands_two_hops() {
        let (mut f, origin) = Fixture::with_origin(MazeConfig {
            max_loaded_chunks: 100,
            ..MazeConfig::default()
        });
        let update = f.update(Vec2::ZERO).expect("located");
        assert_eq!(update.current.id, origin);
        assert!(update.current.changed);
        assert_eq!(update.current.kind, ChunkKind::Junction);

        // Origin expanded (4 hallways + 4 junctions); each hallway is already
        // fully connected, so nothing else grows.
        assert_eq!(f.map.len(), 9);
        assert_eq!(f.map.loaded_count(), 9);
        assert_eq!(update.loaded, 8);
        assert_eq!(update.kept, 9);
    }

    #[test]
    fn test_unchanged_tick_reports_no_change() {
        let (mut f, _) = Fixture::with_origin(MazeConfig::default());
        f.update(Vec2::ZERO);
        let second = f.update(Vec2::new(0.5, 0.5)).expect("located");
        assert!(!second.current.changed);
        assert_eq!(second.loaded, 0);
    }

    #[test]
    fn test_junction_event_once_per_junction() {
        let (mut f, origin) = Fixture::with_origin(MazeConfig::default());
        f.streaming.set_current(origin);
        let first = f.update(Vec2::ZERO).expect("located");
        assert_eq!(first.event, None, "starting junction is not an entry");

        f.update(Vec2::new(0.0, 9.0)).expect("hallway");
        let back = f.update(Vec2::ZERO).expect("origin");
        assert!(back.current.changed);
        assert_eq!(
            back.event,
            Some(ChunkEvent::JunctionEntered {
                id: origin,
                position: Vec2::ZERO
            })
        );

        f.update(Vec2::new(0.0, 9.0)).expect("hallway");
        let again = f.update(Vec2::ZERO).expect("origin");
        assert_eq!(again.event, None);
    }

    #[test]
    fn test_budget_evicts_farthest_outside_keep() {
        let (mut f, _) = Fixture::with_origin(MazeConfig {
            max_loaded_chunks: 12,
            ..MazeConfig::default()
        });
        f.update(Vec2::ZERO);
        // Walk north through the hallway into the far junction and beyond.
        for z in [9.0, 20.0, 29.0, 40.0, 49.0, 60.0] {
            let update = f.update(Vec2::new(0.0, z)).expect("located");
            assert!(
                f.map.loaded_count() <= 12 || update.kept > 12,
                "budget exceeded at z={z}: {} loaded, keep {}",
                f.map.loaded_count(),
                update.kept
            );
        }
        // The origin junction is now far behind and evicted.
        let origin = f.map.get(ChunkId(0)).expect("record kept");
        assert!(!origin.is_loaded());
    }

    #[test]
    fn test_keep_set_overrides_budget() {
        let (mut f, _) = Fixture::with_origin(MazeConfig {
            max_loaded_chunks: 3,
            ..MazeConfig::default()
        });
        let update = f.update(Vec2::ZERO).expect("located");
        assert_eq!(update.kept, 9);
        assert_eq!(f.map.loaded_count(), 9);
        assert_eq!(update.evicted, 0);
    }

    #[test]
    fn test_enforce_budget_tie_break_is_oldest_first() {
        let config = MazeConfig::default();
        let mut map = ChunkMap::new(&config, SeedSource::from_seed(0));
        let mut lifecycle = ChunkLifecycle::new(DebugOverlays::new(&config));
        let mut backend = HeadlessBackend::new(&config);
        let a = map.create_junction(Vec2::new(10.0, 0.0));
        let b = map.create_junction(Vec2::new(-10.0, 0.0));
        let c = map.create_junction(Vec2::new(0.0, 1.0));
        for id in [a, b, c] {
            lifecycle.load(&mut map, id, &mut backend);
        }
        let keep = BTreeSet::new();
        let evicted = enforce_budget(&mut map, &mut lifecycle, &mut backend, Vec2::ZERO, &keep, 2);
        assert_eq!(evicted, 1);
        assert!(!map.is_loaded(a));
        assert!(map.is_loaded(b));
        assert!(map.is_loaded(c));
    }

    #[test]
    fn test_horizon_one_loads_only_direct_neighbors() {
        let (mut f, origin) = Fixture::with_origin(MazeConfig {
            streaming_horizon: 1,
            max_loaded_chunks: 100,
            ..MazeConfig::default()
        });
        let update = f.update(Vec2::ZERO).expect("located");
        assert_eq!(update.kept, 5);
        assert_eq!(f.map.loaded_count(), 5);
        let far_loaded = f
            .map
            .loaded()
            .filter(|c| c.kind() == ChunkKind::Junction && c.id != origin)
            .count();
        assert_eq!(far_loaded, 0);
    }

    #[test]
    fn test_walk_east_loads_east_hallway() {
        let (mut f, _) = Fixture::with_origin(MazeConfig::default());
        f.update(Vec2::ZERO);
        let update = f.update(Vec2::new(9.0, 0.0)).expect("located");
        let chunk = f.map.get(update.current.id).expect("exists");
        assert_eq!(chunk.direction(), Some(Direction::East));
    }
}
