use glam::Vec2;
use liminal_core::types::{ChunkId, ChunkKind};
use liminal_core::{MazeConfig, SeedSource, SeededRandom};
use liminal_world::{HeadlessBackend, MazeWorld, StreamingUpdate};

fn fresh(config: MazeConfig, seed: u64) -> (MazeWorld, HeadlessBackend, Vec2) {
    let mut backend = HeadlessBackend::new(&config);
    let mut world = MazeWorld::new(config, SeedSource::from_seed(seed)).expect("valid config");
    let start = world.initialize(&mut backend);
    (world, backend, start)
}

/// Step toward `target` in increments of at most `step`, ticking streaming
/// after each move. Returns the final position.
fn walk_to(
    world: &mut MazeWorld,
    backend: &mut HeadlessBackend,
    mut pos: Vec2,
    target: Vec2,
    step: f32,
    mut on_tick: impl FnMut(&MazeWorld, Option<StreamingUpdate>),
) -> Vec2 {
    while pos.distance(target) > 1e-3 {
        let delta = target - pos;
        let next = pos + delta.clamp_length_max(step);
        pos = world.try_move(pos, next);
        let update = world.update(pos, backend);
        on_tick(world, update);
        if pos != next {
            break;
        }
    }
    pos
}

fn assert_symmetric(world: &MazeWorld) {
    let map = world.chunk_map();
    for chunk in map.iter() {
        for point in &chunk.connections {
            let Some(partner_id) = point.partner else {
                continue;
            };
            let partner = map
                .get(partner_id)
                .unwrap_or_else(|| panic!("{} points at missing {partner_id}", chunk.id));
            let back = partner
                .connection(point.direction.opposite())
                .unwrap_or_else(|| panic!("{partner_id} lacks {}", point.direction.opposite()));
            assert_eq!(back.partner, Some(chunk.id), "{} -> {partner_id}", chunk.id);
        }
    }
}

/// North into the first hallway, through the far junction, east, then north
/// again: two turns and several junctions.
const ROUTE: [Vec2; 5] = [
    Vec2::new(0.0, 20.0),
    Vec2::new(20.0, 20.0),
    Vec2::new(20.0, 60.0),
    Vec2::new(60.0, 60.0),
    Vec2::new(60.0, 100.0),
];

#[test]
fn test_step_into_north_hallway() {
    let (mut world, mut backend, _) = fresh(MazeConfig::default(), 1);
    let update = world
        .update(Vec2::new(0.0, 9.0), &mut backend)
        .expect("located");
    assert_eq!(update.current.kind, ChunkKind::Hallway);
    assert!(update.current.changed);
    assert_eq!(update.current.position, Vec2::new(0.0, 10.0));
    assert!(world.chunk_map().loaded_count() <= world.config().max_loaded_chunks);
}

#[test]
fn test_origin_resolves_to_origin_junction() {
    let (world, _, start) = fresh(MazeConfig::default(), 2);
    let id = world.find_current_chunk(start).expect("located");
    assert_eq!(id, ChunkId(0));
    let chunk = world.chunk_map().get(id).expect("exists");
    assert_eq!(chunk.kind(), ChunkKind::Junction);
    assert_eq!(chunk.position, Vec2::ZERO);
}

#[test]
fn test_long_walk_keeps_invariants() {
    let config = MazeConfig::default();
    let max = config.max_loaded_chunks;
    let (mut world, mut backend, mut pos) = fresh(config, 3);

    let mut ticks = 0;
    for target in ROUTE {
        pos = walk_to(&mut world, &mut backend, pos, target, 0.25, |world, update| {
            ticks += 1;
            let update = update.expect("observer always inside a loaded chunk");
            assert!(
                world.chunk_map().loaded_count() <= max || update.kept > max,
                "{} loaded with keep set {}",
                world.chunk_map().loaded_count(),
                update.kept
            );
        });
        assert_eq!(pos, target, "blocked on the way to {target}");
    }
    assert!(ticks > 500);
    assert_symmetric(&world);

    // Every loaded chunk owns a live group, and nothing else is live.
    assert_eq!(backend.live_group_count(), world.chunk_map().loaded_count());
    let group_lights: usize = world.chunk_map().loaded().map(|c| c.lights().len()).sum();
    assert_eq!(world.lights().len(), group_lights);
    assert_eq!(world.failed_disposals(), 0);
}

#[test]
fn test_junction_entries_reported_once_each() {
    let (mut world, mut backend, mut pos) = fresh(MazeConfig::default(), 4);
    let mut entered = Vec::new();
    for target in ROUTE {
        pos = walk_to(&mut world, &mut backend, pos, target, 0.5, |_, update| {
            if let Some(liminal_world::ChunkEvent::JunctionEntered { position, .. }) =
                update.and_then(|u| u.event)
            {
                entered.push(position);
            }
        });
    }
    assert_eq!(
        entered,
        vec![
            Vec2::new(0.0, 20.0),
            Vec2::new(20.0, 20.0),
            Vec2::new(20.0, 40.0),
            Vec2::new(20.0, 60.0),
            Vec2::new(40.0, 60.0),
            Vec2::new(60.0, 60.0),
            Vec2::new(60.0, 80.0),
            Vec2::new(60.0, 100.0),
        ]
    );
}

#[test]
fn test_walking_back_reloads_evicted_chunks() {
    let (mut world, mut backend, mut pos) = fresh(MazeConfig::default(), 5);
    pos = walk_to(&mut world, &mut backend, pos, Vec2::new(0.0, 80.0), 0.5, |_, _| {});
    assert!(!world.chunk_map().is_loaded(ChunkId(0)));

    pos = walk_to(&mut world, &mut backend, pos, Vec2::ZERO, 0.5, |_, _| {});
    assert_eq!(pos, Vec2::ZERO);
    assert!(world.chunk_map().is_loaded(ChunkId(0)));
    assert_eq!(world.current_chunk(), Some(ChunkId(0)));
    assert_symmetric(&world);
}

#[test]
fn test_collision_consistent_with_locator() {
    let (world, _, _) = fresh(MazeConfig::default(), 6);
    let inside = [
        Vec2::ZERO,
        Vec2::new(0.0, 9.0),
        Vec2::new(-9.0, 0.5),
        Vec2::new(0.5, -15.0),
        Vec2::new(20.0, 0.0),
    ];
    for point in inside {
        assert!(world.find_current_chunk(point).is_some(), "{point} not located");
        assert!(!world.check_wall_collision(point), "{point} blocked");
    }

    let far = [Vec2::new(100.0, 100.0), Vec2::new(-50.0, 3.0), Vec2::new(10.0, 10.0)];
    for point in far {
        assert!(world.find_current_chunk(point).is_none(), "{point} located");
        assert!(world.check_wall_collision(point), "{point} open");
    }
}

#[test]
fn test_chunk_seeds_drive_identical_draws() {
    let (world, _, _) = fresh(MazeConfig::default(), 7);
    let seed = world.chunk_map().get(ChunkId(3)).expect("exists").seed;
    let a: Vec<f64> = SeededRandom::new(u64::from(seed)).take(10).collect();
    let b: Vec<f64> = SeededRandom::new(u64::from(seed)).take(10).collect();
    assert_eq!(a, b);
}

#[test]
fn test_same_source_seed_builds_same_maze() {
    let (a, _, _) = fresh(MazeConfig::default(), 8);
    let (b, _, _) = fresh(MazeConfig::default(), 8);
    let seeds_a: Vec<u32> = a.chunk_map().iter().map(|c| c.seed).collect();
    let seeds_b: Vec<u32> = b.chunk_map().iter().map(|c| c.seed).collect();
    assert_eq!(seeds_a, seeds_b);
}
