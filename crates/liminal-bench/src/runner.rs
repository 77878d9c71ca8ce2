use std::time::Instant;

use liminal_core::{MazeConfig, MazeError, SeedSource};
use liminal_render::{debug_lines, FlickerAnimator};
use liminal_world::{ChunkEvent, HeadlessBackend, MazeWorld};

use crate::routes::WalkRoute;

/// Seconds of simulated time per tick.
const TICK_SECONDS: f32 = 1.0 / 60.0;

/// Timing data for a single benchmark run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TimingSeries {
    pub mean_ms: f64,
    pub median_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

/// Result of walking a single route.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct WalkResult {
    pub route_name: String,
    pub tick_count: u32,
    /// Chunk records allocated over the whole walk.
    pub chunks_created: u64,
    /// Records still in the store at the end.
    pub final_records: usize,
    pub peak_loaded: usize,
    pub junctions_entered: u32,
    /// Ticks where the observer could not reach the intended position.
    pub blocked_ticks: u32,
    /// Ticks where the observer was outside every loaded chunk.
    pub lost_ticks: u32,
    pub failed_disposals: u64,
    pub timings: TimingSeries,
}

/// Walks an observer along scripted routes through a headless maze.
pub struct WalkRunner {
    config: MazeConfig,
    tick_count: u32,
    step: f32,
    seed: u64,
}

impl WalkRunner {
    /// Fails if `config` does not validate.
    pub fn new(config: MazeConfig, tick_count: u32, step: f32, seed: u64) -> Result<Self, MazeError> {
        config.validate()?;
        Ok(Self {
            config,
            tick_count,
            step,
            seed,
        })
    }

    /// Walk `route` for the configured number of ticks, ping-ponging along
    /// the waypoints, and time each tick.
    pub fn run_route(&self, route: &WalkRoute) -> Result<WalkResult, MazeError> {
        log::info!(
            "Walking route '{}' ({} waypoints)...",
            route.name,
            route.waypoints.len()
        );

        let mut backend = HeadlessBackend::new(&self.config);
        let mut world = MazeWorld::new(self.config.clone(), SeedSource::from_seed(self.seed))?;
        let mut flicker = FlickerAnimator::with_seed(self.seed);
        let mut pos = world.initialize(&mut backend);

        let mut path = route.waypoints.clone();
        path.insert(0, pos);
        let mut target = 1;
        let mut forward = true;

        let mut frame_times = Vec::with_capacity(self.tick_count as usize);
        let mut peak_loaded = world.chunk_map().loaded_count();
        let mut junctions_entered = 0;
        let mut blocked_ticks = 0;
        let mut lost_ticks = 0;
        let mut overlay_vertices = 0;

        for tick in 0..self.tick_count {
            if path.len() > 1 && pos == path[target] {
                (target, forward) = next_target(target, forward, path.len());
            }
            let intended = pos + (path[target] - pos).clamp_length_max(self.step);

            let frame_start = Instant::now();

            pos = world.try_move(pos, intended);
            let update = world.update(pos, &mut backend);
            flicker.update(world.lights_mut(), tick as f32 * TICK_SECONDS);
            if world.debug_overlays_enabled() {
                overlay_vertices = debug_lines::batch_vertices(backend.overlays()).len();
            }

            let elapsed = frame_start.elapsed().as_secs_f64() * 1000.0;
            frame_times.push(elapsed);

            if pos != intended {
                blocked_ticks += 1;
            }
            match update {
                Some(update) => {
                    if let Some(ChunkEvent::JunctionEntered { .. }) = update.event {
                        junctions_entered += 1;
                    }
                }
                None => lost_ticks += 1,
            }
            peak_loaded = peak_loaded.max(world.chunk_map().loaded_count());
        }

        let timings = compute_timings(&frame_times);
        log::info!(
            "  Done: mean={:.3}ms, p95={:.3}ms, p99={:.3}ms",
            timings.mean_ms,
            timings.p95_ms,
            timings.p99_ms
        );
        if overlay_vertices > 0 {
            log::info!("  Debug overlays: {overlay_vertices} line vertices");
        }
        if blocked_ticks > 0 || lost_ticks > 0 {
            log::warn!(
                "  Route '{}': {blocked_ticks} blocked ticks, {lost_ticks} ticks outside the maze",
                route.name
            );
        }

        Ok(WalkResult {
            route_name: route.name.to_string(),
            tick_count: self.tick_count,
            chunks_created: world.chunk_map().allocated_count(),
            final_records: world.chunk_map().len(),
            peak_loaded,
            junctions_entered,
            blocked_ticks,
            lost_ticks,
            failed_disposals: world.failed_disposals(),
            timings,
        })
    }
}

/// Next waypoint index, bouncing off either end of the path.
fn next_target(current: usize, forward: bool, len: usize) -> (usize, bool) {
    match (forward, current) {
        (true, c) if c + 1 < len => (c + 1, true),
        (true, c) => (c - 1, false),
        (false, 0) => (1, true),
        (false, c) => (c - 1, false),
    }
}

/// Compute timing statistics from a list of frame times in milliseconds.
pub fn compute_timings(times: &[f64]) -> TimingSeries {
    if times.is_empty() {
        return TimingSeries {
            mean_ms: 0.0,
            median_ms: 0.0,
            p95_ms: 0.0,
            p99_ms: 0.0,
            min_ms: 0.0,
            max_ms: 0.0,
        };
    }

    let mut sorted = times.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };
    let p95_idx = ((n as f64) * 0.95).ceil() as usize;
    let p99_idx = ((n as f64) * 0.99).ceil() as usize;

    TimingSeries {
        mean_ms: mean,
        median_ms: median,
        p95_ms: sorted[p95_idx.min(n - 1)],
        p99_ms: sorted[p99_idx.min(n - 1)],
        min_ms: sorted[0],
        max_ms: sorted[n - 1],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::standard_routes;

    #[test]
    fn test_timings_of_known_series() {
        let times: Vec<f64> = (1..=100).map(f64::from).collect();
        let t = compute_timings(&times);
        assert_eq!(t.mean_ms, 50.5);
        assert_eq!(t.median_ms, 50.5);
        assert_eq!(t.min_ms, 1.0);
        assert_eq!(t.max_ms, 100.0);
        assert_eq!(t.p95_ms, 96.0);
        assert_eq!(t.p99_ms, 100.0);
    }

    #[test]
    fn test_empty_timings_are_zero() {
        assert_eq!(compute_timings(&[]).max_ms, 0.0);
    }

    #[test]
    fn test_ping_pong_targets() {
        let mut state = (1, true);
        let mut seen = Vec::new();
        for _ in 0..6 {
            state = next_target(state.0, state.1, 3);
            seen.push(state.0);
        }
        assert_eq!(seen, vec![2, 1, 0, 1, 2, 1]);
    }

    #[test]
    fn test_every_route_walks_cleanly() {
        let config = MazeConfig::default();
        let max = config.max_loaded_chunks;
        let runner = WalkRunner::new(config.clone(), 1500, 0.5, 11).expect("valid");
        for route in standard_routes(&config) {
            let result = runner.run_route(&route).expect("runs");
            assert_eq!(result.blocked_ticks, 0, "{}", route.name);
            assert_eq!(result.lost_ticks, 0, "{}", route.name);
            assert!(result.peak_loaded <= max, "{}", route.name);
            assert!(result.junctions_entered > 0, "{}", route.name);
            assert_eq!(result.failed_disposals, 0);
        }
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = MazeConfig {
            hallway_length: -1.0,
            ..MazeConfig::default()
        };
        assert!(WalkRunner::new(config, 10, 0.5, 0).is_err());
    }
}
