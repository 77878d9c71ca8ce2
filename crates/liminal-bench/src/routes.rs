use glam::Vec2;
use liminal_core::MazeConfig;

/// A scripted observer path through the maze, as lattice waypoints.
pub struct WalkRoute {
    pub name: &'static str,
    /// World-plane waypoints, visited in order starting from the origin.
    pub waypoints: Vec<Vec2>,
}

/// Distance between neighboring junction centers.
pub fn lattice_spacing(config: &MazeConfig) -> f32 {
    config.hallway_length + config.junction_size
}

/// Build a route from junction-to-junction moves. Each step is a cell offset
/// on the junction lattice.
fn route(name: &'static str, spacing: f32, steps: &[(i32, i32)]) -> WalkRoute {
    let mut cell = (0, 0);
    let waypoints = steps
        .iter()
        .map(|(dx, dz)| {
            cell = (cell.0 + dx, cell.1 + dz);
            Vec2::new(cell.0 as f32 * spacing, cell.1 as f32 * spacing)
        })
        .collect();
    WalkRoute { name, waypoints }
}

/// The standard suite of walk routes.
pub fn standard_routes(config: &MazeConfig) -> Vec<WalkRoute> {
    let s = lattice_spacing(config);
    vec![
        // Straight line, never revisits anything.
        route("straight", s, &[(0, 12)]),
        // Alternating turns through fresh junctions.
        route(
            "staircase",
            s,
            &[(0, 1), (1, 0), (0, 1), (1, 0), (0, 1), (1, 0), (0, 1), (1, 0)],
        ),
        // Around a block and back to the start, landing on chunks spawned a
        // second time from the other side.
        route("loop", s, &[(0, 2), (2, 0), (0, -2), (-2, 0)]),
        // Out and back along one corridor, reloading evicted chunks.
        route("out-and-back", s, &[(0, 6), (0, -6), (0, 6), (0, -6)]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waypoints_sit_on_junction_lattice() {
        let config = MazeConfig::default();
        let s = lattice_spacing(&config);
        assert_eq!(s, 20.0);
        for route in standard_routes(&config) {
            for p in &route.waypoints {
                assert_eq!(p.x % s, 0.0, "{} {p}", route.name);
                assert_eq!(p.y % s, 0.0, "{} {p}", route.name);
            }
        }
    }

    #[test]
    fn test_loop_returns_to_origin() {
        let routes = standard_routes(&MazeConfig::default());
        let looped = routes.iter().find(|r| r.name == "loop").expect("loop route");
        assert_eq!(looped.waypoints.last(), Some(&Vec2::ZERO));
    }

    #[test]
    fn test_consecutive_waypoints_share_an_axis() {
        for route in standard_routes(&MazeConfig::default()) {
            let mut prev = Vec2::ZERO;
            for p in &route.waypoints {
                assert!(p.x == prev.x || p.y == prev.y, "{} diagonal at {p}", route.name);
                prev = *p;
            }
        }
    }
}
