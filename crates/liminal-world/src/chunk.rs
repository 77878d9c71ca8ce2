use crate::lifecycle::RenderGroup;
use glam::Vec2;
use liminal_core::types::{ChunkId, ChunkKind, LightHandle};
use liminal_core::{Direction, MazeConfig};

/// A directional socket on a chunk where exactly one other chunk may attach.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionPoint {
    /// Outward-facing direction of the opening.
    pub direction: Direction,
    /// Offset of the opening from the owning chunk's center.
    pub offset: Vec2,
    /// Chunk attached here. `Some` exactly when the point is connected.
    pub partner: Option<ChunkId>,
}

impl ConnectionPoint {
    pub fn open(direction: Direction, offset: Vec2) -> Self {
        Self {
            direction,
            offset,
            partner: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.partner.is_some()
    }
}

/// Shape-specific data for a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkShape {
    /// Straight corridor running along `direction` and its opposite.
    Hallway { direction: Direction },
    /// Four-way square intersection.
    Junction,
}

/// Graph record for one hallway or junction.
///
/// Records live in the [`ChunkMap`](crate::chunk_map::ChunkMap) for the whole
/// session. Loading attaches a render group and lights; unloading strips them
/// again but keeps the record.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub id: ChunkId,
    pub shape: ChunkShape,
    /// Center on the (x, z) plane.
    pub position: Vec2,
    /// Two entries for a hallway (travel direction first), four for a junction.
    pub connections: Vec<ConnectionPoint>,
    /// Drives the chunk's procedural content via `SeededRandom`.
    pub seed: u32,
    pub(crate) group: Option<RenderGroup>,
    pub(crate) lights: Vec<LightHandle>,
}

impl Chunk {
    pub(crate) fn new(
        id: ChunkId,
        shape: ChunkShape,
        position: Vec2,
        connections: Vec<ConnectionPoint>,
        seed: u32,
    ) -> Self {
        Self {
            id,
            shape,
            position,
            connections,
            seed,
            group: None,
            lights: Vec::new(),
        }
    }

    pub fn kind(&self) -> ChunkKind {
        match self.shape {
            ChunkShape::Hallway { .. } => ChunkKind::Hallway,
            ChunkShape::Junction => ChunkKind::Junction,
        }
    }

    /// Travel direction for hallways, `None` for junctions.
    pub fn direction(&self) -> Option<Direction> {
        match self.shape {
            ChunkShape::Hallway { direction } => Some(direction),
            ChunkShape::Junction => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.group.is_some()
    }

    /// Render group held while loaded.
    pub fn group(&self) -> Option<&RenderGroup> {
        self.group.as_ref()
    }

    /// Lights registered by the mesh builder while loaded.
    pub fn lights(&self) -> &[LightHandle] {
        &self.lights
    }

    pub fn connection(&self, direction: Direction) -> Option<&ConnectionPoint> {
        self.connections.iter().find(|c| c.direction == direction)
    }

    pub(crate) fn connection_mut(&mut self, direction: Direction) -> Option<&mut ConnectionPoint> {
        self.connections.iter_mut().find(|c| c.direction == direction)
    }

    /// World position of a connection opening.
    pub fn opening_position(&self, connection: &ConnectionPoint) -> Vec2 {
        self.position + connection.offset
    }

    pub fn is_fully_connected(&self) -> bool {
        self.connections.iter().all(ConnectionPoint::is_connected)
    }

    /// Floor rectangle of this chunk.
    pub fn footprint(&self, config: &MazeConfig) -> Footprint {
        let half = match self.shape {
            ChunkShape::Hallway { direction } if direction.is_north_south() => {
                Vec2::new(config.half_hallway_width(), config.half_hallway_length())
            }
            ChunkShape::Hallway { .. } => {
                Vec2::new(config.half_hallway_length(), config.half_hallway_width())
            }
            ChunkShape::Junction => Vec2::splat(config.half_junction_size()),
        };
        Footprint {
            center: self.position,
            half_extents: half,
        }
    }

    /// Walkable rectangle: the footprint with hallway walls pulled in by the
    /// wall margin. Junction floors are walkable edge to edge.
    pub fn walkable_area(&self, config: &MazeConfig) -> Footprint {
        let footprint = self.footprint(config);
        let inset = match self.shape {
            ChunkShape::Hallway { direction } if direction.is_north_south() => {
                Vec2::new(config.wall_margin, 0.0)
            }
            ChunkShape::Hallway { .. } => Vec2::new(0.0, config.wall_margin),
            ChunkShape::Junction => Vec2::ZERO,
        };
        footprint.shrink(inset)
    }
}

/// Axis-aligned rectangle on the (x, z) plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Footprint {
    /// Inclusive containment test.
    pub fn contains(&self, point: Vec2) -> bool {
        let d = (point - self.center).abs();
        d.x <= self.half_extents.x && d.y <= self.half_extents.y
    }

    pub fn inflate(&self, margin: f32) -> Footprint {
        Footprint {
            center: self.center,
            half_extents: self.half_extents + Vec2::splat(margin),
        }
    }

    pub fn shrink(&self, inset: Vec2) -> Footprint {
        Footprint {
            center: self.center,
            half_extents: (self.half_extents - inset).max(Vec2::ZERO),
        }
    }
}
