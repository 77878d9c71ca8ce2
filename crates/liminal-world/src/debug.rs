//! Debug overlays: chunk bounds, openings and id labels drawn over loaded chunks.
//! Purely observational; nothing here feeds back into streaming.

use crate::chunk::{Chunk, ChunkShape};
use glam::Vec2;
use liminal_core::types::ChunkId;
use liminal_core::MazeConfig;
use std::collections::BTreeSet;

/// What a debug line marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Chunk boundary, diagonals and center marks.
    Bounds,
    /// Where a hallway meets a junction.
    Opening,
}

/// A segment in chunk-local (x, z) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayLine {
    pub from: Vec2,
    pub to: Vec2,
    pub kind: LineKind,
}

/// Wireframe and label for one loaded chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct DebugOverlay {
    pub chunk: ChunkId,
    /// World placement of the local coordinates below.
    pub position: Vec2,
    pub lines: Vec<OverlayLine>,
    pub label: String,
}

/// Tracks whether overlays are on and which chunks currently show one.
#[derive(Debug)]
pub struct DebugOverlays {
    enabled: bool,
    shown: BTreeSet<ChunkId>,
    half_length: f32,
    half_width: f32,
    half_junction: f32,
}

impl DebugOverlays {
    pub fn new(config: &MazeConfig) -> Self {
        Self {
            enabled: config.debug_overlays,
            shown: BTreeSet::new(),
            half_length: config.half_hallway_length(),
            half_width: config.half_hallway_width(),
            half_junction: config.half_junction_size(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn shown(&self) -> &BTreeSet<ChunkId> {
        &self.shown
    }

    pub(crate) fn mark_shown(&mut self, id: ChunkId) {
        self.shown.insert(id);
    }

    /// Returns whether an overlay was showing for `id`.
    pub(crate) fn mark_hidden(&mut self, id: ChunkId) -> bool {
        self.shown.remove(&id)
    }

    pub(crate) fn take_shown(&mut self) -> BTreeSet<ChunkId> {
        std::mem::take(&mut self.shown)
    }

    /// Build the overlay for a chunk.
    pub fn build(&self, chunk: &Chunk) -> DebugOverlay {
        let (lines, label) = match chunk.shape {
            ChunkShape::Hallway { direction } => {
                let half = if direction.is_north_south() {
                    Vec2::new(self.half_width, self.half_length)
                } else {
                    Vec2::new(self.half_length, self.half_width)
                };
                let mut lines = rectangle(half);
                lines.push(bounds(-half, half));
                (lines, format!("H:{} ({direction})", chunk.id.0))
            }
            ChunkShape::Junction => {
                let s = self.half_junction;
                let w = self.half_width;
                let mut lines = rectangle(Vec2::splat(s));
                lines.extend([
                    opening(Vec2::new(-w, s), Vec2::new(w, s)),
                    opening(Vec2::new(-w, -s), Vec2::new(w, -s)),
                    opening(Vec2::new(s, -w), Vec2::new(s, w)),
                    opening(Vec2::new(-s, -w), Vec2::new(-s, w)),
                ]);
                let c = s * 0.5;
                lines.push(bounds(Vec2::new(-c, -c), Vec2::new(c, c)));
                lines.push(bounds(Vec2::new(c, -c), Vec2::new(-c, c)));
                (lines, format!("J:{}", chunk.id.0))
            }
        };
        DebugOverlay {
            chunk: chunk.id,
            position: chunk.position,
            lines,
            label,
        }
    }
}

fn bounds(from: Vec2, to: Vec2) -> OverlayLine {
    OverlayLine {
        from,
        to,
        kind: LineKind::Bounds,
    }
}

fn opening(from: Vec2, to: Vec2) -> OverlayLine {
    OverlayLine {
        from,
        to,
        kind: LineKind::Opening,
    }
}

/// Closed rectangle centered on the origin.
fn rectangle(half: Vec2) -> Vec<OverlayLine> {
    let corners = [
        Vec2::new(-half.x, -half.y),
        Vec2::new(half.x, -half.y),
        Vec2::new(half.x, half.y),
        Vec2::new(-half.x, half.y),
    ];
    (0..4)
        .map(|i| bounds(corners[i], corners[(i + 1) % 4]))
        .collect()
}
