use liminal_world::{DebugOverlay, LineKind};

/// Lines sit just above the floor so they do not z-fight with it.
const BOUNDS_HEIGHT: f32 = 0.02;
const OPENING_HEIGHT: f32 = 0.03;
/// Height of the chunk label above the floor.
pub const LABEL_HEIGHT: f32 = 0.5;

const BOUNDS_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const OPENING_COLOR: [f32; 4] = [0.0, 1.0, 0.0, 1.0];

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DebugVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl DebugVertex {
    pub fn new(position: [f32; 3], color: [f32; 4]) -> Self {
        Self { position, color }
    }
}

/// Line-list vertices for an overlay in world space (2 verts per line).
/// Bounds are red, openings green.
pub fn overlay_vertices(overlay: &DebugOverlay) -> Vec<DebugVertex> {
    let origin = overlay.position;
    let mut verts = Vec::with_capacity(overlay.lines.len() * 2);
    for line in &overlay.lines {
        let (y, color) = match line.kind {
            LineKind::Bounds => (BOUNDS_HEIGHT, BOUNDS_COLOR),
            LineKind::Opening => (OPENING_HEIGHT, OPENING_COLOR),
        };
        for p in [line.from, line.to] {
            let world = origin + p;
            verts.push(DebugVertex::new([world.x, y, world.y], color));
        }
    }
    verts
}

/// World-space anchor for the overlay's text label.
pub fn label_anchor(overlay: &DebugOverlay) -> [f32; 3] {
    [overlay.position.x, LABEL_HEIGHT, overlay.position.y]
}

/// Concatenate the vertices of many overlays into one line-list buffer.
pub fn batch_vertices<'a>(overlays: impl IntoIterator<Item = &'a DebugOverlay>) -> Vec<DebugVertex> {
    overlays.into_iter().flat_map(overlay_vertices).collect()
}
