pub mod debug_lines;
pub mod flicker;

pub use debug_lines::{overlay_vertices, DebugVertex};
pub use flicker::FlickerAnimator;
