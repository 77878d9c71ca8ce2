//! Per-frame intensity flicker for every light in a [`LightRegistry`].

use liminal_world::lights::BASE_LIGHT_INTENSITY;
use liminal_world::LightRegistry;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Lights never drop below this.
pub const MIN_INTENSITY: f32 = 0.1;
/// Chance per light per frame of a brief brownout.
pub const DROPOUT_CHANCE: f64 = 0.02;
const DROPOUT_DEPTH: f32 = 0.3;

pub struct FlickerAnimator {
    rng: StdRng,
}

impl Default for FlickerAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl FlickerAnimator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible dropouts, for tests and benchmarks.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Intensity for the light at `index` at `time` seconds, without dropout.
    pub fn steady_intensity(time: f32, index: usize) -> f32 {
        let i = index as f32;
        BASE_LIGHT_INTENSITY + (time * 8.0 + i * 3.0).sin() * 0.15 + (time * 17.0 + i * 7.0).sin() * 0.08
    }

    /// Write this frame's intensity into every registered light. Lights are
    /// phase-shifted by their registration index.
    pub fn update(&mut self, lights: &mut LightRegistry, time: f32) {
        for (index, light) in lights.iter_mut().enumerate() {
            let dropout = if self.rng.gen_bool(DROPOUT_CHANCE) {
                -DROPOUT_DEPTH
            } else {
                0.0
            };
            light.intensity = (Self::steady_intensity(time, index) + dropout).max(MIN_INTENSITY);
        }
    }
}
