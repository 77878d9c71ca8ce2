//! Random sources for maze generation.
//!
//! Two distinct things live here:
//! - [`SeededRandom`]: a tiny deterministic sequence driven by a chunk seed.
//!   Procedural content (door layout, decoration placement) draws from it, so
//!   the same seed always produces the same content.
//! - [`SeedSource`]: hands out the seeds themselves. In production it is
//!   seeded from OS entropy and is not reproducible across runs.

use crate::constants::SEED_RANGE;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const LCG_MULTIPLIER: u64 = 9301;
const LCG_INCREMENT: u64 = 49297;
const LCG_MODULUS: u64 = 233_280;

/// Linear congruential sequence yielding floats in `[0, 1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRandom {
    state: u64,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        // Reducing first keeps the arithmetic in range without changing the sequence.
        Self {
            state: seed % LCG_MODULUS,
        }
    }

    /// Next draw in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
        self.state as f64 / LCG_MODULUS as f64
    }

    pub fn next_f32(&mut self) -> f32 {
        self.next_f64() as f32
    }

    /// Uniform draw in `[lo, hi)`.
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f32()
    }

    /// True with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

impl Iterator for SeededRandom {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_f64())
    }
}

/// Source of per-chunk seeds.
#[derive(Debug, Clone)]
pub struct SeedSource {
    rng: StdRng,
}

impl SeedSource {
    /// Non-reproducible source seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible source, for tests and recorded benchmark runs.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Next chunk seed in `0..SEED_RANGE`.
    pub fn next_seed(&mut self) -> u32 {
        self.rng.gen_range(0..SEED_RANGE)
    }
}

impl Default for SeedSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}
