//! Random sources for the sim
//!
//! Reels draw symbols from their own seeded `Pcg32`. The win check draws
//! from a `RandomSource` so it can be replaced in tests.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform samples in `[0, 1)`
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

/// Seeded PCG source
#[derive(Debug, Clone)]
pub struct SeededRandom(Pcg32);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(Pcg32::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Generator for reel `index`, one stream per reel
pub fn reel_rng(seed: u64, index: usize) -> Pcg32 {
    Pcg32::new(seed, index as u64 + 1)
}
