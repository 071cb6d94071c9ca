//! Seeded random source for basket and obstacle placement
//!
//! A PCG32 stream seeded once per run. The generator state is serialized with
//! the game state so a snapshot replays identically.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Random number provider for the simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimRng {
    /// Seed the stream started from (kept for logs and replays)
    pub seed: u64,
    rng: Pcg32,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Uniform integer in `[min, max]` (both inclusive)
    ///
    /// Callers guarantee `min <= max`; an inverted range collapses to `min`.
    #[inline]
    pub fn range_inclusive(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..=max)
    }
}
