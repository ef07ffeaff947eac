//! Deterministic simulation-level RNG.
//!
//! Synthetic site placement must be reproducible: the same seed always yields
//! the same site positions, so an audit file from one run can be regenerated
//! exactly.  `SimRng` wraps a seeded `SmallRng` and is the only randomness
//! source in the workspace.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seeded RNG for setup-time randomness.
///
/// Used only in single-threaded contexts.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
