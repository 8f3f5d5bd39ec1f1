//! Deterministic random number generation
//!
//! Births are the only random outcome in a run. The binary draws them from a
//! ChaCha8 stream seeded from the configuration so that a seed always
//! reproduces the same population.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub type SimRng = ChaCha8Rng;

pub fn seeded(seed: u64) -> SimRng {
    ChaCha8Rng::seed_from_u64(seed)
}

pub trait RngExt {
    /// Uniform draw in `[0, 1)` compared against `probability`.
    fn chance(&mut self, probability: f64) -> bool;
}

impl<R: Rng> RngExt for R {
    fn chance(&mut self, probability: f64) -> bool {
        self.gen::<f64>() < probability
    }
}
