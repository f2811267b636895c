//! Seedable simulation RNG.
//!
//! # Determinism strategy
//!
//! A population owns exactly one `SimRng`, handed to it at construction.
//! There is no ambient or thread-local generator anywhere in the workspace,
//! so a run is fully determined by:
//!
//!   (seed, initial population, sequence of `affect` calls)
//!
//! Independent scenarios (e.g. a batch of seeds run in parallel) each derive
//! their own stream with [`SimRng::child`]; streams never share state.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Simulation-level RNG.
///
/// Not `Sync` by intent: if you need parallel randomness, give each worker
/// its own `SimRng` derived from a root one.
#[derive(Clone, Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset — useful for
    /// seeding per-scenario RNGs deterministically from the root seed.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Uniform position in `[0, upper)`.
    ///
    /// # Panics
    /// Panics if `upper == 0`; callers check for an empty range first.
    #[inline]
    pub fn position(&mut self, upper: u64) -> u64 {
        self.0.gen_range(0..upper)
    }
}
