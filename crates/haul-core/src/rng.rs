//! Seeded RNG for board generation.
//!
//! The simulation itself is driven by wall-clock threads and is not
//! reproducible; only the *inputs* (random boards) are.  The same seed always
//! produces the same board description.

use rand::distributions::uniform::SampleUniform;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Split off an independent stream.  Each part of a generator (topology,
    /// fleet, cargo) draws from its own child so changing one part's draws
    /// leaves the others untouched.
    pub fn child(&mut self, stream: u64) -> SimRng {
        let seed = self.0.r#gen::<u64>() ^ stream.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform draw from the inclusive range `lo..=hi`.  An inverted range
    /// collapses to `lo`.
    pub fn between<T>(&mut self, lo: T, hi: T) -> T
    where
        T: SampleUniform + PartialOrd + Copy,
    {
        if hi <= lo { lo } else { self.0.gen_range(lo..=hi) }
    }

    /// Uniform index in `0..n`.  `n` must be positive.
    #[inline]
    pub fn index(&mut self, n: usize) -> usize {
        self.0.gen_range(0..n.max(1))
    }

    /// Uniform index in `0..n` other than `not`.  `n` must be at least 2.
    pub fn index_except(&mut self, n: usize, not: usize) -> usize {
        let i = self.0.gen_range(0..n.saturating_sub(1).max(1));
        if i >= not { i + 1 } else { i }
    }

    /// `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.0)
    }

    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.0);
    }
}
