//! Deterministic, injectable simulation RNG.
//!
//! # Determinism strategy
//!
//! A run owns exactly one [`SimRng`], seeded from `CafeteriaConfig::seed` and
//! threaded by `&mut` through the arrival process, the store selector, and
//! every service-time draw.  Because the event loop is single-threaded and
//! same-instant events resolve in scheduling order, the sequence of draws —
//! and therefore every sample — is a pure function of the seed.
//!
//! There is no global or thread-local randomness anywhere in the workspace.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::Distribution;

use crate::config::Span;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Run-level deterministic RNG.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive an independent child RNG — useful for replicated runs that
    /// must not share a stream with the parent.
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

    /// Draw one value from any `rand_distr` distribution.
    #[inline]
    pub fn sample<T, D: Distribution<T>>(&mut self, dist: &D) -> T {
        dist.sample(&mut self.0)
    }

    /// Continuous uniform draw over the closed interval `[span.min, span.max]`.
    ///
    /// A collapsed span (`min == max`) returns `min` without consuming
    /// randomness, which is what makes fixed-duration scenarios exact.
    /// `span` must already be validated (`min <= max`, both finite).
    #[inline]
    pub fn uniform(&mut self, span: Span) -> f64 {
        if span.min >= span.max {
            return span.min;
        }
        self.0.gen_range(span.min..=span.max)
    }

    /// Uniform index in `0..len`.  Returns `None` when `len == 0`.
    #[inline]
    pub fn index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.0.gen_range(0..len))
    }
}
