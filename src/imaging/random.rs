//! Pluggable randomness for the transform pipeline.
//!
//! The pipeline never touches a global generator. It draws every choice
//! through [`RandomSource`], which production code backs with a `rand`
//! generator ([`RngSource`]) and tests back with a scripted sequence.

use rand::Rng;

/// Minimal set of draws the pipeline needs.
pub trait RandomSource {
    /// Fair coin flip.
    fn coin(&mut self) -> bool;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn below(&mut self, len: usize) -> usize;

    /// Uniform integer in `lo..=hi`.
    fn between(&mut self, lo: u32, hi: u32) -> u32;
}

/// [`RandomSource`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn coin(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }

    fn below(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }

    fn between(&mut self, lo: u32, hi: u32) -> u32 {
        self.rng.random_range(lo..=hi)
    }
}
