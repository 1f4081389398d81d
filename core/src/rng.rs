//! Deterministic random number generation.
//!
//! RULE: Nothing in the engine may call a platform RNG.
//! Synthetic data (trend noise, sample portfolios) draws from a NoiseRng
//! seeded from configuration, so every run is reproducible from its seed.
//!
//! Each consumer gets its own stream, seeded from (seed XOR stream slot),
//! so adding a consumer never shifts another consumer's values.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

pub struct NoiseRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl NoiseRng {
    pub fn new(seed: u64, stream: Stream) -> Self {
        let derived_seed = seed ^ (stream as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15);
        Self {
            name: stream.name(),
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Uniform float in [lo, hi).
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Symmetric noise in [-amplitude, amplitude).
    pub fn jitter(&mut self, amplitude: f64) -> f64 {
        self.uniform(-amplitude, amplitude)
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Pick one element uniformly.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.next_u64_below(items.len() as u64) as usize]
    }

    /// Sample from a simplified Pareto distribution.
    /// x_min: minimum value, alpha: shape parameter (higher = less skewed).
    pub fn pareto(&mut self, x_min: f64, alpha: f64) -> f64 {
        let u = self.next_f64().max(1e-10);
        x_min * u.powf(-1.0 / alpha)
    }
}

/// Stable stream assignments.
/// NEVER reorder or remove entries — only append.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum Stream {
    Trend = 0,
    SamplePortfolio = 1,
}

impl Stream {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Trend           => "trend",
            Self::SamplePortfolio => "sample_portfolio",
        }
    }
}
