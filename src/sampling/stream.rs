//! Explicit, seedable random stream threaded through every sampling call.
//!
//! Nothing in this crate touches ambient or thread-local randomness: every draw goes through
//! a [`RandomStream`] handed in by the caller, so a fixed seed reproduces a batch exactly.

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Deterministic random source.
#[derive(Clone, Debug)]
pub struct RandomStream {
    rng: StdRng,
}

impl RandomStream {
    /// Seed a new stream.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform draw in `[0, 1)`.
    pub fn unit_f64(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Uniform draw in `[lo, hi)`; `lo == hi` yields `lo`. Always consumes exactly one draw.
    pub fn uniform_f64(&mut self, lo: f64, hi: f64) -> f64 {
        let u = self.unit_f64();
        lo + u * (hi - lo)
    }

    /// Uniform integer in the inclusive range `[lo, hi]`. Callers guarantee `lo <= hi`.
    pub fn int_inclusive(&mut self, lo: i64, hi: i64) -> i64 {
        self.rng.random_range(lo..=hi)
    }

    /// Uniform index in `[0, len)`. Callers guarantee `len > 0`.
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }

    /// Bernoulli trial with success probability `p`.
    pub fn coin(&mut self, p: f64) -> bool {
        self.unit_f64() < p
    }

    /// Gaussian draw (Box-Muller, two uniform draws).
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = 1.0 - self.unit_f64();
        let u2 = self.unit_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
        mean + std_dev * z
    }

    /// Derive an independent child stream by drawing its seed from this one.
    pub fn fork(&mut self) -> Self {
        let seed = self.rng.random::<u64>();
        Self::from_seed(seed)
    }

    /// Derive `n` child streams, in order.
    pub fn split(&mut self, n: usize) -> Vec<Self> {
        (0..n).map(|_| self.fork()).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sampling/stream.rs"]
mod tests;
