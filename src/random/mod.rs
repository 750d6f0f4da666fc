//! Deterministic random sources
//!
//! Every stochastic component takes its generator explicitly so runs can be
//! seeded, replayed, and split into independent streams.

mod mulberry;

pub use mulberry::{derive_seed, SeededRandomGenerator};

/// Source of uniform draws in [0, 1)
///
/// Only `next_f64` is required; the derived draws are built on it so that a
/// scripted test source produces the same call sequence as the real one.
pub trait RandomSource {
    /// Next uniform value in [0, 1)
    fn next_f64(&mut self) -> f64;

    /// Normal draw via Box-Muller on two uniform draws
    fn next_normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        // ln(0) would yield an infinite draw
        let u1 = self.next_f64().max(f64::MIN_POSITIVE);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Uniform value in [min, max)
    fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform index in [0, len)
    fn next_index(&mut self, len: usize) -> usize {
        let idx = (self.next_f64() * len as f64).floor() as usize;
        idx.min(len.saturating_sub(1))
    }

    /// Bernoulli trial that succeeds with the given probability
    fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }

    /// Pick one element uniformly, `None` for an empty slice
    fn sample<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            return None;
        }
        let idx = self.next_index(items.len());
        items.get(idx)
    }

    /// In-place Fisher-Yates shuffle
    fn shuffle<T>(&mut self, items: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..items.len()).rev() {
            let j = self.next_index(i + 1);
            items.swap(i, j);
        }
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}
