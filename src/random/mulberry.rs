//! Mulberry32 seeded generator

use super::RandomSource;
use std::time::{SystemTime, UNIX_EPOCH};

const INCREMENT: u32 = 0x6D2B_79F5;
const STREAM_SPACING: u32 = 0x9E37_79B9;

/// Small, fast 32-bit generator with fully reproducible output for a seed
///
/// Holds no shared state, so independent instances can run on separate
/// threads without coordination.
#[derive(Debug, Clone)]
pub struct SeededRandomGenerator {
    state: u32,
}

impl SeededRandomGenerator {
    /// Create a generator; `None` seeds from the wall clock
    pub fn new(seed: Option<u32>) -> Self {
        Self {
            state: seed.unwrap_or_else(time_seed),
        }
    }

    /// Create a generator from a fixed seed
    pub fn from_seed(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advance and return the next value in [0, 1)
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> f64 {
        self.state = self.state.wrapping_add(INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        f64::from(t ^ (t >> 14)) / 4_294_967_296.0
    }
}

impl RandomSource for SeededRandomGenerator {
    fn next_f64(&mut self) -> f64 {
        self.next()
    }
}

/// Derive the seed of an independent stream from a base seed
pub fn derive_seed(base: u32, stream: u32) -> u32 {
    let mut z = base ^ stream.wrapping_add(1).wrapping_mul(STREAM_SPACING);
    z = (z ^ (z >> 16)).wrapping_mul(0x85EB_CA6B);
    z = (z ^ (z >> 13)).wrapping_mul(0xC2B2_AE35);
    z ^ (z >> 16)
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u32)
        .unwrap_or(12345)
}
