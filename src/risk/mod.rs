//! Risk module
//!
//! Kelly-based position sizing derived from observed returns

mod kelly;

pub use kelly::{KellyCalculator, KellyEstimate};
