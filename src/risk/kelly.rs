//! Kelly criterion sizing from a return series

use serde::Serialize;

use crate::stats::mean;

/// Win/loss statistics behind a Kelly estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KellyEstimate {
    /// Fraction of periods with a positive return
    pub win_rate: f64,
    /// Mean of the positive returns
    pub avg_win: f64,
    /// Absolute mean of the negative returns
    pub avg_loss: f64,
    /// avg_win / avg_loss
    pub odds_ratio: f64,
    /// Full Kelly fraction: p - q / b
    pub full_kelly: f64,
}

/// Kelly criterion calculator for period returns
#[derive(Debug, Clone)]
pub struct KellyCalculator {
    /// Kelly fraction (e.g., 0.25 for quarter Kelly)
    pub fraction: f64,
    /// Maximum bet as fraction of bankroll
    pub max_bet_pct: f64,
}

impl KellyCalculator {
    /// Create a new Kelly calculator
    pub fn new(fraction: f64, max_bet_pct: f64) -> Self {
        Self {
            fraction,
            max_bet_pct,
        }
    }

    /// Estimate Kelly inputs from an observed, non-resampled series
    ///
    /// - Odds: b = avg_win / avg_loss
    /// - Kelly fraction: f* = p - (1 - p) / b
    ///
    /// Returns a zero fraction when there are no losses or no wins.
    pub fn estimate(returns: &[f64]) -> KellyEstimate {
        let wins: Vec<f64> = returns.iter().copied().filter(|r| *r > 0.0).collect();
        let losses: Vec<f64> = returns.iter().copied().filter(|r| *r < 0.0).collect();

        let win_rate = if returns.is_empty() {
            0.0
        } else {
            wins.len() as f64 / returns.len() as f64
        };
        let avg_win = mean(&wins);
        let avg_loss = mean(&losses).abs();

        if avg_loss == 0.0 || avg_win == 0.0 {
            return KellyEstimate {
                win_rate,
                avg_win,
                avg_loss,
                odds_ratio: 0.0,
                full_kelly: 0.0,
            };
        }

        let odds_ratio = avg_win / avg_loss;
        KellyEstimate {
            win_rate,
            avg_win,
            avg_loss,
            odds_ratio,
            full_kelly: win_rate - (1.0 - win_rate) / odds_ratio,
        }
    }

    /// Full Kelly fraction of a return series
    pub fn full_kelly(returns: &[f64]) -> f64 {
        Self::estimate(returns).full_kelly
    }

    /// Recommended bankroll fraction after applying the fractional
    /// multiplier and hard cap; never negative
    pub fn recommended_fraction(&self, returns: &[f64]) -> f64 {
        let adjusted = Self::full_kelly(returns) * self.fraction;
        adjusted.min(self.max_bet_pct).max(0.0)
    }
}

impl Default for KellyCalculator {
    fn default() -> Self {
        Self::new(0.25, 0.20)
    }
}
