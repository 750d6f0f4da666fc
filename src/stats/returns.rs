//! Performance metrics of a period-return series
//!
//! Returns are ratios (0.01 = +1%). The same functions score every Monte
//! Carlo trial and every in-sample/out-of-sample split.

use super::descriptive::{mean, population_std_dev};

/// Periods per year used to annualize daily-return Sharpe ratios
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Compounded return: product of (1 + r) minus 1
pub fn compounded_return(returns: &[f64]) -> f64 {
    returns.iter().fold(1.0, |acc, r| acc * (1.0 + r)) - 1.0
}

/// Sharpe ratio annualized by sqrt(periods_per_year); 0 for a flat series
pub fn annualized_sharpe(returns: &[f64], periods_per_year: f64) -> f64 {
    let std = population_std_dev(returns);
    if std == 0.0 {
        return 0.0;
    }
    mean(returns) * periods_per_year.sqrt() / std
}

/// Largest peak-to-trough decline of the compounded equity curve, as a
/// fraction of the peak. The curve starts at 1.0.
pub fn max_drawdown(returns: &[f64]) -> f64 {
    let mut equity = 1.0;
    let mut peak = 1.0;
    let mut worst = 0.0_f64;
    for r in returns {
        equity *= 1.0 + r;
        if equity > peak {
            peak = equity;
        }
        if peak > 0.0 {
            worst = worst.max((peak - equity) / peak);
        }
    }
    worst
}

/// Fraction of periods with a strictly positive return
pub fn win_rate(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    returns.iter().filter(|r| **r > 0.0).count() as f64 / returns.len() as f64
}

/// Sum of gains over absolute sum of losses
///
/// Infinite when there are gains but no losses, 0 when there is neither.
pub fn profit_factor(returns: &[f64]) -> f64 {
    let gains: f64 = returns.iter().filter(|r| **r > 0.0).sum();
    let losses: f64 = returns.iter().filter(|r| **r < 0.0).sum::<f64>().abs();
    if losses == 0.0 {
        return if gains > 0.0 { f64::INFINITY } else { 0.0 };
    }
    gains / losses
}
