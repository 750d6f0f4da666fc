//! Statistical primitives
//!
//! Descriptive moments, per-series performance metrics, and the CDF
//! approximations shared by every hypothesis test.

mod descriptive;
mod distributions;
mod returns;

pub use descriptive::{
    excess_kurtosis, mean, percentile, population_std_dev, sample_variance, skewness,
};
pub use distributions::{chi_square_cdf, normal_cdf, two_sided_p_value};
pub use returns::{
    annualized_sharpe, compounded_return, max_drawdown, profit_factor, win_rate,
    TRADING_DAYS_PER_YEAR,
};
