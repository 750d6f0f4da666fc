//! Validation module
//!
//! Statistical validation of a strategy's return series: block-bootstrap
//! Monte Carlo, hypothesis tests, in/out-of-sample comparison and
//! walk-forward analysis.

mod hypothesis;
mod monte_carlo;
mod report;
mod suite;
mod types;
mod walk_forward;

pub use hypothesis::{StatisticalValidator, DEFAULT_LJUNG_BOX_LAGS, SIGNIFICANCE_LEVEL};
pub use monte_carlo::{MonteCarloConfig, MonteCarloSimulator, MIN_SAMPLES, RUIN_DRAWDOWN};
pub use suite::{ValidationSuite, OVERFIT_THRESHOLD, SIGNIFICANT_TESTS_THRESHOLD};
pub use types::{
    BacktestMetrics, DatedReturn, MetricInterval, MonteCarloResult, SampleWindow,
    StatisticalTest, SuiteReport, ValidationError, ValidationResult, WalkForwardPeriod,
    WalkForwardResult,
};
pub use walk_forward::{
    WalkForwardAnalyzer, WalkForwardConfig, MIN_TEST_SAMPLES, MIN_TRAIN_SAMPLES,
};
