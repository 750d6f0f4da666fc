//! Validation result types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::stats::{
    annualized_sharpe, compounded_return, max_drawdown, profit_factor, win_rate,
    TRADING_DAYS_PER_YEAR,
};

/// Validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Not enough observations for the requested analysis
    #[error("Insufficient samples: need at least {required}, got {actual}")]
    InsufficientSamples { required: usize, actual: usize },
    /// A configuration value is out of range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Mean of a trial metric with its confidence interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricInterval {
    pub mean: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
}

/// Aggregate of all block-bootstrap trials
#[derive(Debug, Clone, Serialize)]
pub struct MonteCarloResult {
    /// Number of trials run
    pub simulations: usize,
    /// Confidence level used for VaR and intervals
    pub confidence_level: f64,
    /// Mean compounded trial return
    pub mean_return: f64,
    /// Median compounded trial return
    pub median_return: f64,
    /// Population standard deviation of trial returns
    pub std_dev: f64,
    pub skewness: f64,
    /// Excess kurtosis (normal = 0)
    pub kurtosis: f64,
    /// Loss threshold exceeded with probability 1 - confidence
    pub value_at_risk: f64,
    /// Expected loss beyond the VaR threshold
    pub conditional_var: f64,
    pub sharpe: MetricInterval,
    pub max_drawdown: MetricInterval,
    pub win_rate: MetricInterval,
    pub profit_factor: MetricInterval,
    pub probability_of_profit: f64,
    /// Share of trials whose drawdown exceeded 50%
    pub probability_of_ruin: f64,
    /// Full Kelly fraction of the original series
    pub kelly_fraction: f64,
    /// Sorted compounded returns of every trial
    pub distribution: Vec<f64>,
}

/// Performance of one return series, scored once
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BacktestMetrics {
    pub total_return: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown: f64,
    pub win_rate: f64,
    pub profit_factor: f64,
    /// Number of return observations
    pub trades: usize,
}

impl BacktestMetrics {
    /// Score a return series with the per-trial formulas
    pub fn from_returns(returns: &[f64]) -> Self {
        Self {
            total_return: compounded_return(returns),
            sharpe_ratio: annualized_sharpe(returns, TRADING_DAYS_PER_YEAR),
            max_drawdown: max_drawdown(returns),
            win_rate: win_rate(returns),
            profit_factor: profit_factor(returns),
            trades: returns.len(),
        }
    }
}

/// Outcome of one hypothesis test
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticalTest {
    pub name: String,
    pub statistic: f64,
    pub p_value: f64,
    /// p < 0.05
    pub significant: bool,
    pub interpretation: String,
}

/// In-sample vs out-of-sample comparison
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub in_sample: BacktestMetrics,
    pub out_of_sample: BacktestMetrics,
    pub overfit: bool,
    /// Composite degradation in [0, 1]
    pub overfit_score: f64,
    /// Sharpe degradation in percent
    pub degradation_pct: f64,
    pub tests: Vec<StatisticalTest>,
    pub recommendations: Vec<String>,
}

impl ValidationResult {
    /// Number of tests significant at 5%
    pub fn significant_tests(&self) -> usize {
        self.tests.iter().filter(|t| t.significant).count()
    }
}

/// A period return tagged with its date
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatedReturn {
    pub date: NaiveDate,
    pub value: f64,
}

/// Contiguous slice of the input series, end exclusive
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleWindow {
    pub start_index: usize,
    pub end_index: usize,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl SampleWindow {
    /// Number of observations in the window
    pub fn len(&self) -> usize {
        self.end_index - self.start_index
    }

    pub fn is_empty(&self) -> bool {
        self.end_index == self.start_index
    }
}

/// One train/test fold
#[derive(Debug, Clone, Serialize)]
pub struct WalkForwardPeriod {
    pub train: SampleWindow,
    pub test: SampleWindow,
    pub train_metrics: BacktestMetrics,
    pub test_metrics: BacktestMetrics,
}

/// Rolling train/test analysis
#[derive(Debug, Clone, Serialize)]
pub struct WalkForwardResult {
    pub periods: Vec<WalkForwardPeriod>,
    /// Metrics over the concatenated test windows
    pub aggregate: BacktestMetrics,
    /// Fraction of test windows with a positive return
    pub consistency: f64,
    /// Mean of min(test Sharpe / train Sharpe, 1) over all windows
    pub robustness: f64,
}

/// Output of a full validation pass
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub monte_carlo: MonteCarloResult,
    pub validation: ValidationResult,
    pub walk_forward: WalkForwardResult,
    /// Fractional Kelly position size as a share of bankroll
    pub recommended_position: f64,
}
