//! Full validation pass over a return series
//!
//! Combines the Monte Carlo simulator, the hypothesis tests and the
//! walk-forward analyzer behind one entry point and turns their output into
//! threshold-driven recommendations.

use std::time::Instant;

use super::hypothesis::StatisticalValidator;
use super::monte_carlo::{MonteCarloConfig, MonteCarloSimulator};
use super::types::{
    BacktestMetrics, SuiteReport, ValidationError, ValidationResult, WalkForwardResult,
};
use super::walk_forward::{WalkForwardAnalyzer, WalkForwardConfig};
use crate::risk::KellyCalculator;
use crate::telemetry::{record_duration, DurationMetric};

/// Composite degradation above which a strategy is flagged as overfit
pub const OVERFIT_THRESHOLD: f64 = 0.3;
/// Number of significant tests that flags a strategy as overfit
pub const SIGNIFICANT_TESTS_THRESHOLD: usize = 2;

const MAX_OOS_DRAWDOWN: f64 = 0.3;
const MIN_OOS_WIN_RATE: f64 = 0.4;
const MIN_OOS_PROFIT_FACTOR: f64 = 1.5;
const MAX_DEGRADATION_PCT: f64 = 30.0;

/// Runs every validation stage with shared configuration
pub struct ValidationSuite {
    monte_carlo: MonteCarloSimulator,
    validator: StatisticalValidator,
    walk_forward: WalkForwardAnalyzer,
    kelly: KellyCalculator,
    split_ratio: f64,
    workers: usize,
}

impl ValidationSuite {
    pub fn new(
        monte_carlo: MonteCarloConfig,
        walk_forward: WalkForwardConfig,
        split_ratio: f64,
    ) -> Self {
        Self {
            monte_carlo: MonteCarloSimulator::new(monte_carlo),
            validator: StatisticalValidator::new(),
            walk_forward: WalkForwardAnalyzer::new(walk_forward),
            kelly: KellyCalculator::default(),
            split_ratio,
            workers: 1,
        }
    }

    /// Replaces the hypothesis test battery.
    #[must_use]
    pub fn with_validator(mut self, validator: StatisticalValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Replaces the position sizing used for the recommendation.
    #[must_use]
    pub fn with_kelly(mut self, kelly: KellyCalculator) -> Self {
        self.kelly = kelly;
        self
    }

    /// Spreads Monte Carlo trials over rayon workers.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Chronological in-sample / out-of-sample comparison
    pub fn validate(
        &self,
        returns: &[f64],
        split_ratio: f64,
    ) -> Result<ValidationResult, ValidationError> {
        if !(split_ratio > 0.0 && split_ratio < 1.0) {
            return Err(ValidationError::InvalidParameter(format!(
                "split_ratio must be in (0, 1), got {split_ratio}"
            )));
        }
        let started = Instant::now();

        let split = (returns.len() as f64 * split_ratio).floor() as usize;
        if split == 0 || split == returns.len() {
            return Err(ValidationError::InsufficientSamples {
                required: 2,
                actual: returns.len(),
            });
        }
        let (train, test) = returns.split_at(split);

        let in_sample = BacktestMetrics::from_returns(train);
        let out_of_sample = BacktestMetrics::from_returns(test);
        let tests = self.validator.run_all(train, test);

        let sharpe_degradation = degradation(in_sample.sharpe_ratio, out_of_sample.sharpe_ratio);
        let return_degradation = degradation(in_sample.total_return, out_of_sample.total_return);
        let overfit_score = (sharpe_degradation + return_degradation) / 2.0;

        let significant = tests.iter().filter(|t| t.significant).count();
        let overfit =
            overfit_score > OVERFIT_THRESHOLD || significant >= SIGNIFICANT_TESTS_THRESHOLD;

        let degradation_pct = if in_sample.sharpe_ratio > 0.0 {
            (in_sample.sharpe_ratio - out_of_sample.sharpe_ratio) / in_sample.sharpe_ratio * 100.0
        } else {
            0.0
        };

        let recommendations = recommendations(&out_of_sample, degradation_pct, overfit);

        tracing::info!(
            in_sample = train.len(),
            out_of_sample = test.len(),
            overfit_score,
            significant_tests = significant,
            overfit,
            "Validation complete"
        );
        record_duration(DurationMetric::Validation, started.elapsed());

        Ok(ValidationResult {
            in_sample,
            out_of_sample,
            overfit,
            overfit_score,
            degradation_pct,
            tests,
            recommendations,
        })
    }

    /// Walk-forward analysis with the suite's configuration
    pub fn run_walk_forward(&self, data: &[f64]) -> Result<WalkForwardResult, ValidationError> {
        self.walk_forward.run(data)
    }

    /// Monte Carlo, split validation and walk-forward in one pass
    pub fn run(&self, returns: &[f64]) -> Result<SuiteReport, ValidationError> {
        let monte_carlo = self.monte_carlo.simulate_parallel(returns, self.workers)?;
        let validation = self.validate(returns, self.split_ratio)?;
        let walk_forward = self.run_walk_forward(returns)?;
        let recommended_position = self.kelly.recommended_fraction(returns);

        Ok(SuiteReport {
            monte_carlo,
            validation,
            walk_forward,
            recommended_position,
        })
    }
}

impl Default for ValidationSuite {
    fn default() -> Self {
        Self::new(MonteCarloConfig::default(), WalkForwardConfig::default(), 0.7)
    }
}

fn degradation(in_metric: f64, out_metric: f64) -> f64 {
    if in_metric > 0.0 {
        (1.0 - out_metric / in_metric).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn recommendations(out_of_sample: &BacktestMetrics, degradation_pct: f64, overfit: bool) -> Vec<String> {
    let mut notes = Vec::new();

    if out_of_sample.max_drawdown > MAX_OOS_DRAWDOWN {
        notes.push(format!(
            "Out-of-sample drawdown of {:.1}% exceeds 30%: reduce position size",
            out_of_sample.max_drawdown * 100.0
        ));
    }
    if out_of_sample.win_rate < MIN_OOS_WIN_RATE {
        notes.push(format!(
            "Out-of-sample win rate of {:.1}% is below 40%: tighten entry filters",
            out_of_sample.win_rate * 100.0
        ));
    }
    if out_of_sample.profit_factor < MIN_OOS_PROFIT_FACTOR {
        notes.push(format!(
            "Out-of-sample profit factor of {:.2} is below 1.5: edge may not cover costs",
            out_of_sample.profit_factor
        ));
    }
    if degradation_pct > MAX_DEGRADATION_PCT {
        notes.push(format!(
            "Sharpe degrades {degradation_pct:.1}% out of sample: reduce parameter count"
        ));
    }
    if overfit {
        notes.push(
            "Strategy shows signs of overfitting: gather more out-of-sample data before deploying capital"
                .to_string(),
        );
    }
    if notes.is_empty() {
        notes.push("Strategy passes all validation checks".to_string());
    }
    notes
}
