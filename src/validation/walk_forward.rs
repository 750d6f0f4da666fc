//! Walk-forward analysis
//!
//! Splits the series into equal contiguous windows, scores the train and
//! test part of each, and measures how much of the training performance
//! survives out of sample.
//!
//! Robustness averages `min(test Sharpe / train Sharpe, 1)` over windows
//! with a positive training Sharpe but divides by the count of all produced
//! windows, so a window with a non-positive training Sharpe pulls the score
//! toward zero.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::types::{
    BacktestMetrics, DatedReturn, SampleWindow, ValidationError, WalkForwardPeriod,
    WalkForwardResult,
};

/// Windows with fewer training samples are skipped
pub const MIN_TRAIN_SAMPLES: usize = 10;
/// Windows with fewer test samples are skipped
pub const MIN_TEST_SAMPLES: usize = 5;

/// Configuration for walk-forward analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkForwardConfig {
    /// Share of each window used for training
    pub train_ratio: f64,
    /// Number of equal windows
    pub periods: usize,
}

impl Default for WalkForwardConfig {
    fn default() -> Self {
        Self {
            train_ratio: 0.7,
            periods: 5,
        }
    }
}

impl WalkForwardConfig {
    /// Creates a config with custom split and window count
    #[must_use]
    pub fn new(train_ratio: f64, periods: usize) -> Self {
        Self {
            train_ratio,
            periods,
        }
    }
}

/// Rolling train/test performance-decay measurement
pub struct WalkForwardAnalyzer {
    config: WalkForwardConfig,
}

impl WalkForwardAnalyzer {
    /// Create a new analyzer
    pub fn new(config: WalkForwardConfig) -> Self {
        Self { config }
    }

    /// Analyze an undated series; windows carry index bounds only
    pub fn run(&self, data: &[f64]) -> Result<WalkForwardResult, ValidationError> {
        self.analyze(data, None)
    }

    /// Analyze a dated series; windows also carry their first and last dates
    pub fn run_dated(&self, data: &[DatedReturn]) -> Result<WalkForwardResult, ValidationError> {
        let values: Vec<f64> = data.iter().map(|r| r.value).collect();
        let dates: Vec<NaiveDate> = data.iter().map(|r| r.date).collect();
        self.analyze(&values, Some(&dates))
    }

    fn analyze(
        &self,
        data: &[f64],
        dates: Option<&[NaiveDate]>,
    ) -> Result<WalkForwardResult, ValidationError> {
        let ratio = self.config.train_ratio;
        if !(ratio > 0.0 && ratio < 1.0) {
            return Err(ValidationError::InvalidParameter(format!(
                "train_ratio must be in (0, 1), got {ratio}"
            )));
        }
        if self.config.periods == 0 {
            return Err(ValidationError::InvalidParameter(
                "periods must be positive".to_string(),
            ));
        }

        let window_size = data.len() / self.config.periods;
        let train_size = (window_size as f64 * ratio).floor() as usize;
        let test_size = window_size - train_size;

        let mut periods = Vec::new();
        for i in 0..self.config.periods {
            if train_size < MIN_TRAIN_SAMPLES || test_size < MIN_TEST_SAMPLES {
                tracing::debug!(
                    window = i,
                    train_size,
                    test_size,
                    "Skipping undersized walk-forward window"
                );
                continue;
            }
            let start = i * window_size;
            let split = start + train_size;
            let end = start + window_size;

            let train = window(start, split, dates);
            let test = window(split, end, dates);
            let train_metrics = BacktestMetrics::from_returns(&data[start..split]);
            let test_metrics = BacktestMetrics::from_returns(&data[split..end]);

            tracing::debug!(
                window = i,
                train_sharpe = train_metrics.sharpe_ratio,
                test_sharpe = test_metrics.sharpe_ratio,
                test_return = test_metrics.total_return,
                "Walk-forward window scored"
            );

            periods.push(WalkForwardPeriod {
                train,
                test,
                train_metrics,
                test_metrics,
            });
        }

        let out_of_sample: Vec<f64> = periods
            .iter()
            .flat_map(|p| data[p.test.start_index..p.test.end_index].iter().copied())
            .collect();

        let produced = periods.len();
        let (consistency, robustness) = if produced == 0 {
            (0.0, 0.0)
        } else {
            let positive = periods
                .iter()
                .filter(|p| p.test_metrics.total_return > 0.0)
                .count();
            let retained: f64 = periods
                .iter()
                .filter(|p| p.train_metrics.sharpe_ratio > 0.0)
                .map(|p| (p.test_metrics.sharpe_ratio / p.train_metrics.sharpe_ratio).min(1.0))
                .sum();
            (
                positive as f64 / produced as f64,
                retained / produced as f64,
            )
        };

        tracing::info!(
            windows = produced,
            consistency,
            robustness,
            "Walk-forward analysis complete"
        );

        Ok(WalkForwardResult {
            periods,
            aggregate: BacktestMetrics::from_returns(&out_of_sample),
            consistency,
            robustness,
        })
    }
}

impl Default for WalkForwardAnalyzer {
    fn default() -> Self {
        Self::new(WalkForwardConfig::default())
    }
}

fn window(start: usize, end: usize, dates: Option<&[NaiveDate]>) -> SampleWindow {
    SampleWindow {
        start_index: start,
        end_index: end,
        start_date: dates.and_then(|d| d.get(start).copied()),
        end_date: dates.and_then(|d| d.get(end.saturating_sub(1)).copied()),
    }
}
