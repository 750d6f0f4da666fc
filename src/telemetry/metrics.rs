//! Prometheus metrics
//!
//! Thin wrappers over the `metrics` facade. Without an installed recorder
//! every call is a no-op, so library code records unconditionally.

use std::time::Duration;

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Bootstrap trials run
    MonteCarloTrials,
    /// Opportunities produced by the generator
    OpportunitiesGenerated,
    /// Opportunities that cleared the profit threshold and were submitted
    OpportunitiesExecuted,
    /// Latency races won
    RacesWon,
    /// Latency races lost to a competitor or to nobody
    RacesLost,
    /// Won races that reverted on chain
    TransactionsReverted,
}

impl CounterMetric {
    fn name(self) -> &'static str {
        match self {
            CounterMetric::MonteCarloTrials => "edge_validator_monte_carlo_trials_total",
            CounterMetric::OpportunitiesGenerated => "edge_validator_opportunities_generated_total",
            CounterMetric::OpportunitiesExecuted => "edge_validator_opportunities_executed_total",
            CounterMetric::RacesWon => "edge_validator_races_won_total",
            CounterMetric::RacesLost => "edge_validator_races_lost_total",
            CounterMetric::TransactionsReverted => "edge_validator_transactions_reverted_total",
        }
    }
}

/// Duration metric types
#[derive(Debug, Clone, Copy)]
pub enum DurationMetric {
    /// Full Monte Carlo simulation
    MonteCarlo,
    /// In/out-of-sample validation
    Validation,
    /// Competitive backtest run
    Backtest,
}

impl DurationMetric {
    fn name(self) -> &'static str {
        match self {
            DurationMetric::MonteCarlo => "edge_validator_monte_carlo_duration_ms",
            DurationMetric::Validation => "edge_validator_validation_duration_ms",
            DurationMetric::Backtest => "edge_validator_backtest_duration_ms",
        }
    }
}

/// Add to a counter
pub fn increment_counter(metric: CounterMetric, value: u64) {
    metrics::counter!(metric.name()).increment(value);
}

/// Record a run duration in milliseconds
pub fn record_duration(metric: DurationMetric, duration: Duration) {
    let value_ms = duration.as_secs_f64() * 1000.0;
    metrics::histogram!(metric.name()).record(value_ms);
    tracing::debug!(metric = metric.name(), value_ms, "Recording duration");
}
