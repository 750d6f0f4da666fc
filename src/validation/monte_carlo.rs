//! Block-bootstrap Monte Carlo simulation of a return series
//!
//! Each trial resamples the observed returns in contiguous blocks, which
//! keeps local autocorrelation intact, then scores the resample with the
//! same metrics used for a single backtest. Aggregation happens once over
//! the sorted trial arrays so means and interval bounds come from the same
//! data.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::types::{MetricInterval, MonteCarloResult, ValidationError};
use crate::random::{derive_seed, RandomSource, SeededRandomGenerator};
use crate::risk::KellyCalculator;
use crate::stats::{
    annualized_sharpe, compounded_return, excess_kurtosis, max_drawdown, mean, percentile,
    population_std_dev, profit_factor, skewness, win_rate, TRADING_DAYS_PER_YEAR,
};
use crate::telemetry::{increment_counter, record_duration, CounterMetric, DurationMetric};

/// Minimum series length accepted by the simulator
pub const MIN_SAMPLES: usize = 10;

/// Drawdown beyond which a trial counts as ruined
pub const RUIN_DRAWDOWN: f64 = 0.5;

/// Configuration for Monte Carlo simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonteCarloConfig {
    /// Number of bootstrap trials
    pub simulations: usize,
    /// Confidence level for VaR and intervals (e.g., 0.95)
    pub confidence_level: f64,
    /// Length of each resampled block
    pub block_size: usize,
    /// Optional seed for reproducible results
    pub seed: Option<u32>,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            simulations: 10_000,
            confidence_level: 0.95,
            block_size: 20,
            seed: None,
        }
    }
}

impl MonteCarloConfig {
    /// Sets the number of trials.
    #[must_use]
    pub fn with_simulations(mut self, simulations: usize) -> Self {
        self.simulations = simulations;
        self
    }

    /// Sets the block length.
    #[must_use]
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Sets the confidence level.
    #[must_use]
    pub fn with_confidence(mut self, level: f64) -> Self {
        self.confidence_level = level;
        self
    }

    /// Sets a seed for reproducible simulations.
    #[must_use]
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Scores of a single resampled path
#[derive(Debug, Clone, Copy)]
struct TrialMetrics {
    total_return: f64,
    sharpe: f64,
    max_drawdown: f64,
    win_rate: f64,
    profit_factor: f64,
}

impl TrialMetrics {
    fn score(returns: &[f64]) -> Self {
        Self {
            total_return: compounded_return(returns),
            sharpe: annualized_sharpe(returns, TRADING_DAYS_PER_YEAR),
            max_drawdown: max_drawdown(returns),
            win_rate: win_rate(returns),
            profit_factor: profit_factor(returns),
        }
    }
}

/// Runs block-bootstrap trials over a return series
pub struct MonteCarloSimulator {
    config: MonteCarloConfig,
}

impl MonteCarloSimulator {
    /// Create a new simulator
    pub fn new(config: MonteCarloConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Run all trials on a generator seeded from the configuration
    pub fn simulate(&self, returns: &[f64]) -> Result<MonteCarloResult, ValidationError> {
        let mut rng = SeededRandomGenerator::new(self.config.seed);
        self.simulate_with(returns, &mut rng)
    }

    /// Run all trials drawing from the supplied generator
    pub fn simulate_with<R: RandomSource>(
        &self,
        returns: &[f64],
        rng: &mut R,
    ) -> Result<MonteCarloResult, ValidationError> {
        self.check_inputs(returns)?;
        let started = Instant::now();
        tracing::info!(
            samples = returns.len(),
            simulations = self.config.simulations,
            block_size = self.config.block_size,
            "Running Monte Carlo simulation"
        );

        let trials: Vec<TrialMetrics> = (0..self.config.simulations)
            .map(|_| self.run_trial(returns, rng))
            .collect();

        let result = self.aggregate(returns, &trials);
        self.finish(&result, started);
        Ok(result)
    }

    /// Run the trials across `workers` threads
    ///
    /// Every worker owns a generator seeded from the base seed and its worker
    /// index. Trial vectors are joined in worker order before the single
    /// aggregation pass, so output is fixed for a given seed and worker count.
    pub fn simulate_parallel(
        &self,
        returns: &[f64],
        workers: usize,
    ) -> Result<MonteCarloResult, ValidationError> {
        if workers <= 1 {
            return self.simulate(returns);
        }
        self.check_inputs(returns)?;
        let started = Instant::now();
        let base_seed = self
            .config
            .seed
            .unwrap_or_else(|| SeededRandomGenerator::new(None).state());
        let total = self.config.simulations;
        tracing::info!(
            samples = returns.len(),
            simulations = total,
            workers,
            "Running parallel Monte Carlo simulation"
        );

        let per_worker: Vec<Vec<TrialMetrics>> = (0..workers)
            .into_par_iter()
            .map(|worker| {
                let count = total / workers + usize::from(worker < total % workers);
                let seed = derive_seed(base_seed, worker as u32);
                let mut rng = SeededRandomGenerator::from_seed(seed);
                (0..count)
                    .map(|_| self.run_trial(returns, &mut rng))
                    .collect()
            })
            .collect();
        let trials: Vec<TrialMetrics> = per_worker.into_iter().flatten().collect();

        let result = self.aggregate(returns, &trials);
        self.finish(&result, started);
        Ok(result)
    }

    /// Resample the series in contiguous blocks up to its original length
    pub fn block_bootstrap<R: RandomSource>(&self, returns: &[f64], rng: &mut R) -> Vec<f64> {
        let n = returns.len();
        let block = self.config.block_size.clamp(1, n.max(1));
        let start_positions = n.saturating_sub(block) + 1;

        let mut resample = Vec::with_capacity(n);
        while resample.len() < n {
            let start = rng.next_index(start_positions);
            let take = block.min(n - resample.len());
            resample.extend_from_slice(&returns[start..start + take]);
        }
        resample
    }

    fn check_inputs(&self, returns: &[f64]) -> Result<(), ValidationError> {
        if returns.len() < MIN_SAMPLES {
            return Err(ValidationError::InsufficientSamples {
                required: MIN_SAMPLES,
                actual: returns.len(),
            });
        }
        if self.config.simulations == 0 {
            return Err(ValidationError::InvalidParameter(
                "simulations must be positive".to_string(),
            ));
        }
        if self.config.block_size == 0 {
            return Err(ValidationError::InvalidParameter(
                "block_size must be positive".to_string(),
            ));
        }
        let level = self.config.confidence_level;
        if !(level > 0.0 && level < 1.0) {
            return Err(ValidationError::InvalidParameter(format!(
                "confidence_level must be in (0, 1), got {level}"
            )));
        }
        Ok(())
    }

    fn run_trial<R: RandomSource>(&self, returns: &[f64], rng: &mut R) -> TrialMetrics {
        let resample = self.block_bootstrap(returns, rng);
        TrialMetrics::score(&resample)
    }

    fn aggregate(&self, returns: &[f64], trials: &[TrialMetrics]) -> MonteCarloResult {
        let simulations = trials.len();
        let level = self.config.confidence_level;
        let alpha = 1.0 - level;
        let ci_low = alpha / 2.0;
        let ci_high = 1.0 - ci_low;

        let distribution = sorted(trials.iter().map(|t| t.total_return));

        let var_threshold = percentile(&distribution, alpha);
        let tail: Vec<f64> = distribution
            .iter()
            .copied()
            .take_while(|r| *r <= var_threshold)
            .collect();

        let interval = |values: Vec<f64>| MetricInterval {
            mean: mean(&values),
            ci_lower: percentile(&values, ci_low),
            ci_upper: percentile(&values, ci_high),
        };

        let profitable = trials.iter().filter(|t| t.total_return > 0.0).count();
        let ruined = trials
            .iter()
            .filter(|t| t.max_drawdown > RUIN_DRAWDOWN)
            .count();

        MonteCarloResult {
            simulations,
            confidence_level: level,
            mean_return: mean(&distribution),
            median_return: percentile(&distribution, 0.5),
            std_dev: population_std_dev(&distribution),
            skewness: skewness(&distribution),
            kurtosis: excess_kurtosis(&distribution),
            value_at_risk: -var_threshold,
            conditional_var: -mean(&tail),
            sharpe: interval(sorted(trials.iter().map(|t| t.sharpe))),
            max_drawdown: interval(sorted(trials.iter().map(|t| t.max_drawdown))),
            win_rate: interval(sorted(trials.iter().map(|t| t.win_rate))),
            profit_factor: interval(sorted(trials.iter().map(|t| t.profit_factor))),
            probability_of_profit: profitable as f64 / simulations as f64,
            probability_of_ruin: ruined as f64 / simulations as f64,
            kelly_fraction: KellyCalculator::full_kelly(returns),
            distribution,
        }
    }

    fn finish(&self, result: &MonteCarloResult, started: Instant) {
        increment_counter(CounterMetric::MonteCarloTrials, result.simulations as u64);
        record_duration(DurationMetric::MonteCarlo, started.elapsed());
        tracing::info!(
            mean_return = result.mean_return,
            var = result.value_at_risk,
            prob_profit = result.probability_of_profit,
            prob_ruin = result.probability_of_ruin,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Monte Carlo simulation complete"
        );
    }
}

fn sorted(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut values: Vec<f64> = values.collect();
    values.sort_by(f64::total_cmp);
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noisy_returns(n: usize, seed: u32) -> Vec<f64> {
        let mut rng = SeededRandomGenerator::from_seed(seed);
        (0..n).map(|_| rng.next_normal(0.001, 0.01)).collect()
    }

    fn simulator(simulations: usize, seed: u32) -> MonteCarloSimulator {
        MonteCarloSimulator::new(
            MonteCarloConfig::default()
                .with_simulations(simulations)
                .with_seed(seed),
        )
    }

    #[test]
    fn test_config_defaults() {
        let config = MonteCarloConfig::default();
        assert_eq!(config.simulations, 10_000);
        assert_eq!(config.confidence_level, 0.95);
        assert_eq!(config.block_size, 20);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_insufficient_samples() {
        let result = simulator(100, 1).simulate(&[0.01; 9]);
        assert_eq!(
            result.unwrap_err(),
            ValidationError::InsufficientSamples {
                required: 10,
                actual: 9
            }
        );
    }

    #[test]
    fn test_invalid_confidence_rejected() {
        let sim = MonteCarloSimulator::new(MonteCarloConfig::default().with_confidence(1.0));
        assert!(matches!(
            sim.simulate(&[0.01; 20]),
            Err(ValidationError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_zero_simulations_rejected() {
        let sim = simulator(0, 1);
        assert!(sim.simulate(&[0.01; 20]).is_err());
    }

    #[test]
    fn test_same_seed_is_deterministic() {
        let returns = noisy_returns(200, 11);
        let a = simulator(500, 42).simulate(&returns).unwrap();
        let b = simulator(500, 42).simulate(&returns).unwrap();
        assert_eq!(a.distribution, b.distribution);
        assert_eq!(a.sharpe, b.sharpe);
        assert_eq!(a.value_at_risk, b.value_at_risk);
        assert_eq!(a.probability_of_ruin, b.probability_of_ruin);
    }

    #[test]
    fn test_different_seeds_differ() {
        let returns = noisy_returns(200, 11);
        let a = simulator(200, 1).simulate(&returns).unwrap();
        let b = simulator(200, 2).simulate(&returns).unwrap();
        assert_ne!(a.distribution, b.distribution);
    }

    #[test]
    fn test_resample_length_matches_input() {
        let mut rng = SeededRandomGenerator::from_seed(3);
        for (n, block) in [(10, 20), (57, 20), (100, 20), (33, 7), (12, 1)] {
            let sim = MonteCarloSimulator::new(MonteCarloConfig::default().with_block_size(block));
            let returns: Vec<f64> = (0..n).map(|i| i as f64).collect();
            for _ in 0..20 {
                assert_eq!(sim.block_bootstrap(&returns, &mut rng).len(), n);
            }
        }
    }

    #[test]
    fn test_resample_preserves_blocks() {
        let block = 5;
        let sim = MonteCarloSimulator::new(MonteCarloConfig::default().with_block_size(block));
        let returns: Vec<f64> = (0..50).map(|i| i as f64).collect();
        let mut rng = SeededRandomGenerator::from_seed(8);
        let resample = sim.block_bootstrap(&returns, &mut rng);
        for (i, pair) in resample.windows(2).enumerate() {
            if (i + 1) % block != 0 {
                assert_eq!(pair[1], pair[0] + 1.0);
            }
        }
    }

    #[test]
    fn test_probabilities_and_intervals() {
        let returns = noisy_returns(250, 21);
        let result = simulator(10_000, 7).simulate(&returns).unwrap();

        assert_eq!(result.simulations, 10_000);
        assert_eq!(result.distribution.len(), 10_000);
        assert!((0.0..=1.0).contains(&result.probability_of_profit));
        assert!((0.0..=1.0).contains(&result.probability_of_ruin));

        for metric in [
            result.sharpe,
            result.max_drawdown,
            result.win_rate,
            result.profit_factor,
        ] {
            assert!(metric.ci_lower <= metric.mean, "{metric:?}");
            assert!(metric.mean <= metric.ci_upper, "{metric:?}");
        }
    }

    #[test]
    fn test_distribution_sorted_and_median() {
        let returns = noisy_returns(120, 5);
        let result = simulator(1_000, 9).simulate(&returns).unwrap();
        assert!(result.distribution.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(result.median_return, percentile(&result.distribution, 0.5));
    }

    #[test]
    fn test_cvar_at_least_var() {
        let returns = noisy_returns(150, 13);
        let result = simulator(2_000, 4).simulate(&returns).unwrap();
        assert!(result.conditional_var >= result.value_at_risk);
        assert_eq!(
            result.value_at_risk,
            -percentile(&result.distribution, 0.05)
        );
    }

    #[test]
    fn test_steadily_rising_series() {
        let returns = vec![0.002; 60];
        let result = simulator(500, 17).simulate(&returns).unwrap();
        assert_eq!(result.max_drawdown.ci_upper, 0.0);
        assert_eq!(result.max_drawdown.mean, 0.0);
        assert_eq!(result.win_rate.ci_lower, 1.0);
        assert_eq!(result.probability_of_profit, 1.0);
        assert_eq!(result.probability_of_ruin, 0.0);
        assert!(result.std_dev < 1e-12);
        let pf = result.profit_factor;
        assert_eq!(pf.mean, f64::INFINITY);
        assert!(pf.ci_lower <= pf.mean && pf.mean <= pf.ci_upper, "{pf:?}");
    }

    #[test]
    fn test_profit_factor_interval_with_lossless_trials() {
        // two losses in 200 periods leave many resamples without a loss
        let returns: Vec<f64> = (0..200)
            .map(|i| if i == 50 || i == 150 { -0.01 } else { 0.003 })
            .collect();
        let result = simulator(10_000, 7).simulate(&returns).unwrap();
        let pf = result.profit_factor;
        assert!(!pf.ci_lower.is_nan() && !pf.ci_upper.is_nan(), "{pf:?}");
        assert!(pf.ci_lower <= pf.mean, "{pf:?}");
        assert!(pf.mean <= pf.ci_upper, "{pf:?}");
    }

    #[test]
    fn test_kelly_uses_original_series() {
        let returns: Vec<f64> = (0..40)
            .map(|i| if i % 2 == 0 { 0.1 } else { -0.05 })
            .collect();
        let result = simulator(100, 1).simulate(&returns).unwrap();
        assert!((result.kelly_fraction - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_ruin_probability_detects_crashes() {
        let mut returns = vec![0.01; 30];
        returns.extend(vec![-0.2; 10]);
        returns.extend(vec![0.01; 30]);
        let result = simulator(2_000, 23).simulate(&returns).unwrap();
        assert!(result.probability_of_ruin > 0.0);
    }

    #[test]
    fn test_parallel_is_deterministic() {
        let returns = noisy_returns(200, 31);
        let a = simulator(1_000, 99).simulate_parallel(&returns, 4).unwrap();
        let b = simulator(1_000, 99).simulate_parallel(&returns, 4).unwrap();
        assert_eq!(a.simulations, 1_000);
        assert_eq!(a.distribution, b.distribution);
    }

    #[test]
    fn test_single_worker_matches_sequential() {
        let returns = noisy_returns(100, 41);
        let sequential = simulator(300, 5).simulate(&returns).unwrap();
        let parallel = simulator(300, 5).simulate_parallel(&returns, 1).unwrap();
        assert_eq!(sequential.distribution, parallel.distribution);
    }

    #[test]
    fn test_uneven_worker_split_keeps_trial_count() {
        let returns = noisy_returns(50, 2);
        let result = simulator(1_001, 6).simulate_parallel(&returns, 4).unwrap();
        assert_eq!(result.distribution.len(), 1_001);
    }
}
