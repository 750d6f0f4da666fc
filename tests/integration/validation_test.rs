//! Integration tests for the validation pipeline

use edge_validator::random::{RandomSource, SeededRandomGenerator};
use edge_validator::validation::{
    MonteCarloConfig, MonteCarloSimulator, ValidationError, ValidationSuite, WalkForwardConfig,
};

fn noisy_returns(seed: u32, n: usize, drift: f64) -> Vec<f64> {
    let mut rng = SeededRandomGenerator::from_seed(seed);
    (0..n).map(|_| rng.next_normal(drift, 0.01)).collect()
}

#[test]
fn test_monte_carlo_is_reproducible() {
    let returns = noisy_returns(1, 250, 0.001);
    let simulator = MonteCarloSimulator::new(
        MonteCarloConfig::default().with_simulations(500).with_seed(2024),
    );
    let first = simulator.simulate(&returns).unwrap();
    let second = simulator.simulate(&returns).unwrap();
    assert_eq!(first.distribution, second.distribution);
    assert_eq!(first.value_at_risk, second.value_at_risk);
    assert_eq!(first.sharpe, second.sharpe);
}

#[test]
fn test_monte_carlo_interval_ordering() {
    let returns = noisy_returns(5, 300, 0.0005);
    let simulator = MonteCarloSimulator::new(
        MonteCarloConfig::default().with_simulations(10_000).with_seed(9),
    );
    let result = simulator.simulate(&returns).unwrap();
    assert!((0.0..=1.0).contains(&result.probability_of_profit));
    for interval in [
        result.sharpe,
        result.max_drawdown,
        result.win_rate,
        result.profit_factor,
    ] {
        assert!(interval.ci_lower <= interval.mean);
        assert!(interval.mean <= interval.ci_upper);
    }
    assert!(result.conditional_var >= result.value_at_risk);
}

#[test]
fn test_parallel_matches_single_worker() {
    let returns = noisy_returns(3, 120, 0.001);
    let simulator = MonteCarloSimulator::new(
        MonteCarloConfig::default().with_simulations(300).with_seed(77),
    );
    let single = simulator.simulate(&returns).unwrap();
    let one_worker = simulator.simulate_parallel(&returns, 1).unwrap();
    assert_eq!(single.distribution, one_worker.distribution);

    let four = simulator.simulate_parallel(&returns, 4).unwrap();
    let again = simulator.simulate_parallel(&returns, 4).unwrap();
    assert_eq!(four.simulations, 300);
    assert_eq!(four.distribution, again.distribution);
}

#[test]
fn test_short_series_rejected() {
    let simulator = MonteCarloSimulator::new(MonteCarloConfig::default());
    let err = simulator.simulate(&[0.01; 9]).unwrap_err();
    assert_eq!(
        err,
        ValidationError::InsufficientSamples {
            required: 10,
            actual: 9
        }
    );
}

#[test]
fn test_suite_report() {
    let returns = noisy_returns(11, 200, 0.002);
    let suite = ValidationSuite::new(
        MonteCarloConfig::default().with_simulations(400).with_seed(1),
        WalkForwardConfig::default(),
        0.7,
    );
    let report = suite.run(&returns).unwrap();
    assert_eq!(report.validation.in_sample.trades, 140);
    assert_eq!(report.validation.tests.len(), 5);
    assert_eq!(report.walk_forward.periods.len(), 5);
    assert!((0.0..=1.0).contains(&report.validation.overfit_score));
    assert!(report.recommended_position <= 0.20);
    assert!(!report.validation.recommendations.is_empty());

    let table = report.format_table();
    assert!(table.contains("MONTE CARLO SIMULATION"));
    assert!(table.contains("WALK-FORWARD ANALYSIS"));
}
