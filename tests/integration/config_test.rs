//! Integration tests for configuration loading

use edge_validator::config::Config;
use edge_validator::telemetry::LogFormat;

#[test]
fn test_config_example_parses() {
    let config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();
    assert_eq!(config.monte_carlo.simulations, 10_000);
    assert_eq!(config.validation.walk_forward_periods, 5);
    assert_eq!(config.backtest.chains, vec![1, 42161, 10, 8453]);
    assert!(config.backtest.flash_loan);
    assert_eq!(config.telemetry.log_format, LogFormat::Pretty);
}

#[test]
fn test_example_backtest_config_runs() {
    let config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();
    let mut backtest = config.backtest.to_backtest_config();
    backtest.end_date = backtest.start_date + chrono::Days::new(2);
    backtest.seed = Some(1);
    let result = edge_validator::backtest::RealisticBacktester::new(backtest)
        .run()
        .unwrap();
    assert_eq!(result.days.len(), 2);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[backtest]\nchains = [137]\nmin_profit_usd = \"12.5\"\n").unwrap();
    let config = Config::load(&path).unwrap();
    assert_eq!(config.backtest.chains, vec![137]);
    assert_eq!(config.backtest.to_backtest_config().min_profit_usd, 12.5);
    assert_eq!(config.monte_carlo.block_size, 20);
}
