//! Integration tests for CLI commands

use clap::Parser;
use edge_validator::cli::{load_returns, Cli, Commands, ReturnSeries};
use edge_validator::config::Config;

fn write_series(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("returns.csv");
    let mut content = String::from("date,return\n");
    for day in 1..=28 {
        let value = 0.002 + 0.004 * ((day * 5 % 7) as f64 / 7.0 - 0.5);
        content.push_str(&format!("2024-02-{day:02},{value}\n"));
    }
    std::fs::write(&path, content).unwrap();
    path
}

fn parse(args: &[&str]) -> Commands {
    Cli::try_parse_from(args).unwrap().command
}

#[tokio::test]
async fn test_monte_carlo_command() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_series(dir.path());
    let input = input.to_str().unwrap();
    let command = parse(&[
        "edge-validator",
        "monte-carlo",
        "--input",
        input,
        "--simulations",
        "100",
        "--seed",
        "3",
        "--workers",
        "2",
        "--format",
        "json",
    ]);
    match command {
        Commands::MonteCarlo(args) => args.execute(&Config::default()).await.unwrap(),
        other => panic!("unexpected command {other:?}"),
    }
}

#[tokio::test]
async fn test_walk_forward_command_with_dates() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_series(dir.path());
    assert!(matches!(load_returns(&input).unwrap(), ReturnSeries::Dated(_)));

    let command = parse(&[
        "edge-validator",
        "walk-forward",
        "--input",
        input.to_str().unwrap(),
        "--periods",
        "1",
    ]);
    match command {
        Commands::WalkForward(args) => args.execute(&Config::default()).await.unwrap(),
        other => panic!("unexpected command {other:?}"),
    }
}

#[tokio::test]
async fn test_backtest_exports_returns() {
    let dir = tempfile::tempdir().unwrap();
    let export = dir.path().join("daily.json");
    let command = parse(&[
        "edge-validator",
        "backtest",
        "--start",
        "2024-01-01",
        "--end",
        "2024-01-04",
        "--chains",
        "42161",
        "--seed",
        "5",
        "--export-returns",
        export.to_str().unwrap(),
        "--format",
        "json",
    ]);
    match command {
        Commands::Backtest(args) => args.execute(&Config::default()).await.unwrap(),
        other => panic!("unexpected command {other:?}"),
    }

    match load_returns(&export).unwrap() {
        ReturnSeries::Dated(returns) => assert_eq!(returns.len(), 3),
        other => panic!("expected dated returns, got {other:?}"),
    }
}

#[tokio::test]
async fn test_validate_rejects_missing_file() {
    let command = parse(&["edge-validator", "validate", "--input", "/nonexistent/returns.json"]);
    match command {
        Commands::Validate(args) => assert!(args.execute(&Config::default()).await.is_err()),
        other => panic!("unexpected command {other:?}"),
    }
}
