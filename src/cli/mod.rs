//! CLI interface for edge-validator
//!
//! Provides subcommands for:
//! - `monte-carlo`: Block-bootstrap simulation of a return series
//! - `validate`: In-sample / out-of-sample overfitting check
//! - `walk-forward`: Rolling train/test analysis
//! - `suite`: All validation stages in one pass
//! - `backtest`: Competitive execution backtest
//! - `config`: Show the effective configuration

mod backtest;
mod input;
mod monte_carlo;
mod output;
mod suite;
mod validate;
mod walk_forward;

pub use backtest::BacktestArgs;
pub use input::{load_returns, parse_returns, write_returns, ReturnSeries};
pub use monte_carlo::MonteCarloArgs;
pub use output::OutputFormat;
pub use suite::{suite_from_config, SuiteArgs};
pub use validate::ValidateArgs;
pub use walk_forward::WalkForwardArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "edge-validator")]
#[command(about = "Monte Carlo validation and competitive execution backtests for arbitrage strategies")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Block-bootstrap Monte Carlo simulation
    MonteCarlo(MonteCarloArgs),
    /// In-sample / out-of-sample validation
    Validate(ValidateArgs),
    /// Walk-forward analysis
    WalkForward(WalkForwardArgs),
    /// Monte Carlo, validation and walk-forward together
    Suite(SuiteArgs),
    /// Competitive execution backtest
    Backtest(BacktestArgs),
    /// Show configuration
    Config,
}
