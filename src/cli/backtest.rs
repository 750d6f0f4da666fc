//! Backtest command implementation

use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;

use super::input::write_returns;
use super::output::{emit, OutputFormat};
use super::suite::suite_from_config;
use crate::backtest::RealisticBacktester;
use crate::config::Config;

#[derive(Args, Debug, Clone)]
pub struct BacktestArgs {
    /// First simulated day (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// First day not simulated (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Comma-separated chain ids
    #[arg(long, value_delimiter = ',')]
    pub chains: Option<Vec<u64>>,

    /// Seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u32>,

    /// Submit through a private relay
    #[arg(long)]
    pub private_mempool: bool,

    /// Trade with own capital instead of flash loans
    #[arg(long)]
    pub no_flash_loan: bool,

    /// Write daily returns (net profit / capital) to this JSON file
    #[arg(long)]
    pub export_returns: Option<PathBuf>,

    /// Run the validation suite on the daily returns
    #[arg(long)]
    pub validate: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl BacktestArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let mut backtest = config.backtest.to_backtest_config();
        if let Some(start) = self.start {
            backtest.start_date = start;
        }
        if let Some(end) = self.end {
            backtest.end_date = end;
        }
        if let Some(chains) = &self.chains {
            backtest.chains = chains.clone();
        }
        if self.seed.is_some() {
            backtest.seed = self.seed;
        }
        if self.private_mempool {
            backtest.private_mempool = true;
        }
        if self.no_flash_loan {
            backtest.flash_loan = false;
        }
        let capital = backtest.our_capital_usd;

        let backtester = RealisticBacktester::new(backtest);
        let result = tokio::task::spawn_blocking(move || backtester.run()).await??;
        emit(self.format, &result, |r| r.format_table())?;

        if let Some(path) = &self.export_returns {
            write_returns(path, &result.dated_returns(capital))?;
            tracing::info!(path = %path.display(), days = result.days.len(), "Exported daily returns");
        }

        if self.validate {
            let returns = result.daily_returns(capital);
            let suite = suite_from_config(config);
            let report = tokio::task::spawn_blocking(move || suite.run(&returns)).await??;
            emit(self.format, &report, |r| r.format_table())?;
        }

        Ok(())
    }
}
