//! Walk-forward command implementation

use clap::Args;
use std::path::PathBuf;

use super::input::{load_returns, ReturnSeries};
use super::output::{emit, OutputFormat};
use crate::config::Config;
use crate::validation::{WalkForwardAnalyzer, WalkForwardConfig};

#[derive(Args, Debug, Clone)]
pub struct WalkForwardArgs {
    /// Return series file; dated input labels windows with dates
    #[arg(short, long)]
    pub input: PathBuf,

    /// Train share of each window
    #[arg(long)]
    pub train_ratio: Option<f64>,

    /// Number of windows
    #[arg(long)]
    pub periods: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl WalkForwardArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let series = load_returns(&self.input)?;
        let analyzer = WalkForwardAnalyzer::new(WalkForwardConfig::new(
            self.train_ratio.unwrap_or(config.validation.train_ratio),
            self.periods.unwrap_or(config.validation.walk_forward_periods),
        ));

        let result = tokio::task::spawn_blocking(move || match series {
            ReturnSeries::Plain(values) => analyzer.run(&values),
            ReturnSeries::Dated(returns) => analyzer.run_dated(&returns),
        })
        .await??;

        emit(self.format, &result, |r| r.format_table())
    }
}
