//! Validate command implementation

use clap::Args;
use std::path::PathBuf;

use super::input::load_returns;
use super::output::{emit, OutputFormat};
use super::suite::suite_from_config;
use crate::config::Config;

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Return series file
    #[arg(short, long)]
    pub input: PathBuf,

    /// In-sample share of the series
    #[arg(long)]
    pub split: Option<f64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl ValidateArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let returns = load_returns(&self.input)?.values();
        let split = self.split.unwrap_or(config.validation.split_ratio);
        let suite = suite_from_config(config);

        let result = tokio::task::spawn_blocking(move || suite.validate(&returns, split)).await??;

        emit(self.format, &result, |r| r.format_table())
    }
}
