//! Suite command implementation

use clap::Args;
use std::path::PathBuf;

use super::input::load_returns;
use super::output::{emit, OutputFormat};
use crate::config::Config;
use crate::validation::{StatisticalValidator, ValidationSuite};

#[derive(Args, Debug, Clone)]
pub struct SuiteArgs {
    /// Return series file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Validation suite built from the configuration file
pub fn suite_from_config(config: &Config) -> ValidationSuite {
    ValidationSuite::new(
        config.monte_carlo.to_simulator_config(),
        config.validation.to_walk_forward_config(),
        config.validation.split_ratio,
    )
    .with_validator(StatisticalValidator::new().with_ljung_box_lags(config.validation.ljung_box_lags))
    .with_workers(config.monte_carlo.workers)
}

impl SuiteArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let returns = load_returns(&self.input)?.values();
        let suite = suite_from_config(config);

        let report = tokio::task::spawn_blocking(move || suite.run(&returns)).await??;

        emit(self.format, &report, |r| r.format_table())
    }
}
