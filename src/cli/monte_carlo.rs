//! Monte Carlo command implementation

use clap::Args;
use std::path::PathBuf;

use super::input::load_returns;
use super::output::{emit, OutputFormat};
use crate::config::Config;
use crate::validation::MonteCarloSimulator;

#[derive(Args, Debug, Clone)]
pub struct MonteCarloArgs {
    /// Return series file (JSON array or one value per line)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Number of bootstrap trials
    #[arg(long)]
    pub simulations: Option<usize>,

    /// Resampled block length
    #[arg(long)]
    pub block_size: Option<usize>,

    /// Seed for reproducible trials
    #[arg(long)]
    pub seed: Option<u32>,

    /// Confidence level for VaR and intervals
    #[arg(long)]
    pub confidence: Option<f64>,

    /// Parallel workers
    #[arg(long)]
    pub workers: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl MonteCarloArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let returns = load_returns(&self.input)?.values();

        let mut settings = config.monte_carlo.clone();
        if let Some(simulations) = self.simulations {
            settings.simulations = simulations;
        }
        if let Some(block_size) = self.block_size {
            settings.block_size = block_size;
        }
        if let Some(confidence) = self.confidence {
            settings.confidence_level = confidence;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        let workers = self.workers.unwrap_or(settings.workers);
        let simulator = MonteCarloSimulator::new(settings.to_simulator_config());

        let result =
            tokio::task::spawn_blocking(move || simulator.simulate_parallel(&returns, workers))
                .await??;

        emit(self.format, &result, |r| r.format_table())
    }
}
