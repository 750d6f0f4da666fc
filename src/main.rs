use anyhow::Context;
use clap::Parser;
use edge_validator::cli::{Cli, Commands};
use edge_validator::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
            eprintln!("Using default configuration");
            toml::from_str(include_str!("../config.toml.example"))
                .context("Invalid bundled default config")?
        }
    };

    // Initialize telemetry
    let _telemetry = edge_validator::telemetry::init_telemetry(&config.telemetry)?;

    match &cli.command {
        Commands::MonteCarlo(args) => {
            tracing::info!(input = %args.input.display(), "Starting Monte Carlo simulation");
            args.execute(&config).await?;
        }
        Commands::Validate(args) => {
            tracing::info!(input = %args.input.display(), "Starting validation");
            args.execute(&config).await?;
        }
        Commands::WalkForward(args) => {
            tracing::info!(input = %args.input.display(), "Starting walk-forward analysis");
            args.execute(&config).await?;
        }
        Commands::Suite(args) => {
            tracing::info!(input = %args.input.display(), "Starting validation suite");
            args.execute(&config).await?;
        }
        Commands::Backtest(args) => {
            tracing::info!("Starting competitive backtest");
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration ({}):", cli.config);
            println!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
