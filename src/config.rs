//! Configuration types for edge-validator

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::backtest::RealisticBacktestConfig;
use crate::telemetry::LogFormat;
use crate::validation::{MonteCarloConfig, WalkForwardConfig};

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub monte_carlo: MonteCarloSettings,
    #[serde(default)]
    pub validation: ValidationSettings,
    #[serde(default)]
    pub backtest: BacktestSettings,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Monte Carlo simulation configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MonteCarloSettings {
    #[serde(default = "default_simulations")]
    pub simulations: usize,
    #[serde(default = "default_confidence_level")]
    pub confidence_level: f64,
    #[serde(default = "default_block_size")]
    pub block_size: usize,
    /// Fixed seed for reproducible runs
    #[serde(default)]
    pub seed: Option<u32>,
    /// Rayon workers sharing the trials
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_simulations() -> usize {
    10_000
}
fn default_confidence_level() -> f64 {
    0.95
}
fn default_block_size() -> usize {
    20
}
fn default_workers() -> usize {
    1
}

impl Default for MonteCarloSettings {
    fn default() -> Self {
        Self {
            simulations: default_simulations(),
            confidence_level: default_confidence_level(),
            block_size: default_block_size(),
            seed: None,
            workers: default_workers(),
        }
    }
}

impl MonteCarloSettings {
    pub fn to_simulator_config(&self) -> MonteCarloConfig {
        MonteCarloConfig {
            simulations: self.simulations,
            confidence_level: self.confidence_level,
            block_size: self.block_size,
            seed: self.seed,
        }
    }
}

/// Overfitting and walk-forward configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ValidationSettings {
    /// In-sample share of the chronological split
    #[serde(default = "default_ratio")]
    pub split_ratio: f64,
    /// Train share of each walk-forward window
    #[serde(default = "default_ratio")]
    pub train_ratio: f64,
    #[serde(default = "default_walk_forward_periods")]
    pub walk_forward_periods: usize,
    #[serde(default = "default_ljung_box_lags")]
    pub ljung_box_lags: usize,
}

fn default_ratio() -> f64 {
    0.7
}
fn default_walk_forward_periods() -> usize {
    5
}
fn default_ljung_box_lags() -> usize {
    10
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            split_ratio: default_ratio(),
            train_ratio: default_ratio(),
            walk_forward_periods: default_walk_forward_periods(),
            ljung_box_lags: default_ljung_box_lags(),
        }
    }
}

impl ValidationSettings {
    pub fn to_walk_forward_config(&self) -> WalkForwardConfig {
        WalkForwardConfig::new(self.train_ratio, self.walk_forward_periods)
    }
}

/// Competitive backtest configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BacktestSettings {
    /// First simulated day (YYYY-MM-DD)
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,
    /// First day not simulated
    #[serde(default = "default_end_date")]
    pub end_date: NaiveDate,
    #[serde(default = "default_chains")]
    pub chains: Vec<u64>,
    #[serde(default = "default_latency_ms")]
    pub our_latency_ms: f64,
    #[serde(default = "default_latency_jitter_ms")]
    pub our_latency_jitter_ms: f64,
    #[serde(default = "default_capital_usd")]
    pub our_capital_usd: Decimal,
    #[serde(default = "default_min_profit_usd")]
    pub min_profit_usd: Decimal,
    #[serde(default = "default_max_trade_usd")]
    pub max_trade_usd: Decimal,
    #[serde(default)]
    pub private_mempool: bool,
    #[serde(default = "default_true")]
    pub flash_loan: bool,
    #[serde(default = "default_eth_price_usd")]
    pub eth_price_usd: Decimal,
    #[serde(default = "default_detection_delay_ms")]
    pub detection_delay_ms: f64,
    #[serde(default)]
    pub seed: Option<u32>,
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default()
}
fn default_end_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 1).unwrap_or_default()
}
fn default_chains() -> Vec<u64> {
    vec![1, 42161, 10, 8453]
}
fn default_latency_ms() -> f64 {
    50.0
}
fn default_latency_jitter_ms() -> f64 {
    20.0
}
fn default_capital_usd() -> Decimal {
    Decimal::new(10_000, 0)
}
fn default_min_profit_usd() -> Decimal {
    Decimal::new(5, 0)
}
fn default_max_trade_usd() -> Decimal {
    Decimal::new(50_000, 0)
}
fn default_true() -> bool {
    true
}
fn default_eth_price_usd() -> Decimal {
    Decimal::new(2500, 0)
}
fn default_detection_delay_ms() -> f64 {
    500.0
}

impl Default for BacktestSettings {
    fn default() -> Self {
        Self {
            start_date: default_start_date(),
            end_date: default_end_date(),
            chains: default_chains(),
            our_latency_ms: default_latency_ms(),
            our_latency_jitter_ms: default_latency_jitter_ms(),
            our_capital_usd: default_capital_usd(),
            min_profit_usd: default_min_profit_usd(),
            max_trade_usd: default_max_trade_usd(),
            private_mempool: false,
            flash_loan: true,
            eth_price_usd: default_eth_price_usd(),
            detection_delay_ms: default_detection_delay_ms(),
            seed: None,
        }
    }
}

impl BacktestSettings {
    /// Simulation parameters with dollar amounts as floats
    pub fn to_backtest_config(&self) -> RealisticBacktestConfig {
        RealisticBacktestConfig {
            start_date: self.start_date,
            end_date: self.end_date,
            chains: self.chains.clone(),
            our_latency_ms: self.our_latency_ms,
            our_latency_jitter_ms: self.our_latency_jitter_ms,
            our_capital_usd: usd(self.our_capital_usd),
            min_profit_usd: usd(self.min_profit_usd),
            max_trade_usd: usd(self.max_trade_usd),
            private_mempool: self.private_mempool,
            flash_loan: self.flash_loan,
            eth_price_usd: usd(self.eth_price_usd),
            detection_delay_ms: self.detection_delay_ms,
            seed: self.seed,
        }
    }
}

fn usd(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or_default()
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Serve Prometheus metrics on this port
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
