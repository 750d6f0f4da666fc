//! Backtesting module
//!
//! Competitive execution backtest: synthetic opportunity flow, latency races
//! against rival searchers and a full cost model, aggregated day by day.

mod analytics;
mod calendar;
mod chains;
mod competition;
mod execution_model;
mod opportunity;
mod simulator;
mod types;

pub use calendar::DayRange;
pub use chains::{participation_rate, ChainProfile, ARBITRUM, MAINNET};
pub use competition::{
    default_roster, CompetitionModel, CompetitionOutcome, Competitor, OUR_NAME, OUR_SUCCESS_RATE,
};
pub use execution_model::{
    slippage_bps, CostBreakdown, ExecutionSettings, ExecutionSimulator, GasPrice,
};
pub use opportunity::{
    diurnal_activity, estimate_competitors, power_law_spread, OpportunityGenerator,
};
pub use simulator::{RealisticBacktester, DAYS_PER_YEAR};
pub use types::{
    BacktestError, DailyStats, ExecutionResult, FailureReason, Opportunity,
    RealisticBacktestResult,
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Competitive backtest configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealisticBacktestConfig {
    /// First simulated day
    pub start_date: NaiveDate,
    /// First day not simulated
    pub end_date: NaiveDate,
    /// Chain ids to trade on
    pub chains: Vec<u64>,
    /// Our detection-to-submission latency
    pub our_latency_ms: f64,
    /// Upper bound of our per-race random delay
    pub our_latency_jitter_ms: f64,
    /// Own capital; caps trade size when flash loans are off
    pub our_capital_usd: f64,
    /// Opportunities modeled below this net profit are skipped
    pub min_profit_usd: f64,
    pub max_trade_usd: f64,
    pub private_mempool: bool,
    pub flash_loan: bool,
    pub eth_price_usd: f64,
    pub detection_delay_ms: f64,
    /// Base seed; `None` seeds from the wall clock
    pub seed: Option<u32>,
}

impl Default for RealisticBacktestConfig {
    fn default() -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap_or_default(),
            chains: vec![1, 42161, 10, 8453],
            our_latency_ms: 50.0,
            our_latency_jitter_ms: 20.0,
            our_capital_usd: 10_000.0,
            min_profit_usd: 5.0,
            max_trade_usd: 50_000.0,
            private_mempool: false,
            flash_loan: true,
            eth_price_usd: 2500.0,
            detection_delay_ms: 500.0,
            seed: None,
        }
    }
}
