//! Backtest record types

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Backtest errors
#[derive(Debug, Error, PartialEq)]
pub enum BacktestError {
    /// End date not after start date
    #[error("Invalid date range: {start} to {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    /// No chains configured
    #[error("No chains configured")]
    NoChains,
    /// Chain id without a profile
    #[error("Unknown chain id: {0}")]
    UnknownChain(u64),
}

/// A detected cross-pool price discrepancy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Opportunity {
    /// Sequence number within the generating day and chain
    pub id: u64,
    pub chain_id: u64,
    pub timestamp: DateTime<Utc>,
    /// Detected price gap in basis points
    pub spread_bps: f64,
    /// Tradeable volume at the quoted price
    pub volume_usd: f64,
    /// Liquidity of the shallower pool
    pub pool_tvl_usd: f64,
    /// Network gas price at detection time
    pub gas_gwei: f64,
    /// Rival searchers expected to see this opportunity
    pub num_competitors: u32,
}

impl Opportunity {
    /// Nominal dollar value of the spread on the full volume
    pub fn value_usd(&self) -> f64 {
        self.volume_usd * self.spread_bps / 10_000.0
    }
}

/// Why an opportunity did not produce a profit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// Modeled net profit under the threshold, never submitted
    BelowMinProfit,
    /// Another participant landed first, or nobody landed
    LostRace,
    /// Won the race but the transaction reverted
    Reverted,
}

/// Outcome of executing one opportunity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionResult {
    pub opportunity_id: u64,
    pub chain_id: u64,
    /// A transaction was submitted
    pub executed: bool,
    /// The transaction landed and captured the spread
    pub won: bool,
    pub failure: Option<FailureReason>,
    /// Name of the race winner, when someone won
    pub winner: Option<String>,
    pub trade_size_usd: f64,
    /// Priority fee bid on top of the base gas price, in gwei
    pub priority_fee_gwei: f64,
    /// Spread captured before any costs
    pub gross_profit: f64,
    pub net_profit: f64,
    pub gas_cost: f64,
    pub slippage_cost: f64,
    /// DEX, flash-loan and MEV costs
    pub fee_cost: f64,
    /// Gas burned by lost or reverted transactions
    pub failed_tx_cost: f64,
    /// External participants in the race
    pub num_competing: usize,
    /// Our latency in the race including jitter
    pub latency_ms: f64,
}

impl ExecutionResult {
    /// A skip with no cost attached
    pub fn skipped(opportunity: &Opportunity) -> Self {
        Self {
            opportunity_id: opportunity.id,
            chain_id: opportunity.chain_id,
            executed: false,
            won: false,
            failure: Some(FailureReason::BelowMinProfit),
            winner: None,
            trade_size_usd: 0.0,
            priority_fee_gwei: 0.0,
            gross_profit: 0.0,
            net_profit: 0.0,
            gas_cost: 0.0,
            slippage_cost: 0.0,
            fee_cost: 0.0,
            failed_tx_cost: 0.0,
            num_competing: 0,
            latency_ms: 0.0,
        }
    }
}

/// Per-day aggregate of all chains
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyStats {
    pub date: NaiveDate,
    pub opportunities: usize,
    /// Submitted transactions
    pub executed: usize,
    pub won: usize,
    /// Races lost
    pub lost: usize,
    /// Won races that reverted
    pub failed: usize,
    /// Captured spread net of DEX, flash-loan and MEV fees
    pub gross_profit: f64,
    pub gas_cost: f64,
    pub slippage_cost: f64,
    pub failed_tx_cost: f64,
    /// gross - gas - slippage - failed tx cost
    pub net_profit: f64,
    /// Mean external participants per race
    pub avg_competitors: f64,
    /// Mean race latency in milliseconds
    pub avg_latency_ms: f64,
}

impl DailyStats {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            opportunities: 0,
            executed: 0,
            won: 0,
            lost: 0,
            failed: 0,
            gross_profit: 0.0,
            gas_cost: 0.0,
            slippage_cost: 0.0,
            failed_tx_cost: 0.0,
            net_profit: 0.0,
            avg_competitors: 0.0,
            avg_latency_ms: 0.0,
        }
    }
}

/// Complete competitive backtest output
#[derive(Debug, Clone, Serialize)]
pub struct RealisticBacktestResult {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub chains: Vec<u64>,
    pub days: Vec<DailyStats>,
    pub total_opportunities: usize,
    pub total_executed: usize,
    pub total_won: usize,
    pub total_lost: usize,
    pub total_failed: usize,
    pub gross_profit: f64,
    pub gas_cost: f64,
    pub slippage_cost: f64,
    pub failed_tx_cost: f64,
    pub net_profit: f64,
    pub profitable_days: usize,
    pub unprofitable_days: usize,
    /// Largest peak-to-trough fall of cumulative daily net profit, in USD
    pub max_drawdown_usd: f64,
    /// Annualized over 365 days
    pub sharpe_ratio: f64,
    pub avg_competitors: f64,
    pub avg_latency_ms: f64,
    /// Races won by each rival, by name
    pub competitor_wins: BTreeMap<String, usize>,
}
