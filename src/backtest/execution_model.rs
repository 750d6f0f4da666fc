//! Cost and outcome model for a single opportunity
//!
//! Net profit is modeled before anything is submitted. Opportunities that
//! miss the threshold are skipped at no cost; the rest race the rivals and
//! may still lose or revert, burning gas either way.

use serde::{Deserialize, Serialize};

use super::chains::{ChainProfile, MAINNET};
use super::competition::CompetitionModel;
use super::types::{ExecutionResult, FailureReason, Opportunity};
use crate::random::RandomSource;

/// Round-trip DEX fee
pub const DEX_FEE_BPS: f64 = 60.0;
/// Flash-loan premium
pub const FLASH_LOAN_FEE_BPS: f64 = 9.0;
/// Upper bound of the uniform MEV leakage on the public mempool
pub const MAX_MEV_LEAKAGE_BPS: f64 = 20.0;
/// Detected edge that survives any amount of modeled slippage
pub const SPREAD_FLOOR: f64 = 0.3;
/// Share of gas burned by a transaction that loses the race
pub const LOST_RACE_GAS_SHARE: f64 = 0.3;
/// Chance that a won transaction reverts
pub const REVERT_RATE: f64 = 0.08;

/// Gas for the two swap legs
pub const SWAP_GAS_UNITS: f64 = 180_000.0;
/// Extra gas for borrowing and repaying a flash loan
pub const FLASH_LOAN_GAS_UNITS: f64 = 80_000.0;

const MAX_TRADE_VOLUME_SHARE: f64 = 0.5;
const MAX_TRADE_TVL_SHARE: f64 = 0.01;
const MAX_PRIORITY_SHARE: f64 = 0.5;

/// Execution parameters shared by every opportunity in a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionSettings {
    /// Submit through a private relay; removes MEV leakage
    pub private_mempool: bool,
    /// Borrow the trade size instead of using own capital
    pub flash_loan: bool,
    pub eth_price_usd: f64,
    /// Time from on-chain state change to our detection
    pub detection_delay_ms: f64,
}

impl Default for ExecutionSettings {
    fn default() -> Self {
        Self {
            private_mempool: false,
            flash_loan: true,
            eth_price_usd: 2500.0,
            detection_delay_ms: 500.0,
        }
    }
}

/// Gas price bid for one submission, in gwei
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasPrice {
    pub base_gwei: f64,
    pub priority_fee_gwei: f64,
}

impl GasPrice {
    pub fn total_gwei(&self) -> f64 {
        self.base_gwei + self.priority_fee_gwei
    }
}

/// Cost breakdown computed before submission
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostBreakdown {
    pub trade_size_usd: f64,
    pub gross_profit: f64,
    pub gas_price: GasPrice,
    pub gas_cost: f64,
    pub slippage_cost: f64,
    pub fee_cost: f64,
}

impl CostBreakdown {
    pub fn net_profit(&self) -> f64 {
        self.gross_profit - (self.gas_cost + self.slippage_cost + self.fee_cost)
    }
}

/// Decides whether and how an opportunity is captured
#[derive(Debug, Clone)]
pub struct ExecutionSimulator {
    competition: CompetitionModel,
    settings: ExecutionSettings,
}

impl ExecutionSimulator {
    pub fn new(competition: CompetitionModel, settings: ExecutionSettings) -> Self {
        Self {
            competition,
            settings,
        }
    }

    pub fn competition(&self) -> &CompetitionModel {
        &self.competition
    }

    pub fn settings(&self) -> &ExecutionSettings {
        &self.settings
    }

    /// Model one opportunity end to end
    pub fn execute<R: RandomSource>(
        &self,
        opportunity: &Opportunity,
        min_profit_usd: f64,
        max_trade_usd: f64,
        rng: &mut R,
    ) -> ExecutionResult {
        let costs = self.estimate_costs(opportunity, max_trade_usd, rng);
        let net_profit = costs.net_profit();

        if net_profit < min_profit_usd {
            return ExecutionResult::skipped(opportunity);
        }

        let required_capital = if self.settings.flash_loan {
            0.0
        } else {
            costs.trade_size_usd
        };
        let outcome = self.competition.compete(
            opportunity.value_usd(),
            opportunity.chain_id,
            required_capital,
            rng,
        );

        let mut result = ExecutionResult {
            opportunity_id: opportunity.id,
            chain_id: opportunity.chain_id,
            executed: true,
            won: false,
            failure: None,
            winner: outcome.winner,
            trade_size_usd: costs.trade_size_usd,
            priority_fee_gwei: costs.gas_price.priority_fee_gwei,
            gross_profit: 0.0,
            net_profit: 0.0,
            gas_cost: 0.0,
            slippage_cost: 0.0,
            fee_cost: 0.0,
            failed_tx_cost: 0.0,
            num_competing: outcome.num_competing,
            latency_ms: outcome.our_latency_ms,
        };

        if !outcome.won {
            let sunk = costs.gas_cost * LOST_RACE_GAS_SHARE;
            result.failure = Some(FailureReason::LostRace);
            result.failed_tx_cost = sunk;
            result.net_profit = -sunk;
            return result;
        }

        if rng.chance(REVERT_RATE) {
            result.failure = Some(FailureReason::Reverted);
            result.failed_tx_cost = costs.gas_cost;
            result.net_profit = -costs.gas_cost;
            return result;
        }

        result.won = true;
        result.gross_profit = costs.gross_profit;
        result.gas_cost = costs.gas_cost;
        result.slippage_cost = costs.slippage_cost;
        result.fee_cost = costs.fee_cost;
        result.net_profit = net_profit;
        result
    }

    /// Trade size, gas, slippage and fees for an opportunity
    ///
    /// Draws the gas volatility factor and, on the public mempool, the MEV
    /// leakage.
    pub fn estimate_costs<R: RandomSource>(
        &self,
        opportunity: &Opportunity,
        max_trade_usd: f64,
        rng: &mut R,
    ) -> CostBreakdown {
        let trade_size = max_trade_usd
            .min(MAX_TRADE_VOLUME_SHARE * opportunity.volume_usd)
            .min(MAX_TRADE_TVL_SHARE * opportunity.pool_tvl_usd)
            .max(0.0);
        let raw_spread = opportunity.spread_bps;
        let opportunity_value = trade_size * raw_spread / 10_000.0;

        let gas_price = self.gas_price(opportunity, opportunity_value, rng);
        let gas_cost = self.gas_cost(opportunity.chain_id, gas_price.total_gwei());

        let slippage_bps = slippage_bps(
            trade_size,
            opportunity.pool_tvl_usd,
            opportunity.num_competitors,
            self.settings.detection_delay_ms,
        );
        let effective_spread = (raw_spread - slippage_bps).max(SPREAD_FLOOR * raw_spread);

        let mut fee_bps = DEX_FEE_BPS;
        if self.settings.flash_loan {
            fee_bps += FLASH_LOAN_FEE_BPS;
        }
        if !self.settings.private_mempool {
            fee_bps += rng.next_range(0.0, MAX_MEV_LEAKAGE_BPS);
        }

        CostBreakdown {
            trade_size_usd: trade_size,
            gross_profit: opportunity_value,
            gas_price,
            gas_cost,
            slippage_cost: trade_size * (raw_spread - effective_spread) / 10_000.0,
            fee_cost: trade_size * fee_bps / 10_000.0,
        }
    }

    /// Gas bid for an opportunity worth `opportunity_value` dollars
    ///
    /// Draws the volatility factor. Bigger prizes and more rivals raise the
    /// base price; the priority fee is a value-scaled share of it, capped at
    /// half.
    pub fn gas_price<R: RandomSource>(
        &self,
        opportunity: &Opportunity,
        opportunity_value: f64,
        rng: &mut R,
    ) -> GasPrice {
        let value_magnitude = opportunity_value.max(1.0).log10();
        let volatility = rng.next_range(0.9, 1.3);
        let value_factor = 1.0 + 0.1 * value_magnitude;
        let competition_factor = 1.0 + 0.05 * f64::from(opportunity.num_competitors);

        let base_gwei = opportunity.gas_gwei * volatility * value_factor * competition_factor;
        let priority_share = (0.1 + 0.05 * value_magnitude).min(MAX_PRIORITY_SHARE);
        GasPrice {
            base_gwei,
            priority_fee_gwei: base_gwei * priority_share,
        }
    }

    /// Dollar cost of one submission at the given gas price
    pub fn gas_cost(&self, chain_id: u64, gas_gwei: f64) -> f64 {
        let units = if self.settings.flash_loan {
            SWAP_GAS_UNITS + FLASH_LOAN_GAS_UNITS
        } else {
            SWAP_GAS_UNITS
        };
        let base = units * gas_gwei * 1e-9 * self.settings.eth_price_usd;
        if chain_id == MAINNET {
            return base;
        }
        match ChainProfile::lookup(chain_id) {
            Some(profile) => base * profile.gas_cost_multiplier + profile.l1_data_fee_usd,
            None => base,
        }
    }
}

/// Total modeled slippage in basis points
pub fn slippage_bps(
    trade_size_usd: f64,
    pool_tvl_usd: f64,
    num_competitors: u32,
    detection_delay_ms: f64,
) -> f64 {
    let size_term = if pool_tvl_usd > 0.0 {
        trade_size_usd / (4.0 * pool_tvl_usd)
    } else {
        0.0
    };
    let competition_term = f64::from(num_competitors) * 0.3 * 1.5;
    let time_decay_term = detection_delay_ms / 1000.0 * 2.0;
    size_term + competition_term + time_decay_term
}
