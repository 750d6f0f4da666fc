//! Per-chain market parameters

use serde::Serialize;

/// Chain id of Ethereum mainnet; gas there is paid without a multiplier
pub const MAINNET: u64 = 1;
/// Chain id of Arbitrum One
pub const ARBITRUM: u64 = 42161;

/// Static parameters of one chain
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChainProfile {
    pub chain_id: u64,
    pub name: &'static str,
    /// Opportunities on an ordinary weekday before market multipliers
    pub base_opportunities: u32,
    /// Typical gas price in gwei
    pub base_gas_gwei: f64,
    /// Converts gas paid on this chain into mainnet-denominated dollars
    pub gas_cost_multiplier: f64,
    /// Fixed L1 data-posting fee per transaction
    pub l1_data_fee_usd: f64,
    /// Chance that an eligible rival searcher is active on this chain
    pub participation: f64,
}

const PROFILES: [ChainProfile; 5] = [
    ChainProfile {
        chain_id: MAINNET,
        name: "Ethereum",
        base_opportunities: 30,
        base_gas_gwei: 25.0,
        gas_cost_multiplier: 1.0,
        l1_data_fee_usd: 0.0,
        participation: 1.0,
    },
    ChainProfile {
        chain_id: ARBITRUM,
        name: "Arbitrum",
        base_opportunities: 60,
        base_gas_gwei: 0.1,
        gas_cost_multiplier: 1.0,
        l1_data_fee_usd: 0.10,
        participation: 0.6,
    },
    ChainProfile {
        chain_id: 10,
        name: "Optimism",
        base_opportunities: 35,
        base_gas_gwei: 0.05,
        gas_cost_multiplier: 1.0,
        l1_data_fee_usd: 0.10,
        participation: 0.4,
    },
    ChainProfile {
        chain_id: 8453,
        name: "Base",
        base_opportunities: 45,
        base_gas_gwei: 0.05,
        gas_cost_multiplier: 1.0,
        l1_data_fee_usd: 0.10,
        participation: 0.4,
    },
    ChainProfile {
        chain_id: 137,
        name: "Polygon",
        base_opportunities: 40,
        base_gas_gwei: 60.0,
        // gas is paid in MATIC, not ETH
        gas_cost_multiplier: 0.0003,
        l1_data_fee_usd: 0.0,
        participation: 0.4,
    },
];

/// Participation rate for chains without a profile
pub const DEFAULT_PARTICIPATION: f64 = 0.4;

impl ChainProfile {
    /// Profile for a chain id
    pub fn lookup(chain_id: u64) -> Option<&'static ChainProfile> {
        PROFILES.iter().find(|p| p.chain_id == chain_id)
    }

    /// All known chains
    pub fn all() -> &'static [ChainProfile] {
        &PROFILES
    }

    pub fn is_mainnet(&self) -> bool {
        self.chain_id == MAINNET
    }
}

/// Share of rivals that show up on a chain
pub fn participation_rate(chain_id: u64) -> f64 {
    ChainProfile::lookup(chain_id)
        .map(|p| p.participation)
        .unwrap_or(DEFAULT_PARTICIPATION)
}
