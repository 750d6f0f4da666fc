//! Synthetic arbitrage opportunity flow
//!
//! One generator covers one calendar day. The day's market regime is drawn
//! once at construction, then every chain's flow is scaled by it.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};

use super::chains::ChainProfile;
use super::types::Opportunity;
use crate::random::RandomSource;

/// Smallest detected spread
pub const MIN_SPREAD_BPS: f64 = 10.0;
/// Largest detected spread
pub const MAX_SPREAD_BPS: f64 = 150.0;
/// Power-law exponent of the spread distribution
pub const SPREAD_EXPONENT: f64 = 2.0;
/// Flow multiplier on Saturday and Sunday
pub const WEEKEND_MULTIPLIER: f64 = 0.5;
/// Range of the daily bear-market multiplier
pub const BEAR_MARKET_RANGE: (f64, f64) = (0.35, 0.5);
/// Upper bound of the competitor estimate
pub const MAX_COMPETITORS: u32 = 10;

const VOLUME_MEDIAN_USD: f64 = 25_000.0;
const VOLUME_SIGMA: f64 = 1.0;
const TVL_MEDIAN_USD: f64 = 2_000_000.0;
const TVL_SIGMA: f64 = 1.2;
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Generates one day's opportunities
#[derive(Debug, Clone)]
pub struct OpportunityGenerator {
    date: NaiveDate,
    bear_multiplier: f64,
    weekend_multiplier: f64,
}

impl OpportunityGenerator {
    /// Draw the day's market regime
    pub fn new<R: RandomSource>(date: NaiveDate, rng: &mut R) -> Self {
        let bear_multiplier = rng.next_range(BEAR_MARKET_RANGE.0, BEAR_MARKET_RANGE.1);
        let weekend_multiplier = match date.weekday() {
            Weekday::Sat | Weekday::Sun => WEEKEND_MULTIPLIER,
            _ => 1.0,
        };
        Self {
            date,
            bear_multiplier,
            weekend_multiplier,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn bear_multiplier(&self) -> f64 {
        self.bear_multiplier
    }

    pub fn weekend_multiplier(&self) -> f64 {
        self.weekend_multiplier
    }

    /// Number of opportunities this day produces on a chain
    pub fn opportunity_count(&self, chain: &ChainProfile) -> usize {
        (f64::from(chain.base_opportunities) * self.bear_multiplier * self.weekend_multiplier)
            .round() as usize
    }

    /// Draw every opportunity for a chain, ordered by timestamp
    pub fn generate<R: RandomSource>(&self, chain: &ChainProfile, rng: &mut R) -> Vec<Opportunity> {
        let midnight = self.date.and_time(NaiveTime::default()).and_utc();
        let count = self.opportunity_count(chain);

        let mut opportunities: Vec<Opportunity> = (0..count)
            .map(|i| {
                let offset_secs = rng.next_f64() * SECONDS_PER_DAY;
                let spread_bps = power_law_spread(rng.next_f64());
                let volume_usd = log_normal(rng, VOLUME_MEDIAN_USD, VOLUME_SIGMA);
                let pool_tvl_usd = log_normal(rng, TVL_MEDIAN_USD, TVL_SIGMA);
                let jitter = 0.8 + 0.4 * rng.next_f64();
                let hour = offset_secs / 3600.0;

                Opportunity {
                    id: i as u64,
                    chain_id: chain.chain_id,
                    timestamp: midnight + Duration::milliseconds((offset_secs * 1000.0) as i64),
                    spread_bps,
                    volume_usd,
                    pool_tvl_usd,
                    gas_gwei: chain.base_gas_gwei * diurnal_activity(hour) * jitter,
                    num_competitors: estimate_competitors(spread_bps, volume_usd),
                }
            })
            .collect();

        opportunities.sort_by_key(|o| o.timestamp);
        tracing::trace!(
            date = %self.date,
            chain = chain.chain_id,
            count,
            "Generated opportunities"
        );
        opportunities
    }
}

/// Inverse-CDF draw from a power law bounded to the spread range
pub fn power_law_spread(u: f64) -> f64 {
    let exponent = 1.0 - SPREAD_EXPONENT;
    let ratio = (MAX_SPREAD_BPS / MIN_SPREAD_BPS).powf(exponent);
    MIN_SPREAD_BPS * (1.0 - u * (1.0 - ratio)).powf(1.0 / exponent)
}

/// Network activity over the day, lowest at midnight and highest at noon
pub fn diurnal_activity(hour: f64) -> f64 {
    1.0 + 0.5 * (std::f64::consts::PI * (hour - 6.0) / 12.0).sin()
}

/// Expected rival count, growing with the opportunity's notional value
pub fn estimate_competitors(spread_bps: f64, volume_usd: f64) -> u32 {
    let notional = (spread_bps * volume_usd / 100.0).max(1.0);
    (2.0 + 2.0 * notional.log10())
        .clamp(0.0, f64::from(MAX_COMPETITORS))
        .floor() as u32
}

fn log_normal<R: RandomSource>(rng: &mut R, median: f64, sigma: f64) -> f64 {
    median * rng.next_normal(0.0, sigma).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SeededRandomGenerator;
    use crate::random::testing::ScriptedRandom;

    fn mainnet() -> &'static ChainProfile {
        ChainProfile::lookup(1).unwrap()
    }

    #[test]
    fn test_power_law_bounds() {
        assert!((power_law_spread(0.0) - MIN_SPREAD_BPS).abs() < 1e-9);
        assert!((power_law_spread(1.0) - MAX_SPREAD_BPS).abs() < 1e-9);
        let mid = power_law_spread(0.5);
        assert!(mid > MIN_SPREAD_BPS && mid < 30.0);
    }

    #[test]
    fn test_diurnal_shape() {
        assert!((diurnal_activity(12.0) - 1.5).abs() < 1e-12);
        assert!((diurnal_activity(0.0) - 0.5).abs() < 1e-12);
        assert!((diurnal_activity(6.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_competitor_estimate() {
        assert_eq!(estimate_competitors(10.0, 5.0), 2);
        // 100 * 20_000 / 100 = 20_000 -> 2 + 8.6, clamped
        assert_eq!(estimate_competitors(100.0, 20_000.0), 10);
        assert_eq!(estimate_competitors(150.0, 1e9), MAX_COMPETITORS);
        // 20 * 6_000 / 100 = 1_200 -> 2 + 6.16
        assert_eq!(estimate_competitors(20.0, 6_000.0), 8);
    }

    #[test]
    fn test_weekend_halves_flow() {
        // 2024-01-06 is a Saturday
        let saturday = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
        let monday = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        let mut rng = ScriptedRandom::new(vec![0.5]);
        let weekend = OpportunityGenerator::new(saturday, &mut rng);
        let weekday = OpportunityGenerator::new(monday, &mut rng);
        assert_eq!(weekend.weekend_multiplier(), 0.5);
        assert_eq!(weekday.weekend_multiplier(), 1.0);
        assert_eq!(weekend.bear_multiplier(), weekday.bear_multiplier());
        assert!(weekend.opportunity_count(mainnet()) < weekday.opportunity_count(mainnet()));
    }

    #[test]
    fn test_bear_multiplier_range() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut rng = SeededRandomGenerator::from_seed(5);
        for _ in 0..100 {
            let generator = OpportunityGenerator::new(date, &mut rng);
            assert!((0.35..0.5).contains(&generator.bear_multiplier()));
        }
    }

    #[test]
    fn test_generated_fields_in_range() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let mut rng = SeededRandomGenerator::from_seed(11);
        let generator = OpportunityGenerator::new(date, &mut rng);
        let chain = ChainProfile::lookup(42161).unwrap();
        let opportunities = generator.generate(chain, &mut rng);

        assert_eq!(opportunities.len(), generator.opportunity_count(chain));
        assert!(!opportunities.is_empty());
        for window in opportunities.windows(2) {
            assert!(window[0].timestamp <= window[1].timestamp);
        }
        for o in &opportunities {
            assert_eq!(o.timestamp.date_naive(), date);
            assert!(o.spread_bps >= MIN_SPREAD_BPS && o.spread_bps <= MAX_SPREAD_BPS);
            assert!(o.volume_usd > 0.0 && o.pool_tvl_usd > 0.0);
            assert!(o.gas_gwei >= chain.base_gas_gwei * 0.5 * 0.8 - 1e-12);
            assert!(o.gas_gwei <= chain.base_gas_gwei * 1.5 * 1.2 + 1e-12);
            assert!(o.num_competitors <= MAX_COMPETITORS);
        }
    }

    #[test]
    fn test_same_seed_same_flow() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let run = || {
            let mut rng = SeededRandomGenerator::from_seed(99);
            let generator = OpportunityGenerator::new(date, &mut rng);
            generator.generate(mainnet(), &mut rng)
        };
        assert_eq!(run(), run());
    }
}
