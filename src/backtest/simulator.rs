//! Day-by-day competitive backtest engine

use rayon::prelude::*;
use std::collections::BTreeMap;
use std::time::Instant;

use super::calendar::DayRange;
use super::chains::ChainProfile;
use super::competition::{CompetitionModel, Competitor, OUR_NAME};
use super::execution_model::{ExecutionSettings, ExecutionSimulator};
use super::opportunity::OpportunityGenerator;
use super::types::{BacktestError, DailyStats, FailureReason, RealisticBacktestResult};
use super::RealisticBacktestConfig;
use crate::random::{derive_seed, SeededRandomGenerator};
use crate::stats::{annualized_sharpe, mean};
use crate::telemetry::{increment_counter, record_duration, CounterMetric, DurationMetric};

/// Days per year for the daily Sharpe ratio; chains trade every day
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Stream reserved for execution draws within a day
const EXECUTION_STREAM: u32 = 0;

struct DayOutcome {
    stats: DailyStats,
    competitor_wins: BTreeMap<String, usize>,
}

/// Runs the opportunity, race and cost models over a date range
pub struct RealisticBacktester {
    config: RealisticBacktestConfig,
    executor: ExecutionSimulator,
}

impl RealisticBacktester {
    /// Create a backtester with the default rival roster
    pub fn new(config: RealisticBacktestConfig) -> Self {
        let competition = CompetitionModel::with_default_roster(
            config.our_latency_ms,
            config.our_latency_jitter_ms,
        );
        Self::with_competition(config, competition)
    }

    /// Create a backtester racing a custom roster
    pub fn with_competitors(config: RealisticBacktestConfig, competitors: Vec<Competitor>) -> Self {
        let competition = CompetitionModel::new(
            competitors,
            config.our_latency_ms,
            config.our_latency_jitter_ms,
        );
        Self::with_competition(config, competition)
    }

    fn with_competition(config: RealisticBacktestConfig, competition: CompetitionModel) -> Self {
        let settings = ExecutionSettings {
            private_mempool: config.private_mempool,
            flash_loan: config.flash_loan,
            eth_price_usd: config.eth_price_usd,
            detection_delay_ms: config.detection_delay_ms,
        };
        Self {
            executor: ExecutionSimulator::new(competition, settings),
            config,
        }
    }

    pub fn config(&self) -> &RealisticBacktestConfig {
        &self.config
    }

    /// Run the backtest
    ///
    /// Every day draws from its own seeded streams, so days run in parallel
    /// and the result is identical for a fixed seed.
    pub fn run(&self) -> Result<RealisticBacktestResult, BacktestError> {
        let chains = self.chain_profiles()?;
        let start = self.config.start_date;
        let end = self.config.end_date;
        let started = Instant::now();

        let base_seed = self
            .config
            .seed
            .unwrap_or_else(|| SeededRandomGenerator::new(None).state());

        tracing::info!(
            %start,
            %end,
            chains = ?self.config.chains,
            seed = base_seed,
            "Starting competitive backtest"
        );

        let dates: Vec<_> = DayRange::new(start, end).collect();
        let outcomes: Vec<DayOutcome> = dates
            .par_iter()
            .enumerate()
            .map(|(day_index, &date)| {
                let day_seed = derive_seed(base_seed, day_index as u32);
                self.simulate_day(date, day_seed, &chains)
            })
            .collect();

        let result = self.summarize(outcomes);
        record_duration(DurationMetric::Backtest, started.elapsed());

        tracing::info!(
            days = result.days.len(),
            executed = result.total_executed,
            won = result.total_won,
            net_profit = result.net_profit,
            "Backtest complete"
        );

        Ok(result)
    }

    fn chain_profiles(&self) -> Result<Vec<&'static ChainProfile>, BacktestError> {
        if self.config.end_date <= self.config.start_date {
            return Err(BacktestError::InvalidDateRange {
                start: self.config.start_date,
                end: self.config.end_date,
            });
        }
        if self.config.chains.is_empty() {
            return Err(BacktestError::NoChains);
        }
        self.config
            .chains
            .iter()
            .map(|&id| ChainProfile::lookup(id).ok_or(BacktestError::UnknownChain(id)))
            .collect()
    }

    fn max_trade_usd(&self) -> f64 {
        if self.config.flash_loan {
            self.config.max_trade_usd
        } else {
            self.config.max_trade_usd.min(self.config.our_capital_usd)
        }
    }

    fn simulate_day(
        &self,
        date: chrono::NaiveDate,
        day_seed: u32,
        chains: &[&'static ChainProfile],
    ) -> DayOutcome {
        let max_trade = self.max_trade_usd();
        let mut exec_rng = SeededRandomGenerator::from_seed(derive_seed(day_seed, EXECUTION_STREAM));
        let mut stats = DailyStats::new(date);
        let mut competitor_wins = BTreeMap::new();
        let mut competitors_seen = 0usize;
        let mut latency_total = 0.0;

        for (i, chain) in chains.iter().enumerate() {
            let mut gen_rng = SeededRandomGenerator::from_seed(derive_seed(day_seed, i as u32 + 1));
            let generator = OpportunityGenerator::new(date, &mut gen_rng);
            let opportunities = generator.generate(chain, &mut gen_rng);
            stats.opportunities += opportunities.len();

            for opportunity in &opportunities {
                let result = self.executor.execute(
                    opportunity,
                    self.config.min_profit_usd,
                    max_trade,
                    &mut exec_rng,
                );
                if !result.executed {
                    continue;
                }

                stats.executed += 1;
                competitors_seen += result.num_competing;
                latency_total += result.latency_ms;

                match result.failure {
                    None => stats.won += 1,
                    Some(FailureReason::LostRace) => stats.lost += 1,
                    Some(FailureReason::Reverted) => stats.failed += 1,
                    Some(FailureReason::BelowMinProfit) => {}
                }

                stats.gross_profit += result.gross_profit - result.fee_cost;
                stats.gas_cost += result.gas_cost;
                stats.slippage_cost += result.slippage_cost;
                stats.failed_tx_cost += result.failed_tx_cost;

                if let Some(winner) = result.winner.filter(|w| w != OUR_NAME) {
                    *competitor_wins.entry(winner).or_insert(0) += 1;
                }
            }
        }

        stats.net_profit =
            stats.gross_profit - stats.gas_cost - stats.slippage_cost - stats.failed_tx_cost;
        if stats.executed > 0 {
            stats.avg_competitors = competitors_seen as f64 / stats.executed as f64;
            stats.avg_latency_ms = latency_total / stats.executed as f64;
        }

        increment_counter(CounterMetric::OpportunitiesGenerated, stats.opportunities as u64);
        increment_counter(CounterMetric::OpportunitiesExecuted, stats.executed as u64);
        increment_counter(CounterMetric::RacesWon, (stats.won + stats.failed) as u64);
        increment_counter(CounterMetric::RacesLost, stats.lost as u64);
        increment_counter(CounterMetric::TransactionsReverted, stats.failed as u64);

        tracing::debug!(
            %date,
            opportunities = stats.opportunities,
            executed = stats.executed,
            won = stats.won,
            net_profit = stats.net_profit,
            "Day simulated"
        );

        DayOutcome {
            stats,
            competitor_wins,
        }
    }

    fn summarize(&self, outcomes: Vec<DayOutcome>) -> RealisticBacktestResult {
        let mut competitor_wins: BTreeMap<String, usize> = BTreeMap::new();
        let mut days = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            for (name, wins) in outcome.competitor_wins {
                *competitor_wins.entry(name).or_insert(0) += wins;
            }
            days.push(outcome.stats);
        }
        days.sort_by_key(|d| d.date);

        let nets: Vec<f64> = days.iter().map(|d| d.net_profit).collect();
        let profitable_days = nets.iter().filter(|&&n| n > 0.0).count();

        let mut cumulative = 0.0;
        let mut peak = 0.0_f64;
        let mut max_drawdown_usd = 0.0_f64;
        for net in &nets {
            cumulative += net;
            peak = peak.max(cumulative);
            max_drawdown_usd = max_drawdown_usd.max(peak - cumulative);
        }

        RealisticBacktestResult {
            start_date: self.config.start_date,
            end_date: self.config.end_date,
            chains: self.config.chains.clone(),
            total_opportunities: days.iter().map(|d| d.opportunities).sum(),
            total_executed: days.iter().map(|d| d.executed).sum(),
            total_won: days.iter().map(|d| d.won).sum(),
            total_lost: days.iter().map(|d| d.lost).sum(),
            total_failed: days.iter().map(|d| d.failed).sum(),
            gross_profit: days.iter().map(|d| d.gross_profit).sum(),
            gas_cost: days.iter().map(|d| d.gas_cost).sum(),
            slippage_cost: days.iter().map(|d| d.slippage_cost).sum(),
            failed_tx_cost: days.iter().map(|d| d.failed_tx_cost).sum(),
            net_profit: nets.iter().sum(),
            profitable_days,
            unprofitable_days: days.len() - profitable_days,
            max_drawdown_usd,
            sharpe_ratio: annualized_sharpe(&nets, DAYS_PER_YEAR),
            avg_competitors: active_day_average(&days, |d| d.avg_competitors),
            avg_latency_ms: active_day_average(&days, |d| d.avg_latency_ms),
            competitor_wins,
            days,
        }
    }
}

/// Mean of a per-day race average over days that submitted anything
///
/// Idle days carry no race data and are left out.
fn active_day_average(days: &[DailyStats], field: impl Fn(&DailyStats) -> f64) -> f64 {
    let values: Vec<f64> = days.iter().filter(|d| d.executed > 0).map(field).collect();
    mean(&values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn config(days: u64, chains: Vec<u64>) -> RealisticBacktestConfig {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        RealisticBacktestConfig {
            start_date: start,
            end_date: start + chrono::Days::new(days),
            chains,
            seed: Some(42),
            ..Default::default()
        }
    }

    #[test]
    fn test_fixed_seed_reproduces_days() {
        let backtester = RealisticBacktester::new(config(3, vec![42161]));
        let first = backtester.run().unwrap();
        let second = backtester.run().unwrap();
        assert_eq!(first.days.len(), 3);
        assert_eq!(first.days, second.days);
        assert_eq!(first.competitor_wins, second.competitor_wins);
    }

    #[test]
    fn test_day_net_identity() {
        let result = RealisticBacktester::new(config(5, vec![1, 42161, 8453])).run().unwrap();
        for day in &result.days {
            let expected = day.gross_profit - day.gas_cost - day.slippage_cost - day.failed_tx_cost;
            assert!((day.net_profit - expected).abs() < 1e-9);
            assert_eq!(day.executed, day.won + day.lost + day.failed);
            assert!(day.executed <= day.opportunities);
        }
        assert_eq!(result.profitable_days + result.unprofitable_days, 5);
        let summed: f64 = result.days.iter().map(|d| d.net_profit).sum();
        assert!((result.net_profit - summed).abs() < 1e-6);
    }

    #[test]
    fn test_days_in_date_order() {
        let result = RealisticBacktester::new(config(10, vec![10])).run().unwrap();
        for pair in result.days.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
    }

    #[test]
    fn test_no_rivals_never_lose_to_a_name() {
        let backtester = RealisticBacktester::with_competitors(config(3, vec![42161]), Vec::new());
        let result = backtester.run().unwrap();
        assert!(result.competitor_wins.is_empty());
        assert!(result.days.iter().all(|d| d.avg_competitors == 0.0));
    }

    #[test]
    fn test_invalid_range() {
        let err = RealisticBacktester::new(config(0, vec![1])).run().unwrap_err();
        assert!(matches!(err, BacktestError::InvalidDateRange { .. }));
    }

    #[test]
    fn test_no_chains() {
        let err = RealisticBacktester::new(config(3, vec![])).run().unwrap_err();
        assert_eq!(err, BacktestError::NoChains);
    }

    #[test]
    fn test_unknown_chain() {
        let err = RealisticBacktester::new(config(3, vec![1, 56])).run().unwrap_err();
        assert_eq!(err, BacktestError::UnknownChain(56));
    }

    #[test]
    fn test_capital_caps_trade_without_flash_loan() {
        let mut cfg = config(1, vec![1]);
        cfg.flash_loan = false;
        cfg.our_capital_usd = 1_000.0;
        cfg.max_trade_usd = 50_000.0;
        assert_eq!(RealisticBacktester::new(cfg).max_trade_usd(), 1_000.0);
    }

    #[test]
    fn test_race_averages_skip_idle_days() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut busy = DailyStats::new(start);
        busy.executed = 4;
        busy.avg_competitors = 3.0;
        busy.avg_latency_ms = 60.0;
        let idle = DailyStats::new(start + chrono::Days::new(1));
        let days = vec![busy, idle];
        assert_eq!(active_day_average(&days, |d| d.avg_competitors), 3.0);
        assert_eq!(active_day_average(&days, |d| d.avg_latency_ms), 60.0);
        assert_eq!(active_day_average(&days[1..], |d| d.avg_latency_ms), 0.0);
    }
}
