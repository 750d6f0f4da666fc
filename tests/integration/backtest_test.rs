//! Integration tests for the competitive backtest

use chrono::{Days, NaiveDate};
use edge_validator::backtest::{RealisticBacktestConfig, RealisticBacktester};
use edge_validator::validation::{MonteCarloConfig, MonteCarloSimulator};

fn config(days: u64, chains: Vec<u64>, seed: u32) -> RealisticBacktestConfig {
    let start = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
    RealisticBacktestConfig {
        start_date: start,
        end_date: start + Days::new(days),
        chains,
        seed: Some(seed),
        ..Default::default()
    }
}

#[test]
fn test_three_day_single_chain_is_reproducible() {
    let first = RealisticBacktester::new(config(3, vec![42161], 17)).run().unwrap();
    let second = RealisticBacktester::new(config(3, vec![42161], 17)).run().unwrap();
    assert_eq!(first.days, second.days);
    assert_eq!(first.net_profit, second.net_profit);
}

#[test]
fn test_totals_match_days() {
    let result = RealisticBacktester::new(config(14, vec![1, 42161, 10, 8453], 5))
        .run()
        .unwrap();
    assert_eq!(result.days.len(), 14);
    let opportunities: usize = result.days.iter().map(|d| d.opportunities).sum();
    assert_eq!(result.total_opportunities, opportunities);
    assert_eq!(
        result.total_executed,
        result.total_won + result.total_lost + result.total_failed
    );
    assert!(result.max_drawdown_usd >= 0.0);
    let rival_wins: usize = result.competitor_wins.values().sum();
    assert!(rival_wins <= result.total_lost);
}

#[test]
fn test_mempool_mode_keeps_opportunity_flow() {
    let public = RealisticBacktester::new(config(7, vec![42161], 8)).run().unwrap();
    let mut private_cfg = config(7, vec![42161], 8);
    private_cfg.private_mempool = true;
    let private = RealisticBacktester::new(private_cfg).run().unwrap();
    // generation streams are independent of execution draws
    assert_eq!(public.total_opportunities, private.total_opportunities);
    for (a, b) in public.days.iter().zip(&private.days) {
        assert_eq!(a.opportunities, b.opportunities);
    }
}

#[test]
fn test_daily_returns_feed_monte_carlo() {
    let result = RealisticBacktester::new(config(30, vec![42161, 8453], 21)).run().unwrap();
    let returns = result.daily_returns(10_000.0);
    assert_eq!(returns.len(), 30);

    let simulator = MonteCarloSimulator::new(
        MonteCarloConfig::default().with_simulations(200).with_seed(4),
    );
    let mc = simulator.simulate(&returns).unwrap();
    assert_eq!(mc.distribution.len(), 200);
}
