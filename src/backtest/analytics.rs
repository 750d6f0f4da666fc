//! Backtest analytics and reporting

use super::types::RealisticBacktestResult;
use crate::validation::DatedReturn;

impl RealisticBacktestResult {
    /// Daily net profit as a return on capital, empty when capital is not positive
    pub fn daily_returns(&self, capital_usd: f64) -> Vec<f64> {
        if capital_usd <= 0.0 {
            return Vec::new();
        }
        self.days.iter().map(|d| d.net_profit / capital_usd).collect()
    }

    /// Daily returns tagged with their dates
    pub fn dated_returns(&self, capital_usd: f64) -> Vec<DatedReturn> {
        if capital_usd <= 0.0 {
            return Vec::new();
        }
        self.days
            .iter()
            .map(|d| DatedReturn {
                date: d.date,
                value: d.net_profit / capital_usd,
            })
            .collect()
    }

    /// Share of submitted transactions that captured profit
    pub fn win_rate(&self) -> f64 {
        if self.total_executed == 0 {
            0.0
        } else {
            self.total_won as f64 / self.total_executed as f64
        }
    }

    /// Share of generated opportunities that were captured
    pub fn capture_rate(&self) -> f64 {
        if self.total_opportunities == 0 {
            0.0
        } else {
            self.total_won as f64 / self.total_opportunities as f64
        }
    }

    /// Format as table for CLI output
    pub fn format_table(&self) -> String {
        let chains = self
            .chains
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let mut out = format!(
            r#"
══════════════════════════════════════════════════════
           COMPETITIVE BACKTEST RESULTS
══════════════════════════════════════════════════════

Period:           {} to {} ({} days)
Chains:           {}

PERFORMANCE
───────────────────────────────────────────────────────
Gross Profit:     ${:.2}
Gas Cost:         ${:.2}
Slippage Cost:    ${:.2}
Failed Tx Cost:   ${:.2}
Net Profit:       ${:+.2}
Sharpe Ratio:     {:.2}
Max Drawdown:     ${:.2}
Profitable Days:  {} / {}

ACTIVITY
───────────────────────────────────────────────────────
Opportunities:    {}
Executed:         {}
Won:              {} ({:.1}% of executed)
Lost Races:       {}
Reverted:         {}
Capture Rate:     {:.2}%
Avg Competitors:  {:.2}
Avg Latency:      {:.1}ms
"#,
            self.start_date,
            self.end_date,
            self.days.len(),
            chains,
            self.gross_profit,
            self.gas_cost,
            self.slippage_cost,
            self.failed_tx_cost,
            self.net_profit,
            self.sharpe_ratio,
            self.max_drawdown_usd,
            self.profitable_days,
            self.days.len(),
            self.total_opportunities,
            self.total_executed,
            self.total_won,
            self.win_rate() * 100.0,
            self.total_lost,
            self.total_failed,
            self.capture_rate() * 100.0,
            self.avg_competitors,
            self.avg_latency_ms,
        );

        if !self.competitor_wins.is_empty() {
            out.push_str("\nRIVAL WINS\n───────────────────────────────────────────────────────\n");
            let mut ranked: Vec<_> = self.competitor_wins.iter().collect();
            ranked.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
            for (name, wins) in ranked {
                out.push_str(&format!("{name:<18}{wins}\n"));
            }
        }
        out.push_str("══════════════════════════════════════════════════════\n");
        out
    }
}
