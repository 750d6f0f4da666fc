//! Plain-text tables for validation results

use super::types::{MonteCarloResult, SuiteReport, ValidationResult, WalkForwardResult};

const RULE: &str = "═══════════════════════════════════════════════════════";
const THIN: &str = "───────────────────────────────────────────────────────";

impl MonteCarloResult {
    /// Format as a text table
    pub fn format_table(&self) -> String {
        let ci = self.confidence_level * 100.0;
        format!(
            r#"
{RULE}
               MONTE CARLO SIMULATION
{RULE}

RETURN DISTRIBUTION ({} trials)
{THIN}
Mean Return:      {:+.2}%
Median Return:    {:+.2}%
Std Dev:          {:.2}%
Skewness:         {:.3}
Excess Kurtosis:  {:.3}

RISK
{THIN}
VaR ({ci:.0}%):        {:.2}%
CVaR ({ci:.0}%):       {:.2}%
P(Profit):        {:.1}%
P(Ruin):          {:.1}%
Kelly Fraction:   {:.3}

METRICS ({ci:.0}% interval)
{THIN}
Sharpe Ratio:     {:.2}  [{:.2}, {:.2}]
Max Drawdown:     {:.2}%  [{:.2}%, {:.2}%]
Win Rate:         {:.1}%  [{:.1}%, {:.1}%]
Profit Factor:    {:.2}  [{:.2}, {:.2}]
{RULE}
"#,
            self.simulations,
            self.mean_return * 100.0,
            self.median_return * 100.0,
            self.std_dev * 100.0,
            self.skewness,
            self.kurtosis,
            self.value_at_risk * 100.0,
            self.conditional_var * 100.0,
            self.probability_of_profit * 100.0,
            self.probability_of_ruin * 100.0,
            self.kelly_fraction,
            self.sharpe.mean,
            self.sharpe.ci_lower,
            self.sharpe.ci_upper,
            self.max_drawdown.mean * 100.0,
            self.max_drawdown.ci_lower * 100.0,
            self.max_drawdown.ci_upper * 100.0,
            self.win_rate.mean * 100.0,
            self.win_rate.ci_lower * 100.0,
            self.win_rate.ci_upper * 100.0,
            self.profit_factor.mean,
            self.profit_factor.ci_lower,
            self.profit_factor.ci_upper,
        )
    }
}

impl ValidationResult {
    /// Format as a text table
    pub fn format_table(&self) -> String {
        let mut out = format!(
            r#"
{RULE}
               OUT-OF-SAMPLE VALIDATION
{RULE}

                  In-Sample   Out-of-Sample
{THIN}
Total Return:     {:>+8.2}%   {:>+8.2}%
Sharpe Ratio:     {:>9.2}   {:>9.2}
Max Drawdown:     {:>8.2}%   {:>8.2}%
Win Rate:         {:>8.1}%   {:>8.1}%
Profit Factor:    {:>9.2}   {:>9.2}
Observations:     {:>9}   {:>9}

Overfit Score:    {:.3}
Degradation:      {:.1}%
Verdict:          {}

STATISTICAL TESTS
{THIN}
"#,
            self.in_sample.total_return * 100.0,
            self.out_of_sample.total_return * 100.0,
            self.in_sample.sharpe_ratio,
            self.out_of_sample.sharpe_ratio,
            self.in_sample.max_drawdown * 100.0,
            self.out_of_sample.max_drawdown * 100.0,
            self.in_sample.win_rate * 100.0,
            self.out_of_sample.win_rate * 100.0,
            self.in_sample.profit_factor,
            self.out_of_sample.profit_factor,
            self.in_sample.trades,
            self.out_of_sample.trades,
            self.overfit_score,
            self.degradation_pct,
            if self.overfit { "OVERFIT" } else { "ROBUST" },
        );
        for test in &self.tests {
            out.push_str(&format!(
                "{:<20} stat={:>9.4}  p={:.4}{}\n    {}\n",
                test.name,
                test.statistic,
                test.p_value,
                if test.significant { "  *" } else { "" },
                test.interpretation,
            ));
        }
        out.push_str(&format!("\nRECOMMENDATIONS\n{THIN}\n"));
        for note in &self.recommendations {
            out.push_str(&format!("- {note}\n"));
        }
        out.push_str(RULE);
        out.push('\n');
        out
    }
}

impl WalkForwardResult {
    /// Format as a text table
    pub fn format_table(&self) -> String {
        let mut out = format!(
            r#"
{RULE}
               WALK-FORWARD ANALYSIS
{RULE}

Window  Train        Test         Train Sharpe  Test Sharpe  Test Return
{THIN}
"#
        );
        for (i, period) in self.periods.iter().enumerate() {
            let train = match (period.train.start_date, period.train.end_date) {
                (Some(start), _) => start.to_string(),
                _ => format!("{}..{}", period.train.start_index, period.train.end_index),
            };
            let test = match (period.test.start_date, period.test.end_date) {
                (Some(start), _) => start.to_string(),
                _ => format!("{}..{}", period.test.start_index, period.test.end_index),
            };
            out.push_str(&format!(
                "{:>6}  {:<11}  {:<11}  {:>12.2}  {:>11.2}  {:>+10.2}%\n",
                i + 1,
                train,
                test,
                period.train_metrics.sharpe_ratio,
                period.test_metrics.sharpe_ratio,
                period.test_metrics.total_return * 100.0,
            ));
        }
        out.push_str(&format!(
            r#"
AGGREGATE (test windows)
{THIN}
Total Return:     {:+.2}%
Sharpe Ratio:     {:.2}
Max Drawdown:     {:.2}%
Consistency:      {:.1}%
Robustness:       {:.3}
{RULE}
"#,
            self.aggregate.total_return * 100.0,
            self.aggregate.sharpe_ratio,
            self.aggregate.max_drawdown * 100.0,
            self.consistency * 100.0,
            self.robustness,
        ));
        out
    }
}

impl SuiteReport {
    /// All three tables followed by the position recommendation
    pub fn format_table(&self) -> String {
        format!(
            "{}{}{}\nRecommended Position: {:.1}% of bankroll (fractional Kelly)\n",
            self.monte_carlo.format_table(),
            self.validation.format_table(),
            self.walk_forward.format_table(),
            self.recommended_position * 100.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::validation::{
        MonteCarloConfig, MonteCarloSimulator, ValidationSuite, WalkForwardAnalyzer,
    };

    fn sample() -> Vec<f64> {
        (0..120)
            .map(|i| 0.003 + 0.01 * ((i * 7 % 11) as f64 / 11.0 - 0.5))
            .collect()
    }

    #[test]
    fn test_monte_carlo_table() {
        let simulator = MonteCarloSimulator::new(
            MonteCarloConfig::default().with_simulations(100).with_seed(1),
        );
        let table = simulator.simulate(&sample()).unwrap().format_table();
        assert!(table.contains("MONTE CARLO SIMULATION"));
        assert!(table.contains("100 trials"));
        assert!(table.contains("VaR (95%)"));
    }

    #[test]
    fn test_validation_table_lists_tests() {
        let result = ValidationSuite::default().validate(&sample(), 0.7).unwrap();
        let table = result.format_table();
        for test in &result.tests {
            assert!(table.contains(&test.name));
        }
        assert!(table.contains("RECOMMENDATIONS"));
    }

    #[test]
    fn test_walk_forward_table_rows() {
        let result = WalkForwardAnalyzer::default().run(&sample()).unwrap();
        let table = result.format_table();
        assert!(table.contains("WALK-FORWARD ANALYSIS"));
        assert!(table.contains("0..16"));
    }
}
