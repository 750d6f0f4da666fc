//! Latency race against rival searchers

use serde::{Deserialize, Serialize};

use super::chains::participation_rate;
use crate::random::RandomSource;

/// Base chance that our own transaction lands once it is first in line
pub const OUR_SUCCESS_RATE: f64 = 0.75;
/// Name recorded when we win a race
pub const OUR_NAME: &str = "us";

/// A rival searcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub name: String,
    /// Typical detection-to-submission latency
    pub latency_ms: f64,
    /// Upper bound of the per-race random delay
    pub latency_jitter_ms: f64,
    /// Chance a submitted transaction lands
    pub success_rate: f64,
    /// Capital available without a flash loan
    pub capital_usd: f64,
    pub active: bool,
}

impl Competitor {
    pub fn new(name: &str, latency_ms: f64, jitter_ms: f64, success_rate: f64, capital_usd: f64) -> Self {
        Self {
            name: name.to_string(),
            latency_ms,
            latency_jitter_ms: jitter_ms,
            success_rate,
            capital_usd,
            active: true,
        }
    }

    #[must_use]
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

/// Default rival roster
pub fn default_roster() -> Vec<Competitor> {
    vec![
        Competitor::new("Wintermute", 12.0, 5.0, 0.85, 50_000_000.0),
        Competitor::new("jaredfromsubway", 18.0, 8.0, 0.80, 10_000_000.0),
        Competitor::new("SCP", 25.0, 10.0, 0.78, 5_000_000.0),
        Competitor::new("Rsync Builder", 30.0, 12.0, 0.72, 2_000_000.0),
        Competitor::new("MEV Alpha", 40.0, 15.0, 0.70, 1_000_000.0),
        Competitor::new("MEV Beta", 55.0, 20.0, 0.65, 250_000.0),
        Competitor::new("Retail Searcher", 150.0, 60.0, 0.50, 25_000.0),
        Competitor::new("Dormant Bot", 20.0, 5.0, 0.80, 3_000_000.0).inactive(),
    ]
}

/// Result of one race
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitionOutcome {
    /// We landed the transaction
    pub won: bool,
    /// Who landed it, if anyone
    pub winner: Option<String>,
    /// External participants in the race
    pub num_competing: usize,
    /// Our latency in this race including jitter
    pub our_latency_ms: f64,
}

struct Participant<'a> {
    name: &'a str,
    latency_ms: f64,
    success_rate: f64,
    is_us: bool,
}

/// Ordered latency race with independent landing rolls
#[derive(Debug, Clone)]
pub struct CompetitionModel {
    competitors: Vec<Competitor>,
    our_latency_ms: f64,
    our_latency_jitter_ms: f64,
}

impl CompetitionModel {
    pub fn new(competitors: Vec<Competitor>, our_latency_ms: f64, our_latency_jitter_ms: f64) -> Self {
        Self {
            competitors,
            our_latency_ms,
            our_latency_jitter_ms,
        }
    }

    /// Model with the default roster
    pub fn with_default_roster(our_latency_ms: f64, our_latency_jitter_ms: f64) -> Self {
        Self::new(default_roster(), our_latency_ms, our_latency_jitter_ms)
    }

    pub fn competitors(&self) -> &[Competitor] {
        &self.competitors
    }

    /// Run one race
    ///
    /// Eligible rivals join with the chain's participation probability. All
    /// participants are ordered by latency plus a fresh jitter draw and the
    /// first whose landing roll succeeds takes the opportunity.
    pub fn compete<R: RandomSource>(
        &self,
        opportunity_value: f64,
        chain_id: u64,
        required_capital: f64,
        rng: &mut R,
    ) -> CompetitionOutcome {
        let participation = participation_rate(chain_id);

        let mut participants: Vec<Participant<'_>> = Vec::new();
        for competitor in self
            .competitors
            .iter()
            .filter(|c| c.active && c.capital_usd >= required_capital)
        {
            if rng.chance(participation) {
                participants.push(Participant {
                    name: &competitor.name,
                    latency_ms: competitor.latency_ms + rng.next_f64() * competitor.latency_jitter_ms,
                    success_rate: competitor.success_rate,
                    is_us: false,
                });
            }
        }
        let num_competing = participants.len();

        let our_latency_ms = self.our_latency_ms + rng.next_f64() * self.our_latency_jitter_ms;
        participants.push(Participant {
            name: OUR_NAME,
            latency_ms: our_latency_ms,
            success_rate: OUR_SUCCESS_RATE,
            is_us: true,
        });

        participants.sort_by(|a, b| a.latency_ms.total_cmp(&b.latency_ms));

        let winner = participants.iter().find(|p| rng.chance(p.success_rate));
        let won = winner.is_some_and(|p| p.is_us);

        tracing::trace!(
            chain = chain_id,
            opportunity_value,
            num_competing,
            winner = winner.map(|p| p.name),
            "Race settled"
        );

        CompetitionOutcome {
            won,
            winner: winner.map(|p| p.name.to_string()),
            num_competing,
            our_latency_ms,
        }
    }

    /// Expected number of active rivals on a chain, without randomness
    pub fn active_competitor_count(&self, chain_id: u64) -> usize {
        let active = self.competitors.iter().filter(|c| c.active).count();
        (active as f64 * participation_rate(chain_id)).round() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::testing::ScriptedRandom;
    use crate::random::SeededRandomGenerator;

    #[test]
    fn test_alone_we_win_when_roll_succeeds() {
        let model = CompetitionModel::new(Vec::new(), 50.0, 20.0);
        // jitter draw, then our landing roll
        let mut rng = ScriptedRandom::new(vec![0.5, 0.1]);
        let outcome = model.compete(100.0, 1, 0.0, &mut rng);
        assert!(outcome.won);
        assert_eq!(outcome.winner.as_deref(), Some(OUR_NAME));
        assert_eq!(outcome.num_competing, 0);
        assert!((outcome.our_latency_ms - 60.0).abs() < 1e-12);
        assert_eq!(rng.draws(), 2);
    }

    #[test]
    fn test_alone_failed_roll_has_no_winner() {
        let model = CompetitionModel::new(Vec::new(), 50.0, 20.0);
        let mut rng = ScriptedRandom::new(vec![0.5, 0.9]);
        let outcome = model.compete(100.0, 1, 0.0, &mut rng);
        assert!(!outcome.won);
        assert!(outcome.winner.is_none());
    }

    #[test]
    fn test_faster_rival_wins_first() {
        let model = CompetitionModel::new(
            vec![Competitor::new("fast", 10.0, 0.0, 0.9, 1e6)],
            50.0,
            0.0,
        );
        // participation, rival jitter, our jitter, rival landing roll
        let mut rng = ScriptedRandom::new(vec![0.0, 0.0, 0.0, 0.1]);
        let outcome = model.compete(100.0, 1, 0.0, &mut rng);
        assert!(!outcome.won);
        assert_eq!(outcome.winner.as_deref(), Some("fast"));
        assert_eq!(outcome.num_competing, 1);
    }

    #[test]
    fn test_rival_miss_passes_to_us() {
        let model = CompetitionModel::new(
            vec![Competitor::new("fast", 10.0, 0.0, 0.9, 1e6)],
            50.0,
            0.0,
        );
        let mut rng = ScriptedRandom::new(vec![0.0, 0.0, 0.0, 0.95, 0.2]);
        let outcome = model.compete(100.0, 1, 0.0, &mut rng);
        assert!(outcome.won);
    }

    #[test]
    fn test_capital_and_activity_filter() {
        let model = CompetitionModel::new(
            vec![
                Competitor::new("poor", 1.0, 0.0, 1.0, 100.0),
                Competitor::new("asleep", 1.0, 0.0, 1.0, 1e9).inactive(),
            ],
            50.0,
            0.0,
        );
        let mut rng = ScriptedRandom::new(vec![0.0, 0.1]);
        let outcome = model.compete(100.0, 1, 10_000.0, &mut rng);
        assert_eq!(outcome.num_competing, 0);
        assert!(outcome.won);
    }

    #[test]
    fn test_l2_participation_discount() {
        let model = CompetitionModel::new(
            vec![Competitor::new("rival", 10.0, 0.0, 0.0, 1e6)],
            50.0,
            0.0,
        );
        // 0.5 joins on mainnet (p = 1.0) but not on Optimism (p = 0.4)
        let mut rng = ScriptedRandom::new(vec![0.5]);
        assert_eq!(model.compete(1.0, 1, 0.0, &mut rng).num_competing, 1);
        let mut rng = ScriptedRandom::new(vec![0.5]);
        assert_eq!(model.compete(1.0, 10, 0.0, &mut rng).num_competing, 0);
    }

    #[test]
    fn test_active_competitor_count() {
        let model = CompetitionModel::with_default_roster(50.0, 20.0);
        // seven active rivals
        assert_eq!(model.active_competitor_count(1), 7);
        assert_eq!(model.active_competitor_count(42161), 4);
        assert_eq!(model.active_competitor_count(8453), 3);
    }

    #[test]
    fn test_default_roster_rarely_lets_us_win_on_mainnet() {
        let model = CompetitionModel::with_default_roster(50.0, 20.0);
        let mut rng = SeededRandomGenerator::from_seed(3);
        let wins = (0..2_000)
            .filter(|_| model.compete(500.0, 1, 0.0, &mut rng).won)
            .count();
        assert!(wins < 400, "won {wins} of 2000");
    }
}
