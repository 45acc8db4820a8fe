//! Round-robin tournament execution
//!
//! Level 1 - Orchestration and Level 2 - Phases

use anyhow::Context;
use mancala_core::MancalaError;
use rayon::prelude::*;
use serde::Serialize;

use crate::config::{NamedAgent, TournamentConfig};
use crate::match_play::{play_match, MatchResult};

/// Standing of a participant in the tournament
#[derive(Clone, Debug, Serialize)]
pub struct Standing {
    /// Index of the agent in the config
    pub index: usize,
    pub name: String,
    /// Total score (wins + 0.5 * draws)
    pub score: f32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub games_played: u32,
    /// Average store difference over all games
    pub avg_margin: f32,
}

impl Standing {
    fn new(index: usize, name: &str) -> Self {
        Self {
            index,
            name: name.to_string(),
            score: 0.0,
            wins: 0,
            losses: 0,
            draws: 0,
            games_played: 0,
            avg_margin: 0.0,
        }
    }

    pub fn win_rate(&self) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            self.wins as f32 / self.games_played as f32
        }
    }

    /// Normalized score (0.0 to 1.0)
    pub fn normalized_score(&self) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            self.score / self.games_played as f32
        }
    }
}

/// One pairing and its match result
#[derive(Clone, Debug, Serialize)]
pub struct Pairing {
    pub first: usize,
    pub second: usize,
    pub result: MatchResult,
}

/// Result of a tournament
#[derive(Clone, Debug, Serialize)]
pub struct TournamentResult {
    /// Final standings sorted by score (descending)
    pub standings: Vec<Standing>,
    /// Every pairing played
    pub pairings: Vec<Pairing>,
}

impl TournamentResult {
    /// Get winner (top standing)
    pub fn winner(&self) -> Option<&Standing> {
        self.standings.first()
    }

    /// Get standing for a specific agent index
    pub fn standing_for(&self, index: usize) -> Option<&Standing> {
        self.standings.iter().find(|s| s.index == index)
    }
}

// ============================================================================
// Level 1 - Orchestration
// ============================================================================

/// Run a round-robin tournament: every pair of agents plays one match
pub fn run_tournament(config: &TournamentConfig) -> anyhow::Result<TournamentResult> {
    config.validate()?;

    let pairs = generate_round_robin_pairings(config.agents.len());

    tracing::info!(
        "Starting tournament: {} agents, {} pairings, {} games each",
        config.agents.len(),
        pairs.len(),
        config.games_per_match
    );

    let pairings =
        execute_all_matches(&config.agents, &pairs, config).context("Tournament match failed")?;
    let standings = compute_standings(&config.agents, &pairings);

    Ok(TournamentResult {
        standings,
        pairings,
    })
}

// ============================================================================
// Level 2 - Phases
// ============================================================================

/// All (i, j) with i < j
fn generate_round_robin_pairings(n: usize) -> Vec<(usize, usize)> {
    (0..n)
        .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
        .collect()
}

/// Execute all matches
fn execute_all_matches(
    agents: &[NamedAgent],
    pairs: &[(usize, usize)],
    config: &TournamentConfig,
) -> Result<Vec<Pairing>, MancalaError> {
    let run = |&(i, j): &(usize, usize)| -> Result<Pairing, MancalaError> {
        let result = play_match(
            &agents[i].agent,
            &agents[j].agent,
            config.games_per_match,
            config.max_plies,
        )?;
        tracing::info!(
            "{} vs {}: {}-{}-{}",
            agents[i].name,
            agents[j].name,
            result.first_wins,
            result.second_wins,
            result.draws
        );
        Ok(Pairing {
            first: i,
            second: j,
            result,
        })
    };

    if config.parallel {
        pairs.par_iter().map(run).collect()
    } else {
        pairs.iter().map(run).collect()
    }
}

/// Compute standings from match results
fn compute_standings(agents: &[NamedAgent], pairings: &[Pairing]) -> Vec<Standing> {
    let mut standings: Vec<Standing> = agents
        .iter()
        .enumerate()
        .map(|(i, a)| Standing::new(i, &a.name))
        .collect();
    let mut margins = vec![0.0f32; agents.len()];

    for pairing in pairings {
        let r = &pairing.result;
        let total_margin = r.avg_margin * r.games_played as f32;

        let first = &mut standings[pairing.first];
        first.wins += r.first_wins;
        first.losses += r.second_wins;
        first.draws += r.draws;
        first.games_played += r.games_played;
        first.score += r.score_for_first();
        margins[pairing.first] += total_margin;

        let second = &mut standings[pairing.second];
        second.wins += r.second_wins;
        second.losses += r.first_wins;
        second.draws += r.draws;
        second.games_played += r.games_played;
        second.score += r.score_for_second();
        margins[pairing.second] -= total_margin;
    }

    for (standing, margin) in standings.iter_mut().zip(margins) {
        if standing.games_played > 0 {
            standing.avg_margin = margin / standing.games_played as f32;
        }
    }

    standings.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                b.avg_margin
                    .partial_cmp(&a.avg_margin)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .then_with(|| a.index.cmp(&b.index))
    });

    standings
}
