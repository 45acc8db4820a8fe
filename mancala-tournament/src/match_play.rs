//! Match play - multiple games between two agents
//!
//! Level 2 - Phase-level implementation

use mancala_core::{MancalaError, Player};
use rayon::prelude::*;
use serde::Serialize;

use crate::config::AgentConfig;
use crate::game_runner::{GameOutcome, GameRunner};

/// Result of a match, from the first agent's point of view
#[derive(Clone, Debug, Serialize)]
pub struct MatchResult {
    /// Wins for the first agent
    pub first_wins: u32,
    /// Wins for the second agent
    pub second_wins: u32,
    /// Draws, including games stopped by the ply cap
    pub draws: u32,
    /// Total games played
    pub games_played: u32,
    /// Average store difference (first minus second)
    pub avg_margin: f32,
    /// Individual game outcomes
    pub games: Vec<SeatedOutcome>,
}

/// A game outcome with the seat the first agent played
#[derive(Clone, Debug, Serialize)]
pub struct SeatedOutcome {
    pub first_agent_seat: Player,
    pub outcome: GameOutcome,
}

impl SeatedOutcome {
    fn first_margin(&self) -> i32 {
        self.outcome.margin(self.first_agent_seat)
    }
}

impl MatchResult {
    /// Create empty result
    pub fn empty() -> Self {
        Self {
            first_wins: 0,
            second_wins: 0,
            draws: 0,
            games_played: 0,
            avg_margin: 0.0,
            games: Vec::new(),
        }
    }

    pub fn first_win_rate(&self) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            self.first_wins as f32 / self.games_played as f32
        }
    }

    pub fn second_win_rate(&self) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            self.second_wins as f32 / self.games_played as f32
        }
    }

    pub fn draw_rate(&self) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            self.draws as f32 / self.games_played as f32
        }
    }

    /// Wins = 1.0, Draws = 0.5, Losses = 0.0
    pub fn score_for_first(&self) -> f32 {
        self.first_wins as f32 + 0.5 * self.draws as f32
    }

    pub fn score_for_second(&self) -> f32 {
        self.second_wins as f32 + 0.5 * self.draws as f32
    }
}

/// Play a match between two agents (Level 2 phase)
///
/// The first agent takes Player One in even-numbered games and Player Two in odd ones.
pub fn play_match(
    first: &AgentConfig,
    second: &AgentConfig,
    games: usize,
    max_plies: u32,
) -> Result<MatchResult, MancalaError> {
    let outcomes = prepare_game_configs(games)
        .iter()
        .map(|gc| play_single_game(first, second, gc, max_plies))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(aggregate_results(outcomes))
}

/// Play a match with parallel execution (Level 2 phase)
pub fn play_match_parallel(
    first: &AgentConfig,
    second: &AgentConfig,
    games: usize,
    max_plies: u32,
) -> Result<MatchResult, MancalaError> {
    let outcomes = prepare_game_configs(games)
        .par_iter()
        .map(|gc| play_single_game(first, second, gc, max_plies))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(aggregate_results(outcomes))
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Configuration for a single game in a match
#[derive(Clone, Copy)]
struct GameConfig {
    first_agent_seat: Player,
    /// Game index (for seeding)
    game_index: usize,
}

/// Prepare game configurations for a match
fn prepare_game_configs(games: usize) -> Vec<GameConfig> {
    (0..games)
        .map(|i| GameConfig {
            first_agent_seat: if i % 2 == 0 { Player::One } else { Player::Two },
            game_index: i,
        })
        .collect()
}

/// Play a single game with the given seating
fn play_single_game(
    first: &AgentConfig,
    second: &AgentConfig,
    gc: &GameConfig,
    max_plies: u32,
) -> Result<SeatedOutcome, MancalaError> {
    let (one, two) = match gc.first_agent_seat {
        Player::One => (first, second),
        Player::Two => (second, first),
    };
    let one = reseed(one, gc.game_index);
    let two = reseed(two, gc.game_index);

    let outcome = GameRunner::new(&one, &two)?
        .with_max_plies(max_plies)
        .play_game()?;

    tracing::debug!(
        "Game {}: {} ({} plies)",
        gc.game_index + 1,
        outcome.result,
        outcome.plies()
    );

    Ok(SeatedOutcome {
        first_agent_seat: gc.first_agent_seat,
        outcome,
    })
}

/// Give each game its own random stream
fn reseed(config: &AgentConfig, game_index: usize) -> AgentConfig {
    let mut config = config.clone();
    if let Some(seed) = config.seed {
        config.seed = Some(seed.wrapping_add(game_index as u64 * 2));
    } else {
        config.seed = Some(game_index as u64 * 2);
    }
    config
}

/// Aggregate game outcomes into match result
fn aggregate_results(games: Vec<SeatedOutcome>) -> MatchResult {
    if games.is_empty() {
        return MatchResult::empty();
    }

    let mut result = MatchResult::empty();
    let mut total_margin = 0i64;

    for game in &games {
        match game.outcome.winner() {
            Some(p) if p == game.first_agent_seat => result.first_wins += 1,
            Some(_) => result.second_wins += 1,
            None => result.draws += 1,
        }
        total_margin += game.first_margin() as i64;
    }

    result.games_played = games.len() as u32;
    result.avg_margin = total_margin as f32 / games.len() as f32;
    result.games = games;
    result
}
