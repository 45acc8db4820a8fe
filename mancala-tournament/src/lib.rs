//! Mancala Tournament - Agent evaluation through game playing
//!
//! This crate provides match infrastructure:
//! - Agent configuration (alpha-beta at a depth/heuristic, or a seeded random baseline)
//! - Single game driving with turn passing and extra turns
//! - Matches between two agents from both seats
//! - Round-robin tournaments
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run_tournament (orchestration)
//! - Level 2: play_match (phases)
//! - Level 3: GameRunner::play_game (steps)
//! - Level 4: configuration

mod config;
mod game_runner;
mod match_play;
mod tournament;

pub use config::{
    AgentConfig, NamedAgent, PlayerType, TournamentConfig, DEFAULT_DEPTH, DEFAULT_MAX_PLIES,
};
pub use game_runner::{Agent, GameOutcome, GameRunner, MoveRecord};
pub use match_play::{play_match, play_match_parallel, MatchResult, SeatedOutcome};
pub use tournament::{run_tournament, Pairing, Standing, TournamentResult};
