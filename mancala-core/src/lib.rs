//! Mancala Core - Kalah rule engine and AI
//!
//! This crate provides the core game logic for Kalah (6 pits + 1 store per side):
//! - Board topology (sowing cycle and opposite-pit tables)
//! - Sowing, capture and extra-turn rules
//! - Match-level rules (terminal sweep, winner)
//! - Position evaluation with selectable heuristics
//! - Minimax search with alpha-beta pruning

pub mod board;
pub mod game;
pub mod eval;
pub mod ai;
pub mod error;

// Re-exports for convenient access
pub use board::{
    BoardState, Cell, MoveOutcome, Pit, Player, NUM_CELLS, NUM_PITS, PITS_PER_SIDE,
    SEEDS_PER_PIT, TOTAL_SEEDS,
};
pub use game::{Game, GameResult, Winner};
pub use eval::{evaluate, Heuristic};
pub use ai::{choose_move, AlphaBetaAI, SearchResult};
pub use error::{ConfigError, InvalidMove, MancalaError};
