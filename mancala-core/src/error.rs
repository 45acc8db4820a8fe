//! Error types for the rule engine and search

use crate::board::{Pit, Player};

/// Top-level error returned by the engine's public operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MancalaError {
    #[error("invalid move: {0}")]
    InvalidMove(#[from] InvalidMove),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}

/// Reasons a move is rejected. The board is never touched when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidMove {
    #[error("pit {0} is empty")]
    EmptyPit(Pit),

    #[error("pit {pit} belongs to {owner}, not {mover}")]
    NotOwned {
        pit: Pit,
        owner: Player,
        mover: Player,
    },

    #[error("unrecognized pit `{0}`")]
    UnknownPit(String),

    #[error("the match is already over")]
    MatchOver,
}

/// Rejected search or agent configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("search depth must be at least 1 (got {0})")]
    InvalidDepth(u32),

    #[error("unknown heuristic `{0}` (expected 1 or 2)")]
    UnknownHeuristic(String),

    #[error("unknown player `{0}` (expected 1 or 2)")]
    UnknownPlayer(String),

    #[error("bad position `{input}`: {reason}")]
    BadPosition { input: String, reason: String },
}
