//! Position evaluation

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{BoardState, Player};
use crate::error::{ConfigError, MancalaError};

/// Weight of a seed still on the board relative to a banked seed
const BOARD_CONTROL_WEIGHT: f32 = 0.5;

/// Selectable evaluation heuristic
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Heuristic {
    /// Heuristic 1: own store minus opponent store
    #[default]
    MaterialDiff = 1,
    /// Heuristic 2: store difference plus half the seeds on the own side
    BoardControl = 2,
}

impl Heuristic {
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Score `board` from `perspective`'s point of view
    pub fn evaluate(self, board: &BoardState, perspective: Player) -> f32 {
        let own = board.store(perspective) as f32;
        let theirs = board.store(perspective.opponent()) as f32;
        let diff = own - theirs;

        match self {
            Heuristic::MaterialDiff => diff,
            Heuristic::BoardControl => {
                diff + BOARD_CONTROL_WEIGHT * board.side_seeds(perspective) as f32
            }
        }
    }
}

impl From<Heuristic> for u8 {
    fn from(h: Heuristic) -> u8 {
        h.id()
    }
}

impl TryFrom<u8> for Heuristic {
    type Error = ConfigError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(Heuristic::MaterialDiff),
            2 => Ok(Heuristic::BoardControl),
            other => Err(ConfigError::UnknownHeuristic(other.to_string())),
        }
    }
}

impl FromStr for Heuristic {
    type Err = MancalaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "material" | "material-diff" => Ok(Heuristic::MaterialDiff),
            "2" | "control" | "board-control" => Ok(Heuristic::BoardControl),
            _ => Err(ConfigError::UnknownHeuristic(s.to_string()).into()),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Heuristic::MaterialDiff => write!(f, "H1 (material-diff)"),
            Heuristic::BoardControl => write!(f, "H2 (board-control)"),
        }
    }
}

/// Evaluate position from `perspective`'s point of view
pub fn evaluate(board: &BoardState, perspective: Player, heuristic: Heuristic) -> f32 {
    heuristic.evaluate(board, perspective)
}
