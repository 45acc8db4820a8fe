//! Configuration types for match and tournament play
//!
//! Level 4 - Utilities and configuration

use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context};
use mancala_core::{ConfigError, Heuristic, MancalaError};
use serde::{Deserialize, Serialize};

/// Search depth used when none is given
pub const DEFAULT_DEPTH: u32 = 4;

/// Plies after which a game is abandoned
pub const DEFAULT_MAX_PLIES: u32 = 1000;

/// Agent kind
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerType {
    /// Minimax with alpha-beta pruning
    #[default]
    AlphaBeta,
    /// Uniformly random legal moves (baseline)
    Random,
}

/// Configuration for one computer player
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub player_type: PlayerType,
    /// Search depth for alpha-beta
    pub depth: u32,
    /// Evaluation heuristic for alpha-beta
    pub heuristic: Heuristic,
    /// Random seed for reproducibility (None = default seed)
    pub seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            player_type: PlayerType::AlphaBeta,
            depth: DEFAULT_DEPTH,
            heuristic: Heuristic::MaterialDiff,
            seed: None,
        }
    }
}

impl AgentConfig {
    /// Alpha-beta at the given depth
    pub fn alpha_beta(depth: u32) -> Self {
        Self {
            player_type: PlayerType::AlphaBeta,
            depth,
            ..Default::default()
        }
    }

    /// Random baseline
    pub fn random() -> Self {
        Self {
            player_type: PlayerType::Random,
            ..Default::default()
        }
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), MancalaError> {
        if self.player_type == PlayerType::AlphaBeta && self.depth < 1 {
            return Err(ConfigError::InvalidDepth(self.depth).into());
        }
        Ok(())
    }

    /// Short description, e.g. `alpha-beta d4 H1`
    pub fn label(&self) -> String {
        match self.player_type {
            PlayerType::AlphaBeta => format!("alpha-beta d{} H{}", self.depth, self.heuristic.id()),
            PlayerType::Random => "random".to_string(),
        }
    }
}

/// Tournament participant
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NamedAgent {
    pub name: String,
    #[serde(flatten)]
    pub agent: AgentConfig,
}

impl NamedAgent {
    pub fn new(name: impl Into<String>, agent: AgentConfig) -> Self {
        Self {
            name: name.into(),
            agent,
        }
    }

    /// Name derived from the agent's label
    pub fn from_config(agent: AgentConfig) -> Self {
        Self {
            name: agent.label(),
            agent,
        }
    }
}

/// Tournament configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    /// Participants
    pub agents: Vec<NamedAgent>,
    /// Games per pairing (alternating seats, should be even)
    pub games_per_match: usize,
    /// Whether to run pairings in parallel
    pub parallel: bool,
    /// Maximum plies per game
    pub max_plies: u32,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            agents: Vec::new(),
            games_per_match: 2,
            parallel: true,
            max_plies: DEFAULT_MAX_PLIES,
        }
    }
}

impl TournamentConfig {
    /// Load from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: TournamentConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Every agent at each depth in `depths` with each heuristic in `heuristics`
    pub fn sweep(depths: &[u32], heuristics: &[Heuristic]) -> Self {
        let agents = depths
            .iter()
            .flat_map(move |&depth| {
                heuristics.iter().map(move |&h| {
                    NamedAgent::from_config(AgentConfig::alpha_beta(depth).with_heuristic(h))
                })
            })
            .collect();
        Self {
            agents,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.agents.len() < 2 {
            bail!("a tournament needs at least two agents (got {})", self.agents.len());
        }
        let mut names = HashSet::new();
        for named in &self.agents {
            if !names.insert(named.name.as_str()) {
                bail!("duplicate agent name `{}`", named.name);
            }
            named
                .agent
                .validate()
                .with_context(|| format!("agent `{}`", named.name))?;
        }
        Ok(())
    }
}
