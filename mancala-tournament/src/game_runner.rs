//! Game runner - executes single games
//!
//! Level 3 - Step-level implementation

use mancala_core::{
    AlphaBetaAI, BoardState, Game, GameResult, MancalaError, Pit, Player, Winner,
};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::config::{AgentConfig, PlayerType, DEFAULT_MAX_PLIES};

/// Seed used when an agent config does not carry one
const DEFAULT_SEED: u64 = 42;

/// One applied move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    pub player: Player,
    pub pit: Pit,
    pub extra_turn: bool,
    pub captured: u8,
}

/// Outcome of a single game
#[derive(Clone, Debug, Serialize)]
pub struct GameOutcome {
    /// Store comparison at the end of the game
    pub result: GameResult,
    /// False if the ply cap stopped the game
    pub finished: bool,
    /// Move history
    pub moves: Vec<MoveRecord>,
    /// Board after the sweep
    pub final_board: BoardState,
}

impl GameOutcome {
    /// Winner of a finished game (None for a draw or an abandoned game)
    pub fn winner(&self) -> Option<Player> {
        match self.result.winner {
            Winner::Player(p) if self.finished => Some(p),
            _ => None,
        }
    }

    /// Draws include games stopped by the ply cap
    pub fn is_draw(&self) -> bool {
        self.winner().is_none()
    }

    pub fn plies(&self) -> usize {
        self.moves.len()
    }

    /// Store difference from `player`'s point of view
    pub fn margin(&self, player: Player) -> i32 {
        self.final_board.store(player) as i32 - self.final_board.store(player.opponent()) as i32
    }
}

/// A computer player
pub enum Agent {
    AlphaBeta(AlphaBetaAI),
    Random(ChaCha8Rng),
}

impl Agent {
    /// Build from config; `seed_offset` separates otherwise identical random agents
    pub fn from_config(config: &AgentConfig, seed_offset: u64) -> Result<Self, MancalaError> {
        config.validate()?;
        let agent = match config.player_type {
            PlayerType::AlphaBeta => {
                Agent::AlphaBeta(AlphaBetaAI::new(config.depth, config.heuristic)?)
            }
            PlayerType::Random => {
                let seed = config.seed.unwrap_or(DEFAULT_SEED).wrapping_add(seed_offset);
                Agent::Random(ChaCha8Rng::seed_from_u64(seed))
            }
        };
        Ok(agent)
    }

    /// Pick a move for `player`, None if it has none
    pub fn choose(&mut self, game: &Game, player: Player) -> Option<Pit> {
        match self {
            Agent::AlphaBeta(ai) => ai.best_move(game, player),
            Agent::Random(rng) => game.legal_moves(player).choose(rng).copied(),
        }
    }
}

/// Plays games between two agents. Player One always moves first.
pub struct GameRunner {
    /// Indexed by `Player::index`
    agents: [Agent; 2],
    max_plies: u32,
}

impl GameRunner {
    pub fn new(first: &AgentConfig, second: &AgentConfig) -> Result<Self, MancalaError> {
        Ok(Self {
            agents: [Agent::from_config(first, 0)?, Agent::from_config(second, 1)?],
            max_plies: DEFAULT_MAX_PLIES,
        })
    }

    pub fn with_max_plies(mut self, max_plies: u32) -> Self {
        self.max_plies = max_plies;
        self
    }

    /// Play a fresh match to the end
    pub fn play_game(&mut self) -> Result<GameOutcome, MancalaError> {
        self.play_from(Game::new_match(), Player::One)
    }

    /// Play from an arbitrary position with `to_move` on turn
    pub fn play_from(
        &mut self,
        mut game: Game,
        to_move: Player,
    ) -> Result<GameOutcome, MancalaError> {
        let mut mover = to_move;
        let mut moves = Vec::new();
        let mut finished = false;

        loop {
            if game.is_over() {
                finished = true;
                break;
            }
            if moves.len() >= self.max_plies as usize {
                tracing::warn!("Game stopped after {} plies", moves.len());
                break;
            }

            let Some(pit) = self.agents[mover.index()].choose(&game, mover) else {
                // Cannot happen while the game is live, but passing keeps the loop total
                mover = mover.opponent();
                continue;
            };

            let outcome = game.apply_move(mover, pit)?;
            tracing::trace!(player = %mover, pit = %pit, extra_turn = outcome.extra_turn, "move");

            moves.push(MoveRecord {
                player: mover,
                pit,
                extra_turn: outcome.extra_turn,
                captured: outcome.captured,
            });

            if !outcome.extra_turn {
                mover = mover.opponent();
            }
        }

        Ok(GameOutcome {
            result: game.winner(),
            finished,
            moves,
            final_board: game.board().clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mancala_core::{Heuristic, TOTAL_SEEDS};

    #[test]
    fn test_alpha_beta_game_completes() {
        let config = AgentConfig::alpha_beta(3);
        let mut runner = GameRunner::new(&config, &config).unwrap();

        let outcome = runner.play_game().unwrap();

        assert!(outcome.finished);
        assert!(outcome.plies() > 0);
        assert_eq!(outcome.final_board.total_seeds(), TOTAL_SEEDS);
        assert_eq!(outcome.margin(Player::One), -outcome.margin(Player::Two));
    }

    #[test]
    fn test_alpha_beta_games_are_deterministic() {
        let first = AgentConfig::alpha_beta(3);
        let second = AgentConfig::alpha_beta(3).with_heuristic(Heuristic::BoardControl);

        let a = GameRunner::new(&first, &second).unwrap().play_game().unwrap();
        let b = GameRunner::new(&first, &second).unwrap().play_game().unwrap();
        assert_eq!(a.moves, b.moves);
        assert_eq!(a.result, b.result);
    }

    #[test]
    fn test_extra_turns_repeat_the_mover() {
        let config = AgentConfig::random().with_seed(5);
        let outcome = GameRunner::new(&config, &config).unwrap().play_game().unwrap();

        assert_eq!(outcome.moves[0].player, Player::One);
        for pair in outcome.moves.windows(2) {
            let expected = if pair[0].extra_turn {
                pair[0].player
            } else {
                pair[0].player.opponent()
            };
            assert_eq!(pair[1].player, expected);
        }
    }

    #[test]
    fn test_ply_cap_marks_game_unfinished() {
        let config = AgentConfig::random();
        let mut runner = GameRunner::new(&config, &config).unwrap().with_max_plies(3);
        let outcome = runner.play_game().unwrap();

        assert!(!outcome.finished);
        assert_eq!(outcome.plies(), 3);
        assert!(outcome.is_draw());
        assert_eq!(outcome.winner(), None);
    }

    #[test]
    fn test_play_from_finished_position() {
        let game = Game::from_board("0,0,0,0,0,0/1,0,0,0,0,0/24,23".parse().unwrap());
        let config = AgentConfig::alpha_beta(2);
        let outcome = GameRunner::new(&config, &config)
            .unwrap()
            .play_from(game, Player::Two)
            .unwrap();

        assert!(outcome.finished);
        assert!(outcome.moves.is_empty());
        assert_eq!(outcome.result.winner, Winner::Draw);
        assert_eq!(outcome.result.score, 24);
    }

    #[test]
    fn test_invalid_agent_config() {
        let bad = AgentConfig::alpha_beta(0);
        assert!(GameRunner::new(&bad, &AgentConfig::random()).is_err());
    }
}
