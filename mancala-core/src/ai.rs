//! Minimax AI with alpha-beta pruning

use crate::board::{Pit, Player};
use crate::error::{ConfigError, MancalaError};
use crate::eval::Heuristic;
use crate::game::Game;

// ============================================================================
// ALPHA-BETA AI
// ============================================================================

/// Outcome of a root search
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchResult {
    /// Minimax value from the searching player's perspective
    pub score: f32,
    /// First move (in declared pit order) achieving `score`
    pub best_move: Option<Pit>,
    /// Search nodes visited
    pub nodes: u64,
}

/// Depth-limited minimax player.
///
/// `depth` counts the leaf level: a search at depth D applies at most D-1 moves
/// along any line before evaluating.
#[derive(Clone, Debug)]
pub struct AlphaBetaAI {
    pub depth: u32,
    pub heuristic: Heuristic,
    /// Alpha-beta cutoffs. Disabling them gives plain minimax with the same result.
    pub pruning: bool,
}

impl AlphaBetaAI {
    pub fn new(depth: u32, heuristic: Heuristic) -> Result<Self, MancalaError> {
        if depth < 1 {
            return Err(ConfigError::InvalidDepth(depth).into());
        }
        Ok(Self {
            depth,
            heuristic,
            pruning: true,
        })
    }

    /// Search every branch, no cutoffs
    pub fn exhaustive(mut self) -> Self {
        self.pruning = false;
        self
    }

    /// Search from `player`'s point of view with `player` to move
    pub fn search(&self, game: &Game, player: Player) -> SearchResult {
        let mut ctx = SearchContext {
            maximizer: player,
            heuristic: self.heuristic,
            pruning: self.pruning,
            nodes: 0,
        };

        let (score, best_move) = minimax(
            game.clone(),
            player,
            self.depth,
            f32::NEG_INFINITY,
            f32::INFINITY,
            &mut ctx,
        );

        tracing::debug!(
            player = %player,
            depth = self.depth,
            heuristic = self.heuristic.id(),
            nodes = ctx.nodes,
            score,
            best_move = ?best_move,
            "search complete"
        );

        SearchResult {
            score,
            best_move,
            nodes: ctx.nodes,
        }
    }

    /// Best move for `player`, or None if it has no legal move.
    ///
    /// A depth-1 search evaluates the root without trying moves, so the first
    /// legal pit is played in that case.
    pub fn best_move(&self, game: &Game, player: Player) -> Option<Pit> {
        let legal = game.legal_moves(player);
        if legal.is_empty() {
            return None;
        }
        self.search(game, player)
            .best_move
            .or_else(|| legal.first().copied())
    }

    /// Value of every legal move for `player`, in declared order.
    ///
    /// Each move is searched with a full window one level shallower than `depth`
    /// (never below a leaf), so the values are exact rather than cutoff bounds.
    pub fn score_moves(&self, game: &Game, player: Player) -> Vec<(Pit, f32)> {
        let mut ctx = SearchContext {
            maximizer: player,
            heuristic: self.heuristic,
            pruning: self.pruning,
            nodes: 0,
        };
        let child_depth = self.depth.saturating_sub(1).max(1);

        game.legal_moves(player)
            .into_iter()
            .map(|pit| {
                let mut child = game.clone();
                let outcome = child.apply_legal(player, pit);
                let next = if outcome.extra_turn {
                    player
                } else {
                    player.opponent()
                };
                let (score, _) = minimax(
                    child,
                    next,
                    child_depth,
                    f32::NEG_INFINITY,
                    f32::INFINITY,
                    &mut ctx,
                );
                (pit, score)
            })
            .collect()
    }
}

/// Validate the configuration and pick a move for `player`
pub fn choose_move(
    game: &Game,
    player: Player,
    max_depth: u32,
    heuristic_id: u8,
) -> Result<Option<Pit>, MancalaError> {
    let heuristic = Heuristic::try_from(heuristic_id)?;
    let ai = AlphaBetaAI::new(max_depth, heuristic)?;
    Ok(ai.best_move(game, player))
}

// ============================================================================
// MINIMAX WITH ALPHA-BETA
// ============================================================================

struct SearchContext {
    maximizer: Player,
    heuristic: Heuristic,
    pruning: bool,
    nodes: u64,
}

impl SearchContext {
    fn leaf(&self, node: &Game) -> (f32, Option<Pit>) {
        (self.heuristic.evaluate(node.board(), self.maximizer), None)
    }
}

/// `mover` is whoever is on turn at this node; it differs from the maximizer
/// independently of depth because extra turns repeat the same mover.
fn minimax(
    mut node: Game,
    mover: Player,
    depth: u32,
    mut alpha: f32,
    mut beta: f32,
    ctx: &mut SearchContext,
) -> (f32, Option<Pit>) {
    ctx.nodes += 1;

    // Depth is tested first: a depth-1 leaf is evaluated without the terminal sweep
    if depth <= 1 || node.is_over() {
        return ctx.leaf(&node);
    }

    let moves = node.legal_moves(mover);
    if moves.is_empty() {
        return ctx.leaf(&node);
    }

    let maximizing = mover == ctx.maximizer;
    let mut best_score = if maximizing {
        f32::NEG_INFINITY
    } else {
        f32::INFINITY
    };
    let mut best_move = None;

    for pit in moves {
        let mut child = node.clone();
        let outcome = child.apply_legal(mover, pit);
        let next = if outcome.extra_turn {
            mover
        } else {
            mover.opponent()
        };

        let (score, _) = minimax(child, next, depth - 1, alpha, beta, ctx);

        if maximizing {
            if score > best_score {
                best_score = score;
                best_move = Some(pit);
            }
            alpha = alpha.max(best_score);
            if ctx.pruning && best_score >= beta {
                break;
            }
        } else {
            if score < best_score {
                best_score = score;
                best_move = Some(pit);
            }
            beta = beta.min(best_score);
            if ctx.pruning && best_score <= alpha {
                break;
            }
        }
    }

    (best_score, best_move)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardState;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn game(position: &str) -> Game {
        Game::from_board(position.parse::<BoardState>().unwrap())
    }

    fn ai(depth: u32, heuristic: Heuristic) -> AlphaBetaAI {
        AlphaBetaAI::new(depth, heuristic).unwrap()
    }

    /// Play random legal moves for a random number of plies
    fn random_position(rng: &mut ChaCha8Rng) -> (Game, Player) {
        let mut g = Game::new_match();
        let mut mover = Player::One;
        let plies = rng.gen_range(0..30);
        for _ in 0..plies {
            if g.is_terminal() {
                break;
            }
            let moves = g.legal_moves(mover);
            let Some(&pit) = moves.choose(rng) else {
                mover = mover.opponent();
                continue;
            };
            let outcome = g.apply_move(mover, pit).unwrap();
            if !outcome.extra_turn {
                mover = mover.opponent();
            }
        }
        (g, mover)
    }

    #[test]
    fn test_depth_one_is_a_leaf() {
        let g = Game::new_match();
        let result = ai(1, Heuristic::BoardControl).search(&g, Player::One);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, 12.0);
        assert_eq!(result.nodes, 1);

        // best_move still plays something
        assert_eq!(ai(1, Heuristic::MaterialDiff).best_move(&g, Player::One), Some(Pit::A));
    }

    #[test]
    fn test_first_move_wins_ties() {
        // C, D, E and F all bank one seed; C comes first
        let g = Game::new_match();
        let result = ai(2, Heuristic::MaterialDiff).search(&g, Player::One);
        assert_eq!(result.score, 1.0);
        assert_eq!(result.best_move, Some(Pit::C));
    }

    #[test]
    fn test_takes_capture() {
        let g = game("1,0,2,0,0,0/0,9,0,0,0,1/0,0");
        let result = ai(2, Heuristic::MaterialDiff).search(&g, Player::One);
        assert_eq!(result.best_move, Some(Pit::A));
        assert_eq!(result.score, 10.0);
    }

    #[test]
    fn test_extra_turn_keeps_the_same_mover() {
        // D captures 10 at once; F banks one and moves again, then D captures
        let g = game("0,0,0,1,0,1/2,0,0,0,9,0/0,0");

        let shallow = ai(2, Heuristic::MaterialDiff).search(&g, Player::One);
        assert_eq!(shallow.best_move, Some(Pit::D));
        assert_eq!(shallow.score, 10.0);

        let deeper = ai(3, Heuristic::MaterialDiff).search(&g, Player::One);
        assert_eq!(deeper.best_move, Some(Pit::F));
        assert_eq!(deeper.score, 11.0);
    }

    #[test]
    fn test_player_two_search() {
        // Second player sows toward G: I lands on empty H across from B
        let g = game("0,9,0,0,0,1/0,0,1,0,0,2/0,0");
        let result = ai(2, Heuristic::MaterialDiff).search(&g, Player::Two);
        assert_eq!(result.best_move, Some(Pit::I));
        assert_eq!(result.score, 10.0);
    }

    #[test]
    fn test_no_legal_move() {
        let g = game("0,0,0,0,0,0/1,2,3,0,0,4/20,18");
        assert_eq!(choose_move(&g, Player::One, 4, 1), Ok(None));

        let result = ai(4, Heuristic::MaterialDiff).search(&g, Player::One);
        assert_eq!(result.best_move, None);
        // Terminal root is swept before evaluation
        assert_eq!(result.score, -8.0);
    }

    #[test]
    fn test_invalid_configuration() {
        let g = Game::new_match();
        assert_eq!(
            choose_move(&g, Player::One, 0, 1),
            Err(MancalaError::InvalidConfiguration(ConfigError::InvalidDepth(0)))
        );
        assert_eq!(
            choose_move(&g, Player::One, 4, 7),
            Err(MancalaError::InvalidConfiguration(ConfigError::UnknownHeuristic(
                "7".to_string()
            )))
        );
    }

    #[test]
    fn test_choose_move_matches_search() {
        let g = Game::new_match();
        let direct = ai(4, Heuristic::BoardControl).search(&g, Player::Two).best_move;
        assert_eq!(choose_move(&g, Player::Two, 4, 2).unwrap(), direct);
    }

    #[test]
    fn test_search_does_not_mutate_game() {
        let g = game("0,0,0,0,0,1/4,4,4,4,4,4/10,13");
        let before = g.clone();
        let _ = ai(5, Heuristic::BoardControl).search(&g, Player::One);
        assert_eq!(g, before);
    }

    #[test]
    fn test_pruning_matches_exhaustive_minimax() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..40 {
            let (g, mover) = random_position(&mut rng);
            for depth in 1..=5 {
                for heuristic in [Heuristic::MaterialDiff, Heuristic::BoardControl] {
                    let pruned = ai(depth, heuristic).search(&g, mover);
                    let full = ai(depth, heuristic).exhaustive().search(&g, mover);

                    assert_eq!(pruned.score, full.score, "position {}", g.board());
                    assert_eq!(pruned.best_move, full.best_move, "position {}", g.board());
                    assert!(pruned.nodes <= full.nodes);
                }
            }
        }
    }

    #[test]
    fn test_move_scores_agree_with_search() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        for _ in 0..20 {
            let (g, mover) = random_position(&mut rng);
            if g.is_terminal() {
                continue;
            }
            let searcher = ai(4, Heuristic::BoardControl);
            let result = searcher.search(&g, mover);
            let scores = searcher.score_moves(&g, mover);

            let best = scores
                .iter()
                .fold(f32::NEG_INFINITY, |acc, &(_, s)| acc.max(s));
            let first_best = scores.iter().find(|&&(_, s)| s == best).map(|&(p, _)| p);

            assert_eq!(result.score, best);
            assert_eq!(result.best_move, first_best);
        }
    }

    #[test]
    fn test_pruning_saves_work() {
        let g = Game::new_match();
        let pruned = ai(6, Heuristic::MaterialDiff).search(&g, Player::One);
        let full = ai(6, Heuristic::MaterialDiff).exhaustive().search(&g, Player::One);
        assert!(pruned.nodes < full.nodes);
    }
}
