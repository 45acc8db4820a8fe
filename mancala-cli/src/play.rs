//! Play command - a human against the alpha-beta computer
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_session() - the turn loop
//! - Level 3: human_turn(), computer_turn()
//! - Level 4: announcements

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Args;

use mancala_core::{AlphaBetaAI, Game, GameResult, Heuristic, MoveOutcome, Pit, Player, Winner};
use mancala_tournament::DEFAULT_DEPTH;

use crate::render::render_board;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Side the human plays (1 moves first)
    #[arg(long, default_value = "1")]
    pub human: Player,

    /// Computer search depth
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    pub depth: u32,

    /// Computer heuristic (1 = store difference, 2 = adds own-side seeds)
    #[arg(long, default_value = "1")]
    pub heuristic: Heuristic,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command on the terminal
pub fn run(args: PlayArgs) -> Result<()> {
    let computer = AlphaBetaAI::new(args.depth, args.heuristic)
        .context("Invalid computer settings")?;

    tracing::info!(
        "Human plays {} against depth {} {}",
        args.human,
        args.depth,
        args.heuristic
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let result = play_session(&computer, args.human, stdin.lock(), &mut stdout)?;

    if let Some(result) = result {
        tracing::info!("Game finished: {}", result);
    }
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Alternate turns until the match ends. Returns None if the human quits.
fn play_session<R: BufRead, W: Write>(
    computer: &AlphaBetaAI,
    human: Player,
    mut input: R,
    out: &mut W,
) -> Result<Option<GameResult>> {
    let mut game = Game::new_match();
    let mut mover = Player::One;

    loop {
        writeln!(out, "\n{}\n", render_board(game.board()))?;

        if game.is_over() {
            break;
        }

        let outcome = if mover == human {
            match human_turn(&mut game, mover, &mut input, out)? {
                Some(outcome) => outcome,
                None => {
                    writeln!(out, "Goodbye.")?;
                    return Ok(None);
                }
            }
        } else {
            match computer_turn(&mut game, computer, mover, out)? {
                Some(outcome) => outcome,
                None => {
                    mover = mover.opponent();
                    continue;
                }
            }
        };

        announce(&outcome, mover, out)?;
        if !outcome.extra_turn {
            mover = mover.opponent();
        }
    }

    let result = game.winner();
    writeln!(out, "{}", final_message(&result, human))?;
    Ok(Some(result))
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Prompt until the human enters a legal pit. None on end of input or `q`.
fn human_turn<R: BufRead, W: Write>(
    game: &mut Game,
    player: Player,
    input: &mut R,
    out: &mut W,
) -> Result<Option<MoveOutcome>> {
    let pits = player.pits();
    loop {
        write!(
            out,
            "{} to move, choose a pit ({}-{}) or q to quit: ",
            player,
            pits[0],
            pits[pits.len() - 1]
        )?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line).context("Failed to read move")? == 0 {
            return Ok(None);
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Ok(None);
        }

        let pit: Pit = match line.parse() {
            Ok(pit) => pit,
            Err(e) => {
                writeln!(out, "{}", e)?;
                continue;
            }
        };

        match game.apply_move(player, pit) {
            Ok(outcome) => return Ok(Some(outcome)),
            Err(e) => writeln!(out, "{}", e)?,
        }
    }
}

/// Let the computer pick and apply a move
fn computer_turn<W: Write>(
    game: &mut Game,
    computer: &AlphaBetaAI,
    player: Player,
    out: &mut W,
) -> Result<Option<MoveOutcome>> {
    let Some(pit) = computer.best_move(game, player) else {
        return Ok(None);
    };
    writeln!(out, "Computer ({}) plays {}", player, pit)?;
    Ok(Some(game.apply_move(player, pit)?))
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn announce<W: Write>(outcome: &MoveOutcome, mover: Player, out: &mut W) -> Result<()> {
    if outcome.captured > 0 {
        writeln!(out, "{} captures {} seeds", mover, outcome.captured)?;
    }
    if outcome.extra_turn {
        writeln!(out, "{} gets another turn", mover)?;
    }
    Ok(())
}

fn final_message(result: &GameResult, human: Player) -> String {
    match result.winner {
        Winner::Player(p) if p == human => {
            format!("GAME OVER! You win with {} seeds.", result.score)
        }
        Winner::Player(_) => {
            format!("GAME OVER! The computer wins with {} seeds.", result.score)
        }
        Winner::Draw => format!("GAME OVER! Draw at {} seeds each.", result.score),
    }
}
