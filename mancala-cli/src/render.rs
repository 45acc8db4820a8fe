//! Text rendering of the board
//!
//! Player Two's row runs G-L along the top with store 2 on the left,
//! Player One's row runs A-F along the bottom with store 1 on the right.
//! Seeds travel counter-clockwise.

use std::fmt::Write;

use mancala_core::{BoardState, Player};

/// Multi-line picture of `board`
pub fn render_board(board: &BoardState) -> String {
    let row = |player: Player| {
        player
            .pits()
            .iter()
            .map(|&pit| format!("[{:>2}]", board.seeds(pit)))
            .collect::<String>()
    };
    let labels = |player: Player| {
        player
            .pits()
            .iter()
            .map(|pit| format!("  {} ", pit))
            .collect::<String>()
    };

    let mut out = String::new();
    let _ = writeln!(out, "      {}", labels(Player::Two));
    let _ = writeln!(out, "      {}", row(Player::Two));
    let _ = writeln!(
        out,
        "[{:>2}] {:width$} [{:>2}]",
        board.store(Player::Two),
        "",
        board.store(Player::One),
        width = 4 * mancala_core::PITS_PER_SIDE
    );
    let _ = writeln!(out, "      {}", row(Player::One));
    let _ = write!(out, "      {}", labels(Player::One));
    out
}
