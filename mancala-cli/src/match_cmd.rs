//! Match command - play games between two computer agents
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_agents(), play(), report_results()
//! - Level 3: agent_config(), describe_game()
//! - Level 4: formatting utilities

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use mancala_core::{Heuristic, Player};
use mancala_tournament::{
    play_match, play_match_parallel, AgentConfig, MatchResult, SeatedOutcome, DEFAULT_DEPTH,
    DEFAULT_MAX_PLIES,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

/// Agent kind selectable from the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AgentKind {
    AlphaBeta,
    Random,
}

#[derive(Args)]
pub struct MatchArgs {
    /// First agent (Player One in odd-numbered games)
    #[arg(long, value_enum, default_value = "alpha-beta")]
    pub first: AgentKind,

    /// First agent search depth
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    pub first_depth: u32,

    /// First agent heuristic
    #[arg(long, default_value = "1")]
    pub first_heuristic: Heuristic,

    /// Second agent (Player Two in odd-numbered games)
    #[arg(long, value_enum, default_value = "alpha-beta")]
    pub second: AgentKind,

    /// Second agent search depth
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    pub second_depth: u32,

    /// Second agent heuristic
    #[arg(long, default_value = "2")]
    pub second_heuristic: Heuristic,

    /// Number of games to play (will alternate seats)
    #[arg(long, default_value = "1")]
    pub games: usize,

    /// Maximum plies per game before it is scored as a draw
    #[arg(long, default_value_t = DEFAULT_MAX_PLIES)]
    pub max_plies: u32,

    /// Play the games in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Print every move
    #[arg(long)]
    pub moves: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// 1. Build both agent configurations
/// 2. Play the match
/// 3. Report results
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    let (first, second) = build_agents(&args, seed)?;

    tracing::info!(
        "Starting match: {} vs {} ({} games)",
        first.label(),
        second.label(),
        args.games
    );

    let result = play(&first, &second, &args)?;

    report_results(&result, &first, &second, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Turn the flags into two validated agent configurations
fn build_agents(args: &MatchArgs, seed: Option<u64>) -> Result<(AgentConfig, AgentConfig)> {
    let first = agent_config(args.first, args.first_depth, args.first_heuristic, seed);
    // Separate stream so two random agents do not mirror each other
    let second = agent_config(
        args.second,
        args.second_depth,
        args.second_heuristic,
        seed.map(|s| s.wrapping_add(1)),
    );

    first.validate().context("Invalid first agent")?;
    second.validate().context("Invalid second agent")?;
    Ok((first, second))
}

fn play(first: &AgentConfig, second: &AgentConfig, args: &MatchArgs) -> Result<MatchResult> {
    let result = if args.parallel {
        play_match_parallel(first, second, args.games, args.max_plies)?
    } else {
        play_match(first, second, args.games, args.max_plies)?
    };
    Ok(result)
}

fn report_results(
    result: &MatchResult,
    first: &AgentConfig,
    second: &AgentConfig,
    args: &MatchArgs,
) {
    if args.json {
        print_json_results(result, first, second);
    } else {
        print_text_results(result, first, second, args.moves);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn agent_config(
    kind: AgentKind,
    depth: u32,
    heuristic: Heuristic,
    seed: Option<u64>,
) -> AgentConfig {
    let config = match kind {
        AgentKind::AlphaBeta => AgentConfig::alpha_beta(depth).with_heuristic(heuristic),
        AgentKind::Random => AgentConfig::random(),
    };
    match seed {
        Some(s) => config.with_seed(s),
        None => config,
    }
}

/// One line per game, e.g. `Game 1: first as P1, P1 wins (27) in 41 plies`
fn describe_game(number: usize, game: &SeatedOutcome) -> String {
    let outcome = &game.outcome;
    let stopped = if outcome.finished { "" } else { " (stopped)" };
    format!(
        "Game {}: first as {}, {} in {} plies{}",
        number,
        game.first_agent_seat,
        outcome.result,
        outcome.plies(),
        stopped
    )
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Moves in play order, e.g. `C F* J ...` (* = extra turn)
fn format_moves(game: &SeatedOutcome) -> String {
    game.outcome
        .moves
        .iter()
        .map(|m| {
            if m.extra_turn {
                format!("{}*", m.pit)
            } else {
                m.pit.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Print results as JSON
fn print_json_results(result: &MatchResult, first: &AgentConfig, second: &AgentConfig) {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        first_agent_seat: Player,
        result: String,
        finished: bool,
        plies: usize,
        moves: String,
        final_position: String,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        first_agent: String,
        second_agent: String,
        total_games: u32,
        first_wins: u32,
        second_wins: u32,
        draws: u32,
        first_win_rate: f32,
        avg_margin: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        first_agent: first.label(),
        second_agent: second.label(),
        total_games: result.games_played,
        first_wins: result.first_wins,
        second_wins: result.second_wins,
        draws: result.draws,
        first_win_rate: result.first_win_rate(),
        avg_margin: result.avg_margin,
        games: result
            .games
            .iter()
            .enumerate()
            .map(|(i, g)| JsonGame {
                game_number: i + 1,
                first_agent_seat: g.first_agent_seat,
                result: g.outcome.result.to_string(),
                finished: g.outcome.finished,
                plies: g.outcome.plies(),
                moves: format_moves(g),
                final_position: g.outcome.final_board.to_string(),
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print results as text
fn print_text_results(
    result: &MatchResult,
    first: &AgentConfig,
    second: &AgentConfig,
    moves: bool,
) {
    println!("\n=== Match Results ===");
    println!("First:  {}", first.label());
    println!("Second: {}", second.label());
    println!();

    for (i, game) in result.games.iter().enumerate() {
        println!("{}", describe_game(i + 1, game));
        if moves {
            println!("  {}", format_moves(game));
        }
    }

    println!();
    println!("Total games:  {}", result.games_played);
    println!(
        "First wins:   {} ({:.1}%)",
        result.first_wins,
        result.first_win_rate() * 100.0
    );
    println!(
        "Second wins:  {} ({:.1}%)",
        result.second_wins,
        result.second_win_rate() * 100.0
    );
    println!(
        "Draws:        {} ({:.1}%)",
        result.draws,
        result.draw_rate() * 100.0
    );
    println!("Avg margin:   {:+.1}", result.avg_margin);
}
