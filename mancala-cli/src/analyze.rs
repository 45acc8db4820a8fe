//! Analyze command - search a single position
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: analyze_position(), report()
//! - Level 3: Analysis

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use mancala_core::{evaluate, AlphaBetaAI, BoardState, Game, Heuristic, Pit, Player, SearchResult};
use mancala_tournament::DEFAULT_DEPTH;

use crate::render::render_board;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Position as `A,B,C,D,E,F/G,H,I,J,K,L/store1,store2` (default: opening)
    #[arg(long)]
    pub position: Option<BoardState>,

    /// Side to move
    #[arg(long, default_value = "1")]
    pub player: Player,

    /// Search depth
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    pub depth: u32,

    /// Evaluation heuristic
    #[arg(long, default_value = "1")]
    pub heuristic: Heuristic,

    /// Also run plain minimax and compare node counts
    #[arg(long)]
    pub exhaustive: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 3 - ANALYSIS RECORD
// ============================================================================

#[derive(Debug, Serialize)]
struct MoveScore {
    pit: Pit,
    score: f32,
}

#[derive(Debug, Serialize)]
struct Analysis {
    position: String,
    player: Player,
    depth: u32,
    heuristic: Heuristic,
    static_score: f32,
    score: f32,
    best_move: Option<Pit>,
    nodes: u64,
    exhaustive_nodes: Option<u64>,
    moves: Vec<MoveScore>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run analyze command
pub fn run(args: AnalyzeArgs) -> Result<()> {
    let board = args.position.clone().unwrap_or_default();
    let analysis = analyze_position(board, &args)?;

    tracing::info!(
        "Searched {} nodes at depth {}",
        analysis.nodes,
        analysis.depth
    );

    report(&analysis, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn analyze_position(board: BoardState, args: &AnalyzeArgs) -> Result<Analysis> {
    let ai = AlphaBetaAI::new(args.depth, args.heuristic).context("Invalid search settings")?;
    let game = Game::from_board(board);

    let SearchResult {
        score,
        best_move,
        nodes,
    } = ai.search(&game, args.player);

    let exhaustive_nodes = if args.exhaustive {
        let plain = ai.clone().exhaustive().search(&game, args.player);
        if plain.score != score || plain.best_move != best_move {
            tracing::warn!(
                "Plain minimax disagrees: {:?} {} vs {:?} {}",
                plain.best_move,
                plain.score,
                best_move,
                score
            );
        }
        Some(plain.nodes)
    } else {
        None
    };

    let moves = ai
        .score_moves(&game, args.player)
        .into_iter()
        .map(|(pit, score)| MoveScore { pit, score })
        .collect();

    Ok(Analysis {
        position: game.board().to_string(),
        player: args.player,
        depth: args.depth,
        heuristic: args.heuristic,
        static_score: evaluate(game.board(), args.player, args.heuristic),
        score,
        best_move,
        nodes,
        exhaustive_nodes,
        moves,
    })
}

fn report(analysis: &Analysis, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(analysis).context("Failed to encode analysis")?;
        println!("{}", text);
        return Ok(());
    }

    let board: BoardState = analysis.position.parse()?;
    println!("\n{}\n", render_board(&board));
    println!("Position:   {}", analysis.position);
    println!("To move:    {}", analysis.player);
    println!("Search:     depth {} with {}", analysis.depth, analysis.heuristic);
    println!("Static:     {:+.1}", analysis.static_score);
    println!("Value:      {:+.1}", analysis.score);
    match analysis.best_move {
        Some(pit) => println!("Best move:  {}", pit),
        None => println!("Best move:  none"),
    }
    println!("Nodes:      {}", analysis.nodes);
    if let Some(plain) = analysis.exhaustive_nodes {
        let saved = 100.0 * (1.0 - analysis.nodes as f64 / plain.max(1) as f64);
        println!("Plain:      {} ({:.1}% pruned)", plain, saved);
    }

    if !analysis.moves.is_empty() {
        println!("\nMove  Value");
        for m in &analysis.moves {
            let marker = if Some(m.pit) == analysis.best_move { " <" } else { "" };
            println!("  {}  {:+6.1}{}", m.pit, m.score, marker);
        }
    }
    Ok(())
}
