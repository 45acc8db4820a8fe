//! Tournament command - round robin between agent configurations
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_config(), report_results()
//! - Level 3: apply_overrides()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use mancala_core::Heuristic;
use mancala_tournament::{
    run_tournament, AgentConfig, NamedAgent, TournamentConfig, TournamentResult,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct TournamentArgs {
    /// Tournament JSON file (overrides --depths/--heuristics)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Depths to sweep when no config file is given
    #[arg(long, value_delimiter = ',', default_value = "2,4")]
    pub depths: Vec<u32>,

    /// Heuristics to sweep when no config file is given
    #[arg(long, value_delimiter = ',', default_value = "1,2")]
    pub heuristics: Vec<Heuristic>,

    /// Add a random baseline to the sweep
    #[arg(long)]
    pub with_random: bool,

    /// Games per pairing (alternating seats)
    #[arg(long)]
    pub games: Option<usize>,

    /// Maximum plies per game
    #[arg(long)]
    pub max_plies: Option<u32>,

    /// Run pairings one after another
    #[arg(long)]
    pub sequential: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run tournament command
pub fn run(args: TournamentArgs, seed: Option<u64>) -> Result<()> {
    let mut config = load_config(&args)?;
    apply_overrides(&mut config, &args, seed);
    let result = run_tournament(&config).context("Tournament failed")?;

    report_results(&result, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn load_config(args: &TournamentArgs) -> Result<TournamentConfig> {
    let mut config = match &args.config {
        Some(path) => TournamentConfig::load(path)?,
        None => TournamentConfig::sweep(&args.depths, &args.heuristics),
    };

    if args.with_random {
        config
            .agents
            .push(NamedAgent::new("random", AgentConfig::random()));
    }
    Ok(config)
}

fn report_results(result: &TournamentResult, args: &TournamentArgs) {
    if args.json {
        if let Ok(json) = serde_json::to_string_pretty(result) {
            println!("{}", json);
        }
    } else {
        print_standings(result);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Command-line flags win over the file
fn apply_overrides(config: &mut TournamentConfig, args: &TournamentArgs, seed: Option<u64>) {
    if let Some(games) = args.games {
        config.games_per_match = games;
    }
    if let Some(max_plies) = args.max_plies {
        config.max_plies = max_plies;
    }
    if args.sequential {
        config.parallel = false;
    }
    if let Some(seed) = seed {
        for (i, named) in config.agents.iter_mut().enumerate() {
            if named.agent.seed.is_none() {
                named.agent.seed = Some(seed.wrapping_add(i as u64));
            }
        }
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn print_standings(result: &TournamentResult) {
    println!("\n=== Tournament Standings ===");
    println!(
        "{:>3}  {:<24} {:>6} {:>4} {:>4} {:>4} {:>6} {:>8}",
        "#", "Agent", "Score", "W", "L", "D", "Win%", "Margin"
    );
    for (rank, s) in result.standings.iter().enumerate() {
        println!(
            "{:>3}  {:<24} {:>6.1} {:>4} {:>4} {:>4} {:>6.1} {:>+8.1}",
            rank + 1,
            s.name,
            s.score,
            s.wins,
            s.losses,
            s.draws,
            s.win_rate() * 100.0,
            s.avg_margin
        );
    }
    if let Some(winner) = result.winner() {
        println!(
            "\nWinner: {} ({:.0}% of points)",
            winner.name,
            winner.normalized_score() * 100.0
        );
    }
}
