//! Mancala CLI - Command-line interface
//!
//! Commands:
//! - play: Human vs computer on the terminal
//! - match: Computer vs computer
//! - tournament: Round robin between agent configurations
//! - analyze: Search a single position

mod analyze;
mod match_cmd;
mod play;
mod render;
mod tournament_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mancala")]
#[command(about = "Kalah with a minimax alpha-beta opponent")]
struct Cli {
    /// Seed for random agents
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the computer
    Play(play::PlayArgs),
    /// Play computer vs computer games
    Match(match_cmd::MatchArgs),
    /// Run a round robin between agent configurations
    Tournament(tournament_cmd::TournamentArgs),
    /// Search a single position
    Analyze(analyze::AnalyzeArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so --json output stays clean
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::run(args),
        Commands::Match(args) => match_cmd::run(args, cli.seed),
        Commands::Tournament(args) => tournament_cmd::run(args, cli.seed),
        Commands::Analyze(args) => analyze::run(args),
    }
}
