//! misere4 CLI - analysis and self-play for misère 4x4 four-in-a-row
//!
//! This CLI provides:
//! - Position analysis: minimax value and the engine's move
//! - Automated games: engine vs engine, or engine vs a seeded random mover

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "misere4")]
#[command(version, about = "Misère 4x4 four-in-a-row engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a position: minimax value and engine move
    Analyze(misere4::cli::analyze::AnalyzeArgs),

    /// Play automated games from the empty board
    Selfplay(misere4::cli::selfplay::SelfplayArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => misere4::cli::analyze::execute(args),
        Commands::Selfplay(args) => misere4::cli::selfplay::execute(args),
    }
}
