//! Analyze command - position values and engine moves

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::cli::output;
use crate::game::{BoardState, Player};
use crate::search::Solver;

#[derive(Parser, Debug)]
#[command(about = "Analyze a position: minimax value and engine move")]
pub struct AnalyzeArgs {
    /// Board to analyze, e.g. "XO.............._X" (defaults to the empty board)
    #[arg(long)]
    pub state: Option<String>,

    /// Show the value of every non-losing move instead of just the engine's choice
    #[arg(long)]
    pub all_moves: bool,

    /// Export the analysis to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Value and safety of a single placement
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoveReport {
    pub position: usize,
    /// Minimax value from the perspective of the side to move; absent for
    /// placements that complete the mover's own line
    pub value: Option<i32>,
    pub completes_line: bool,
}

/// Full analysis of one position
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisReport {
    pub label: String,
    pub to_move: Player,
    /// Minimax value for the side to move; absent when the game is over
    pub value: Option<i32>,
    pub engine_move: Option<usize>,
    pub moves: Vec<MoveReport>,
    pub cached_positions: usize,
}

/// Compute the analysis report for a position.
///
/// The position must be valid; decided positions (completed line or full
/// board) produce a report with no value and no engine move.
pub fn build_report(state: &BoardState) -> crate::Result<AnalysisReport> {
    let mut solver = Solver::new();

    if state.loser().is_some() || state.legal_moves().is_empty() {
        return Ok(AnalysisReport {
            label: state.encode(),
            to_move: state.to_move,
            value: None,
            engine_move: None,
            moves: Vec::new(),
            cached_positions: 0,
        });
    }

    let side = state.to_move;
    let mut moves = Vec::new();
    for pos in state.empty_positions() {
        if state.is_losing_move(side, pos)? {
            moves.push(MoveReport {
                position: pos,
                value: None,
                completes_line: true,
            });
        } else {
            let next = state.make_move(pos)?;
            moves.push(MoveReport {
                position: pos,
                value: Some(solver.evaluate(&next, false)),
                completes_line: false,
            });
        }
    }

    let value = Some(solver.evaluate(state, true));
    let engine_move = solver.select_move(state)?;

    Ok(AnalysisReport {
        label: state.encode(),
        to_move: side,
        value,
        engine_move,
        moves,
        cached_positions: solver.cached_positions(),
    })
}

/// Write an analysis report as pretty-printed JSON
pub fn write_report(path: &Path, report: &AnalysisReport) -> crate::Result<()> {
    let file = File::create(path).map_err(|source| crate::Error::Io {
        operation: format!("create export file '{}'", path.display()),
        source,
    })?;
    serde_json::to_writer_pretty(file, report)?;
    Ok(())
}

/// Run position analysis
pub fn execute(args: AnalyzeArgs) -> Result<()> {
    let state = match &args.state {
        Some(s) => BoardState::from_string(s)
            .with_context(|| format!("failed to parse board state '{s}'"))?,
        None => BoardState::new(),
    };

    if !state.is_valid() {
        bail!("position '{}' is not reachable under the rules", state.encode());
    }

    output::print_section("Position Analysis");
    output::print_board(&state);
    println!();

    let report = build_report(&state)?;

    match report.value {
        None => {
            if let Some(loser) = state.loser() {
                println!("Game over: {loser:?} completed a line and lost.");
            } else {
                println!("Game over: board full with no completed line (draw).");
            }
        }
        Some(value) => {
            output::print_kv("To move", &format!("{:?}", report.to_move));
            output::print_kv("Value", output::describe_value(value));
            match report.engine_move {
                Some(pos) => output::print_kv("Engine move", &output::describe_position(pos)),
                None => output::print_kv("Engine move", "none"),
            }
            output::print_kv(
                "Cached positions",
                &report.cached_positions.to_string(),
            );

            if args.all_moves {
                println!("\nMove values (for the side to move):");
                for entry in &report.moves {
                    match entry.value {
                        Some(v) => println!(
                            "  - {} -> {}",
                            output::describe_position(entry.position),
                            v
                        ),
                        None => println!(
                            "  - {} -> completes a line (immediate loss)",
                            output::describe_position(entry.position)
                        ),
                    }
                }
            }
        }
    }

    if let Some(path) = &args.export {
        write_report(path, &report).context("failed to write analysis JSON")?;
        println!("\nAnalysis exported to: {}", path.display());
    }

    Ok(())
}
