//! Perfect-play engine for misère 4x4 four-in-a-row
//!
//! The first player to complete a line of four same-marked cells (row,
//! column, or either full diagonal) loses. This crate provides:
//! - Complete game implementation with validation
//! - Memoized alpha-beta search deciding any reachable position
//! - Automated movers and match drivers
//! - A CLI for position analysis and self-play

pub mod cli;
pub mod error;
pub mod game;
pub mod play;
pub mod search;

pub use error::{Error, Result};
pub use game::{BoardState, Cell, Game, GameOutcome, Player};
pub use play::{EngineMover, Mover, RandomMover, play_match};
pub use search::{Solver, SolverConfig};
