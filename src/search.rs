//! Game-tree search for the misère engine

pub mod config;
pub mod solver;

pub use config::SolverConfig;
pub use solver::{DRAW, LOSS, Solver, WIN};
