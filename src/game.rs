//! Misère 4x4 four-in-a-row game implementation

pub mod board;
pub mod lines;
pub mod session;
pub mod symmetry;
pub mod validation;

pub use board::{BOARD_DIM, BoardState, CELL_COUNT, Cell, Player};
pub use lines::{LOSING_LINES, LineAnalyzer};
pub use session::{Game, GameOutcome, Move, Placement};
pub use symmetry::D4Transform;
