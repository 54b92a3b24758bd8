//! Output formatting and progress bars for CLI

use indicatif::{ProgressBar, ProgressStyle};

use crate::game::{BOARD_DIM, BoardState};
use crate::search::{DRAW, LOSS, WIN};

/// Create a progress bar for batch self-play
pub fn create_batch_progress(total_games: u64) -> ProgressBar {
    let pb = ProgressBar::new(total_games);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")
            .expect("Invalid progress bar template")
            .progress_chars("=>-"),
    );
    pb
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print the board with row and column coordinates
pub fn print_board(state: &BoardState) {
    println!("    0 1 2 3");
    for row in 0..BOARD_DIM {
        let cells: Vec<String> = (0..BOARD_DIM)
            .map(|col| state.get(row * BOARD_DIM + col).to_char().to_string())
            .collect();
        println!("  {} {}", row, cells.join(" "));
    }
}

/// Describe a minimax value from the perspective of the side to move
pub fn describe_value(value: i32) -> &'static str {
    match value {
        WIN => "win (the opponent is eventually forced to complete a line)",
        LOSS => "loss (the side to move is eventually forced to complete a line)",
        DRAW => "draw (the board fills with no completed line)",
        _ => "unknown",
    }
}

/// Format a position as "pos (row r, col c)"
pub fn describe_position(pos: usize) -> String {
    format!("{} (row {}, col {})", pos, pos / BOARD_DIM, pos % BOARD_DIM)
}
