//! Losing line analysis for misère four-in-a-row

use std::collections::HashSet;

use super::{Cell, Player};

/// Losing line indices on the 4x4 board.
///
/// Board size equals line length, so every line is one of the 4 rows, the
/// 4 columns, or the 2 full diagonals; there are no sliding windows.
pub const LOSING_LINES: [[usize; 4]; 10] = [
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [8, 9, 10, 11],
    [12, 13, 14, 15], // rows
    [0, 4, 8, 12],
    [1, 5, 9, 13],
    [2, 6, 10, 14],
    [3, 7, 11, 15], // columns
    [0, 5, 10, 15],
    [3, 6, 9, 12], // diagonals
];

/// Utility for analyzing losing lines on the 4x4 board
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if a player holds a fully completed line (and has therefore lost)
    pub fn has_line(cells: &[Cell; 16], player: Player) -> bool {
        let target = player.to_cell();
        LOSING_LINES
            .iter()
            .any(|line| line.iter().all(|&idx| cells[idx] == target))
    }

    /// Find all positions that would immediately complete a line for the player
    pub fn losing_moves(cells: &[Cell; 16], player: Player) -> HashSet<usize> {
        let mut moves = HashSet::new();
        for &line in &LOSING_LINES {
            if let Some(pos) = Self::losing_move_in_line(cells, player, &line) {
                moves.insert(pos);
            }
        }
        moves
    }

    /// Check if the player has any immediately losing placement (3 in a line with 1 empty)
    pub fn has_losing_move(cells: &[Cell; 16], player: Player) -> bool {
        LOSING_LINES
            .iter()
            .any(|line| Self::losing_move_in_line(cells, player, line).is_some())
    }

    /// All lines fully occupied by the player's marks
    pub fn completed_lines(cells: &[Cell; 16], player: Player) -> Vec<[usize; 4]> {
        let target = player.to_cell();
        LOSING_LINES
            .iter()
            .filter(|line| line.iter().all(|&idx| cells[idx] == target))
            .copied()
            .collect()
    }

    /// Find the completing position in a specific line, if one exists
    fn losing_move_in_line(cells: &[Cell; 16], player: Player, line: &[usize; 4]) -> Option<usize> {
        let target = player.to_cell();
        let mut count = 0;
        let mut empty_pos = None;

        for &idx in line {
            match cells[idx] {
                Cell::Empty => {
                    if empty_pos.is_some() {
                        // More than one empty cell, the line cannot complete this move
                        return None;
                    }
                    empty_pos = Some(idx);
                }
                c if c == target => count += 1,
                _ => return None, // Opponent piece kills the line
            }
        }

        if count == 3 && empty_pos.is_some() {
            empty_pos
        } else {
            None
        }
    }
}
