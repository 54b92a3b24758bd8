//! Board state validation logic

use super::board::{BoardState, Cell, Player};
use super::lines::LineAnalyzer;

impl BoardState {
    /// Check if the board state is reachable under the misère rules
    pub fn is_valid(&self) -> bool {
        let x_count = self.cells.iter().filter(|&&c| c == Cell::X).count();
        let o_count = self.cells.iter().filter(|&&c| c == Cell::O).count();

        // Piece counts must differ by at most 1 in either direction.
        // Allow O-first sequences by permitting O to have one extra move.
        if !(x_count == o_count || x_count == o_count + 1 || o_count == x_count + 1) {
            return false;
        }

        let diff = x_count as isize - o_count as isize;

        // Ensure the recorded turn matches the piece counts
        match self.to_move {
            Player::X => {
                if !(diff == 0 || diff == -1) {
                    return false;
                }
            }
            Player::O => {
                if !(diff == 0 || diff == 1) {
                    return false;
                }
            }
        }

        let x_lost = self.has_lost(Player::X);
        let o_lost = self.has_lost(Player::O);

        // The game stops at the first completed line
        if x_lost && o_lost {
            return false;
        }

        // A completed line ends the game on the completing move, so its
        // owner moved last and the recorded turn belongs to the opponent.
        if x_lost {
            if self.to_move != Player::O {
                return false;
            }
            if !(x_count == o_count + 1 || x_count == o_count) {
                return false;
            }
        }
        if o_lost {
            if self.to_move != Player::X {
                return false;
            }
            if !(o_count == x_count || o_count == x_count + 1) {
                return false;
            }
        }

        // Several completed lines are only possible when one placement
        // finished them all at once, so they must share a cell.
        if x_lost && !Self::lines_share_cell(&LineAnalyzer::completed_lines(&self.cells, Player::X))
        {
            return false;
        }
        if o_lost && !Self::lines_share_cell(&LineAnalyzer::completed_lines(&self.cells, Player::O))
        {
            return false;
        }

        true
    }

    /// Check if all completed lines share at least one cell
    fn lines_share_cell(lines: &[[usize; 4]]) -> bool {
        if lines.len() < 2 {
            return true;
        }

        lines[0]
            .iter()
            .any(|pos| lines.iter().all(|line| line.contains(pos)))
    }
}
