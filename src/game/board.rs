//! Board state representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::lines::LineAnalyzer;

/// Side length of the board
pub const BOARD_DIM: usize = 4;

/// Total number of cells
pub const CELL_COUNT: usize = BOARD_DIM * BOARD_DIM;

/// A cell on the 4x4 board
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | ' ' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

/// Complete board state including cells and whose turn it is.
///
/// This type implements `Copy` since it's only 17 bytes (16 bytes for cells
/// + 1 byte for the player enum), which also lets it serve directly as a
/// memoization key in the search engine.
///
/// Under the misère rule a completed line of four same-marked cells ends the
/// game with the line's owner as the loser, so a valid state never contains
/// a completed line for more than one side.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct BoardState {
    pub cells: [Cell; CELL_COUNT],
    pub to_move: Player,
}

/// Count of each piece type on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PieceCount {
    x: usize,
    o: usize,
    empty: usize,
}

impl BoardState {
    /// Create a new empty board with X to move
    pub fn new() -> Self {
        Self::new_with_player(Player::X)
    }

    /// Create a new empty board with a specified player to move first.
    ///
    /// The engine is symmetric in the two sides; X-first is the convention
    /// but O-first positions parse and play the same way.
    pub fn new_with_player(first_player: Player) -> Self {
        BoardState {
            cells: [Cell::Empty; CELL_COUNT],
            to_move: first_player,
        }
    }

    /// Helper: Parse 16 cells from a slice of characters.
    ///
    /// # Errors
    ///
    /// Returns error if fewer than 16 characters or any character is invalid.
    fn parse_cells(chars: &[char], context: &str) -> Result<[Cell; CELL_COUNT], crate::Error> {
        if chars.len() < CELL_COUNT {
            return Err(crate::Error::InvalidBoardLength {
                expected: CELL_COUNT,
                got: chars.len(),
                context: context.to_string(),
            });
        }

        let mut cells = [Cell::Empty; CELL_COUNT];
        for (i, &c) in chars.iter().take(CELL_COUNT).enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: context.to_string(),
            })?;
        }

        Ok(cells)
    }

    /// Helper: Count pieces on the board.
    fn count_pieces(cells: &[Cell; CELL_COUNT]) -> PieceCount {
        let mut count = PieceCount {
            x: 0,
            o: 0,
            empty: 0,
        };
        for cell in cells {
            match cell {
                Cell::X => count.x += 1,
                Cell::O => count.o += 1,
                Cell::Empty => count.empty += 1,
            }
        }
        count
    }

    /// Helper: Parse a player string ("X" or "O").
    fn parse_player(player_str: &str, context: &str) -> Result<Player, crate::Error> {
        match player_str {
            "X" => Ok(Player::X),
            "O" => Ok(Player::O),
            _ => Err(crate::Error::InvalidPlayerString {
                player: player_str.to_string(),
                label: context.to_string(),
            }),
        }
    }

    fn determine_turn_from_counts(count: &PieceCount) -> Result<Player, crate::Error> {
        if count.x == count.o {
            Ok(Player::X)
        } else if count.x == count.o + 1 {
            Ok(Player::O)
        } else if count.o == count.x + 1 {
            Ok(Player::X)
        } else {
            Err(crate::Error::InvalidPieceCounts {
                x_count: count.x,
                o_count: count.o,
            })
        }
    }

    fn ensure_turn_consistent_with_counts(
        count: &PieceCount,
        player: Player,
        context: &str,
    ) -> Result<(), crate::Error> {
        let valid = match player {
            Player::X => count.x == count.o || count.o == count.x + 1,
            Player::O => count.x == count.o || count.x == count.o + 1,
        };

        if valid {
            Ok(())
        } else {
            Err(crate::Error::InvalidConfiguration {
                message: format!(
                    "piece counts (X={}, O={}) are inconsistent with {} to move in '{}'",
                    count.x,
                    count.o,
                    match player {
                        Player::X => "X",
                        Player::O => "O",
                    },
                    context
                ),
            })
        }
    }

    /// Create a board from a string representation.
    ///
    /// The string should contain 16 characters (whitespace is filtered out)
    /// and may optionally include a suffix `_X` or `_O` to explicitly set the
    /// player to move. When the suffix is omitted, the player is inferred
    /// from the piece counts, defaulting to X-first semantics for ambiguous
    /// cases.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The board part has fewer than 16 non-whitespace characters
    /// - Any character is not a valid cell representation
    /// - The piece counts are invalid (difference greater than 1)
    /// - A provided `_X`/`_O` suffix conflicts with the piece counts
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let cleaned: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let (board_part, specified_turn) = Self::split_board_and_turn(&cleaned)?;
        let chars: Vec<char> = board_part.chars().collect();
        let cells = Self::parse_cells(&chars, s)?;
        let count = Self::count_pieces(&cells);

        let to_move = if let Some(turn) = specified_turn {
            Self::ensure_turn_consistent_with_counts(&count, turn, s).map(|_| turn)?
        } else {
            Self::determine_turn_from_counts(&count)?
        };

        Ok(BoardState { cells, to_move })
    }

    fn split_board_and_turn(cleaned: &str) -> Result<(&str, Option<Player>), crate::Error> {
        if let Some(idx) = cleaned.find('_') {
            let board = &cleaned[..idx];
            let suffix = &cleaned[idx + 1..];
            if suffix.is_empty() {
                return Err(crate::Error::InvalidPlayerString {
                    player: String::new(),
                    label: cleaned.to_string(),
                });
            }
            let player = Self::parse_player(suffix, cleaned)?;
            Ok((board, Some(player)))
        } else {
            Ok((cleaned, None))
        }
    }

    /// Create a board from label format "CCCCCCCCCCCCCCCC_P" (16 cells, P = X or O).
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The label format is invalid (not "board_player")
    /// - The board part is not exactly 16 characters
    /// - Any character is not a valid cell representation
    /// - The player part is not "X" or "O"
    /// - The position is impossible under the misère rules (double loss, or
    ///   a completed line whose owner cannot have moved last)
    pub fn from_label(label: &str) -> Result<Self, crate::Error> {
        let mut parts = label.split('_');
        let board = parts.next().ok_or_else(|| crate::Error::MissingLabelPart {
            part: "board".to_string(),
            label: label.to_string(),
        })?;
        let to_move_str = parts.next().ok_or_else(|| crate::Error::MissingLabelPart {
            part: "player".to_string(),
            label: label.to_string(),
        })?;

        if parts.next().is_some() || board.len() != CELL_COUNT {
            return Err(crate::Error::InvalidLabelFormat {
                label: label.to_string(),
                expected: format!("{}_P", "C".repeat(CELL_COUNT)),
            });
        }

        let chars: Vec<char> = board.chars().collect();
        let cells = Self::parse_cells(&chars, label)?;
        let to_move = Self::parse_player(to_move_str, label)?;

        let counts = Self::count_pieces(&cells);
        let diff = counts.x as isize - counts.o as isize;

        let invalid_label = |reason: &str| crate::Error::InvalidConfiguration {
            message: format!("invalid board label '{label}': {reason}"),
        };

        if diff.abs() > 1 {
            return Err(invalid_label(&format!(
                "piece counts must differ by at most 1 (X={}, O={})",
                counts.x, counts.o
            )));
        }

        match diff {
            1 if to_move != Player::O => {
                return Err(invalid_label(
                    "X has an extra move, so it must be O's turn in the label",
                ));
            }
            -1 if to_move != Player::X => {
                return Err(invalid_label(
                    "O has an extra move, so it must be X's turn in the label",
                ));
            }
            _ => {}
        }

        let board = BoardState { cells, to_move };
        let x_lost = board.has_lost(Player::X);
        let o_lost = board.has_lost(Player::O);

        if x_lost && o_lost {
            return Err(invalid_label(
                "both players cannot have completed losing lines",
            ));
        }

        // A completed line ends the game on the spot, so the line's owner
        // made the final move and the recorded turn belongs to the opponent.
        if x_lost {
            if to_move != Player::O {
                return Err(invalid_label(
                    "X completed a line, so it must be O's recorded turn",
                ));
            }
            if diff != 1 && diff != 0 {
                return Err(invalid_label(
                    "X completing a line requires X to have moved last",
                ));
            }
        }
        if o_lost {
            if to_move != Player::X {
                return Err(invalid_label(
                    "O completed a line, so it must be X's recorded turn",
                ));
            }
            if diff != -1 && diff != 0 {
                return Err(invalid_label(
                    "O completing a line requires O to have moved last",
                ));
            }
        }

        Ok(board)
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        let count = Self::count_pieces(&self.cells);
        count.x + count.o
    }

    /// Get cell at position (0-15)
    pub fn get(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    /// Check if a position is empty
    pub fn is_empty(&self, pos: usize) -> bool {
        self.cells[pos] == Cell::Empty
    }

    /// Get all empty positions in row-major order.
    ///
    /// The order is a contract: move generation, tie-breaking between
    /// equal-scoring moves, and the forced-loss fallback all take the first
    /// qualifying position of this scan.
    pub fn empty_positions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Make a move and return a new board state
    #[must_use = "make_move returns a new board state; the original is unchanged"]
    pub fn make_move(&self, pos: usize) -> Result<BoardState, crate::Error> {
        if pos >= CELL_COUNT {
            return Err(crate::Error::InvalidPosition { position: pos });
        }

        if !self.is_empty(pos) {
            return Err(crate::Error::CellOccupied { position: pos });
        }

        let mut new_state = *self;
        new_state.cells[pos] = self.to_move.to_cell();
        new_state.to_move = self.to_move.opponent();
        Ok(new_state)
    }

    /// Get legal moves in this position (empty cells when game not terminal)
    pub fn legal_moves(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.empty_positions()
    }

    /// Check whether placing `player`'s mark at the empty cell `pos` would
    /// complete a line of four and lose the game for `player`.
    ///
    /// The check runs against a local probe copy, so the receiver is never
    /// mutated on any return path.
    ///
    /// # Errors
    ///
    /// Fails fast with [`crate::Error::CellOccupied`] (or
    /// [`crate::Error::InvalidPosition`]) instead of probing an occupied
    /// cell; overwriting would corrupt the board invariant.
    ///
    /// # Examples
    ///
    /// ```
    /// use misere4::game::{BoardState, Player};
    ///
    /// let board = BoardState::from_string("XXX. OOO. .... ....").unwrap();
    /// assert!(board.is_losing_move(Player::X, 3).unwrap());
    /// assert!(!board.is_losing_move(Player::X, 7).unwrap());
    /// assert!(board.is_losing_move(Player::O, 7).unwrap());
    /// ```
    pub fn is_losing_move(&self, player: Player, pos: usize) -> Result<bool, crate::Error> {
        if pos >= CELL_COUNT {
            return Err(crate::Error::InvalidPosition { position: pos });
        }
        if !self.is_empty(pos) {
            return Err(crate::Error::CellOccupied { position: pos });
        }

        let mut probe = *self;
        probe.cells[pos] = player.to_cell();
        Ok(LineAnalyzer::has_line(&probe.cells, player))
    }

    /// Check if a player has completed a line (and thereby lost)
    pub fn has_lost(&self, player: Player) -> bool {
        LineAnalyzer::has_line(&self.cells, player)
    }

    /// Get the loser if a line has been completed
    pub fn loser(&self) -> Option<Player> {
        if self.has_lost(Player::X) {
            Some(Player::X)
        } else if self.has_lost(Player::O) {
            Some(Player::O)
        } else {
            None
        }
    }

    /// Check if the game is over (completed line or full board)
    pub fn is_terminal(&self) -> bool {
        self.loser().is_some() || !self.cells.contains(&Cell::Empty)
    }

    /// Check if the position is a draw (all cells filled, no completed line)
    pub fn is_draw(&self) -> bool {
        !self.cells.contains(&Cell::Empty) && self.loser().is_none()
    }

    /// Get a canonical string representation for use as a label
    pub fn encode(&self) -> String {
        format!(
            "{}_{}",
            self.cells.iter().map(|&c| c.to_char()).collect::<String>(),
            match self.to_move {
                Player::X => 'X',
                Player::O => 'O',
            }
        )
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(BOARD_DIM) && i < CELL_COUNT - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
