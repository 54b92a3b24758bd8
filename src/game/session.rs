//! High-level game management
//!
//! A [`Game`] tracks one misère match from the empty board to termination:
//! either side completing a line (recorded as that side's loss) or the board
//! filling without a line (a draw). Moves after termination fail fast.

use serde::{Deserialize, Serialize};

use super::board::{BoardState, Player};

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub position: usize,
    pub player: Player,
}

/// Outcome of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// The named player completed a line of four and lost
    Loss(Player),
    /// Board full with no completed line
    Draw,
}

impl GameOutcome {
    /// The player who completed a line, if any
    pub fn loser(&self) -> Option<Player> {
        match self {
            GameOutcome::Loss(player) => Some(*player),
            GameOutcome::Draw => None,
        }
    }

    /// The player who forced the opponent into a line, if any
    pub fn winner(&self) -> Option<Player> {
        self.loser().map(Player::opponent)
    }
}

/// Report for a single accepted placement.
///
/// `completed_line` is true when the placement finished a line of four and
/// ended the game with `player` as the loser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub position: usize,
    pub player: Player,
    pub completed_line: bool,
}

/// A complete game with history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    initial: BoardState,
    state: BoardState,
    moves: Vec<Move>,
    outcome: Option<GameOutcome>,
}

impl Game {
    /// Create a new game from the empty board, X to move
    pub fn new() -> Self {
        Self::with_first_player(Player::X)
    }

    /// Create a new game with a chosen first mover
    pub fn with_first_player(first_player: Player) -> Self {
        let initial = BoardState::new_with_player(first_player);
        Game {
            initial,
            state: initial,
            moves: Vec::new(),
            outcome: None,
        }
    }

    /// Start a game from an arbitrary position.
    ///
    /// A position that is already decided (completed line or full board)
    /// yields a game with its outcome recorded, so the first `play` call
    /// fails fast instead of continuing a finished game.
    ///
    /// # Errors
    ///
    /// [`crate::Error::InvalidConfiguration`] if the position is not
    /// reachable under the rules.
    pub fn from_state(state: BoardState) -> Result<Self, crate::Error> {
        if !state.is_valid() {
            return Err(crate::Error::InvalidConfiguration {
                message: format!(
                    "position '{}' is not reachable under the rules",
                    state.encode()
                ),
            });
        }

        let outcome = if let Some(loser) = state.loser() {
            Some(GameOutcome::Loss(loser))
        } else if state.empty_positions().is_empty() {
            Some(GameOutcome::Draw)
        } else {
            None
        };

        Ok(Game {
            initial: state,
            state,
            moves: Vec::new(),
            outcome,
        })
    }

    /// The position the game started from
    pub fn initial(&self) -> &BoardState {
        &self.initial
    }

    /// The current board state
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// Moves played so far, in order
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// The recorded outcome, if the game has terminated
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Check whether the game has terminated
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Attempt a move for the side to move.
    ///
    /// A placement that completes a line is still applied (the final board
    /// shows the losing line) and terminates the game with the mover as the
    /// loser; filling the last cell without a line terminates as a draw.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::GameOver`] if the game has already terminated
    /// - [`crate::Error::CellOccupied`] / [`crate::Error::InvalidPosition`]
    ///   for placements that would overwrite or fall off the board
    pub fn play(&mut self, position: usize) -> Result<Placement, crate::Error> {
        if self.outcome.is_some() {
            return Err(crate::Error::GameOver);
        }

        let player = self.state.to_move;
        let completed_line = self.state.is_losing_move(player, position)?;
        self.state = self.state.make_move(position)?;
        self.moves.push(Move { position, player });

        if completed_line {
            self.outcome = Some(GameOutcome::Loss(player));
        } else if self.state.empty_positions().is_empty() {
            self.outcome = Some(GameOutcome::Draw);
        }

        Ok(Placement {
            position,
            player,
            completed_line,
        })
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
