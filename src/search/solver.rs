//! Memoized alpha-beta search over the misère rules
//!
//! The solver explores the move tree depth-first: at every node the side to
//! move considers only placements that do not complete one of its own lines
//! (nobody volunteers to lose), so the search never visits a position that
//! already contains a completed line. A position where every placement would
//! complete a line is a forced loss for the side to move; a position with no
//! placements at all is the drawn full board.

use std::collections::HashMap;

use super::config::SolverConfig;
use crate::game::BoardState;

/// Value of a position the evaluated side loses
pub const LOSS: i32 = -1;
/// Value of a drawn position
pub const DRAW: i32 = 0;
/// Value of a position the evaluated side wins
pub const WIN: i32 = 1;

// Window bounds sit one outside the value domain so the first explored
// child always tightens them.
const ALPHA_MIN: i32 = LOSS - 1;
const BETA_MAX: i32 = WIN + 1;

/// Perfect-play engine for the misère game.
///
/// Owns the memoization table; a freshly constructed solver starts with an
/// empty cache, so tests get isolation by constructing one per test. Entries
/// are keyed by the board snapshot plus the side to move; the maximizing
/// flag is not part of the key because the recursion flips it exactly when
/// the side alternates, so one orientation per solver instance determines
/// the role at every node. Callers must not mix orientations on a shared
/// instance.
pub struct Solver {
    config: SolverConfig,
    cache: HashMap<BoardState, i32>,
}

impl Solver {
    /// Create a solver with the default configuration
    pub fn new() -> Self {
        Self::with_config(SolverConfig::default())
    }

    /// Create a solver with an explicit configuration
    pub fn with_config(config: SolverConfig) -> Self {
        Self {
            config,
            cache: HashMap::new(),
        }
    }

    /// The active configuration
    pub fn config(&self) -> SolverConfig {
        self.config
    }

    /// Number of positions currently memoized
    pub fn cached_positions(&self) -> usize {
        self.cache.len()
    }

    /// Drop all memoized values
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Compute the minimax value of `state` with its recorded side to move.
    ///
    /// `maximizing` orients the value: `true` scores the position for the
    /// side to move, `false` for its opponent. The position must not already
    /// contain a completed line.
    ///
    /// Returns [`WIN`] when the oriented side forces the opponent into a
    /// line, [`LOSS`] when it is itself forced, and [`DRAW`] when the board
    /// fills without a line under perfect play.
    pub fn evaluate(&mut self, state: &BoardState, maximizing: bool) -> i32 {
        self.search(state, maximizing, ALPHA_MIN, BETA_MAX)
    }

    /// Pick the best placement for the side to move.
    ///
    /// Moves are scanned in row-major order; the first strictly best-scoring
    /// move wins ties, and the scan stops early once a winning move is
    /// found. When every placement completes a line the side must still
    /// move, so the first empty cell is returned regardless of outcome.
    ///
    /// # Errors
    ///
    /// [`crate::Error::GameOver`] when the position already holds a
    /// completed line; asking for a move in a decided game is a caller bug.
    ///
    /// Returns `Ok(None)` only when no empty cell remains.
    pub fn select_move(&mut self, state: &BoardState) -> Result<Option<usize>, crate::Error> {
        if state.loser().is_some() {
            return Err(crate::Error::GameOver);
        }

        let side = state.to_move;
        let moves = state.empty_positions();
        if moves.is_empty() {
            return Ok(None);
        }

        let mut best_score = ALPHA_MIN;
        let mut best_move = None;

        for &pos in &moves {
            if state.is_losing_move(side, pos)? {
                continue;
            }
            let next = state.make_move(pos)?;
            let score = self.evaluate(&next, false);
            if score > best_score {
                best_score = score;
                best_move = Some(pos);
            }
            if best_score == WIN {
                break;
            }
        }

        // Every placement completes a line; the side has no good option and
        // takes the first cell in scan order.
        Ok(best_move.or_else(|| moves.first().copied()))
    }

    fn memo_key(&self, state: &BoardState) -> BoardState {
        if self.config.symmetry_reduction {
            state.canonical()
        } else {
            *state
        }
    }

    fn search(&mut self, state: &BoardState, maximizing: bool, alpha: i32, beta: i32) -> i32 {
        debug_assert!(
            state.loser().is_none(),
            "search visited a position with a completed line"
        );

        let key = self.config.memoization.then(|| self.memo_key(state));
        if let Some(key) = &key
            && let Some(&value) = self.cache.get(key)
        {
            return value;
        }

        let moves = state.empty_positions();
        if moves.is_empty() {
            if let Some(key) = key {
                self.cache.insert(key, DRAW);
            }
            return DRAW;
        }

        let side = state.to_move;
        let (alpha_in, beta_in) = (alpha, beta);
        let (mut alpha, mut beta) = (alpha, beta);
        let mut best = if maximizing { ALPHA_MIN } else { BETA_MAX };
        let mut explored = false;

        for pos in moves {
            let Ok(losing) = state.is_losing_move(side, pos) else {
                continue;
            };
            if losing {
                // Completing a line is never played voluntarily; the move is
                // dropped here, not explored deeper.
                continue;
            }
            let Ok(next) = state.make_move(pos) else {
                continue;
            };

            explored = true;
            let value = self.search(&next, !maximizing, alpha, beta);

            if maximizing {
                best = best.max(value);
                alpha = alpha.max(best);
                if best == WIN {
                    break;
                }
            } else {
                best = best.min(value);
                beta = beta.min(best);
                if best == LOSS {
                    break;
                }
            }

            if beta <= alpha {
                break;
            }
        }

        if !explored {
            // Every placement completes one of the mover's own lines: the
            // side to move is forced to lose. Distinct from the no-moves
            // draw handled above.
            best = if maximizing { LOSS } else { WIN };
        }

        // A value clipped by the entry window is a bound, not necessarily
        // the true value; caching it would let one search's cutoff corrupt
        // another's answer. Rule-derived values are always exact.
        let exact = !explored || (best > alpha_in && best < beta_in);
        if let Some(key) = key
            && exact
        {
            self.cache.insert(key, best);
        }

        best
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{BoardState, Player};

    #[test]
    fn test_select_move_avoids_completing_a_line() {
        // X holds three in the top row; playing position 3 would lose on the spot
        let state = BoardState::from_string("XXX.OOO.........").unwrap();
        assert_eq!(state.to_move, Player::X);

        let mut solver = Solver::new();
        let chosen = solver.select_move(&state).unwrap();
        assert!(chosen.is_some());
        assert_ne!(chosen, Some(3));
        assert!(!state.is_losing_move(Player::X, chosen.unwrap()).unwrap());
    }

    #[test]
    fn test_select_move_returns_forced_loss() {
        // Only position 3 is empty and it completes X's top row
        let state = BoardState::from_string("XXX.OXXOOXOOXOOO").unwrap();
        assert_eq!(state.to_move, Player::X);
        assert_eq!(state.empty_positions(), vec![3]);
        assert!(state.is_losing_move(Player::X, 3).unwrap());

        let mut solver = Solver::new();
        assert_eq!(solver.select_move(&state).unwrap(), Some(3));
        assert_eq!(solver.evaluate(&state, true), LOSS);
    }

    #[test]
    fn test_select_move_on_decided_position_fails_fast() {
        let state = BoardState::from_label("XXXXOOO........._O").unwrap();
        let mut solver = Solver::new();
        let err = solver.select_move(&state).unwrap_err();
        assert!(matches!(err, crate::Error::GameOver));
    }

    #[test]
    fn test_select_move_on_full_board_returns_none() {
        let state = BoardState::from_string("XXOO OOXX XXOO OOXX").unwrap();
        let mut solver = Solver::new();
        assert_eq!(solver.select_move(&state).unwrap(), None);
    }

    #[test]
    fn test_full_board_evaluates_as_draw() {
        let state = BoardState::from_string("XXOO OOXX XXOO OOXX").unwrap();
        let mut solver = Solver::new();
        assert_eq!(solver.evaluate(&state, true), DRAW);
        assert_eq!(solver.evaluate(&state, false), DRAW);
    }

    #[test]
    fn test_evaluate_is_stable_across_calls() {
        let state = BoardState::from_string("XXX.OOO.........").unwrap();
        let mut solver = Solver::new();
        let first = solver.evaluate(&state, true);
        let second = solver.evaluate(&state, true);
        assert_eq!(first, second);
        assert!(solver.cached_positions() > 0);

        solver.clear_cache();
        assert_eq!(solver.cached_positions(), 0);
        assert_eq!(solver.evaluate(&state, true), first);
    }

    #[test]
    fn test_forced_loss_flips_with_orientation() {
        // X to move, every empty cell loses for X
        let state = BoardState::from_string("XXX.OXXOOXOOXOOO").unwrap();
        let mut for_mover = Solver::new();
        let mut for_opponent = Solver::new();
        assert_eq!(for_mover.evaluate(&state, true), LOSS);
        assert_eq!(for_opponent.evaluate(&state, false), WIN);
    }
}
