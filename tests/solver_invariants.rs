//! Invariant suite for the search engine
//!
//! Validates determinism, the zero-sum mirror property, equivalence of the
//! pruned/memoized search with an exhaustive reference minimax, and the
//! game-theoretic value of the empty board.

use misere4::game::BoardState;
use misere4::search::{DRAW, LOSS, Solver, SolverConfig, WIN};

/// Reference minimax: no pruning, no memoization, same move filtering.
///
/// Exponential, so only call it on positions with few empty cells.
fn exhaustive(state: &BoardState, maximizing: bool) -> i32 {
    let moves = state.empty_positions();
    if moves.is_empty() {
        return DRAW;
    }

    let side = state.to_move;
    let mut best: Option<i32> = None;

    for pos in moves {
        if state.is_losing_move(side, pos).unwrap() {
            continue;
        }
        let next = state.make_move(pos).unwrap();
        let value = exhaustive(&next, !maximizing);
        best = Some(match best {
            None => value,
            Some(b) => {
                if maximizing {
                    b.max(value)
                } else {
                    b.min(value)
                }
            }
        });
    }

    match best {
        Some(value) => value,
        // Every placement completes the mover's own line
        None => {
            if maximizing {
                LOSS
            } else {
                WIN
            }
        }
    }
}

/// Play out a fixed opening to get a reachable, line-free mid-game position
fn position_after(moves: &[usize]) -> BoardState {
    let mut state = BoardState::new();
    for &pos in moves {
        state = state.make_move(pos).unwrap();
    }
    assert!(state.loser().is_none(), "opening must not complete a line");
    state
}

fn sample_positions() -> Vec<BoardState> {
    vec![
        position_after(&[5, 0, 10, 3, 6, 12, 9, 15]),
        position_after(&[0, 5, 1, 6, 8, 9, 14]),
        position_after(&[15, 10, 12, 9, 3, 6, 0, 5]),
        // Single empty cell, and it loses for the side to move
        BoardState::from_string("XXX.OXXOOXOOXOOO").unwrap(),
        // Two empty cells, one safe and one losing
        BoardState::from_string("XXX.OXXOOXOOXO.O").unwrap(),
    ]
}

mod determinism {
    use super::*;

    #[test]
    fn repeated_evaluation_is_stable() {
        for state in sample_positions() {
            let mut solver = Solver::new();
            let first = solver.evaluate(&state, true);
            for _ in 0..3 {
                assert_eq!(
                    solver.evaluate(&state, true),
                    first,
                    "evaluation changed across calls for {}",
                    state.encode()
                );
            }

            let mut fresh = Solver::new();
            assert_eq!(
                fresh.evaluate(&state, true),
                first,
                "fresh solver disagreed for {}",
                state.encode()
            );
        }
    }

    #[test]
    fn memoized_value_matches_unmemoized_search() {
        for state in sample_positions() {
            let mut memoized = Solver::new();
            let mut plain =
                Solver::with_config(SolverConfig::new().with_memoization(false));
            assert_eq!(
                memoized.evaluate(&state, true),
                plain.evaluate(&state, true),
                "memoization changed the value of {}",
                state.encode()
            );
        }
    }

    #[test]
    fn symmetry_reduction_does_not_change_values() {
        for state in sample_positions() {
            let mut canonical = Solver::new();
            let mut plain =
                Solver::with_config(SolverConfig::new().with_symmetry_reduction(false));
            assert_eq!(
                canonical.evaluate(&state, true),
                plain.evaluate(&state, true),
                "symmetry reduction changed the value of {}",
                state.encode()
            );
        }
    }
}

mod zero_sum {
    use super::*;

    #[test]
    fn mirrored_orientation_negates_the_value() {
        for state in sample_positions() {
            let mut for_mover = Solver::new();
            let mut for_opponent = Solver::new();
            let value = for_mover.evaluate(&state, true);
            let mirrored = for_opponent.evaluate(&state, false);
            assert_eq!(
                value,
                -mirrored,
                "zero-sum mirror failed for {}",
                state.encode()
            );
        }
    }
}

mod pruning_equivalence {
    use super::*;

    #[test]
    fn pruned_search_matches_exhaustive_minimax() {
        for state in sample_positions() {
            let expected = exhaustive(&state, true);
            let mut solver = Solver::new();
            assert_eq!(
                solver.evaluate(&state, true),
                expected,
                "pruned value diverged from exhaustive minimax for {}",
                state.encode()
            );
        }
    }

    #[test]
    fn move_values_match_exhaustive_minimax() {
        let state = position_after(&[5, 0, 10, 3, 6, 12, 9, 15]);
        let side = state.to_move;

        for pos in state.empty_positions() {
            if state.is_losing_move(side, pos).unwrap() {
                continue;
            }
            let next = state.make_move(pos).unwrap();
            let mut solver = Solver::new();
            assert_eq!(
                solver.evaluate(&next, false),
                exhaustive(&next, false),
                "move {pos} scored differently under pruning"
            );
        }
    }
}

mod empty_board {
    use super::*;

    #[test]
    fn perfect_play_from_the_empty_board_is_a_draw() {
        // The second mover can always answer with the 180°-rotated cell, so
        // the first mover never wins; the first mover holds the draw by
        // filling a line-free half of the antipodal cell pairs.
        let mut solver = Solver::new();
        let value = solver.evaluate(&BoardState::new(), true);
        assert_eq!(value, DRAW, "empty-board value must be the pinned draw");
    }

    #[test]
    fn engine_proposes_an_opening_move() {
        let mut solver = Solver::new();
        let opening = solver.select_move(&BoardState::new()).unwrap();
        assert!(opening.is_some());
        assert!(opening.unwrap() < 16);
    }
}
