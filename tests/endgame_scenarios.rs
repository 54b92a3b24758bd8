//! Endgame and rule-engine scenario suite

use misere4::game::{BoardState, Cell, Game, GameOutcome, LOSING_LINES, Player};
use misere4::search::Solver;
use rand::{Rng, SeedableRng, rngs::StdRng};

mod losing_move_detection {
    use super::*;

    #[test]
    fn three_marks_in_any_line_flag_the_completing_cell() {
        for line in LOSING_LINES {
            for missing in 0..4 {
                let mut cells = [Cell::Empty; 16];
                for (i, &idx) in line.iter().enumerate() {
                    if i != missing {
                        cells[idx] = Cell::X;
                    }
                }
                let board = BoardState {
                    cells,
                    to_move: Player::X,
                };

                let completing = line[missing];
                assert!(
                    board.is_losing_move(Player::X, completing).unwrap(),
                    "cell {completing} should complete {line:?} for X"
                );
                assert!(
                    !board.is_losing_move(Player::O, completing).unwrap(),
                    "cell {completing} must not count as O's line"
                );
            }
        }
    }

    #[test]
    fn probing_never_mutates_the_board() {
        // Random partial games, every empty cell probed for both sides
        let mut rng = StdRng::seed_from_u64(2024);

        for _ in 0..50 {
            let mut state = BoardState::new();
            let plies = rng.random_range(0..12);
            for _ in 0..plies {
                let moves: Vec<usize> = state
                    .empty_positions()
                    .into_iter()
                    .filter(|&pos| !state.is_losing_move(state.to_move, pos).unwrap())
                    .collect();
                if moves.is_empty() {
                    break;
                }
                let pos = moves[rng.random_range(0..moves.len())];
                state = state.make_move(pos).unwrap();
            }

            let before = state;
            for pos in state.empty_positions() {
                for player in [Player::X, Player::O] {
                    let _ = state.is_losing_move(player, pos).unwrap();
                    assert_eq!(state, before, "probe mutated the board");
                }
            }
        }
    }

    #[test]
    fn probing_an_occupied_cell_fails_without_side_effects() {
        let state = BoardState::new().make_move(6).unwrap();
        let before = state;
        assert!(state.is_losing_move(Player::O, 6).is_err());
        assert_eq!(state, before);
    }
}

mod forced_endings {
    use super::*;

    #[test]
    fn sole_remaining_losing_move_is_still_returned() {
        // Position 3 is the only empty cell and completes X's top row
        let state = BoardState::from_string("XXX.OXXOOXOOXOOO").unwrap();
        assert_eq!(state.empty_positions(), vec![3]);
        assert!(state.is_losing_move(Player::X, 3).unwrap());

        let mut solver = Solver::new();
        assert_eq!(solver.select_move(&state).unwrap(), Some(3));
    }

    #[test]
    fn driving_the_forced_loss_records_the_loser() {
        let state = BoardState::from_string("XXX.OXXOOXOOXOOO").unwrap();
        let mut game = Game::from_state(state).unwrap();
        let mut solver = Solver::new();

        while !game.is_over() {
            let pos = solver
                .select_move(game.state())
                .unwrap()
                .expect("open position must offer a move");
            game.play(pos).unwrap();
        }

        assert_eq!(game.outcome(), Some(GameOutcome::Loss(Player::X)));
        assert_eq!(game.moves().len(), 1);
    }

    #[test]
    fn safe_cell_is_preferred_over_the_losing_one() {
        // Two empties: 3 completes X's top row, 14 is safe
        let state = BoardState::from_string("XXX.OXXOOXOOXO.O").unwrap();
        assert!(state.is_losing_move(Player::X, 3).unwrap());
        assert!(!state.is_losing_move(Player::X, 14).unwrap());

        let mut solver = Solver::new();
        assert_eq!(solver.select_move(&state).unwrap(), Some(14));

        // After X takes the safe cell, O's only cell completes column 3
        let mut game = Game::from_state(state).unwrap();
        game.play(14).unwrap();
        assert!(game.state().is_losing_move(Player::O, 3).unwrap());
        game.play(3).unwrap();
        assert_eq!(game.outcome(), Some(GameOutcome::Loss(Player::O)));
    }

    #[test]
    fn asking_a_decided_position_for_a_move_fails_fast() {
        let state = BoardState::from_label("XXXXOOO........._O").unwrap();
        let mut solver = Solver::new();
        assert!(matches!(
            solver.select_move(&state).unwrap_err(),
            misere4::Error::GameOver
        ));
    }
}
