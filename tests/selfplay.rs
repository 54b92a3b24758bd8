//! Full-game suites driving automated movers against each other

use misere4::game::{CELL_COUNT, GameOutcome, Player};
use misere4::play::{EngineMover, MatchSummary, RandomMover, play_match};

#[test]
fn engine_versus_engine_terminates() {
    let mut x = EngineMover::new("engine-x");
    let mut o = EngineMover::new("engine-o");

    let game = play_match(&mut x, &mut o).unwrap();

    assert!(game.is_over(), "self-play must terminate");
    assert!(game.moves().len() <= CELL_COUNT);
    let outcome = game.outcome().unwrap();
    assert!(matches!(
        outcome,
        GameOutcome::Loss(Player::X) | GameOutcome::Loss(Player::O) | GameOutcome::Draw
    ));

    // Perfect play on both sides realizes the empty-board value: a draw
    assert_eq!(outcome, GameOutcome::Draw);
    assert_eq!(game.moves().len(), CELL_COUNT);
}

#[test]
fn engine_never_loses_to_a_random_mover() {
    // The empty-board value is a draw for both seats, so optimal play can
    // never be forced into a line whatever the opponent does.
    let mut engine = EngineMover::new("engine");
    let mut summary = MatchSummary::default();

    for seed in 0..10 {
        let mut random = RandomMover::with_seed("random", seed);
        let game = play_match(&mut engine, &mut random).unwrap();
        let outcome = game.outcome().unwrap();
        assert_ne!(
            outcome,
            GameOutcome::Loss(Player::X),
            "engine (X) lost with random seed {seed}"
        );
        summary.record(outcome);
    }

    assert_eq!(summary.games(), 10);
    assert_eq!(summary.x_losses, 0);
}

#[test]
fn engine_never_loses_as_second_mover_either() {
    let mut engine = EngineMover::new("engine");

    for seed in 100..105 {
        let mut random = RandomMover::with_seed("random", seed);
        let game = play_match(&mut random, &mut engine).unwrap();
        let outcome = game.outcome().unwrap();
        assert_ne!(
            outcome,
            GameOutcome::Loss(Player::O),
            "engine (O) lost with random seed {seed}"
        );
    }
}

#[test]
fn random_versus_random_terminates_within_sixteen_moves() {
    for seed in 0..20 {
        let mut x = RandomMover::with_seed("rng-x", seed);
        let mut o = RandomMover::with_seed("rng-o", seed.wrapping_mul(31).wrapping_add(7));
        let game = play_match(&mut x, &mut o).unwrap();
        assert!(game.is_over());
        assert!(game.moves().len() <= CELL_COUNT);
    }
}
