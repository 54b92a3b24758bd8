//! Automated movers and match drivers
//!
//! A [`Mover`] chooses placements for the side to move; [`play_match`]
//! drives two movers from the empty board to termination. The engine mover
//! wraps a [`Solver`] and plays perfectly; the random mover is the seeded
//! baseline used in batch runs.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::game::{BoardState, CELL_COUNT, Game, GameOutcome, Player};
use crate::search::Solver;

/// A strategy that chooses placements for the side to move
pub trait Mover {
    /// Choose a placement, or `None` when no empty cell remains
    fn choose(&mut self, state: &BoardState) -> crate::Result<Option<usize>>;

    /// Display name for transcripts and summaries
    fn name(&self) -> &str;
}

/// Perfect-play mover backed by the search engine.
///
/// The wrapped solver caches values oriented towards the seats it has
/// played for, so give each seat of an engine-vs-engine match its own
/// mover instead of sharing one.
pub struct EngineMover {
    name: String,
    solver: Solver,
}

impl EngineMover {
    /// Create an engine mover with a fresh solver
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_solver(name, Solver::new())
    }

    /// Create an engine mover around an existing solver (shared cache state)
    pub fn with_solver(name: impl Into<String>, solver: Solver) -> Self {
        Self {
            name: name.into(),
            solver,
        }
    }

    /// Access the underlying solver (cache statistics)
    pub fn solver(&self) -> &Solver {
        &self.solver
    }
}

impl Mover for EngineMover {
    fn choose(&mut self, state: &BoardState) -> crate::Result<Option<usize>> {
        self.solver.select_move(state)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Uniform random mover with a deterministic seed
pub struct RandomMover {
    name: String,
    rng: StdRng,
}

impl RandomMover {
    /// Create a random mover with a deterministic seed
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Mover for RandomMover {
    fn choose(&mut self, state: &BoardState) -> crate::Result<Option<usize>> {
        let moves = state.empty_positions();
        if moves.is_empty() {
            return Ok(None);
        }
        let index = self.rng.random_range(0..moves.len());
        Ok(Some(moves[index]))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Drive a full game from the empty board, X moved by `x_mover`.
///
/// The loop is bounded by the cell count, so a match always terminates
/// within 16 placements in one of {X loses, O loses, draw}.
pub fn play_match<'a>(x_mover: &'a mut dyn Mover, o_mover: &'a mut dyn Mover) -> crate::Result<Game> {
    let mut game = Game::new();

    for _ in 0..CELL_COUNT {
        if game.is_over() {
            break;
        }
        let mover = match game.state().to_move {
            Player::X => &mut *x_mover,
            Player::O => &mut *o_mover,
        };
        let Some(pos) = mover.choose(game.state())? else {
            // A full board has already recorded its draw in the session
            break;
        };
        game.play(pos)?;
    }

    Ok(game)
}

/// Aggregated results of a batch of matches
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MatchSummary {
    pub x_losses: usize,
    pub o_losses: usize,
    pub draws: usize,
}

impl MatchSummary {
    /// Fold one outcome into the tally
    pub fn record(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Loss(Player::X) => self.x_losses += 1,
            GameOutcome::Loss(Player::O) => self.o_losses += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }

    /// Total games recorded
    pub fn games(&self) -> usize {
        self.x_losses + self.o_losses + self.draws
    }
}
