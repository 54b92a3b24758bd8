//! Selfplay command - automated games from the empty board

use anyhow::{Result, bail};
use clap::Parser;

use crate::cli::output;
use crate::game::{GameOutcome, Player};
use crate::play::{EngineMover, MatchSummary, Mover, RandomMover, play_match};

#[derive(Parser, Debug)]
#[command(about = "Play automated games from the empty board")]
pub struct SelfplayArgs {
    /// Number of games; batches pit the engine against a seeded random mover
    #[arg(long, short = 'g', default_value_t = 1)]
    pub games: usize,

    /// Seed for the random mover
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Side played by the random mover in batch runs (`x` or `o`);
    /// a single game without this flag is engine versus engine
    #[arg(long)]
    pub random_side: Option<String>,
}

fn parse_side(token: &str) -> Result<Player> {
    match token {
        "x" | "X" => Ok(Player::X),
        "o" | "O" => Ok(Player::O),
        _ => bail!("invalid side '{token}' (expected 'x' or 'o')"),
    }
}

fn describe_outcome(outcome: GameOutcome, x_name: &str, o_name: &str) -> String {
    match outcome {
        GameOutcome::Loss(Player::X) => {
            format!("{x_name} (X) completed a line and loses; {o_name} (O) wins")
        }
        GameOutcome::Loss(Player::O) => {
            format!("{o_name} (O) completed a line and loses; {x_name} (X) wins")
        }
        GameOutcome::Draw => "draw: the board filled with no completed line".to_string(),
    }
}

/// Run one transcripted game between two movers
fn run_single(x_mover: &mut dyn Mover, o_mover: &mut dyn Mover) -> Result<()> {
    output::print_section("Self-play");

    let game = play_match(x_mover, o_mover)?;

    for (i, mv) in game.moves().iter().enumerate() {
        println!(
            "  {:2}. {:?} -> {}",
            i + 1,
            mv.player,
            output::describe_position(mv.position)
        );
    }

    println!();
    output::print_board(game.state());
    println!();

    let outcome = game
        .outcome()
        .expect("play_match always terminates the game");
    println!("{}", describe_outcome(outcome, x_mover.name(), o_mover.name()));

    Ok(())
}

/// Run a batch of engine-versus-random games with a progress bar
fn run_batch(games: usize, seed: u64, random_side: Player) -> Result<()> {
    let mut engine = EngineMover::new("engine");
    let mut summary = MatchSummary::default();

    let pb = output::create_batch_progress(games as u64);
    for game_index in 0..games {
        let mut random = RandomMover::with_seed("random", seed.wrapping_add(game_index as u64));
        let game = match random_side {
            Player::X => play_match(&mut random, &mut engine)?,
            Player::O => play_match(&mut engine, &mut random)?,
        };
        summary.record(
            game.outcome()
                .expect("play_match always terminates the game"),
        );
        pb.inc(1);
    }
    pb.finish_with_message("done");

    let (engine_seat, random_seat) = match random_side {
        Player::X => ("O", "X"),
        Player::O => ("X", "O"),
    };

    output::print_section("Batch summary");
    output::print_kv("Games", &summary.games().to_string());
    output::print_kv("Engine side", engine_seat);
    output::print_kv("Random side", random_seat);
    output::print_kv("X losses", &summary.x_losses.to_string());
    output::print_kv("O losses", &summary.o_losses.to_string());
    output::print_kv("Draws", &summary.draws.to_string());
    output::print_kv(
        "Cached positions",
        &engine.solver().cached_positions().to_string(),
    );

    Ok(())
}

/// Run automated games
pub fn execute(args: SelfplayArgs) -> Result<()> {
    if args.games == 0 {
        bail!("--games must be at least 1");
    }

    match (&args.random_side, args.games) {
        (None, 1) => {
            let mut x = EngineMover::new("engine-x");
            let mut o = EngineMover::new("engine-o");
            run_single(&mut x, &mut o)
        }
        (None, _) => bail!("batch runs need --random-side (engine vs engine is deterministic)"),
        (Some(token), _) => {
            let side = parse_side(token)?;
            if args.games == 1 {
                let mut engine = EngineMover::new("engine");
                let mut random = RandomMover::with_seed("random", args.seed);
                return match side {
                    Player::X => run_single(&mut random, &mut engine),
                    Player::O => run_single(&mut engine, &mut random),
                };
            }
            run_batch(args.games, args.seed, side)
        }
    }
}
