use anyhow::{Context, Result};
use blokus::{find_move, AiPlayer, Difficulty, GameController, SessionMode};
use clap::Parser;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Difficulty of the search being timed
    #[arg(short, long, value_enum, default_value_t = Difficulty::Hard)]
    difficulty: Difficulty,

    /// Searches per position (default: 20)
    #[arg(short, long, default_value_t = 20)]
    iterations: u32,

    /// Easy-AI turns played to reach the midgame position (default: 24)
    #[arg(long, default_value_t = 24)]
    opening_turns: u32,

    /// Seed for the opening and the searches (default: 42)
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Shuffle enumeration order during the timed searches
    #[arg(long, default_value_t = false, action = clap::ArgAction::SetTrue)]
    randomize: bool,
}

/// Times repeated searches for the player to move in `game`.
fn time_searches(game: &GameController, args: &Args) -> Result<(Duration, usize)> {
    let player = game
        .current_player()
        .context("position has no player to move")?;
    let is_first = game.is_first_move(player.id);
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(args.seed);
    let mut found = 0;

    let start = Instant::now();
    for _ in 0..args.iterations {
        let mv = find_move(
            game.grid(),
            player.seat,
            &player.remaining,
            is_first,
            args.difficulty,
            args.randomize,
            &mut rng,
        );
        found += usize::from(mv.is_some());
    }
    Ok((start.elapsed(), found))
}

fn print_stats(name: &str, duration: Duration, found: usize, iterations: u32) {
    let secs = duration.as_secs_f64();
    let per_search = secs * 1000.0 / f64::from(iterations.max(1));

    println!("{} Results:", name);
    println!("  Searches: {}", iterations);
    println!("  Moves Found: {}", found);
    println!("  Time: {:.3}s", secs);
    println!("  Per Search: {:.2} ms", per_search);
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    println!("Blokus Arena - Search Benchmark");
    println!("===============================");
    println!("Difficulty: {}", args.difficulty);
    println!("Iterations: {}", args.iterations);
    println!("Opening Turns: {}", args.opening_turns);
    println!("Seed: {}", args.seed);
    println!("-------------------------------");

    #[cfg(debug_assertions)]
    {
        println!("WARNING: Running in debug mode. Performance will be significantly lower.");
        println!("Use --release for accurate benchmarks.\n");
    }

    let mut game = GameController::single_player("Bench", SessionMode::Local)?;
    let (duration, found) = time_searches(&game, &args)?;
    print_stats("Opening", duration, found, args.iterations);

    let mut opener = AiPlayer::with_seed(Difficulty::Easy, args.seed);
    for _ in 0..args.opening_turns {
        if game.is_game_over() {
            break;
        }
        opener.play_turn(&mut game)?;
    }

    if game.is_game_over() {
        println!("\nMidgame skipped (game ended during the opening)");
    } else {
        println!("\nMidgame position after {} moves:\n{}", game.moves().len(), game.grid());
        let (duration, found) = time_searches(&game, &args)?;
        print_stats("Midgame", duration, found, args.iterations);
    }
    Ok(())
}
