//! # Blokus Self-Play Arena
//!
//! Seats four AI players, plays games to completion and reports the final
//! boards and standings. Several games can run at once on a thread pool;
//! each game on its own is played by the single-threaded engine.
//!
//! ## Usage
//! Run with `cargo run --release --bin play -- --games 8 --difficulty hard`.
//! Pass `--seed` for reproducible games and `RUST_LOG=debug` to follow every
//! commit.

use anyhow::{Context, Result};
use blokus::names::pick_ai_names;
use blokus::scoring::{self, Standing};
use blokus::{AiMove, AiPlayer, Difficulty, GameController, Grid, Seat, SessionMode};
use clap::Parser;
use colored::Colorize;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of games to play
    #[arg(short, long, default_value_t = 1)]
    games: u64,

    /// Difficulty of every AI seat
    #[arg(short, long, value_enum, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,

    /// Difficulty override for the blue seat
    #[arg(long, value_enum)]
    blue: Option<Difficulty>,

    /// Difficulty override for the yellow seat
    #[arg(long, value_enum)]
    yellow: Option<Difficulty>,

    /// Difficulty override for the red seat
    #[arg(long, value_enum)]
    red: Option<Difficulty>,

    /// Difficulty override for the green seat
    #[arg(long, value_enum)]
    green: Option<Difficulty>,

    /// Seed for reproducible games (game N derives its seeds from seed + N)
    #[arg(long)]
    seed: Option<u64>,

    /// Turn off shuffled enumeration and coin-flip tie breaks
    #[arg(long, action = clap::ArgAction::SetTrue)]
    no_randomize: bool,

    /// Worker threads for running games in parallel (default: all cores)
    #[arg(short = 'n', long)]
    threads: Option<usize>,

    /// Per-move search budget in milliseconds. A search that overruns is
    /// treated as finding no move, and the seat passes. The overrun search
    /// is not cancelled; it keeps its thread busy until it finishes.
    #[arg(long)]
    move_budget_ms: Option<u64>,

    /// Only print the summary
    #[arg(short, long, action = clap::ArgAction::SetTrue)]
    quiet: bool,
}

impl Args {
    fn difficulty_for(&self, seat: Seat) -> Difficulty {
        let over = match seat {
            Seat::Blue => self.blue,
            Seat::Yellow => self.yellow,
            Seat::Red => self.red,
            Seat::Green => self.green,
        };
        over.unwrap_or(self.difficulty)
    }
}

/// Result of one finished game
struct GameReport {
    index: u64,
    grid: Grid,
    standings: Vec<Standing>,
    moves: usize,
    elapsed: Duration,
}

/// Runs a search on a worker thread and waits at most `budget` for it.
///
/// The search itself cannot be interrupted, so on time-out the worker runs
/// to completion in the background and its answer is dropped. The caller
/// keeps its own copy of the AI so the random stream stays in step.
fn search_with_budget(
    ai: &mut AiPlayer,
    game: &GameController,
    budget: Duration,
) -> Option<AiMove> {
    let (tx, rx) = mpsc::channel();
    let mut worker_ai = ai.clone();
    let snapshot = game.clone();
    thread::spawn(move || {
        let mv = worker_ai.choose_move(&snapshot);
        let _ = tx.send((worker_ai, mv));
    });

    match rx.recv_timeout(budget) {
        Ok((advanced, mv)) => {
            *ai = advanced;
            mv
        }
        Err(_) => {
            warn!("search exceeded {:?}, passing", budget);
            None
        }
    }
}

fn play_game(args: &Args, index: u64) -> Result<GameReport> {
    let start = Instant::now();
    let seed = args.seed.map(|s| s.wrapping_add(index));

    let mut name_rng = match seed {
        Some(s) => Xoshiro256PlusPlus::seed_from_u64(s),
        None => Xoshiro256PlusPlus::from_rng(&mut rand::rng()),
    };
    let names = pick_ai_names(Seat::ALL.len(), &[], &mut name_rng);

    let mut game = GameController::new(SessionMode::Local);
    let mut seats = Vec::with_capacity(Seat::ALL.len());
    for (seat, name) in Seat::ALL.into_iter().zip(&names) {
        game.join_as(seat, name, true)?;
        let difficulty = args.difficulty_for(seat);
        let ai = match seed {
            Some(s) => {
                let seat_seed = s.wrapping_mul(4).wrapping_add(seat.index() as u64);
                AiPlayer::with_seed(difficulty, seat_seed)
            }
            None => AiPlayer::new(difficulty),
        };
        seats.push(ai.randomize(!args.no_randomize));
    }
    game.start()?;

    while !game.is_game_over() {
        let turn = game.current_player_index();
        let player = game
            .current_player_id()
            .context("active game has no player to move")?;
        let ai = &mut seats[turn];
        let found = match args.move_budget_ms {
            Some(ms) => search_with_budget(ai, &game, Duration::from_millis(ms)),
            None => ai.choose_move(&game),
        };
        match found {
            Some(mv) => {
                game.commit_move(player, mv.piece, &mv.cells)
                    .with_context(|| format!("AI proposed a rejected move: {:?}", mv))?;
            }
            None => {
                game.commit_pass(player)?;
            }
        }
    }

    let standings = scoring::standings(&game);
    debug!("game {} journal has {} events", index, game.journal().len());
    Ok(GameReport {
        index,
        grid: game.grid().clone(),
        standings,
        moves: game.moves().len(),
        elapsed: start.elapsed(),
    })
}

fn paint(seat: Seat, text: &str) -> colored::ColoredString {
    match seat {
        Seat::Blue => text.blue(),
        Seat::Yellow => text.yellow(),
        Seat::Red => text.red(),
        Seat::Green => text.green(),
    }
}

fn print_board(grid: &Grid) {
    for row in grid.rows() {
        let line: Vec<String> = row
            .iter()
            .map(|cell| match cell {
                Some(seat) => paint(*seat, "■").to_string(),
                None => "·".dimmed().to_string(),
            })
            .collect();
        println!("{}", line.join(" "));
    }
}

fn print_report(report: &GameReport) {
    println!(
        "\n{} {} ({} moves, {:.2}s)",
        "Game".bold(),
        report.index + 1,
        report.moves,
        report.elapsed.as_secs_f64()
    );
    print_board(&report.grid);
    let best = scoring::winners(&report.standings);
    for (rank, row) in report.standings.iter().enumerate() {
        let marker = if best.iter().any(|w| w.player == row.player) { "★" } else { " " };
        println!(
            "{} {}. {:<16} {:>4}",
            marker,
            rank + 1,
            paint(row.seat, &format!("{} ({})", row.name, row.seat)),
            row.score
        );
    }
}

fn print_summary(reports: &[GameReport]) {
    let mut wins = [0u64; 4];
    let mut totals = [0i64; 4];
    for report in reports {
        for winner in scoring::winners(&report.standings) {
            wins[winner.seat.index()] += 1;
        }
        for row in &report.standings {
            totals[row.seat.index()] += i64::from(row.score);
        }
    }

    println!("\n{}", "Summary".bold());
    for seat in Seat::ALL {
        let i = seat.index();
        println!(
            "  {:<7} wins {:>4}   avg score {:>6.1}",
            paint(seat, seat.name()),
            wins[i],
            totals[i] as f64 / reports.len().max(1) as f64
        );
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let threads = args.threads.unwrap_or_else(num_cpus::get);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("failed to build thread pool")?;
    info!(
        "playing {} game(s) on {} thread(s), default difficulty {}",
        args.games, threads, args.difficulty
    );

    let started = Instant::now();
    let mut reports: Vec<GameReport> = pool.install(|| {
        (0..args.games)
            .into_par_iter()
            .map(|index| play_game(&args, index))
            .collect::<Result<Vec<_>>>()
    })?;
    reports.sort_by_key(|r| r.index);

    if !args.quiet {
        for report in &reports {
            print_report(report);
        }
    }
    print_summary(&reports);
    info!("finished in {:.2}s", started.elapsed().as_secs_f64());
    Ok(())
}
