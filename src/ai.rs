//! # AI Move Search
//!
//! Exhaustive placement search for an automated seat. For every remaining
//! piece, every distinct orientation and every one of the 400 board
//! positions, the candidate is run through the placement validator:
//!
//! - **Easy** returns the first legal candidate in (optionally shuffled)
//!   enumeration order.
//! - **Medium** and **Hard** score every legal candidate and keep the best:
//!   `10 × cells + corner_weight × open_corners`, plus
//!   `center_weight × center_bias` on Hard.
//!
//! Randomness is injected: the search functions take any `rand::Rng`, and
//! [`AiPlayer`] carries its own seedable generator so a fixed seed replays
//! the same choices.
//!
//! There is no time limit or cancellation here. A caller that needs bounded
//! latency should run the search elsewhere and treat a missed deadline as
//! "no move" (pass).

use crate::board::{in_bounds, Grid, Seat, GRID_SIZE};
use crate::game_controller::{GameController, GameStatus, MoveValidationError, TurnOutcome};
use crate::geometry::{self, Coord};
use crate::pieces::{self, PieceId};
use crate::validation;
use log::trace;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::fmt;
use std::str::FromStr;

/// Points per cell of the placed piece.
const SIZE_WEIGHT: f64 = 10.0;

const DIAGONALS: [Coord; 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

/// How hard the AI tries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum Difficulty {
    /// First legal placement found
    #[default]
    Easy,
    /// Best size and open-corner score
    Medium,
    /// Medium plus a pull towards the board center; never shuffles
    Hard,
}

impl Difficulty {
    /// Weight of each open diagonal next to the placed cells.
    pub fn corner_weight(self) -> f64 {
        match self {
            Difficulty::Hard => 4.0,
            _ => 2.0,
        }
    }

    /// Weight of the center bias, only used on Hard.
    pub fn center_weight(self) -> Option<f64> {
        match self {
            Difficulty::Hard => Some(1.5),
            _ => None,
        }
    }

    /// Whether the enumeration order gets shuffled when randomizing.
    pub fn shuffles(self) -> bool {
        self != Difficulty::Hard
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {}", other)),
        }
    }
}

/// A placement proposed by the search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiMove {
    pub piece: PieceId,
    /// Absolute board cells
    pub cells: Vec<Coord>,
}

/// Counts the diagonal neighbors of a placement that are on the board, empty,
/// and not part of the placement itself.
///
/// A diagonal shared by two placed cells counts once per cell.
pub fn open_corner_count(grid: &Grid, cells: &[Coord]) -> usize {
    cells
        .iter()
        .flat_map(|&(x, y)| DIAGONALS.iter().map(move |&(dx, dy)| (x + dx, y + dy)))
        .filter(|&pos| in_bounds(pos) && grid.is_empty_at(pos) && !cells.contains(&pos))
        .count()
}

/// Higher for placements whose cells sit closer to the middle of the board:
/// `2 × GRID_SIZE` minus the mean Manhattan distance to the center.
pub fn center_bias(cells: &[Coord]) -> f64 {
    if cells.is_empty() {
        return 0.0;
    }
    let center = f64::from(GRID_SIZE - 1) / 2.0;
    let total: f64 = cells
        .iter()
        .map(|&(x, y)| (f64::from(x) - center).abs() + (f64::from(y) - center).abs())
        .sum();
    f64::from(GRID_SIZE * 2) - total / cells.len() as f64
}

/// Heuristic value of a legal placement at the given difficulty.
pub fn score_placement(grid: &Grid, cells: &[Coord], difficulty: Difficulty) -> f64 {
    let size = SIZE_WEIGHT * cells.len() as f64;
    let corners = difficulty.corner_weight() * open_corner_count(grid, cells) as f64;
    let center = difficulty
        .center_weight()
        .map_or(0.0, |weight| weight * center_bias(cells));
    size + corners + center
}

fn all_positions() -> Vec<Coord> {
    (0..GRID_SIZE)
        .flat_map(|y| (0..GRID_SIZE).map(move |x| (x, y)))
        .collect()
}

/// Searches for a placement for `seat`.
///
/// Returns `None` when no remaining piece fits anywhere, which means the
/// seat has to pass, and also when `remaining` is empty.
pub fn find_move<R: Rng + ?Sized>(
    grid: &Grid,
    seat: Seat,
    remaining: &[PieceId],
    is_first_move: bool,
    difficulty: Difficulty,
    randomize: bool,
    rng: &mut R,
) -> Option<AiMove> {
    if remaining.is_empty() {
        return None;
    }

    let shuffle = randomize && difficulty.shuffles();
    let mut hand: Vec<&pieces::Piece> = remaining
        .iter()
        .filter_map(|&id| pieces::lookup(id))
        .collect();
    let mut positions = all_positions();
    if shuffle {
        hand.shuffle(rng);
        positions.shuffle(rng);
    }

    let mut examined = 0usize;
    let mut best: Option<(f64, AiMove)> = None;

    for piece in hand {
        let mut shapes = piece.orientations();
        if shuffle {
            shapes.shuffle(rng);
        }

        for shape in &shapes {
            for &origin in &positions {
                examined += 1;
                let cells = geometry::translate(shape, origin);
                if !validation::is_legal(grid, &cells, seat, is_first_move) {
                    continue;
                }

                if difficulty == Difficulty::Easy {
                    trace!(
                        "{} easy search: piece {} after {} candidates",
                        seat,
                        piece.id,
                        examined
                    );
                    return Some(AiMove {
                        piece: piece.id,
                        cells,
                    });
                }

                let score = score_placement(grid, &cells, difficulty);
                let replace = match &best {
                    None => true,
                    Some((best_score, _)) if score > *best_score => true,
                    Some((best_score, _)) => {
                        score == *best_score && randomize && rng.random_bool(0.5)
                    }
                };
                if replace {
                    best = Some((
                        score,
                        AiMove {
                            piece: piece.id,
                            cells,
                        },
                    ));
                }
            }
        }
    }

    match &best {
        Some((score, mv)) => trace!(
            "{} {} search: piece {} scored {:.1} over {} candidates",
            seat,
            difficulty,
            mv.piece,
            score,
            examined
        ),
        None => trace!("{} {} search: no legal move in {} candidates", seat, difficulty, examined),
    }
    best.map(|(_, mv)| mv)
}

/// An automated seat: a difficulty plus its own random source.
#[derive(Debug, Clone)]
pub struct AiPlayer {
    difficulty: Difficulty,
    randomize: bool,
    rng: Xoshiro256PlusPlus,
}

impl AiPlayer {
    /// Randomized player seeded from the thread RNG.
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            randomize: true,
            rng: Xoshiro256PlusPlus::from_rng(&mut rand::rng()),
        }
    }

    /// Randomized player whose choices are fixed by `seed`.
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            randomize: true,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    /// Turns shuffling and coin-flip tie breaks on or off.
    pub fn randomize(mut self, randomize: bool) -> Self {
        self.randomize = randomize;
        self
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Searches for a move for whoever is to move in an active game.
    pub fn choose_move(&mut self, game: &GameController) -> Option<AiMove> {
        if game.status() != GameStatus::Active {
            return None;
        }
        let player = game.current_player()?;
        find_move(
            game.grid(),
            player.seat,
            &player.remaining,
            game.is_first_move(player.id),
            self.difficulty,
            self.randomize,
            &mut self.rng,
        )
    }

    /// Plays the current turn: commits the move found, or passes when there
    /// is none.
    pub fn play_turn(
        &mut self,
        game: &mut GameController,
    ) -> Result<TurnOutcome, MoveValidationError> {
        let player = match (game.status(), game.current_player_id()) {
            (GameStatus::Active, Some(id)) => id,
            (actual, _) => {
                return Err(MoveValidationError::WrongStatus {
                    expected: GameStatus::Active,
                    actual,
                })
            }
        };
        match self.choose_move(game) {
            Some(mv) => game.commit_move(player, mv.piece, &mv.cells),
            None => game.commit_pass(player),
        }
    }
}
