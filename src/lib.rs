//! # Blokus Engine
//!
//! Rules engine for four-player Blokus on a 20×20 board: piece geometry,
//! placement legality, turn and pass bookkeeping, scoring, and an AI that
//! searches every placement of every remaining piece.
//!
//! The engine is synchronous and single-threaded. [`GameController`] owns
//! all mutable game state and rejects any action it cannot apply in full;
//! everything else in the crate is a pure function of its inputs (plus an
//! injected random source for the AI).
//!
//! ## Modules
//! - [`geometry`]: normalize, rotate and flip coordinate sets
//! - [`pieces`]: the 21-piece catalog
//! - [`board`]: seats and the cell grid
//! - [`validation`]: placement legality
//! - [`game_controller`]: players, moves, turns, undo, journal replay
//! - [`scoring`]: penalty scores and standings
//! - [`ai`]: move search at three difficulty levels
//! - [`names`]: display names for AI seats

pub mod ai;
pub mod board;
pub mod game_controller;
pub mod geometry;
pub mod names;
pub mod pieces;
pub mod scoring;
pub mod validation;

pub use ai::{find_move, AiMove, AiPlayer, Difficulty};
pub use board::{Grid, Seat, GRID_SIZE};
pub use game_controller::{
    GameController, GameEvent, GameStatus, Move, MoveValidationError, Player, PlayerId,
    SessionMode, TurnOutcome,
};
pub use geometry::{Coord, Transform, TransformError};
pub use pieces::{Piece, PieceId, PIECES};
pub use scoring::{score, standings, Standing};
pub use validation::{check_placement, is_legal, PlacementError};
