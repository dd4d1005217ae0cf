//! # Game Controller Module - Authoritative Board and Turn State
//!
//! This module provides the `GameController`, the single owner of a game's
//! mutable state: seated players, the append-only move log, the turn pointer,
//! the game status, and the grid materialized from the move log.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       GameController                                │
//! │  ┌─────────────────────────────────────────────────────────────┐    │
//! │  │  players (join order) · moves · turn pointer · status       │    │
//! │  │  • every commit is validated in full before anything moves  │    │
//! │  │  • grid = move log painted with each mover's seat           │    │
//! │  │  • every accepted mutation is appended to the journal       │    │
//! │  └─────────────────────────────────────────────────────────────┘    │
//! │                           │                                         │
//! │              ┌────────────┼────────────┐                            │
//! │              ▼            ▼            ▼                            │
//! │  ┌───────────────┐ ┌───────────┐ ┌─────────────────┐                │
//! │  │ AI player     │ │ UI / CLI  │ │ Event store     │                │
//! │  │ (reads grid)  │ │ (view)    │ │ (journal/replay)│                │
//! │  └───────────────┘ └───────────┘ └─────────────────┘                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//! `Waiting` (players join) → `Active` (moves and passes) → `Finished`
//! (terminal; only [`GameController::reset`] leaves it). The controller moves
//! to `Finished` itself once every player has passed.
//!
//! Callers must serialize mutations against one controller; it holds no locks.

use crate::board::{Grid, Seat};
use crate::geometry::Coord;
use crate::pieces::{self, PieceId};
use crate::validation::{self, PlacementError};
use log::{debug, info};
use std::fmt;
use std::time::SystemTime;

/// Identity of a seated player, assigned at join time (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player-{}", self.0)
    }
}

/// Overall game status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Players may join; no moves accepted
    Waiting,
    /// Moves and passes accepted
    Active,
    /// Every player has passed
    Finished,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Waiting => write!(f, "waiting"),
            GameStatus::Active => write!(f, "active"),
            GameStatus::Finished => write!(f, "finished"),
        }
    }
}

/// Whether other participants may observe this session's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionMode {
    /// Single local session; undo is allowed
    #[default]
    Local,
    /// Shared with remote replicas; history is never rewritten
    Networked,
}

/// Errors that can occur when committing an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveValidationError {
    /// The action is not allowed in the current status
    WrongStatus { expected: GameStatus, actual: GameStatus },
    /// All four seats are taken
    GameFull,
    /// The requested seat already has a player
    SeatTaken(Seat),
    /// The game can only start with every seat filled
    NotEnoughPlayers { joined: usize },
    /// No player with this id is seated
    UnknownPlayer(PlayerId),
    /// The player is not the one whose turn it is
    OutOfTurn { player: PlayerId, expected: PlayerId },
    /// The id is not in the piece catalog
    UnknownPiece(PieceId),
    /// The piece is not in the player's remaining set
    AlreadyPlayed(PieceId),
    /// The cells are not an orientation of the named piece
    ShapeMismatch(PieceId),
    /// The cells break a placement rule
    IllegalPlacement(PlacementError),
    /// Undo is only available in local sessions
    UndoUnavailable,
    /// No move has been made yet
    NothingToUndo,
}

impl fmt::Display for MoveValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveValidationError::WrongStatus { expected, actual } => {
                write!(f, "game is {}, expected {}", actual, expected)
            }
            MoveValidationError::GameFull => write!(f, "Game is full"),
            MoveValidationError::SeatTaken(seat) => write!(f, "{} seat is already taken", seat),
            MoveValidationError::NotEnoughPlayers { joined } => {
                write!(f, "need 4 players to start, {} joined", joined)
            }
            MoveValidationError::UnknownPlayer(id) => write!(f, "unknown player {}", id),
            MoveValidationError::OutOfTurn { player, expected } => {
                write!(f, "{} moved out of turn, waiting on {}", player, expected)
            }
            MoveValidationError::UnknownPiece(id) => write!(f, "no piece with id {}", id),
            MoveValidationError::AlreadyPlayed(id) => write!(f, "piece {} was already played", id),
            MoveValidationError::ShapeMismatch(id) => {
                write!(f, "cells do not form piece {}", id)
            }
            MoveValidationError::IllegalPlacement(reason) => write!(f, "Illegal move: {}", reason),
            MoveValidationError::UndoUnavailable => {
                write!(f, "undo is only available in local games")
            }
            MoveValidationError::NothingToUndo => write!(f, "no move to undo"),
        }
    }
}

impl std::error::Error for MoveValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MoveValidationError::IllegalPlacement(reason) => Some(reason),
            _ => None,
        }
    }
}

/// A seated participant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub seat: Seat,
    pub name: String,
    /// Position in the turn order; equal to the seat's index
    pub join_order: usize,
    /// Unplayed piece ids, kept in catalog order
    pub remaining: Vec<PieceId>,
    pub has_passed: bool,
    pub is_ai: bool,
}

/// A committed placement. Moves are never edited, only appended or popped by
/// an undo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub player: PlayerId,
    pub piece: PieceId,
    /// Absolute board cells covered by the piece
    pub cells: Vec<Coord>,
    /// 1-based placement number within the game
    pub sequence: usize,
    /// Wall-clock time of the commit
    pub placed_at: SystemTime,
}


/// One accepted mutation, as written to the journal.
///
/// Feeding a journal to [`GameController::replay`] reproduces the session
/// that wrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Joined { seat: Seat, name: String, is_ai: bool },
    Started,
    Placed {
        player: PlayerId,
        piece: PieceId,
        cells: Vec<Coord>,
        placed_at: SystemTime,
    },
    Passed { player: PlayerId },
    Undone,
}

/// What a committed move or pass led to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Player who acted
    pub player: PlayerId,
    /// Player whose turn it is now
    pub next_player: PlayerId,
    /// Whether the game finished with this action
    pub game_over: bool,
}

/// Failure while rebuilding a controller from a journal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayError {
    /// Position of the rejected event in the journal
    pub event_index: usize,
    pub error: MoveValidationError,
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "journal event {} rejected: {}", self.event_index, self.error)
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Index of the next player to move after `current`.
///
/// Scans forward from `current + 1`, wrapping, for up to `players.len()`
/// steps and returns the first player who has not passed. If everyone has
/// passed the current index comes back unchanged; detecting that end state is
/// up to the caller.
pub fn next_turn_index(players: &[Player], current: usize) -> usize {
    if players.is_empty() {
        return 0;
    }
    (1..=players.len())
        .map(|offset| (current + offset) % players.len())
        .find(|&i| !players[i].has_passed)
        .unwrap_or(current)
}

/// The authoritative state of one game
///
/// All mutations go through `join`/`start`/`commit_move`/`commit_pass`/
/// `undo_last_move`, each of which validates completely before changing
/// anything, so a rejected call leaves the controller untouched.
///
/// # Usage
/// ```rust,ignore
/// let mut game = GameController::single_player("You", SessionMode::Local)?;
/// let blue = game.current_player_id().unwrap();
///
/// match game.commit_move(blue, 1, &[(0, 0)]) {
///     Ok(outcome) => { /* next turn: outcome.next_player */ }
///     Err(reason) => { /* nothing changed, ask again */ }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct GameController {
    mode: SessionMode,
    status: GameStatus,
    /// Seated players, sorted by join order
    players: Vec<Player>,
    moves: Vec<Move>,
    journal: Vec<GameEvent>,
    current_player_index: usize,
    grid: Grid,
    next_player_id: u32,
}

impl Default for GameController {
    fn default() -> Self {
        Self::new(SessionMode::default())
    }
}

impl GameController {
    /// A fresh game: no players, empty board, `Waiting`.
    pub fn new(mode: SessionMode) -> Self {
        Self {
            mode,
            status: GameStatus::Waiting,
            players: Vec::new(),
            moves: Vec::new(),
            journal: Vec::new(),
            current_player_index: 0,
            grid: Grid::new(),
            next_player_id: 1,
        }
    }

    /// One human at blue and AI players in the other seats, already started.
    pub fn single_player(name: &str, mode: SessionMode) -> Result<Self, MoveValidationError> {
        let mut game = Self::new(mode);
        game.join(name, false)?;
        game.fill_with_ai()?;
        game.start()?;
        Ok(game)
    }

    /// Rebuilds a controller by feeding a journal through the commit
    /// operations, in order.
    pub fn replay(mode: SessionMode, events: &[GameEvent]) -> Result<Self, ReplayError> {
        let mut game = Self::new(mode);
        for (event_index, event) in events.iter().enumerate() {
            game.apply(event)
                .map_err(|error| ReplayError { event_index, error })?;
        }
        Ok(game)
    }

    /// Applies a single journal event.
    pub fn apply(&mut self, event: &GameEvent) -> Result<(), MoveValidationError> {
        match event {
            GameEvent::Joined { seat, name, is_ai } => {
                self.join_as(*seat, name, *is_ai).map(drop)
            }
            GameEvent::Started => self.start(),
            GameEvent::Placed {
                player,
                piece,
                cells,
                placed_at,
            } => self
                .commit_move_at(*player, *piece, cells, *placed_at)
                .map(drop),
            GameEvent::Passed { player } => self.commit_pass(*player).map(drop),
            GameEvent::Undone => self.undo_last_move().map(drop),
        }
    }

    fn require_status(&self, expected: GameStatus) -> Result<(), MoveValidationError> {
        if self.status == expected {
            Ok(())
        } else {
            Err(MoveValidationError::WrongStatus {
                expected,
                actual: self.status,
            })
        }
    }

    /// Seats a player in the first free seat (blue, yellow, red, green).
    pub fn join(&mut self, name: &str, is_ai: bool) -> Result<PlayerId, MoveValidationError> {
        self.require_status(GameStatus::Waiting)?;
        let seat = Seat::ALL
            .into_iter()
            .find(|&seat| self.player_at(seat).is_none())
            .ok_or(MoveValidationError::GameFull)?;
        self.join_as(seat, name, is_ai)
    }

    /// Seats a player in a specific seat.
    pub fn join_as(
        &mut self,
        seat: Seat,
        name: &str,
        is_ai: bool,
    ) -> Result<PlayerId, MoveValidationError> {
        self.require_status(GameStatus::Waiting)?;
        if self.player_at(seat).is_some() {
            return Err(MoveValidationError::SeatTaken(seat));
        }

        let id = PlayerId(self.next_player_id);
        self.next_player_id += 1;
        let player = Player {
            id,
            seat,
            name: name.to_string(),
            join_order: seat.index(),
            remaining: pieces::all_piece_ids(),
            has_passed: false,
            is_ai,
        };
        let at = self
            .players
            .partition_point(|p| p.join_order < player.join_order);
        self.players.insert(at, player);
        self.journal.push(GameEvent::Joined {
            seat,
            name: name.to_string(),
            is_ai,
        });
        debug!("{} joined as {} (ai: {})", name, seat, is_ai);
        Ok(id)
    }

    /// Seats an AI player, named after its seat, in every free seat.
    pub fn fill_with_ai(&mut self) -> Result<Vec<PlayerId>, MoveValidationError> {
        self.require_status(GameStatus::Waiting)?;
        let open: Vec<Seat> = Seat::ALL
            .into_iter()
            .filter(|&seat| self.player_at(seat).is_none())
            .collect();
        open.into_iter()
            .map(|seat| self.join_as(seat, &format!("AI {}", seat), true))
            .collect()
    }

    /// Starts play with the blue seat to move. Every seat must be filled.
    pub fn start(&mut self) -> Result<(), MoveValidationError> {
        self.require_status(GameStatus::Waiting)?;
        if self.players.len() != Seat::ALL.len() {
            return Err(MoveValidationError::NotEnoughPlayers {
                joined: self.players.len(),
            });
        }
        self.status = GameStatus::Active;
        self.current_player_index = 0;
        self.journal.push(GameEvent::Started);
        debug!("game started");
        Ok(())
    }

    fn require_turn(&self, player: PlayerId) -> Result<usize, MoveValidationError> {
        self.require_status(GameStatus::Active)?;
        let index = self
            .player_index(player)
            .ok_or(MoveValidationError::UnknownPlayer(player))?;
        if index != self.current_player_index {
            return Err(MoveValidationError::OutOfTurn {
                player,
                expected: self.players[self.current_player_index].id,
            });
        }
        Ok(index)
    }

    /// Validates a placement for the player whose turn it is, without
    /// committing it.
    pub fn validate_move(
        &self,
        player: PlayerId,
        piece_id: PieceId,
        cells: &[Coord],
    ) -> Result<(), MoveValidationError> {
        let index = self.require_turn(player)?;
        let piece =
            pieces::lookup(piece_id).ok_or(MoveValidationError::UnknownPiece(piece_id))?;
        if !self.players[index].remaining.contains(&piece_id) {
            return Err(MoveValidationError::AlreadyPlayed(piece_id));
        }
        if !piece.matches(cells) {
            return Err(MoveValidationError::ShapeMismatch(piece_id));
        }
        let seat = self.players[index].seat;
        validation::check_placement(&self.grid, cells, seat, self.is_first_move(player))
            .map_err(MoveValidationError::IllegalPlacement)
    }

    /// Places a piece for the player whose turn it is and advances the turn,
    /// stamped with the current wall-clock time.
    pub fn commit_move(
        &mut self,
        player: PlayerId,
        piece_id: PieceId,
        cells: &[Coord],
    ) -> Result<TurnOutcome, MoveValidationError> {
        self.commit_move_at(player, piece_id, cells, SystemTime::now())
    }

    /// Like [`commit_move`](Self::commit_move), with the commit time supplied
    /// by the caller. Replay goes through here so restored moves keep their
    /// original timestamps.
    pub fn commit_move_at(
        &mut self,
        player: PlayerId,
        piece_id: PieceId,
        cells: &[Coord],
        placed_at: SystemTime,
    ) -> Result<TurnOutcome, MoveValidationError> {
        self.validate_move(player, piece_id, cells)?;
        let index = self.current_player_index;

        let sequence = self.moves.len() + 1;
        let mover = &mut self.players[index];
        mover.remaining.retain(|&id| id != piece_id);
        let seat = mover.seat;
        self.grid.paint(cells, seat);
        self.moves.push(Move {
            player,
            piece: piece_id,
            cells: cells.to_vec(),
            sequence,
            placed_at,
        });
        self.journal.push(GameEvent::Placed {
            player,
            piece: piece_id,
            cells: cells.to_vec(),
            placed_at,
        });
        debug!("{} ({}) placed piece {} at {:?}", player, seat, piece_id, cells);

        self.current_player_index = next_turn_index(&self.players, index);
        Ok(self.outcome(player))
    }

    /// Marks the player whose turn it is as passed for the rest of the game
    /// and advances the turn. Finishes the game when nobody is left to move.
    pub fn commit_pass(&mut self, player: PlayerId) -> Result<TurnOutcome, MoveValidationError> {
        let index = self.require_turn(player)?;
        self.players[index].has_passed = true;
        self.journal.push(GameEvent::Passed { player });
        debug!("{} ({}) passed", player, self.players[index].seat);

        self.current_player_index = next_turn_index(&self.players, index);
        if self.all_passed() {
            self.status = GameStatus::Finished;
            info!("game finished after {} moves", self.moves.len());
        }
        Ok(self.outcome(player))
    }

    fn outcome(&self, player: PlayerId) -> TurnOutcome {
        TurnOutcome {
            player,
            next_player: self.players[self.current_player_index].id,
            game_over: self.status == GameStatus::Finished,
        }
    }

    /// Takes back the most recent placement.
    ///
    /// The piece returns to its owner's hand, the owner's pass is cleared and
    /// the turn goes back to them. Only local, active games allow it.
    pub fn undo_last_move(&mut self) -> Result<Move, MoveValidationError> {
        if self.mode != SessionMode::Local {
            return Err(MoveValidationError::UndoUnavailable);
        }
        self.require_status(GameStatus::Active)?;
        let last = self.moves.last().ok_or(MoveValidationError::NothingToUndo)?;
        let index = self
            .player_index(last.player)
            .ok_or(MoveValidationError::UnknownPlayer(last.player))?;

        let undone = self.moves.remove(self.moves.len() - 1);
        self.grid.clear(&undone.cells);
        let owner = &mut self.players[index];
        if let Err(at) = owner.remaining.binary_search(&undone.piece) {
            owner.remaining.insert(at, undone.piece);
        }
        owner.has_passed = false;
        self.current_player_index = index;
        self.journal.push(GameEvent::Undone);
        debug!("undid piece {} by {}", undone.piece, undone.player);
        Ok(undone)
    }

    /// Discards everything and returns to an empty `Waiting` game.
    pub fn reset(&mut self) {
        *self = Self::new(self.mode);
    }

    fn player_index(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    fn player_at(&self, seat: Seat) -> Option<&Player> {
        self.players.iter().find(|p| p.seat == seat)
    }

    /// Current occupancy of the board.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Rebuilds the grid from the move log alone.
    pub fn materialized_grid(&self) -> Grid {
        let mut grid = Grid::new();
        for mv in &self.moves {
            if let Some(player) = self.player(mv.player) {
                grid.paint(&mv.cells, player.seat);
            }
        }
        grid
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::Finished
    }

    /// Players in join order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Index into [`players`](Self::players) of the player to move.
    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    /// The player to move, once the game has started.
    pub fn current_player(&self) -> Option<&Player> {
        match self.status {
            GameStatus::Waiting => None,
            _ => self.players.get(self.current_player_index),
        }
    }

    pub fn current_player_id(&self) -> Option<PlayerId> {
        self.current_player().map(|p| p.id)
    }

    pub fn remaining_pieces(&self, id: PlayerId) -> Option<&[PieceId]> {
        self.player(id).map(|p| p.remaining.as_slice())
    }

    /// Placements in commit order.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.moves.last()
    }

    /// Every accepted mutation since the game was created or reset.
    pub fn journal(&self) -> &[GameEvent] {
        &self.journal
    }

    /// Whether the player has yet to place a piece.
    pub fn is_first_move(&self, id: PlayerId) -> bool {
        !self.moves.iter().any(|m| m.player == id)
    }

    /// The last piece the player placed, if any.
    pub fn last_piece_of(&self, id: PlayerId) -> Option<PieceId> {
        self.moves
            .iter()
            .rev()
            .find(|m| m.player == id)
            .map(|m| m.piece)
    }

    pub fn all_passed(&self) -> bool {
        !self.players.is_empty() && self.players.iter().all(|p| p.has_passed)
    }
}
