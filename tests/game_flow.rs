//! End-to-end games driven through the public API.

use blokus::scoring::{self, winners};
use blokus::{
    is_legal, AiPlayer, Difficulty, GameController, GameEvent, GameStatus, MoveValidationError,
    PlayerId, Seat, SessionMode,
};

fn play_out(game: &mut GameController, seats: &mut [AiPlayer]) {
    // Each turn either places a piece or passes for good, so this is bounded.
    for _ in 0..100 {
        if game.is_game_over() {
            return;
        }
        let turn = game.current_player_index();
        seats[turn].play_turn(game).unwrap();
    }
    assert!(game.is_game_over(), "game did not finish");
}

fn seeded_seats(difficulty: Difficulty, seed: u64) -> Vec<AiPlayer> {
    (0..4)
        .map(|i| AiPlayer::with_seed(difficulty, seed + i))
        .collect()
}

#[test]
fn test_easy_game_runs_to_completion() {
    let mut game = GameController::single_player("You", SessionMode::Local).unwrap();
    let mut seats = seeded_seats(Difficulty::Easy, 11);
    play_out(&mut game, &mut seats);

    assert_eq!(game.status(), GameStatus::Finished);
    assert!(game.all_passed());
    assert_eq!(game.grid(), &game.materialized_grid());

    // Every seat got its first piece down in its own corner.
    for seat in Seat::ALL {
        assert_eq!(game.grid().get(seat.starting_corner()), Some(seat));
    }

    let covered: usize = game.moves().iter().map(|m| m.cells.len()).sum();
    assert_eq!(covered, game.grid().occupied());

    let rows = scoring::standings(&game);
    assert_eq!(rows.len(), 4);
    assert!(rows.windows(2).all(|w| w[0].score <= w[1].score));
    assert!(!winners(&rows).is_empty());
}

#[test]
fn test_medium_game_moves_are_legal_when_replayed() {
    let mut game = GameController::single_player("You", SessionMode::Networked).unwrap();
    let mut seats = seeded_seats(Difficulty::Medium, 5);
    play_out(&mut game, &mut seats);

    // Re-check every placement against the board as it stood at the time.
    let mut check = GameController::single_player("You", SessionMode::Networked).unwrap();
    for event in game.journal().iter().skip(5) {
        if let GameEvent::Placed { player, cells, .. } = event {
            let seat = check.player(*player).unwrap().seat;
            assert!(is_legal(check.grid(), cells, seat, check.is_first_move(*player)));
        }
        check.apply(event).unwrap();
    }
    assert_eq!(check.grid(), game.grid());
}

#[test]
fn test_replay_of_captured_journal_is_identical() {
    let mut game = GameController::single_player("You", SessionMode::Local).unwrap();
    let mut seats = seeded_seats(Difficulty::Easy, 99);
    for _ in 0..30 {
        let turn = game.current_player_index();
        seats[turn].play_turn(&mut game).unwrap();
    }
    game.undo_last_move().unwrap();

    let replayed = GameController::replay(SessionMode::Local, game.journal()).unwrap();
    assert_eq!(replayed.grid(), game.grid());
    for (a, b) in replayed.players().iter().zip(game.players()) {
        assert_eq!(a.remaining, b.remaining);
        assert_eq!(a.has_passed, b.has_passed);
    }
    assert_eq!(replayed.current_player_id(), game.current_player_id());
    assert_eq!(replayed.moves(), game.moves());
    assert_eq!(replayed.journal(), game.journal());
}

#[test]
fn test_seeded_games_are_reproducible() {
    let run = |seed| {
        let mut game = GameController::single_player("You", SessionMode::Local).unwrap();
        let mut seats = seeded_seats(Difficulty::Medium, seed);
        play_out(&mut game, &mut seats);
        // Commit times differ between runs; compare what was played.
        game.moves()
            .iter()
            .map(|m| (m.player, m.piece, m.cells.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(17), run(17));
}

#[test]
fn test_out_of_turn_commit_is_rejected() {
    let mut game = GameController::single_player("You", SessionMode::Local).unwrap();
    let green = game
        .players()
        .iter()
        .find(|p| p.seat == Seat::Green)
        .map(|p| p.id)
        .unwrap();
    let blue = game.current_player_id().unwrap();
    assert_eq!(
        game.commit_move(green, 1, &[(0, 19)]),
        Err(MoveValidationError::OutOfTurn {
            player: green,
            expected: blue
        })
    );
    assert!(game.moves().is_empty());
    assert_eq!(
        game.commit_pass(PlayerId(0)),
        Err(MoveValidationError::UnknownPlayer(PlayerId(0)))
    );
}
