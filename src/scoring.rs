//! # Scoring
//!
//! Scores use the penalty convention: a player's score is the number of
//! squares left in their hand, so lower is better. Placing every piece turns
//! that into a 15-point bonus (score −15), and finishing with the monomino
//! adds 5 more (score −20). Standings sort ascending and ties are kept as
//! ties.

use crate::board::Seat;
use crate::game_controller::{GameController, PlayerId};
use crate::pieces::{self, PieceId, MONOMINO_ID};

/// Bonus for placing all 21 pieces.
pub const ALL_PLACED_BONUS: i32 = 15;

/// Extra bonus when the final piece placed was the monomino.
pub const MONOMINO_LAST_BONUS: i32 = 5;

/// Penalty score for a hand of remaining pieces.
///
/// `last_piece_was_monomino` only matters when `all_pieces_placed` is set.
pub fn score(remaining: &[PieceId], all_pieces_placed: bool, last_piece_was_monomino: bool) -> i32 {
    let remaining_squares = pieces::total_squares(remaining) as i32;
    if !all_pieces_placed {
        return remaining_squares;
    }

    let mut score = remaining_squares - ALL_PLACED_BONUS;
    if last_piece_was_monomino {
        score -= MONOMINO_LAST_BONUS;
    }
    score
}

/// One row of the final results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub player: PlayerId,
    pub seat: Seat,
    pub name: String,
    pub score: i32,
}

/// Scores every seated player and sorts best first.
///
/// The monomino bonus is read off the player's final placement in the move
/// log. Equal scores keep join order.
pub fn standings(game: &GameController) -> Vec<Standing> {
    let mut rows: Vec<Standing> = game
        .players()
        .iter()
        .map(|p| {
            let all_placed = p.remaining.is_empty();
            let monomino_last = game.last_piece_of(p.id) == Some(MONOMINO_ID);
            Standing {
                player: p.id,
                seat: p.seat,
                name: p.name.clone(),
                score: score(&p.remaining, all_placed, monomino_last),
            }
        })
        .collect();
    rows.sort_by_key(|row| row.score);
    rows
}

/// Every player tied for the best score. Empty only when nobody is seated.
pub fn winners(standings: &[Standing]) -> Vec<&Standing> {
    let Some(best) = standings.iter().map(|s| s.score).min() else {
        return Vec::new();
    };
    standings.iter().filter(|s| s.score == best).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_controller::SessionMode;

    #[test]
    fn test_remaining_squares_count_against_player() {
        assert_eq!(score(&pieces::all_piece_ids(), false, false), 89);
        assert_eq!(score(&[1, 2, 10], false, false), 8);
        assert_eq!(score(&[1], false, true), 1);
    }

    #[test]
    fn test_all_placed_bonus() {
        assert_eq!(score(&[], true, false), -15);
        assert_eq!(score(&[], true, true), -20);
    }

    #[test]
    fn test_standings_order_and_ties() {
        let mut game = GameController::single_player("You", SessionMode::Local).unwrap();
        let ids: Vec<PlayerId> = game.players().iter().map(|p| p.id).collect();
        game.commit_move(ids[0], 10, &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]).unwrap();
        game.commit_move(ids[1], 2, &[(19, 0), (18, 0)]).unwrap();
        game.commit_move(ids[2], 2, &[(19, 19), (19, 18)]).unwrap();
        for &id in &ids[3..] {
            game.commit_pass(id).unwrap();
        }

        let rows = standings(&game);
        assert_eq!(rows[0].player, ids[0]);
        assert_eq!(rows[0].score, 84);
        assert_eq!(rows[3].score, 89);
        let best = winners(&rows);
        assert_eq!(best.len(), 1);

        let tied: Vec<PlayerId> = rows[1..3].iter().map(|r| r.player).collect();
        assert_eq!(tied, vec![ids[1], ids[2]]);
        assert!(winners(&[]).is_empty());
    }

    #[test]
    fn test_winners_keeps_ties() {
        let game = GameController::single_player("You", SessionMode::Local).unwrap();
        let rows = standings(&game);
        assert_eq!(winners(&rows).len(), 4);
    }
}
