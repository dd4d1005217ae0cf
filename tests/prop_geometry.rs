//! Property-based tests for piece geometry, placement and turn order.

use blokus::board::GRID_SIZE;
use blokus::game_controller::next_turn_index;
use blokus::geometry::{
    canonical, flip_horizontal, flip_vertical, normalize, rotate, translate, Transform,
};
use blokus::{is_legal, GameController, Grid, Seat, SessionMode, PIECES};
use proptest::prelude::*;

fn any_transform() -> impl Strategy<Value = Transform> {
    (-8i32..=8, any::<bool>(), any::<bool>())
        .prop_map(|(quarters, flip_h, flip_v)| Transform::new(quarters * 90, flip_h, flip_v))
}

fn any_coords() -> impl Strategy<Value = Vec<(i32, i32)>> {
    prop::collection::vec((-30i32..30, -30i32..30), 1..8)
}

proptest! {
    /// Every transform of every piece lands with min x and min y at 0.
    #[test]
    fn prop_transforms_are_normalized(index in 0usize..21, t in any_transform()) {
        let shape = t.apply(PIECES[index].coords).unwrap();
        prop_assert_eq!(shape.iter().map(|c| c.0).min(), Some(0));
        prop_assert_eq!(shape.iter().map(|c| c.1).min(), Some(0));
        prop_assert_eq!(shape.len(), PIECES[index].coords.len());
    }

    /// Normalizing twice changes nothing.
    #[test]
    fn prop_normalize_is_idempotent(coords in any_coords()) {
        let once = normalize(&coords);
        prop_assert_eq!(normalize(&once), once);
    }

    /// A full turn is the same as no turn.
    #[test]
    fn prop_full_rotation_is_identity(coords in any_coords(), turns in -3i32..=3) {
        prop_assert_eq!(rotate(&coords, 360 * turns).unwrap(), rotate(&coords, 0).unwrap());
    }

    /// Flipping twice restores the canonical set.
    #[test]
    fn prop_double_flip_is_identity(coords in any_coords()) {
        let base = canonical(&coords);
        prop_assert_eq!(canonical(&flip_horizontal(&flip_horizontal(&coords))), base.clone());
        prop_assert_eq!(canonical(&flip_vertical(&flip_vertical(&coords))), base);
    }

    /// Rotations compose additively.
    #[test]
    fn prop_rotations_compose(index in 0usize..21, a in -4i32..4, b in -4i32..4) {
        let coords = PIECES[index].coords;
        let stepwise = rotate(&rotate(coords, a * 90).unwrap(), b * 90).unwrap();
        prop_assert_eq!(canonical(&stepwise), canonical(&rotate(coords, (a + b) * 90).unwrap()));
    }

    /// Non-quarter rotations are always refused.
    #[test]
    fn prop_partial_rotation_rejected(coords in any_coords(), degrees in -720i32..720) {
        prop_assume!(degrees % 90 != 0);
        prop_assert!(rotate(&coords, degrees).is_err());
    }

    /// A placement with any cell off the board is never legal.
    #[test]
    fn prop_off_board_never_legal(
        index in 0usize..21,
        x in -6i32..26,
        y in -6i32..26,
        first in any::<bool>(),
    ) {
        let cells = translate(PIECES[index].coords, (x, y));
        let off_board =
            |&(cx, cy): &(i32, i32)| cx < 0 || cy < 0 || cx >= GRID_SIZE || cy >= GRID_SIZE;
        prop_assume!(cells.iter().any(off_board));
        prop_assert!(!is_legal(&Grid::new(), &cells, Seat::Blue, first));
    }

    /// Turn advance lands on a player who has not passed, or stays put when
    /// everyone has.
    #[test]
    fn prop_turn_advance_skips_passed(
        passed in prop::array::uniform4(any::<bool>()),
        current in 0usize..4,
    ) {
        let mut players = GameController::single_player("You", SessionMode::Local)
            .unwrap()
            .players()
            .to_vec();
        for (p, &flag) in players.iter_mut().zip(passed.iter()) {
            p.has_passed = flag;
        }
        let next = next_turn_index(&players, current);
        if passed.iter().all(|&p| p) {
            prop_assert_eq!(next, current);
        } else {
            prop_assert!(!players[next].has_passed);
            // Nobody strictly between current and next is still in the game.
            let mut i = (current + 1) % 4;
            while i != next {
                prop_assert!(players[i].has_passed);
                i = (i + 1) % 4;
            }
        }
    }
}
