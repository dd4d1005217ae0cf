//! # Placement Validation
//!
//! Decides whether a set of absolute board cells is a legal placement for a
//! seat. The rules are checked in a fixed order and the first failure is
//! reported:
//!
//! 1. every cell is on the board
//! 2. every cell is empty
//! 3. no cell shares an edge with a cell of the same seat (applies to every
//!    placement, including the first)
//! 4. a first placement covers the seat's starting corner
//! 5. any later placement touches a same-seat cell diagonally
//!
//! Opponent cells are irrelevant beyond occupancy. The cost is proportional
//! to the number of cells placed, not to the board size, since the AI runs
//! this check for every candidate position.

use crate::board::{in_bounds, Grid, Seat};
use crate::geometry::Coord;
use std::fmt;

const EDGE_NEIGHBORS: [Coord; 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const CORNER_NEIGHBORS: [Coord; 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// The rule a rejected placement broke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// No cells were given
    Empty,
    /// A cell lies off the board
    OutOfBounds(Coord),
    /// A cell is already taken
    Occupied(Coord),
    /// A cell shares an edge with a cell of the placing seat
    EdgeContact(Coord),
    /// A first placement does not cover the seat's starting corner
    MissingStartCorner(Coord),
    /// A later placement does not touch the seat's cells diagonally
    NoCornerContact,
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::Empty => write!(f, "placement has no cells"),
            PlacementError::OutOfBounds((x, y)) => {
                write!(f, "cell ({}, {}) is off the board", x, y)
            }
            PlacementError::Occupied((x, y)) => {
                write!(f, "cell ({}, {}) is already occupied", x, y)
            }
            PlacementError::EdgeContact((x, y)) => {
                write!(f, "cell ({}, {}) shares an edge with your own piece", x, y)
            }
            PlacementError::MissingStartCorner((x, y)) => {
                write!(f, "first piece must cover the starting corner ({}, {})", x, y)
            }
            PlacementError::NoCornerContact => {
                write!(f, "piece must touch one of your pieces at a corner")
            }
        }
    }
}

impl std::error::Error for PlacementError {}

fn offset((x, y): Coord, (dx, dy): Coord) -> Coord {
    (x + dx, y + dy)
}

/// Checks a placement and reports the first rule it breaks.
pub fn check_placement(
    grid: &Grid,
    cells: &[Coord],
    seat: Seat,
    is_first_move: bool,
) -> Result<(), PlacementError> {
    if cells.is_empty() {
        return Err(PlacementError::Empty);
    }

    if let Some(&pos) = cells.iter().find(|&&pos| !in_bounds(pos)) {
        return Err(PlacementError::OutOfBounds(pos));
    }

    if let Some(&pos) = cells.iter().find(|&&pos| !grid.is_empty_at(pos)) {
        return Err(PlacementError::Occupied(pos));
    }

    for &pos in cells {
        if EDGE_NEIGHBORS
            .iter()
            .any(|&d| grid.get(offset(pos, d)) == Some(seat))
        {
            return Err(PlacementError::EdgeContact(pos));
        }
    }

    if is_first_move {
        let corner = seat.starting_corner();
        return if cells.contains(&corner) {
            Ok(())
        } else {
            Err(PlacementError::MissingStartCorner(corner))
        };
    }

    let touches_corner = cells.iter().any(|&pos| {
        CORNER_NEIGHBORS
            .iter()
            .any(|&d| grid.get(offset(pos, d)) == Some(seat))
    });
    if touches_corner {
        Ok(())
    } else {
        Err(PlacementError::NoCornerContact)
    }
}

/// Boolean form of [`check_placement`].
pub fn is_legal(grid: &Grid, cells: &[Coord], seat: Seat, is_first_move: bool) -> bool {
    check_placement(grid, cells, seat, is_first_move).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(cells: &[Coord], seat: Seat) -> Grid {
        let mut grid = Grid::new();
        grid.paint(cells, seat);
        grid
    }

    #[test]
    fn test_first_move_must_cover_corner() {
        let grid = Grid::new();
        assert!(is_legal(&grid, &[(0, 0)], Seat::Blue, true));
        assert_eq!(
            check_placement(&grid, &[(1, 1)], Seat::Blue, true),
            Err(PlacementError::MissingStartCorner((0, 0)))
        );
        assert!(is_legal(&grid, &[(19, 19), (18, 19)], Seat::Red, true));
        assert!(!is_legal(&grid, &[(0, 0)], Seat::Red, true));
    }

    #[test]
    fn test_later_move_without_own_pieces_is_rejected() {
        let grid = Grid::new();
        assert_eq!(
            check_placement(&grid, &[(0, 0)], Seat::Blue, false),
            Err(PlacementError::NoCornerContact)
        );
    }

    #[test]
    fn test_bounds_and_vacancy() {
        let grid = grid_with(&[(5, 5)], Seat::Green);
        assert_eq!(
            check_placement(&grid, &[(19, 0), (20, 0)], Seat::Yellow, true),
            Err(PlacementError::OutOfBounds((20, 0)))
        );
        assert_eq!(
            check_placement(&grid, &[(5, 5)], Seat::Blue, false),
            Err(PlacementError::Occupied((5, 5)))
        );
        assert_eq!(check_placement(&grid, &[], Seat::Blue, true), Err(PlacementError::Empty));
    }

    #[test]
    fn test_edge_contact_with_own_color_is_rejected() {
        let grid = grid_with(&[(0, 0), (1, 0)], Seat::Blue);
        assert_eq!(
            check_placement(&grid, &[(0, 1), (1, 1)], Seat::Blue, false),
            Err(PlacementError::EdgeContact((0, 1)))
        );
        // (1, 1) sits directly below (1, 0), so this one shares an edge too.
        assert_eq!(
            check_placement(&grid, &[(1, 1), (2, 1)], Seat::Blue, false),
            Err(PlacementError::EdgeContact((1, 1)))
        );
        assert!(is_legal(&grid, &[(2, 1), (3, 1)], Seat::Blue, false));
    }

    #[test]
    fn test_edge_contact_vetoes_even_with_corner_contact() {
        // (2, 1) touches (1, 0) diagonally, (2, 0) touches (1, 0) along an edge.
        let grid = grid_with(&[(0, 0), (1, 0)], Seat::Blue);
        assert_eq!(
            check_placement(&grid, &[(2, 0), (2, 1)], Seat::Blue, false),
            Err(PlacementError::EdgeContact((2, 0)))
        );
    }

    #[test]
    fn test_edge_contact_applies_to_first_move() {
        let grid = grid_with(&[(1, 0)], Seat::Blue);
        assert_eq!(
            check_placement(&grid, &[(0, 0)], Seat::Blue, true),
            Err(PlacementError::EdgeContact((0, 0)))
        );
    }

    #[test]
    fn test_opponent_contact_is_allowed() {
        let mut grid = grid_with(&[(0, 0)], Seat::Blue);
        grid.paint(&[(2, 1)], Seat::Yellow);
        assert!(is_legal(&grid, &[(1, 1)], Seat::Blue, false));
        // Opponent diagonals do not count as corner contact.
        assert!(!is_legal(&grid, &[(3, 2)], Seat::Blue, false));
    }
}
