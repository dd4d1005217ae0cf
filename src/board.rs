//! # Board and Seats
//!
//! The 20×20 cell grid and the four seat colors that own cells on it.
//! The grid is a materialized view of the move log: the game controller
//! rebuilds it by painting each committed move's cells with its owner's seat,
//! and never stores anything the moves don't already say.

use crate::geometry::Coord;
use std::fmt;
use std::str::FromStr;

/// Width and height of the board.
pub const GRID_SIZE: i32 = 20;

/// One of the four fixed color identities, each bound to a starting corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Seat {
    Blue,
    Yellow,
    Red,
    Green,
}

impl Seat {
    /// Seats in join order.
    pub const ALL: [Seat; 4] = [Seat::Blue, Seat::Yellow, Seat::Red, Seat::Green];

    /// The corner cell this seat's first placement must cover.
    pub fn starting_corner(self) -> Coord {
        match self {
            Seat::Blue => (0, 0),
            Seat::Yellow => (GRID_SIZE - 1, 0),
            Seat::Red => (GRID_SIZE - 1, GRID_SIZE - 1),
            Seat::Green => (0, GRID_SIZE - 1),
        }
    }

    /// Position of this seat in join order (blue 0 .. green 3).
    pub fn index(self) -> usize {
        match self {
            Seat::Blue => 0,
            Seat::Yellow => 1,
            Seat::Red => 2,
            Seat::Green => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Seat::Blue => "Blue",
            Seat::Yellow => "Yellow",
            Seat::Red => "Red",
            Seat::Green => "Green",
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Seat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blue" => Ok(Seat::Blue),
            "yellow" => Ok(Seat::Yellow),
            "red" => Ok(Seat::Red),
            "green" => Ok(Seat::Green),
            other => Err(format!("unknown seat color: {}", other)),
        }
    }
}

/// Whether a position lies on the board.
pub fn in_bounds((x, y): Coord) -> bool {
    (0..GRID_SIZE).contains(&x) && (0..GRID_SIZE).contains(&y)
}

/// Cell occupancy of the board, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Option<Seat>>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// An empty board.
    pub fn new() -> Self {
        Grid {
            cells: vec![None; (GRID_SIZE * GRID_SIZE) as usize],
        }
    }

    fn index((x, y): Coord) -> Option<usize> {
        in_bounds((x, y)).then(|| (y * GRID_SIZE + x) as usize)
    }

    /// Owner of a cell. Off-board positions read as empty.
    pub fn get(&self, pos: Coord) -> Option<Seat> {
        Self::index(pos).and_then(|i| self.cells[i])
    }

    pub fn is_empty_at(&self, pos: Coord) -> bool {
        self.get(pos).is_none()
    }

    /// Paints the given cells with `seat`. Off-board cells are skipped.
    pub fn paint(&mut self, cells: &[Coord], seat: Seat) {
        for &pos in cells {
            if let Some(i) = Self::index(pos) {
                self.cells[i] = Some(seat);
            }
        }
    }

    /// Clears the given cells. Off-board cells are skipped.
    pub fn clear(&mut self, cells: &[Coord]) {
        for &pos in cells {
            if let Some(i) = Self::index(pos) {
                self.cells[i] = None;
            }
        }
    }

    /// Number of cells owned by `seat`.
    pub fn count(&self, seat: Seat) -> usize {
        self.cells.iter().filter(|c| **c == Some(seat)).count()
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Rows of the board, top to bottom, for rendering.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Seat>]> {
        self.cells.chunks(GRID_SIZE as usize)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                let symbol = match cell {
                    Some(Seat::Blue) => "B",
                    Some(Seat::Yellow) => "Y",
                    Some(Seat::Red) => "R",
                    Some(Seat::Green) => "G",
                    None => ".",
                };
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_corners() {
        assert_eq!(Seat::Blue.starting_corner(), (0, 0));
        assert_eq!(Seat::Yellow.starting_corner(), (19, 0));
        assert_eq!(Seat::Red.starting_corner(), (19, 19));
        assert_eq!(Seat::Green.starting_corner(), (0, 19));
        for (i, seat) in Seat::ALL.iter().enumerate() {
            assert_eq!(seat.index(), i);
        }
    }

    #[test]
    fn test_paint_and_clear() {
        let mut grid = Grid::new();
        grid.paint(&[(0, 0), (1, 0), (25, 3)], Seat::Red);
        assert_eq!(grid.get((1, 0)), Some(Seat::Red));
        assert_eq!(grid.count(Seat::Red), 2);
        assert!(grid.is_empty_at((-1, 0)));
        grid.clear(&[(0, 0)]);
        assert_eq!(grid.occupied(), 1);
    }

    #[test]
    fn test_seat_parsing() {
        assert_eq!("Yellow".parse::<Seat>(), Ok(Seat::Yellow));
        assert!("purple".parse::<Seat>().is_err());
    }
}
