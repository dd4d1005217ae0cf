//! # Piece Catalog
//!
//! The fixed set of 21 Blokus polyominoes every seat starts with: one
//! monomino, one domino, two trominoes, five tetrominoes and twelve
//! pentominoes. Ids are stable (1..=21) and are what moves, remaining-piece
//! sets and the AI refer to.

use crate::geometry::{self, Coord};

/// Stable catalog identifier of a piece (1..=21).
pub type PieceId = u8;

/// Id of the single-cell piece, which earns the last-piece bonus.
pub const MONOMINO_ID: PieceId = 1;

/// Number of pieces in the catalog (and in each seat's starting hand).
pub const PIECE_COUNT: usize = 21;

/// A catalog entry. Coordinates are canonical: minimum x and y are both 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub id: PieceId,
    pub name: &'static str,
    /// Number of unit cells, 1..=5
    pub squares: u8,
    pub coords: &'static [Coord],
}

impl Piece {
    /// Distinct orientations of this piece under all rotations and flips.
    pub fn orientations(&self) -> Vec<Vec<Coord>> {
        geometry::orientations(self.coords)
    }

    /// Whether `cells` (absolute or relative) form some orientation of this
    /// piece.
    pub fn matches(&self, cells: &[Coord]) -> bool {
        if cells.len() != usize::from(self.squares) {
            return false;
        }
        let key = geometry::canonical(cells);
        self.orientations()
            .iter()
            .any(|shape| geometry::canonical(shape) == key)
    }
}

const fn piece(id: PieceId, name: &'static str, coords: &'static [Coord]) -> Piece {
    Piece {
        id,
        name,
        squares: coords.len() as u8,
        coords,
    }
}

/// Every piece, ordered by id.
pub static PIECES: [Piece; PIECE_COUNT] = [
    piece(1, "I1", &[(0, 0)]),
    piece(2, "I2", &[(0, 0), (1, 0)]),
    piece(3, "I3", &[(0, 0), (1, 0), (2, 0)]),
    piece(4, "L3", &[(0, 0), (0, 1), (1, 0)]),
    piece(5, "I4", &[(0, 0), (1, 0), (2, 0), (3, 0)]),
    piece(6, "O4", &[(0, 0), (1, 0), (0, 1), (1, 1)]),
    piece(7, "T4", &[(0, 0), (1, 0), (2, 0), (1, 1)]),
    piece(8, "L4", &[(0, 0), (0, 1), (0, 2), (1, 0)]),
    piece(9, "Z4", &[(0, 0), (1, 0), (1, 1), (2, 1)]),
    piece(10, "I5", &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]),
    piece(11, "L5", &[(0, 0), (0, 1), (0, 2), (0, 3), (1, 0)]),
    piece(12, "T5", &[(0, 0), (1, 0), (2, 0), (1, 1), (1, 2)]),
    piece(13, "V5", &[(0, 0), (0, 1), (0, 2), (1, 0), (2, 0)]),
    piece(14, "N5", &[(0, 1), (1, 1), (1, 0), (2, 0), (3, 0)]),
    piece(15, "Z5", &[(0, 0), (1, 0), (1, 1), (1, 2), (2, 2)]),
    piece(16, "P5", &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]),
    piece(17, "W5", &[(0, 0), (0, 1), (1, 1), (1, 2), (2, 2)]),
    piece(18, "U5", &[(0, 0), (0, 1), (1, 0), (2, 0), (2, 1)]),
    piece(19, "F5", &[(0, 1), (1, 0), (1, 1), (1, 2), (2, 2)]),
    piece(20, "X5", &[(0, 1), (1, 0), (1, 1), (1, 2), (2, 1)]),
    piece(21, "Y5", &[(0, 1), (1, 0), (1, 1), (1, 2), (1, 3)]),
];

/// Looks up a piece by id.
pub fn lookup(id: PieceId) -> Option<&'static Piece> {
    PIECES.iter().find(|p| p.id == id)
}

/// All piece ids in catalog order; the starting hand of every seat.
pub fn all_piece_ids() -> Vec<PieceId> {
    PIECES.iter().map(|p| p.id).collect()
}

/// Total squares across the given ids. Unknown ids count as zero.
pub fn total_squares(ids: &[PieceId]) -> u32 {
    ids.iter()
        .filter_map(|&id| lookup(id))
        .map(|p| u32::from(p.squares))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shape() {
        assert_eq!(PIECES.len(), 21);
        let mut by_size = [0usize; 6];
        for p in &PIECES {
            by_size[usize::from(p.squares)] += 1;
        }
        assert_eq!(by_size, [0, 1, 1, 2, 5, 12]);
        assert_eq!(total_squares(&all_piece_ids()), 89);
    }

    #[test]
    fn test_ids_are_stable_and_sequential() {
        for (i, p) in PIECES.iter().enumerate() {
            assert_eq!(usize::from(p.id), i + 1);
        }
        assert_eq!(lookup(MONOMINO_ID).map(|p| p.name), Some("I1"));
        assert_eq!(lookup(20).map(|p| p.name), Some("X5"));
        assert!(lookup(0).is_none());
        assert!(lookup(22).is_none());
    }

    #[test]
    fn test_catalog_coords_are_canonical() {
        for p in &PIECES {
            assert_eq!(geometry::normalize(p.coords), p.coords.to_vec(), "{}", p.name);
        }
    }

    #[test]
    fn test_all_pieces_are_distinct_shapes() {
        for a in &PIECES {
            for b in PIECES.iter().filter(|b| b.id > a.id) {
                assert!(!a.matches(b.coords), "{} duplicates {}", a.name, b.name);
            }
        }
    }

    #[test]
    fn test_orientation_totals() {
        // Standard Blokus set: 91 fixed orientations across 21 pieces.
        let total: usize = PIECES.iter().map(|p| p.orientations().len()).sum();
        assert_eq!(total, 91);
        assert_eq!(lookup(20).map(|p| p.orientations().len()), Some(1));
    }

    #[test]
    fn test_matches_absolute_cells() {
        let domino = lookup(2).unwrap();
        assert!(domino.matches(&[(7, 3), (7, 4)]));
        assert!(!domino.matches(&[(7, 3), (8, 4)]));
        assert!(!domino.matches(&[(7, 3)]));
    }
}
