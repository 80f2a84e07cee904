//! The eight symmetries of the square acting on board cells.
//!
//! Used to rebuild the fork table from a handful of canonical forks and to
//! collapse simulated games that differ only by rotation or reflection.

use crate::patterns::Fork;
use crate::{Board, Position, Square};
use std::collections::BTreeMap;

/// A rotation or reflection of the board, stored as the image of each index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symmetry {
    image: [usize; 9],
}

/// Four rotations and four reflections.
pub const SYMMETRIES: [Symmetry; 8] = [
    Symmetry { image: [0, 1, 2, 3, 4, 5, 6, 7, 8] }, // identity
    Symmetry { image: [2, 1, 0, 5, 4, 3, 8, 7, 6] }, // mirror left-right
    Symmetry { image: [2, 5, 8, 1, 4, 7, 0, 3, 6] }, // rotate 90
    Symmetry { image: [0, 3, 6, 1, 4, 7, 2, 5, 8] }, // main diagonal
    Symmetry { image: [8, 7, 6, 5, 4, 3, 2, 1, 0] }, // rotate 180
    Symmetry { image: [6, 7, 8, 3, 4, 5, 0, 1, 2] }, // mirror top-bottom
    Symmetry { image: [6, 3, 0, 7, 4, 1, 8, 5, 2] }, // rotate 270
    Symmetry { image: [8, 5, 2, 7, 4, 1, 6, 3, 0] }, // anti-diagonal
];

/// One representative per symmetry class of the fork table.
const FORK_GENERATORS: [([usize; 3], &[usize]); 5] = [
    ([0, 1, 3], &[2, 6]),
    ([0, 1, 4], &[2, 7, 8]),
    ([0, 2, 4], &[1, 6, 8]),
    ([0, 2, 6], &[1, 3, 4]),
    ([1, 3, 4], &[5, 7]),
];

impl Symmetry {
    /// Image of a board index.
    pub fn apply(&self, index: usize) -> usize {
        self.image[index]
    }

    /// Image of a position.
    pub fn apply_position(&self, pos: Position) -> Position {
        Position::ALL[self.apply(pos.to_index())]
    }

    /// The board with every square moved to its image.
    pub fn apply_board(&self, board: &Board) -> Board {
        let mut squares = [Square::Empty; 9];
        for (index, square) in board.squares().iter().enumerate() {
            squares[self.apply(index)] = *square;
        }
        Board::from_squares(squares)
    }
}

/// Smallest image of a move sequence under the eight symmetries.
///
/// Two games have the same canonical form exactly when one is a rotation or
/// reflection of the other, move for move.
pub fn canonical_sequence(moves: &[Position]) -> Vec<Position> {
    SYMMETRIES
        .iter()
        .map(|s| moves.iter().map(|&m| s.apply_position(m)).collect::<Vec<_>>())
        .min()
        .unwrap_or_default()
}

/// Smallest image of a board under the eight symmetries.
pub fn canonical_board(board: &Board) -> Board {
    SYMMETRIES
        .iter()
        .map(|s| s.apply_board(board))
        .min()
        .unwrap_or_else(|| board.clone())
}

/// Rebuilds the fork table as the symmetry orbit of the canonical forks.
///
/// Keys and completion sets are sorted, so the result compares directly
/// against [`crate::patterns::FORKS`].
pub fn derive_fork_table() -> BTreeMap<[usize; 3], Vec<usize>> {
    let mut table = BTreeMap::new();
    for (cells, completions) in FORK_GENERATORS {
        for symmetry in &SYMMETRIES {
            let mut key = cells.map(|i| symmetry.apply(i));
            key.sort_unstable();
            let mut value: Vec<usize> = completions.iter().map(|&i| symmetry.apply(i)).collect();
            value.sort_unstable();
            table.insert(key, value);
        }
    }
    table
}

/// The literal fork table in the shape produced by [`derive_fork_table`].
pub fn fork_table(forks: &[Fork]) -> BTreeMap<[usize; 3], Vec<usize>> {
    forks
        .iter()
        .map(|f| (f.cells, f.completions.to_vec()))
        .collect()
}
