//! Static pattern tables over board indices.
//!
//! Indices follow the board layout:
//!
//! ```text
//! 0 1 2
//! 3 4 5
//! 6 7 8
//! ```

/// The center cell.
pub const CENTER: usize = 4;

/// Corner cells.
pub const CORNERS: [usize; 4] = [0, 2, 6, 8];

/// Edge midpoints.
pub const SIDES: [usize; 4] = [1, 3, 5, 7];

/// Every three-in-a-row.
pub static LINES: [[usize; 3]; 8] = [
    [0, 1, 2], [3, 4, 5], [6, 7, 8], // Rows
    [0, 3, 6], [1, 4, 7], [2, 5, 8], // Columns
    [0, 4, 8], [2, 4, 6],            // Diagonals
];

/// Diagonally opposite corners.
pub static CORNER_PAIRS: [[usize; 2]; 2] = [[0, 8], [2, 6]];

/// Three cells that, once held by one player, threaten several lines at once.
///
/// `completions` are the cells that would finish one of those lines. A fork
/// stays a live double threat while at least two completions are empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fork {
    /// The fork triple.
    pub cells: [usize; 3],
    /// Cells that extend the fork into three in a row.
    pub completions: &'static [usize],
}

const fn fork(cells: [usize; 3], completions: &'static [usize]) -> Fork {
    Fork { cells, completions }
}

/// The fork table, keyed by triple in ascending order.
///
/// This table is the reference for the blocking and forking rules and must
/// not be regenerated at runtime; `symmetry::derive_fork_table` rebuilds
/// it from its canonical generators only to check it.
pub static FORKS: [Fork; 24] = [
    fork([0, 1, 3], &[2, 6]),
    fork([0, 1, 4], &[2, 7, 8]),
    fork([0, 2, 4], &[1, 6, 8]),
    fork([0, 2, 6], &[1, 3, 4]),
    fork([0, 2, 8], &[1, 4, 5]),
    fork([0, 3, 4], &[5, 6, 8]),
    fork([0, 4, 6], &[2, 3, 8]),
    fork([0, 6, 8], &[3, 4, 7]),
    fork([1, 2, 4], &[0, 6, 7]),
    fork([1, 2, 5], &[0, 8]),
    fork([1, 3, 4], &[5, 7]),
    fork([1, 4, 5], &[3, 7]),
    fork([2, 4, 5], &[3, 6, 8]),
    fork([2, 4, 8], &[0, 5, 6]),
    fork([2, 6, 8], &[4, 5, 7]),
    fork([3, 4, 6], &[0, 2, 5]),
    fork([3, 4, 7], &[1, 5]),
    fork([3, 6, 7], &[0, 8]),
    fork([4, 5, 7], &[1, 3]),
    fork([4, 5, 8], &[0, 2, 3]),
    fork([4, 6, 7], &[1, 2, 8]),
    fork([4, 6, 8], &[0, 2, 7]),
    fork([4, 7, 8], &[0, 1, 6]),
    fork([5, 7, 8], &[2, 6]),
];
