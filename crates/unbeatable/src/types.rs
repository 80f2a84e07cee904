//! Core domain types for tic-tac-toe.

use super::position::Position;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Player in the game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Lower-case symbol used in move logs.
    pub fn symbol(self) -> char {
        match self {
            Player::X => 'x',
            Player::O => 'o',
        }
    }

    /// Parses a player symbol, ignoring case.
    pub fn from_symbol(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'x' => Some(Player::X),
            'o' => Some(Player::O),
            _ => None,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

/// Classification of the squares of one combination (line, fork, corner pair).
///
/// Every empty square counts as its own symbol, so a line holding two `X`
/// marks and one empty square has two distinct symbols.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Marks {
    x: usize,
    o: usize,
    empty: Vec<Position>,
}

impl Marks {
    /// Number of marks `player` has in the combination.
    pub fn count(&self, player: Player) -> usize {
        match player {
            Player::X => self.x,
            Player::O => self.o,
        }
    }

    /// Whether `player` has at least one mark in the combination.
    pub fn contains(&self, player: Player) -> bool {
        self.count(player) > 0
    }

    /// Empty squares of the combination, in combination order.
    pub fn empty(&self) -> &[Position] {
        &self.empty
    }

    /// Number of distinct symbols: one per player present, one per empty square.
    pub fn distinct(&self) -> usize {
        usize::from(self.x > 0) + usize::from(self.o > 0) + self.empty.len()
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Creates a board from raw squares.
    pub fn from_squares(squares: [Square; 9]) -> Self {
        Self { squares }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Sets the square at the given position.
    pub fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Returns a copy of the board with `player` marked at `pos`.
    pub fn with(&self, pos: Position, player: Player) -> Self {
        let mut board = self.clone();
        board.set(pos, Square::Occupied(player));
        board
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Positions with no mark, in index order.
    pub fn empty_cells(&self) -> Vec<Position> {
        Position::valid_moves(self)
    }

    /// Number of marks `player` has on the board.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(player))
            .count()
    }

    /// Classifies the squares at `indices`.
    ///
    /// Indices outside the board are ignored.
    pub fn marks_in(&self, indices: &[usize]) -> Marks {
        let mut marks = Marks::default();
        for &index in indices {
            match self.squares.get(index) {
                Some(Square::Occupied(Player::X)) => marks.x += 1,
                Some(Square::Occupied(Player::O)) => marks.o += 1,
                Some(Square::Empty) => marks.empty.extend(Position::from_index(index)),
                None => {}
            }
        }
        marks
    }

    /// The player whose turn it is, derived from mark counts.
    ///
    /// Returns `None` when the counts cannot arise from alternating play
    /// starting with `X`.
    pub fn side_to_move(&self) -> Option<Player> {
        let x = self.count(Player::X);
        let o = self.count(Player::O);
        if x == o {
            Some(Player::X)
        } else if x == o + 1 {
            Some(Player::O)
        } else {
            None
        }
    }

    /// Formats the board as a compact human-readable string.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                result.push_str(&self.symbol_at(pos));
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }

    /// Renders the board in a box-drawn grid, numbering empty squares 1-9.
    pub fn render(&self) -> String {
        let mut out = String::from("┌───┬───┬───┐\n");
        for row in 0..3 {
            out.push_str(&format!(
                "│ {} │ {} │ {} │\n",
                self.symbol_at(row * 3),
                self.symbol_at(row * 3 + 1),
                self.symbol_at(row * 3 + 2)
            ));
            if row < 2 {
                out.push_str("├───┼───┼───┤\n");
            }
        }
        out.push_str("└───┴───┴───┘");
        out
    }

    /// Nine-character form, `x`/`o` for marks and `.` for empty squares.
    pub fn to_compact(&self) -> String {
        self.squares
            .iter()
            .map(|s| match s {
                Square::Empty => '.',
                Square::Occupied(p) => p.symbol(),
            })
            .collect()
    }

    fn symbol_at(&self, index: usize) -> String {
        match self.squares[index] {
            Square::Empty => (index + 1).to_string(),
            Square::Occupied(player) => player.symbol().to_string(),
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_compact())
    }
}

/// Error parsing a board from its nine-character form.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardParseError {
    /// Wrong number of squares.
    #[display("Expected 9 squares, got {_0}")]
    WrongLength(#[error(not(source))] usize),
    /// A character that is neither a mark nor an empty marker.
    #[display("Invalid square {_0:?} at index {_1}")]
    InvalidSquare(#[error(not(source))] char, #[error(not(source))] usize),
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses `x`, `o` (any case) as marks and `.`, `-`, `_` or a digit as empty.
    /// Whitespace and `|` separators are ignored.
    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|')
            .collect();
        if cells.len() != 9 {
            return Err(BoardParseError::WrongLength(cells.len()));
        }

        let mut squares = [Square::Empty; 9];
        for (index, c) in cells.into_iter().enumerate() {
            squares[index] = match c {
                '.' | '-' | '_' => Square::Empty,
                c if c.is_ascii_digit() => Square::Empty,
                c => Square::Occupied(
                    Player::from_symbol(c).ok_or(BoardParseError::InvalidSquare(c, index))?,
                ),
            };
        }
        Ok(Self { squares })
    }
}
