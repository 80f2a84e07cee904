//! Draw and termination detection for tic-tac-toe.

use super::win::check_winner;
use crate::{Board, Square};
use tracing::instrument;

/// Checks if the board is full (all squares occupied).
///
/// A full board with no winner indicates a draw.
#[instrument]
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}

/// A full board on which nobody completed a line.
#[instrument]
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && check_winner(board).is_none()
}

/// Won or full: no further move may be made.
#[instrument]
pub fn is_terminal(board: &Board) -> bool {
    check_winner(board).is_some() || is_full(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, Position};

    #[test]
    fn test_empty_board_not_full() {
        let board = Board::new();
        assert!(!is_full(&board));
        assert!(!is_terminal(&board));
    }

    #[test]
    fn test_partial_board_not_full() {
        let mut board = Board::new();
        board.set(Position::Center, Square::Occupied(Player::X));
        assert!(!is_full(&board));
    }

    #[test]
    fn test_draw_detection() {
        // X O X / O X X / O X O
        let board: Board = "xox oxx oxo".parse().expect("valid board");
        assert!(is_draw(&board));
        assert!(is_terminal(&board));
    }

    #[test]
    fn test_not_draw_if_winner() {
        let board: Board = "xxxoo....".parse().expect("valid board");
        assert!(!is_draw(&board));
        assert!(is_terminal(&board));
    }
}
