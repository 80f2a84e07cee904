//! Win detection logic for tic-tac-toe.

use crate::patterns::LINES;
use crate::{Board, Player, Square};
use tracing::instrument;

/// Whether all three squares of `line` hold `player`.
///
/// Indices outside the board never count as held.
pub fn is_line_won(board: &Board, line: &[usize; 3], player: Player) -> bool {
    line.iter()
        .all(|&i| board.squares().get(i) == Some(&Square::Occupied(player)))
}

/// Returns the first completed line and its owner, if any.
#[instrument]
pub fn winning_line(board: &Board) -> Option<(Player, [usize; 3])> {
    LINES.iter().find_map(|line| {
        [Player::X, Player::O]
            .into_iter()
            .find(|&player| is_line_won(board, line, player))
            .map(|player| (player, *line))
    })
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(player)` if the player has three in a row,
/// `None` otherwise.
#[instrument]
pub fn check_winner(board: &Board) -> Option<Player> {
    winning_line(board).map(|(player, _)| player)
}
