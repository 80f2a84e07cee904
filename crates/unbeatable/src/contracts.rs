//! Contract-based validation for tic-tac-toe.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use super::action::{Move, MoveError};
use super::patterns::LINES;
use super::rules::{is_line_won, is_terminal};
use super::selector::SelectError;
use super::typestate::GameInProgress;
use super::{Board, Player, Square};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: The square at the move's position must be empty.
pub struct SquareIsEmpty;

impl SquareIsEmpty {
    /// Checks that the target square is free.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &GameInProgress) -> Result<(), MoveError> {
        if !game.board().is_empty(mov.position) {
            Err(MoveError::SquareOccupied(mov.position))
        } else {
            Ok(())
        }
    }
}

/// Precondition: It must be the player's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Checks that the mover is the side to move.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &GameInProgress) -> Result<(), MoveError> {
        if mov.player != game.to_move() {
            Err(MoveError::WrongPlayer(mov.player))
        } else {
            Ok(())
        }
    }
}

/// Composite precondition: A move is legal if the square is empty and it's the player's turn.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &GameInProgress) -> Result<(), MoveError> {
        SquareIsEmpty::check(mov, game)?;
        PlayersTurn::check(mov, game)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move actions.
///
/// Preconditions:
/// - Square must be empty
/// - Must be player's turn
///
/// Postconditions:
/// - Mark counts still alternate
/// - History remains consistent with board
pub struct MoveContract;

impl Contract<GameInProgress, Move> for MoveContract {
    fn pre(game: &GameInProgress, action: &Move) -> Result<(), MoveError> {
        LegalMove::check(action, game)
    }

    fn post(before: &GameInProgress, after: &GameInProgress) -> Result<(), MoveError> {
        let mut violations = Vec::new();
        if !BoardConsistent::holds(after.board()) {
            violations.push("mark counts no longer alternate");
        }
        if !HistoryComplete::holds(after) {
            violations.push("history does not match occupied squares");
        }
        if after.history().len() != before.history().len() + 1 {
            violations.push("exactly one move must be recorded");
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(MoveError::InvariantViolation(format!(
                "Postcondition failed: {}",
                violations.join("; ")
            )))
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Board Invariants
// ─────────────────────────────────────────────────────────────

/// Invariant: X moves first and players alternate (X count minus O count is 0 or 1).
pub struct BoardConsistent;

impl BoardConsistent {
    /// Whether the mark counts alternate.
    #[instrument(skip(board))]
    pub fn holds(board: &Board) -> bool {
        let x_count = board.count(Player::X);
        let o_count = board.count(Player::O);

        let valid = x_count == o_count || x_count == o_count + 1;
        if !valid {
            warn!(x_count, o_count, "Board consistency violated");
        }
        valid
    }
}

/// Invariant: History length matches filled squares.
pub struct HistoryComplete;

impl HistoryComplete {
    /// Whether every occupied square has a recorded move.
    #[instrument(skip(game))]
    pub fn holds(game: &GameInProgress) -> bool {
        let filled = game
            .board()
            .squares()
            .iter()
            .filter(|s| !matches!(s, Square::Empty))
            .count();
        let history_len = game.history().len();

        let valid = filled == history_len;
        if !valid {
            warn!(filled, history_len, "History completeness violated");
        }
        valid
    }
}

// ─────────────────────────────────────────────────────────────
//  Selection Contract
// ─────────────────────────────────────────────────────────────

/// Precondition for asking the selector for a move.
///
/// The board must be reachable by alternating play, not finished, and
/// `player` must be the side to move.
pub struct SelectionContract;

impl SelectionContract {
    /// Validates a selection request.
    #[instrument(skip(board))]
    pub fn check(board: &Board, player: Player) -> Result<(), SelectError> {
        if !BoardConsistent::holds(board) {
            return Err(SelectError::Malformed(format!(
                "{} X marks and {} O marks",
                board.count(Player::X),
                board.count(Player::O)
            )));
        }

        let x_won = LINES.iter().any(|l| is_line_won(board, l, Player::X));
        let o_won = LINES.iter().any(|l| is_line_won(board, l, Player::O));
        if x_won && o_won {
            return Err(SelectError::Malformed("both players completed a line".to_string()));
        }

        if is_terminal(board) {
            return Err(SelectError::Terminal);
        }

        match board.side_to_move() {
            Some(expected) if expected == player => Ok(()),
            Some(expected) => Err(SelectError::NotPlayersTurn {
                expected,
                requested: player,
            }),
            None => Err(SelectError::Malformed("no side to move".to_string())),
        }
    }
}
