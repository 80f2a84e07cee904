//! Phase-specific game types.
//!
//! Each phase is its own type: a `GameFinished` always carries an
//! outcome, a `GameInProgress` always has a side to move.

use super::action::{Move, MoveError};
use super::contracts::{Contract, MoveContract};
use super::rules::{check_winner, is_full};
use super::{Board, Player, Position, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// A player completed a line.
    Winner(Player),
    /// The board filled up without a line.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Winner(player) => Some(*player),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "Player {} won!", player.symbol()),
            Outcome::Draw => write!(f, "Draw!"),
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Setup Phase
// ─────────────────────────────────────────────────────────────

/// Game ready to start. The board is empty.
#[derive(Debug, Clone)]
pub struct GameSetup {
    board: Board,
}

impl GameSetup {
    /// Creates a new game in setup phase.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Starts the game. X always moves first.
    #[instrument(skip(self))]
    pub fn start(self) -> GameInProgress {
        GameInProgress {
            board: self.board,
            history: Vec::new(),
            to_move: Player::X,
        }
    }
}

impl Default for GameSetup {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────
//  InProgress Phase
// ─────────────────────────────────────────────────────────────

/// Game in progress: accepts moves from the side to move.
#[derive(Debug, Clone)]
pub struct GameInProgress {
    pub(crate) board: Board,
    pub(crate) history: Vec<Move>,
    pub(crate) to_move: Player,
}

impl GameInProgress {
    /// Makes a move, consuming self and transitioning to the next state.
    ///
    /// Preconditions are always checked; postconditions only in debug builds.
    #[instrument(skip(self), fields(board = %self.board))]
    pub fn make_move(self, action: Move) -> Result<GameResult, MoveError> {
        MoveContract::pre(&self, &action)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        let mut game = self;
        game.board.set(action.position, Square::Occupied(action.player));
        game.history.push(action);

        if let Some(winner) = check_winner(&game.board) {
            debug!(%winner, moves = game.history.len(), "Game won");
            return Ok(GameResult::Finished(GameFinished {
                board: game.board,
                history: game.history,
                outcome: Outcome::Winner(winner),
            }));
        }

        if is_full(&game.board) {
            debug!("Game drawn");
            return Ok(GameResult::Finished(GameFinished {
                board: game.board,
                history: game.history,
                outcome: Outcome::Draw,
            }));
        }

        game.to_move = game.to_move.opponent();

        #[cfg(debug_assertions)]
        MoveContract::post(&before, &game)?;

        Ok(GameResult::InProgress(game))
    }

    /// Places the side to move's mark at `position`.
    pub fn play(self, position: Position) -> Result<GameResult, MoveError> {
        let player = self.to_move;
        self.make_move(Move::new(player, position))
    }

    /// Returns the player to move.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the empty positions.
    #[instrument(skip(self))]
    pub fn valid_moves(&self) -> Vec<Position> {
        Position::valid_moves(&self.board)
    }

    /// Replays moves from an empty board.
    ///
    /// Moves after the game has finished are rejected with
    /// [`MoveError::GameOver`].
    #[instrument(skip(moves), fields(moves = moves.len()))]
    pub fn replay(moves: &[Move]) -> Result<GameResult, MoveError> {
        let mut game = GameSetup::new().start();

        for (i, action) in moves.iter().enumerate() {
            match game.make_move(*action)? {
                GameResult::InProgress(g) => game = g,
                GameResult::Finished(g) if i + 1 == moves.len() => {
                    return Ok(GameResult::Finished(g));
                }
                GameResult::Finished(_) => return Err(MoveError::GameOver),
            }
        }

        Ok(GameResult::InProgress(game))
    }
}

// ─────────────────────────────────────────────────────────────
//  Finished Phase
// ─────────────────────────────────────────────────────────────

/// Game finished. The outcome is always present.
#[derive(Debug, Clone)]
pub struct GameFinished {
    board: Board,
    history: Vec<Move>,
    outcome: Outcome,
}

impl GameFinished {
    /// Returns the outcome.
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Restarts the game (consumes finished, returns setup).
    #[instrument(skip(self))]
    pub fn restart(self) -> GameSetup {
        GameSetup::new()
    }
}

// ─────────────────────────────────────────────────────────────
//  Result Type
// ─────────────────────────────────────────────────────────────

/// Result of making a move.
#[derive(Debug)]
pub enum GameResult {
    /// Game continues.
    InProgress(GameInProgress),
    /// Game finished.
    Finished(GameFinished),
}
