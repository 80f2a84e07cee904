//! Game logs and the statistics accumulator.

use crate::symmetry::{canonical_board, canonical_sequence};
use crate::typestate::{GameFinished, Outcome};
use crate::{Board, Move, Player, Position};
use derive_getters::Getters;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// Compact record of one finished game.
///
/// Displays as the move tokens joined by dashes, followed by the result:
/// `x5-o1-x9-o3-x2-o8-x6-o4-x7-draw!` or `x1-o2-x5-o3-x9-x_won!`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveLog {
    moves: Vec<Move>,
    outcome: Outcome,
}

impl MoveLog {
    /// Creates a log from the moves of a finished game.
    pub fn new(moves: Vec<Move>, outcome: Outcome) -> Self {
        Self { moves, outcome }
    }

    /// The moves in play order.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// How the game ended.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Cells in play order.
    pub fn positions(&self) -> Vec<Position> {
        self.moves.iter().map(|m| m.position).collect()
    }
}

impl From<&GameFinished> for MoveLog {
    fn from(game: &GameFinished) -> Self {
        Self::new(game.history().to_vec(), *game.outcome())
    }
}

impl std::fmt::Display for MoveLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for mov in &self.moves {
            write!(f, "{}-", mov.token())?;
        }
        match self.outcome {
            Outcome::Winner(player) => write!(f, "{}_won!", player.symbol()),
            Outcome::Draw => write!(f, "draw!"),
        }
    }
}

/// Statistics over a batch of games.
///
/// Owned by whoever drives the games: each recorded game consumes the
/// accumulator and returns the updated one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct GameStats {
    /// Games recorded.
    games: usize,
    /// Games won by X.
    x_wins: usize,
    /// Games won by O.
    o_wins: usize,
    /// Drawn games.
    draws: usize,
    /// Move sequences, reduced to one representative per symmetry class.
    sequences: BTreeSet<Vec<Position>>,
    /// Final boards, reduced to one representative per symmetry class.
    final_boards: BTreeSet<Board>,
}

impl GameStats {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one finished game.
    #[instrument(skip(self, game), fields(outcome = %game.outcome()))]
    pub fn record(self, game: &GameFinished) -> Self {
        let positions: Vec<Position> = game.history().iter().map(|m| m.position).collect();
        self.record_parts(&positions, game.board(), *game.outcome())
    }

    /// Adds one finished game given its cells, final board and outcome.
    pub fn record_parts(mut self, positions: &[Position], board: &Board, outcome: Outcome) -> Self {
        self.games += 1;
        match outcome {
            Outcome::Winner(Player::X) => self.x_wins += 1,
            Outcome::Winner(Player::O) => self.o_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
        if self.sequences.insert(canonical_sequence(positions)) {
            debug!(distinct = self.sequences.len(), "New game shape");
        }
        self.final_boards.insert(canonical_board(board));
        self
    }

    /// Combines two accumulators.
    pub fn merge(mut self, other: GameStats) -> Self {
        self.games += other.games;
        self.x_wins += other.x_wins;
        self.o_wins += other.o_wins;
        self.draws += other.draws;
        self.sequences.extend(other.sequences);
        self.final_boards.extend(other.final_boards);
        self
    }

    /// Games won by `player`.
    pub fn wins(&self, player: Player) -> usize {
        match player {
            Player::X => self.x_wins,
            Player::O => self.o_wins,
        }
    }

    /// Number of symmetry-distinct move sequences.
    pub fn distinct_games(&self) -> usize {
        self.sequences.len()
    }

    /// Number of symmetry-distinct final boards.
    pub fn distinct_final_boards(&self) -> usize {
        self.final_boards.len()
    }

    /// Serializable snapshot for reports.
    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            games: self.games,
            x_wins: self.x_wins,
            o_wins: self.o_wins,
            draws: self.draws,
            distinct_games: self.distinct_games(),
            distinct_final_boards: self.distinct_final_boards(),
            final_boards: self.final_boards.iter().map(Board::to_compact).collect(),
        }
    }
}

/// Counts reported by [`GameStats::summary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsSummary {
    /// Games recorded.
    pub games: usize,
    /// Games won by X.
    pub x_wins: usize,
    /// Games won by O.
    pub o_wins: usize,
    /// Drawn games.
    pub draws: usize,
    /// Symmetry-distinct move sequences.
    pub distinct_games: usize,
    /// Symmetry-distinct final boards.
    pub distinct_final_boards: usize,
    /// The distinct final boards in compact form.
    pub final_boards: Vec<String>,
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rows = [
            ("games", self.games),
            ("x wins", self.x_wins),
            ("o wins", self.o_wins),
            ("draws", self.draws),
            ("distinct games", self.distinct_games),
            ("distinct final boards", self.distinct_final_boards),
        ];
        for (i, (label, value)) in rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{:<22} {}", format!("{label}:"), value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moves(cells: &[(Player, Position)]) -> Vec<Move> {
        cells.iter().map(|&(p, pos)| Move::new(p, pos)).collect()
    }

    #[test]
    fn test_log_format_draw() {
        use Position::*;
        let log = MoveLog::new(
            moves(&[
                (Player::X, Center),
                (Player::O, TopLeft),
                (Player::X, BottomRight),
            ]),
            Outcome::Draw,
        );
        assert_eq!(log.to_string(), "x5-o1-x9-draw!");
    }

    #[test]
    fn test_log_format_win() {
        use Position::*;
        let log = MoveLog::new(
            moves(&[(Player::X, TopLeft), (Player::O, Center)]),
            Outcome::Winner(Player::X),
        );
        assert_eq!(log.to_string(), "x1-o5-x_won!");
    }

    #[test]
    fn test_record_collapses_symmetric_games() {
        use Position::*;
        let board: Board = "xoxxoooxx".parse().expect("valid board");
        let mirrored: Board = "xoxooxxxo".parse().expect("valid board");

        let stats = GameStats::new()
            .record_parts(&[TopLeft, Center], &board, Outcome::Draw)
            .record_parts(&[TopRight, Center], &mirrored, Outcome::Draw)
            .record_parts(&[TopCenter, Center], &board, Outcome::Winner(Player::O));

        assert_eq!(*stats.games(), 3);
        assert_eq!(*stats.draws(), 2);
        assert_eq!(stats.wins(Player::O), 1);
        assert_eq!(stats.distinct_games(), 2);
        assert_eq!(stats.distinct_final_boards(), 1);
    }

    #[test]
    fn test_merge_adds_counts() {
        let board = Board::new();
        let a = GameStats::new().record_parts(&[Position::Center], &board, Outcome::Draw);
        let b = GameStats::new().record_parts(&[Position::TopLeft], &board, Outcome::Winner(Player::X));
        let merged = a.merge(b);
        assert_eq!(*merged.games(), 2);
        assert_eq!(merged.wins(Player::X), 1);
        assert_eq!(merged.summary().distinct_games, 2);
    }

    #[test]
    fn test_summary_serializes() {
        let board: Board = "xoxxoooxx".parse().expect("valid board");
        let stats = GameStats::new().record_parts(&[Position::TopLeft], &board, Outcome::Draw);
        let json = serde_json::to_value(stats.summary()).expect("serializable");
        assert_eq!(json["games"], 1);
        assert_eq!(json["draws"], 1);
        assert_eq!(json["final_boards"].as_array().map(Vec::len), Some(1));
    }
}
