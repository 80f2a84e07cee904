//! Ranked move selection.
//!
//! The selector walks a fixed list of rules and stops at the first one that
//! yields candidate cells:
//!
//! 1. **Win**: complete one of our own two-in-a-rows.
//! 2. **Block**: occupy the cell completing an opponent two-in-a-row.
//! 3. **Fork**: create two threats at once.
//! 4. **Block fork**: if the opponent has exactly one fork cell, take it;
//!    with several, build a two-in-a-row whose forced answer does not land
//!    on one of their fork cells.
//! 5. **Center**: take the center. On the very first move of the game it is
//!    taken only with a configurable probability, a corner otherwise.
//! 6. **Opposite corner**: mirror an opponent corner.
//! 7. **Empty corner**.
//! 8. **Empty side**.
//!
//! The ranking is deterministic; only the final pick among equally ranked
//! cells (and the opening choice) draws from a caller-owned RNG.

use crate::config::EngineConfig;
use crate::contracts::SelectionContract;
use crate::patterns::{CENTER, CORNER_PAIRS, CORNERS, LINES, SIDES};
use crate::threats::{completing_cells, completing_cells_avoiding, open_forks};
use crate::{Board, Player, Position};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, error, instrument};

/// The rule that produced a decision, in priority order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, derive_more::Display,
)]
pub enum Rule {
    /// Complete three in a row.
    #[display("win")]
    Win,
    /// Stop the opponent's three in a row.
    #[display("block")]
    Block,
    /// Create two threats at once.
    #[display("fork")]
    Fork,
    /// Take the opponent's only fork cell.
    #[display("block fork")]
    BlockFork,
    /// Force the opponent to defend away from their fork cells.
    #[display("force defense")]
    ForceDefense,
    /// Take the center.
    #[display("center")]
    Center,
    /// Mirror an opponent corner.
    #[display("opposite corner")]
    OppositeCorner,
    /// Take any corner.
    #[display("empty corner")]
    EmptyCorner,
    /// Take any side.
    #[display("empty side")]
    EmptySide,
}

/// How the first mover opens when the center is still free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opening {
    /// Take the center.
    Center,
    /// Skip the center rule; a corner follows.
    Corner,
}

/// The rule that fired and every cell it considers equally good.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    rule: Rule,
    cells: Vec<Position>,
}

impl Decision {
    fn new(rule: Rule, cells: impl IntoIterator<Item = Position>) -> Self {
        let mut cells: Vec<Position> = cells.into_iter().collect();
        cells.sort_unstable();
        cells.dedup();
        Self { rule, cells }
    }

    /// The rule that produced the candidates.
    pub fn rule(&self) -> Rule {
        self.rule
    }

    /// Candidate cells in index order.
    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    /// Picks one candidate uniformly at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Position> {
        self.cells.choose(rng).copied()
    }
}

/// Why the selector could not move.
///
/// Every variant but [`SelectError::NoCandidates`] is a usage error: the
/// selector was asked to move on a board it cannot move on.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SelectError {
    /// Someone already won or every square is taken.
    #[display("Board is terminal")]
    Terminal,
    /// Mark counts or winners cannot arise from alternating play.
    #[display("Malformed board: {}", _0)]
    Malformed(String),
    /// The board says the other player is to move.
    #[display("It's {:?}'s turn, not {:?}'s", expected, requested)]
    NotPlayersTurn {
        /// The side to move according to the board.
        expected: Player,
        /// The player the selector was asked to move for.
        requested: Player,
    },
    /// No rule produced a candidate on a board that passed the selection
    /// checks. The center, corner and side rules together cover every empty
    /// cell, so this is an engine bug and never a usage error.
    #[display("Engine bug: no rule produced a candidate cell")]
    NoCandidates,
}

impl std::error::Error for SelectError {}

/// Whether the opening choice applies: the center is free and the opponent
/// has not marked anything yet.
pub fn needs_opening_choice(board: &Board, player: Player) -> bool {
    board.is_empty(Position::Center) && board.count(player.opponent()) == 0
}

/// Runs the ranked rules and returns the first non-empty candidate set.
///
/// Deterministic for a given board, player and opening.
#[instrument(skip(board), fields(board = %board))]
pub fn candidates(board: &Board, player: Player, opening: Opening) -> Result<Decision, SelectError> {
    SelectionContract::check(board, player)?;
    let decision = decide(board, player, opening);
    debug!(rule = %decision.rule, cells = ?decision.cells, "Rule fired");
    debug_assert!(!decision.cells.is_empty(), "no candidate on {board}");
    if decision.cells.is_empty() {
        error!(%board, %player, "No rule produced a candidate");
        return Err(SelectError::NoCandidates);
    }
    Ok(decision)
}

/// Every cell the selector might return for this board, across both
/// openings and every tie-break.
#[instrument(skip(board), fields(board = %board))]
pub fn acceptable_moves(board: &Board, player: Player) -> Result<Vec<Position>, SelectError> {
    let mut cells: BTreeSet<Position> = candidates(board, player, Opening::Center)?
        .cells
        .into_iter()
        .collect();
    if needs_opening_choice(board, player) {
        cells.extend(candidates(board, player, Opening::Corner)?.cells);
    }
    Ok(cells.into_iter().collect())
}

fn decide(board: &Board, player: Player, opening: Opening) -> Decision {
    let opponent = player.opponent();
    let lines = || LINES.iter().map(|l| l.as_slice());

    let wins = completing_cells(board, lines(), player, 2);
    if !wins.is_empty() {
        return Decision::new(Rule::Win, wins);
    }

    let blocks = completing_cells(board, lines(), opponent, 2);
    if !blocks.is_empty() {
        return Decision::new(Rule::Block, blocks);
    }

    let forks = open_forks(board);
    let fork_cells = || forks.iter().map(|f| f.cells.as_slice());

    let own_forks = completing_cells(board, fork_cells(), player, 2);
    if !own_forks.is_empty() {
        return Decision::new(Rule::Fork, own_forks);
    }

    let opponent_forks = completing_cells(board, fork_cells(), opponent, 2);
    if opponent_forks.len() == 1 {
        return Decision::new(Rule::BlockFork, opponent_forks);
    }
    if opponent_forks.len() > 1 {
        let forcing = completing_cells_avoiding(board, lines(), player, &opponent_forks);
        if !forcing.is_empty() {
            return Decision::new(Rule::ForceDefense, forcing);
        }
        debug!(forks = ?opponent_forks, "No safe forcing move");
    }

    if board.is_empty(Position::Center)
        && (board.count(opponent) > 0 || opening == Opening::Center)
    {
        return Decision::new(Rule::Center, Position::from_index(CENTER));
    }

    let corner_pairs = CORNER_PAIRS.iter().map(|p| p.as_slice());
    let opposite = completing_cells(board, corner_pairs, opponent, 2);
    if !opposite.is_empty() {
        return Decision::new(Rule::OppositeCorner, opposite);
    }

    let empty_of = |cells: &[usize]| -> Vec<Position> {
        cells
            .iter()
            .filter_map(|&i| Position::from_index(i))
            .filter(|&pos| board.is_empty(pos))
            .collect()
    };

    let corners = empty_of(&CORNERS);
    if !corners.is_empty() {
        return Decision::new(Rule::EmptyCorner, corners);
    }

    Decision::new(Rule::EmptySide, empty_of(&SIDES))
}

/// Move selector with a configurable opening.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveSelector {
    center_opening_probability: f64,
}

impl MoveSelector {
    /// How often the first player opens in the center.
    pub const DEFAULT_CENTER_OPENING_PROBABILITY: f64 = 0.2;

    /// Creates a selector that opens in the center with probability `p`.
    ///
    /// `p` is clamped to `0.0..=1.0`; a non-finite value falls back to the
    /// default.
    pub fn new(center_opening_probability: f64) -> Self {
        let p = if center_opening_probability.is_finite() {
            center_opening_probability.clamp(0.0, 1.0)
        } else {
            Self::DEFAULT_CENTER_OPENING_PROBABILITY
        };
        Self {
            center_opening_probability: p,
        }
    }

    /// Creates a selector from engine settings.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(*config.center_opening_probability())
    }

    /// Probability of a center opening.
    pub fn center_opening_probability(&self) -> f64 {
        self.center_opening_probability
    }

    /// Draws the opening (only when it matters) and runs the ranked rules.
    #[instrument(skip(self, board, rng), fields(board = %board))]
    pub fn decide<R: Rng + ?Sized>(
        &self,
        board: &Board,
        player: Player,
        rng: &mut R,
    ) -> Result<Decision, SelectError> {
        let opening = if needs_opening_choice(board, player)
            && rng.random_bool(self.center_opening_probability)
        {
            Opening::Center
        } else {
            Opening::Corner
        };
        candidates(board, player, opening)
    }

    /// Chooses the cell to play.
    ///
    /// Fails only on usage errors: a terminal or malformed board, or a
    /// `player` who is not to move.
    #[instrument(skip(self, board, rng), fields(board = %board))]
    pub fn select_move<R: Rng + ?Sized>(
        &self,
        board: &Board,
        player: Player,
        rng: &mut R,
    ) -> Result<Position, SelectError> {
        let decision = self.decide(board, player, rng)?;
        let pos = decision.choose(rng).ok_or(SelectError::NoCandidates)?;
        debug!(rule = %decision.rule, position = %pos, "Selected move");
        Ok(pos)
    }
}

impl Default for MoveSelector {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CENTER_OPENING_PROBABILITY)
    }
}

/// Chooses a cell with the default selector.
pub fn select_move<R: Rng + ?Sized>(
    board: &Board,
    player: Player,
    rng: &mut R,
) -> Result<Position, SelectError> {
    MoveSelector::default().select_move(board, player, rng)
}
