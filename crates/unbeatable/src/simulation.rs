//! Bot-vs-bot play and exhaustive checks.

use crate::action::MoveError;
use crate::selector::{MoveSelector, SelectError, acceptable_moves};
use crate::stats::GameStats;
use crate::typestate::{GameFinished, GameInProgress, GameResult, GameSetup};
use crate::Player;
use derive_more::{Display, Error, From};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// Failure while driving a game.
///
/// The engine never produces an illegal move on a legal board, so either
/// variant indicates a bug.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum SimulationError {
    /// The selector refused the board.
    #[display("Selection failed: {}", _0)]
    Select(SelectError),
    /// The game rejected the selected move.
    #[display("Move rejected: {}", _0)]
    Move(MoveError),
}

/// Plays one game with the selector on both sides.
#[instrument(skip_all)]
pub fn play_game<R: Rng + ?Sized>(
    selector: &MoveSelector,
    rng: &mut R,
) -> Result<GameFinished, SimulationError> {
    let mut game = GameSetup::new().start();
    loop {
        let position = selector.select_move(game.board(), game.to_move(), rng)?;
        match game.play(position)? {
            GameResult::InProgress(next) => game = next,
            GameResult::Finished(done) => return Ok(done),
        }
    }
}

/// Plays one self-play game and records it.
pub fn play_self_game<R: Rng + ?Sized>(
    selector: &MoveSelector,
    stats: GameStats,
    rng: &mut R,
) -> Result<GameStats, SimulationError> {
    let finished = play_game(selector, rng)?;
    Ok(stats.record(&finished))
}

/// Plays `games` self-play games.
///
/// With a seed the run is reproducible; without one the RNG is seeded from
/// the operating system.
#[instrument(skip(selector))]
pub fn simulate(
    selector: &MoveSelector,
    games: usize,
    seed: Option<u64>,
) -> Result<GameStats, SimulationError> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut stats = GameStats::new();
    for _ in 0..games {
        stats = play_self_game(selector, stats, &mut rng)?;
    }
    info!(
        games = stats.games(),
        distinct = stats.distinct_games(),
        "Simulation finished"
    );
    Ok(stats)
}

/// Plays every game the selector can produce against itself.
///
/// At each turn every acceptable cell is tried, including both opening
/// choices, so the result covers every outcome of any seed.
#[instrument]
pub fn enumerate_self_play() -> Result<GameStats, SimulationError> {
    let stats = explore_self_play(GameSetup::new().start(), GameStats::new())?;
    info!(
        games = stats.games(),
        distinct = stats.distinct_games(),
        boards = stats.distinct_final_boards(),
        "Self-play enumerated"
    );
    Ok(stats)
}

fn explore_self_play(game: GameInProgress, mut stats: GameStats) -> Result<GameStats, SimulationError> {
    for position in acceptable_moves(game.board(), game.to_move())? {
        stats = match game.clone().play(position)? {
            GameResult::InProgress(next) => explore_self_play(next, stats)?,
            GameResult::Finished(done) => stats.record(&done),
        };
    }
    Ok(stats)
}

/// Result of an exhaustive never-lose check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verification {
    /// The side the engine played.
    pub side: Player,
    /// Complete games explored.
    pub games: usize,
    /// Games the engine won.
    pub wins: usize,
    /// Drawn games.
    pub draws: usize,
    /// Games the engine lost.
    pub losses: usize,
}

impl Verification {
    /// True when no explored game was lost.
    pub fn never_lost(&self) -> bool {
        self.losses == 0
    }
}

/// Plays the engine as `side` against an opponent that tries every empty
/// cell, following every acceptable engine reply.
#[instrument]
pub fn verify_never_loses(side: Player) -> Result<Verification, SimulationError> {
    let mut report = Verification {
        side,
        games: 0,
        wins: 0,
        draws: 0,
        losses: 0,
    };
    explore_against_all(GameSetup::new().start(), side, &mut report)?;
    info!(
        games = report.games,
        losses = report.losses,
        "Never-lose check finished"
    );
    Ok(report)
}

fn explore_against_all(
    game: GameInProgress,
    side: Player,
    report: &mut Verification,
) -> Result<(), SimulationError> {
    let cells = if game.to_move() == side {
        acceptable_moves(game.board(), side)?
    } else {
        game.valid_moves()
    };

    for position in cells {
        match game.clone().play(position)? {
            GameResult::InProgress(next) => explore_against_all(next, side, report)?,
            GameResult::Finished(done) => {
                report.games += 1;
                match done.outcome().winner() {
                    Some(winner) if winner == side => report.wins += 1,
                    Some(_) => {
                        report.losses += 1;
                        warn!(board = %done.board(), "Engine lost");
                    }
                    None => report.draws += 1,
                }
            }
        }
    }
    debug!(games = report.games, "Subtree explored");
    Ok(())
}
