//! Unbeatable tic-tac-toe engine.
//!
//! Given a board and the side to move, the engine picks a cell by walking a
//! fixed ranking of rules (win, block, fork, block fork, center, opposite
//! corner, empty corner, empty side). Played correctly it never loses.
//!
//! # Architecture
//!
//! - **Board model**: [`Board`], [`Player`], [`Position`] and the win/draw rules
//! - **Patterns**: the line, corner-pair and fork tables ([`patterns`]),
//!   checked against their symmetry derivation ([`symmetry`])
//! - **Threats**: which cells complete a line or fork ([`threats`])
//! - **Selector**: the ranked rules ([`MoveSelector`], [`candidates`])
//! - **Games**: typestate game phases, self-play and statistics
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use unbeatable::{Board, MoveSelector, Player, Position};
//!
//! let board: Board = "xx..o....".parse()?;
//! let mut rng = StdRng::seed_from_u64(7);
//! let cell = MoveSelector::default().select_move(&board, Player::O, &mut rng)?;
//! assert_eq!(cell, Position::TopRight);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod config;
pub mod contracts;
pub mod patterns;
mod position;
pub mod rules;
mod selector;
mod simulation;
mod stats;
pub mod symmetry;
pub mod threats;
mod types;
mod typestate;

// Crate-level exports - Board model
pub use position::Position;
pub use types::{Board, BoardParseError, Marks, Player, Square};

// Crate-level exports - Actions
pub use action::{Move, MoveError};

// Crate-level exports - Move selection
pub use selector::{
    Decision, MoveSelector, Opening, Rule, SelectError, acceptable_moves, candidates,
    needs_opening_choice, select_move,
};

// Crate-level exports - Game phases
pub use typestate::{GameFinished, GameInProgress, GameResult, GameSetup, Outcome};

// Crate-level exports - Simulation and statistics
pub use simulation::{
    SimulationError, Verification, enumerate_self_play, play_game, play_self_game, simulate,
    verify_never_loses,
};
pub use stats::{GameStats, MoveLog, StatsSummary};

// Crate-level exports - Configuration
pub use config::{ConfigError, EngineConfig};
