//! Command-line interface for the unbeatable engine.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use unbeatable::Player;

/// Unbeatable - rule-based tic-tac-toe that never loses
#[derive(Parser, Debug)]
#[command(name = "unbeatable")]
#[command(about = "Rule-based tic-tac-toe engine that never loses", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Which players are seated at the terminal.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// Play X and move first
    X,
    /// Play O and move second
    O,
    /// Two humans take turns; the engine sits out
    Both,
}

impl Side {
    /// Players whose moves are read from the terminal.
    pub fn humans(self) -> &'static [Player] {
        match self {
            Side::X => &[Player::X],
            Side::O => &[Player::O],
            Side::Both => &[Player::X, Player::O],
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play on the terminal against the engine or another human
    Play {
        /// Side the human plays (`both` for two humans)
        #[arg(long, value_enum, default_value = "x")]
        human: Side,

        /// Seed for the engine's tie-breaks
        #[arg(long)]
        seed: Option<u64>,

        /// Path to engine configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Let the engine play against itself
    Simulate {
        /// Number of games (defaults to the config value)
        #[arg(short, long)]
        games: Option<usize>,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Path to engine configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Only print the summary
        #[arg(short, long)]
        quiet: bool,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check exhaustively that the engine never loses
    Verify {
        /// Print the reports as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the rule and candidate cells for a board
    Suggest {
        /// Board as nine squares, e.g. "x...o...." (x, o, and . for empty)
        board: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_play_defaults() {
        let cli = Cli::try_parse_from(["unbeatable", "play"]).expect("valid args");
        match cli.command {
            Command::Play { human, seed, config } => {
                assert_eq!(human, Side::X);
                assert_eq!(seed, None);
                assert!(config.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_simulate_flags() {
        let cli = Cli::try_parse_from([
            "unbeatable", "simulate", "--games", "5", "--seed", "9", "--quiet", "--json",
        ])
        .expect("valid args");
        match cli.command {
            Command::Simulate { games, seed, quiet, json, .. } => {
                assert_eq!(games, Some(5));
                assert_eq!(seed, Some(9));
                assert!(quiet && json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_human_side() {
        let cli = Cli::try_parse_from(["unbeatable", "play", "--human", "o"]).expect("valid args");
        assert!(matches!(cli.command, Command::Play { human: Side::O, .. }));
        assert_eq!(Side::O.humans(), &[Player::O]);
    }

    #[test]
    fn test_parse_two_humans() {
        let cli = Cli::try_parse_from(["unbeatable", "play", "--human", "both"]).expect("valid args");
        match cli.command {
            Command::Play { human, .. } => {
                assert_eq!(human, Side::Both);
                assert_eq!(human.humans(), &[Player::X, Player::O]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
