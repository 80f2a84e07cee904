//! Unbeatable - terminal front end
//!
//! Human play, bot-vs-bot simulation, exhaustive verification and
//! single-board suggestions.

#![warn(missing_docs)]

mod cli;
mod terminal;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command, Side};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::path::Path;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;
use unbeatable::{
    Board, EngineConfig, GameStats, MoveLog, MoveSelector, Opening, StatsSummary, Verification,
    candidates, enumerate_self_play, needs_opening_choice, play_game, verify_never_loses,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            human,
            seed,
            config,
        } => run_play(human, seed, config.as_deref()),
        Command::Simulate {
            games,
            seed,
            config,
            quiet,
            json,
        } => run_simulate(games, seed, config.as_deref(), quiet, json),
        Command::Verify { json } => run_verify(json),
        Command::Suggest { board } => run_suggest(&board),
    }
}

/// Loads the config file when given; defaults otherwise.
fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => Ok(EngineConfig::from_file(path)?),
        None => Ok(EngineConfig::default()),
    }
}

fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Terminal game on stdin/stdout; the engine plays any side not seated.
#[instrument]
fn run_play(human: Side, seed: Option<u64>, config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let selector = MoveSelector::from_config(&config);
    let mut rng = rng_for(seed.or(*config.seed()));

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    let log = terminal::play(&selector, human.humans(), &mut rng, &mut input, &mut output)?;
    info!(%log, "Finished");
    Ok(())
}

/// Bot-vs-bot games with an optional move log per game.
#[instrument]
fn run_simulate(
    games: Option<usize>,
    seed: Option<u64>,
    config: Option<&Path>,
    quiet: bool,
    json: bool,
) -> Result<()> {
    let config = load_config(config)?;
    let games = games.unwrap_or(*config.games());
    let selector = MoveSelector::from_config(&config);
    let mut rng = rng_for(seed.or(*config.seed()));

    let mut stats = GameStats::new();
    for _ in 0..games {
        let finished = play_game(&selector, &mut rng)?;
        if !quiet {
            println!("{}", MoveLog::from(&finished));
        }
        stats = stats.record(&finished);
    }

    let summary = stats.summary();
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary);
    }
    Ok(())
}

#[derive(Serialize)]
struct VerifyReport {
    as_x: Verification,
    as_o: Verification,
    self_play: StatsSummary,
}

/// Exhaustive never-lose check; fails when any game is lost.
#[instrument]
fn run_verify(json: bool) -> Result<()> {
    let report = VerifyReport {
        as_x: verify_never_loses(unbeatable::Player::X)?,
        as_o: verify_never_loses(unbeatable::Player::O)?,
        self_play: enumerate_self_play()?.summary(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for (name, v) in [("as X", &report.as_x), ("as O", &report.as_o)] {
            println!(
                "{name}: {} games, {} wins, {} draws, {} losses",
                v.games, v.wins, v.draws, v.losses
            );
        }
        println!("self-play:\n{}", report.self_play);
    }

    let losses = report.as_x.losses + report.as_o.losses;
    if losses > 0 {
        bail!("Engine lost {} games", losses);
    }
    Ok(())
}

/// Prints the firing rule and candidate cells (1-based) for a board.
#[instrument]
fn run_suggest(board: &str) -> Result<()> {
    let board: Board = board.parse().context("Invalid board")?;
    let player = board
        .side_to_move()
        .context("Board cannot arise from alternating play")?;

    println!("{}", board.render());
    let openings: &[Opening] = if needs_opening_choice(&board, player) {
        &[Opening::Center, Opening::Corner]
    } else {
        &[Opening::Corner]
    };
    for &opening in openings {
        let decision = candidates(&board, player, opening)?;
        let cells: Vec<String> = decision
            .cells()
            .iter()
            .map(|p| p.number().to_string())
            .collect();
        println!("Player {}: {} -> {}", player.symbol(), decision.rule(), cells.join(", "));
    }
    Ok(())
}
