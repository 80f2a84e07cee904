//! Engine configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Tunable engine settings.
///
/// ```toml
/// center_opening_probability = 0.2
/// seed = 42
/// games = 100
/// ```
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Probability that the first mover opens in the center.
    #[serde(default = "default_center_opening_probability")]
    center_opening_probability: f64,

    /// Seed for the tie-break RNG; entropy when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// Number of games a simulation plays.
    #[serde(default = "default_games")]
    games: usize,
}

fn default_center_opening_probability() -> f64 {
    0.2
}

fn default_games() -> usize {
    100
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            center_opening_probability: default_center_opening_probability(),
            seed: None,
            games: default_games(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(
            center_opening_probability = config.center_opening_probability,
            games = config.games,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = self.center_opening_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::new(format!(
                "center_opening_probability must be within 0.0..=1.0, got {}",
                p
            )));
        }
        Ok(())
    }

    /// Overrides the opening probability.
    pub fn with_center_opening_probability(mut self, p: f64) -> Self {
        self.center_opening_probability = p;
        self
    }

    /// Overrides the seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Overrides the number of simulated games.
    pub fn with_games(mut self, games: usize) -> Self {
        self.games = games;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error at the caller's location.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
