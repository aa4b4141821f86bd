//! Application configuration with documented defaults
//!
//! Paths and game-tracking limits are collected here. Values come from an
//! optional TOML file; anything the file omits falls back to the defaults.

use crate::core::error::{Result, RosterError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Limits and starting values for the per-game counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameDefaults {
    /// Turning point a fresh game starts on
    pub initial_turning_point: u32,

    /// Lowest turning point the tracker allows
    pub min_turning_point: u32,

    /// Highest turning point the tracker allows
    ///
    /// A standard game lasts four turning points.
    pub max_turning_point: u32,

    /// Command points each side starts with
    pub initial_command_points: u32,

    /// Command points can never drop below this
    pub min_command_points: u32,

    /// Upper bound on banked command points
    pub max_command_points: u32,
}

impl Default for GameDefaults {
    fn default() -> Self {
        Self {
            initial_turning_point: 1,
            min_turning_point: 1,
            max_turning_point: 4,
            initial_command_points: 0,
            min_command_points: 0,
            max_command_points: 20,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding `factions/`, `weapons/` and `rules/` JSON data
    pub data_dir: PathBuf,

    /// Directory the file-backed key/value store writes into
    pub storage_dir: PathBuf,

    /// Game tracking limits
    pub game: GameDefaults,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            storage_dir: PathBuf::from(".kt-roster"),
            game: GameDefaults::default(),
        }
    }
}

impl AppConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let game = &self.game;

        if game.min_turning_point > game.max_turning_point {
            return Err(RosterError::InvalidConfig(format!(
                "min_turning_point ({}) should be <= max_turning_point ({})",
                game.min_turning_point, game.max_turning_point
            )));
        }

        if !(game.min_turning_point..=game.max_turning_point)
            .contains(&game.initial_turning_point)
        {
            return Err(RosterError::InvalidConfig(format!(
                "initial_turning_point ({}) outside {}..={}",
                game.initial_turning_point, game.min_turning_point, game.max_turning_point
            )));
        }

        if game.min_command_points > game.max_command_points {
            return Err(RosterError::InvalidConfig(format!(
                "min_command_points ({}) should be <= max_command_points ({})",
                game.min_command_points, game.max_command_points
            )));
        }

        if !(game.min_command_points..=game.max_command_points)
            .contains(&game.initial_command_points)
        {
            return Err(RosterError::InvalidConfig(format!(
                "initial_command_points ({}) outside {}..={}",
                game.initial_command_points, game.min_command_points, game.max_command_points
            )));
        }

        Ok(())
    }
}
