//! Stage configuration: size in tiles, screenshot key and background color.
//!
//! Values come from, in order of preference, a JSON document
//! ([`StageConfig::from_json`]), environment variables
//! ([`StageConfig::from_env`]), or the compiled-in defaults. Missing JSON
//! fields and unset or unparsable environment variables fall back to the
//! defaults in [`crate::consts`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::consts::{
    DEFAULT_BACKGROUND, DEFAULT_SCREENSHOT_KEY, DEFAULT_STAGE_HEIGHT_TILES, DEFAULT_STAGE_WIDTH_TILES,
};

/// Error returned when a stage configuration cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("invalid stage config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A stage dimension is zero.
    #[error("stage must be at least one tile in each direction (got {width_tiles}x{height_tiles})")]
    InvalidDimension { width_tiles: usize, height_tiles: usize },
}

/// Stage settings shared by every scene and level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Stage width in tiles. Levels must match it exactly.
    pub width_tiles: usize,
    /// Stage height in tiles. Levels must match it exactly.
    pub height_tiles: usize,
    /// Key name that scenes treat as "take a screenshot" by default.
    pub screenshot_key: String,
    /// CSS color the stage is cleared to before each frame.
    pub background: String,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            width_tiles: DEFAULT_STAGE_WIDTH_TILES,
            height_tiles: DEFAULT_STAGE_HEIGHT_TILES,
            screenshot_key: DEFAULT_SCREENSHOT_KEY.to_string(),
            background: DEFAULT_BACKGROUND.to_string(),
        }
    }
}

impl StageConfig {
    /// Parse a config from JSON. Absent fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::InvalidDimension`] for a zero-sized stage.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Build a config from environment variables.
    ///
    /// - `TILESTAGE_WIDTH_TILES`: default 20
    /// - `TILESTAGE_HEIGHT_TILES`: default 15
    /// - `TILESTAGE_SCREENSHOT_KEY`: default `F9`
    /// - `TILESTAGE_BACKGROUND`: default `#000000`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDimension`] for a zero-sized stage.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            width_tiles: env_parse("TILESTAGE_WIDTH_TILES", DEFAULT_STAGE_WIDTH_TILES),
            height_tiles: env_parse("TILESTAGE_HEIGHT_TILES", DEFAULT_STAGE_HEIGHT_TILES),
            screenshot_key: env_parse("TILESTAGE_SCREENSHOT_KEY", DEFAULT_SCREENSHOT_KEY.to_string()),
            background: env_parse("TILESTAGE_BACKGROUND", DEFAULT_BACKGROUND.to_string()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDimension`] when either dimension is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width_tiles == 0 || self.height_tiles == 0 {
            return Err(ConfigError::InvalidDimension { width_tiles: self.width_tiles, height_tiles: self.height_tiles });
        }
        Ok(())
    }
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    let Ok(raw) = std::env::var(key) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            warn!(%key, value = %raw, "unparsable config value; using default");
            default
        }
    }
}
