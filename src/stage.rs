//! The stage: the fixed-size drawing surface every scene and level lives on.
//!
//! `Stage` is read-only context. Scenes receive it through
//! [`crate::scene::SceneContext`], actors receive it in `update`, and entities
//! keep a shared [`StageRef`] so level validation can confirm they were built
//! for a stage at all.

#[cfg(test)]
#[path = "stage_test.rs"]
mod stage_test;

use std::rc::Rc;

use crate::config::{ConfigError, StageConfig};
use crate::consts::TILE_SIZE;

/// Shared handle to a stage.
pub type StageRef = Rc<Stage>;

/// Fixed stage geometry and settings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stage {
    config: StageConfig,
}

impl Stage {
    /// Build a stage from a validated config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDimension`] for a zero-sized stage.
    pub fn new(config: StageConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Build a shared stage handle.
    ///
    /// # Errors
    ///
    /// Same as [`Stage::new`].
    pub fn shared(config: StageConfig) -> Result<StageRef, ConfigError> {
        Self::new(config).map(Rc::new)
    }

    #[must_use]
    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    /// Width in tiles.
    #[must_use]
    pub fn width_tiles(&self) -> usize {
        self.config.width_tiles
    }

    /// Height in tiles.
    #[must_use]
    pub fn height_tiles(&self) -> usize {
        self.config.height_tiles
    }

    /// Width in pixels.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn width(&self) -> f64 {
        self.config.width_tiles as f64 * TILE_SIZE
    }

    /// Height in pixels.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn height(&self) -> f64 {
        self.config.height_tiles as f64 * TILE_SIZE
    }

    #[must_use]
    pub fn screenshot_key(&self) -> &str {
        &self.config.screenshot_key
    }

    #[must_use]
    pub fn background(&self) -> &str {
        &self.config.background
    }
}
