//! Sprite sheets and frame-sequenced animations.
//!
//! Only the interface actors and tiles consume lives here: a sheet knows how
//! its image is sliced, and an animation list turns a frame tick into a sprite
//! index. Loading the image itself is the renderer's business.

#[cfg(test)]
#[path = "sprite_test.rs"]
mod sprite_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::collision::Rect;

/// A grid of equally sized sprites cut from one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteSheet {
    /// Renderer-side identifier of the source image.
    pub image: String,
    /// Width of one sprite in pixels.
    pub sprite_width: f64,
    /// Height of one sprite in pixels.
    pub sprite_height: f64,
    /// Sprites per row in the source image.
    pub columns: usize,
    /// Total number of sprites on the sheet.
    pub count: usize,
}

impl SpriteSheet {
    #[must_use]
    pub fn new(image: impl Into<String>, sprite_width: f64, sprite_height: f64, columns: usize, count: usize) -> Self {
        Self { image: image.into(), sprite_width, sprite_height, columns, count }
    }

    /// Whether `index` names a sprite on this sheet.
    #[must_use]
    pub fn is_valid_index(&self, index: usize) -> bool {
        self.columns > 0 && index < self.count
    }

    /// Source rectangle of sprite `index` within the sheet image.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn source_rect(&self, index: usize) -> Option<Rect> {
        if !self.is_valid_index(index) {
            return None;
        }
        let col = index % self.columns;
        let row = index / self.columns;
        Some(Rect::new(
            col as f64 * self.sprite_width,
            row as f64 * self.sprite_height,
            self.sprite_width,
            self.sprite_height,
        ))
    }
}

/// A sequence of sprite indices shown for a fixed number of ticks each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animation {
    pub frames: Vec<usize>,
    pub ticks_per_frame: u64,
    #[serde(default = "looping_default")]
    pub looping: bool,
}

fn looping_default() -> bool {
    true
}

impl Animation {
    /// A looping animation.
    #[must_use]
    pub fn new(frames: Vec<usize>, ticks_per_frame: u64) -> Self {
        Self { frames, ticks_per_frame, looping: true }
    }

    /// An animation that holds its last frame once finished.
    #[must_use]
    pub fn once(frames: Vec<usize>, ticks_per_frame: u64) -> Self {
        Self { frames, ticks_per_frame, looping: false }
    }

    /// Sprite index shown `elapsed` ticks after the animation started.
    #[must_use]
    pub fn frame_at(&self, elapsed: u64) -> Option<usize> {
        let len = self.frames.len();
        if len == 0 {
            return None;
        }
        let step = usize::try_from(elapsed / self.ticks_per_frame.max(1)).unwrap_or(usize::MAX);
        let idx = if self.looping { step % len } else { step.min(len - 1) };
        self.frames.get(idx).copied()
    }
}

/// Named animations with at most one playing at a time.
#[derive(Debug, Clone, Default)]
pub struct AnimationList {
    animations: HashMap<String, Animation>,
    current: Option<String>,
    started_at: Option<u64>,
}

impl AnimationList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) an animation under `name`.
    pub fn add(&mut self, name: impl Into<String>, animation: Animation) {
        self.animations.insert(name.into(), animation);
    }

    /// Start playing `name` from its first frame.
    ///
    /// Playing the animation that is already current does not restart it.
    /// Returns `false` (and logs) when no animation has that name.
    pub fn play(&mut self, name: &str) -> bool {
        if !self.animations.contains_key(name) {
            warn!(animation = %name, "play: unknown animation");
            return false;
        }
        if self.current.as_deref() != Some(name) {
            self.current = Some(name.to_string());
            self.started_at = None;
        }
        true
    }

    /// Stop the current animation; `update` returns `None` until the next `play`.
    pub fn stop(&mut self) {
        self.current = None;
        self.started_at = None;
    }

    /// Name of the animation currently playing.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// Advance to `tick` and return the sprite index to show, if any.
    ///
    /// The first update after `play` anchors the animation at that tick.
    pub fn update(&mut self, tick: u64) -> Option<usize> {
        let animation = self.animations.get(self.current.as_deref()?)?;
        let start = *self.started_at.get_or_insert(tick);
        animation.frame_at(tick.saturating_sub(start))
    }
}
