//! Rendering boundary: the drawing primitives the engine core calls.
//!
//! The core never talks to a concrete drawing surface. Colliders, actors,
//! entities, tiles and levels draw through the [`Renderer`] trait; the browser
//! implementation lives in the `tilestage-canvas` crate. [`CommandRecorder`]
//! is the headless implementation: it records every call as a [`DrawCommand`],
//! which is what the tests and the CLI use.
//!
//! Colors are CSS color strings. Angles are degrees.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use tracing::warn;

use crate::sprite::SpriteSheet;

/// Drawing primitives over a 2D surface.
///
/// `translate_and_rotate` saves the current transform before applying the
/// new one; every call must be paired with a later `restore`.
pub trait Renderer {
    /// Fill the whole surface with `color`.
    fn clear(&mut self, color: &str);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str);

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str);

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str);

    fn stroke_circle(&mut self, x: f64, y: f64, radius: f64, color: &str);

    /// Draw sprite `index` of `sheet` with its top-left corner at `(x, y)`.
    fn blit_sprite(&mut self, sheet: &SpriteSheet, index: usize, x: f64, y: f64);

    /// Save the transform, then translate to `(x, y)` and rotate by `angle` degrees.
    fn translate_and_rotate(&mut self, x: f64, y: f64, angle: f64);

    /// Restore the transform saved by the matching `translate_and_rotate`.
    fn restore(&mut self);

    fn draw_text(&mut self, text: &str, x: f64, y: f64, color: &str);
}

/// One recorded renderer call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { color: String },
    FillRect { x: f64, y: f64, width: f64, height: f64, color: String },
    StrokeRect { x: f64, y: f64, width: f64, height: f64, color: String },
    FillCircle { x: f64, y: f64, radius: f64, color: String },
    StrokeCircle { x: f64, y: f64, radius: f64, color: String },
    BlitSprite { image: String, index: usize, x: f64, y: f64 },
    TranslateAndRotate { x: f64, y: f64, angle: f64 },
    Restore,
    DrawText { text: String, x: f64, y: f64, color: String },
}

/// Headless renderer that records calls instead of drawing.
#[derive(Debug, Clone, Default)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
    depth: usize,
}

impl CommandRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded so far, in call order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the recorder empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of `translate_and_rotate` calls not yet restored.
    #[must_use]
    pub fn transform_depth(&self) -> usize {
        self.depth
    }
}

impl Renderer for CommandRecorder {
    fn clear(&mut self, color: &str) {
        self.commands.push(DrawCommand::Clear { color: color.to_string() });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) {
        self.commands.push(DrawCommand::FillRect { x, y, width, height, color: color.to_string() });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) {
        self.commands.push(DrawCommand::StrokeRect { x, y, width, height, color: color.to_string() });
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str) {
        self.commands.push(DrawCommand::FillCircle { x, y, radius, color: color.to_string() });
    }

    fn stroke_circle(&mut self, x: f64, y: f64, radius: f64, color: &str) {
        self.commands.push(DrawCommand::StrokeCircle { x, y, radius, color: color.to_string() });
    }

    fn blit_sprite(&mut self, sheet: &SpriteSheet, index: usize, x: f64, y: f64) {
        self.commands.push(DrawCommand::BlitSprite { image: sheet.image.clone(), index, x, y });
    }

    fn translate_and_rotate(&mut self, x: f64, y: f64, angle: f64) {
        self.depth += 1;
        self.commands.push(DrawCommand::TranslateAndRotate { x, y, angle });
    }

    fn restore(&mut self) {
        if self.depth == 0 {
            warn!("restore without matching translate_and_rotate");
        } else {
            self.depth -= 1;
        }
        self.commands.push(DrawCommand::Restore);
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, color: &str) {
        self.commands.push(DrawCommand::DrawText { text: text.to_string(), x, y, color: color.to_string() });
    }
}
