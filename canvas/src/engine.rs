//! The browser-facing engine: a canvas element driving an [`EngineCore`].

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tilestage::engine::EngineCore;
use tilestage::geom::Point;
use tilestage::input::{Button, Key, Modifiers, WheelDelta};
use tilestage::scene::Scene;
use tilestage::stage::StageRef;
use tracing::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::render::CanvasRenderer;

/// Owns the canvas element, its renderer and the engine core.
#[derive(Debug)]
pub struct Engine {
    canvas: HtmlCanvasElement,
    renderer: CanvasRenderer,
    core: EngineCore,
    screenshot: Option<String>,
}

impl Engine {
    /// Bind to `canvas`, resizing it to the stage.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the canvas has no 2D context.
    pub fn new(canvas: HtmlCanvasElement, stage: StageRef) -> Result<Self, JsValue> {
        let width = pixel_extent(stage.width());
        let height = pixel_extent(stage.height());
        canvas.set_width(width);
        canvas.set_height(height);
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        debug!(width, height, "canvas bound");
        let renderer = CanvasRenderer::new(ctx, f64::from(width), f64::from(height));
        Ok(Self { canvas, renderer, core: EngineCore::new(stage), screenshot: None })
    }

    #[must_use]
    pub fn core(&self) -> &EngineCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut EngineCore {
        &mut self.core
    }

    // --- Setup ---

    pub fn add_scene(&mut self, scene: Box<dyn Scene>) -> bool {
        self.core.add_scene(scene)
    }

    pub fn switch_to_scene(&mut self, name: Option<&str>) {
        self.core.switch_to_scene(name);
    }

    /// Make `image` available to sprite sheets that name it `id`.
    pub fn register_image(&mut self, id: impl Into<String>, image: HtmlImageElement) {
        self.renderer.register_image(id, image);
    }

    // --- Frame ---

    /// Run one frame. A screenshot requested during it is captured after drawing.
    pub fn frame(&mut self) {
        self.core.frame(&mut self.renderer);
        if self.core.take_screenshot_request() {
            self.capture();
        }
    }

    /// The most recent screenshot as a PNG data URL, if one was taken since the last call.
    pub fn take_screenshot(&mut self) -> Option<String> {
        self.screenshot.take()
    }

    fn capture(&mut self) {
        match self.canvas.to_data_url() {
            Ok(url) => {
                debug!(bytes = url.len(), "screenshot captured");
                self.screenshot = Some(url);
            }
            Err(err) => warn!(error = ?err, "screenshot failed"),
        }
    }

    // --- Input events ---

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> bool {
        self.core.on_key_down(key, modifiers)
    }

    pub fn on_key_up(&mut self, key: &Key, modifiers: Modifiers) -> bool {
        self.core.on_key_up(key, modifiers)
    }

    pub fn on_pointer_down(&mut self, at: Point, button: Button, modifiers: Modifiers) -> bool {
        self.core.on_pointer_down(at, button, modifiers)
    }

    pub fn on_pointer_up(&mut self, at: Point, button: Button, modifiers: Modifiers) -> bool {
        self.core.on_pointer_up(at, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, at: Point, modifiers: Modifiers) -> bool {
        self.core.on_pointer_move(at, modifiers)
    }

    pub fn on_wheel(&mut self, at: Point, delta: WheelDelta, modifiers: Modifiers) -> bool {
        self.core.on_wheel(at, delta, modifiers)
    }
}

/// Canvas attribute size for a stage dimension in pixels, rounded up and
/// saturated to `u32`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn pixel_extent(pixels: f64) -> u32 {
    if pixels.is_nan() || pixels <= 0.0 {
        return 0;
    }
    if pixels >= f64::from(u32::MAX) {
        return u32::MAX;
    }
    pixels.ceil() as u32
}
