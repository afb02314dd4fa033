//! Canvas 2D implementation of the engine's [`Renderer`] trait.
//!
//! This module is the only place that touches [`CanvasRenderingContext2d`].
//! `Renderer` calls cannot fail, so failed `Canvas2D` calls are logged and
//! the frame carries on.

use std::collections::HashMap;
use std::f64::consts::TAU;

use tilestage::render::Renderer;
use tilestage::sprite::SpriteSheet;
use tracing::warn;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

/// Font used for debug labels.
pub const LABEL_FONT: &str = "10px monospace";

/// Draws engine output onto one canvas 2D context.
#[derive(Debug)]
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    images: HashMap<String, HtmlImageElement>,
}

impl CanvasRenderer {
    /// Wrap `ctx`, whose drawable area is `width` x `height` pixels.
    #[must_use]
    pub fn new(ctx: CanvasRenderingContext2d, width: f64, height: f64) -> Self {
        ctx.set_font(LABEL_FONT);
        Self { ctx, width, height, images: HashMap::new() }
    }

    /// Make `image` available to sprite sheets whose `image` field is `id`.
    /// A later registration under the same id replaces the earlier one.
    pub fn register_image(&mut self, id: impl Into<String>, image: HtmlImageElement) {
        self.images.insert(id.into(), image);
    }

    fn circle_path(&self, x: f64, y: f64, radius: f64) -> bool {
        self.ctx.begin_path();
        check("arc", self.ctx.arc(x, y, radius.max(0.0), 0.0, TAU))
    }
}

/// Log a failed canvas call. Returns whether the call succeeded.
fn check(op: &'static str, result: Result<(), JsValue>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            warn!(op, error = ?err, "canvas call failed");
            false
        }
    }
}

impl Renderer for CanvasRenderer {
    fn clear(&mut self, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x, y, width, height);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.stroke_rect(x, y, width, height);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str) {
        if self.circle_path(x, y, radius) {
            self.ctx.set_fill_style_str(color);
            self.ctx.fill();
        }
    }

    fn stroke_circle(&mut self, x: f64, y: f64, radius: f64, color: &str) {
        if self.circle_path(x, y, radius) {
            self.ctx.set_stroke_style_str(color);
            self.ctx.stroke();
        }
    }

    fn blit_sprite(&mut self, sheet: &SpriteSheet, index: usize, x: f64, y: f64) {
        let Some(image) = self.images.get(&sheet.image) else {
            warn!(image = %sheet.image, "sprite image not registered");
            return;
        };
        let Some(src) = sheet.source_rect(index) else {
            warn!(image = %sheet.image, index, count = sheet.count, "sprite index out of range");
            return;
        };
        check(
            "draw_image",
            self.ctx.draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                image, src.x, src.y, src.width, src.height, x, y, src.width, src.height,
            ),
        );
    }

    fn translate_and_rotate(&mut self, x: f64, y: f64, angle: f64) {
        // The paired restore always needs a saved frame to pop.
        self.ctx.save();
        if check("translate", self.ctx.translate(x, y)) {
            check("rotate", self.ctx.rotate(angle.to_radians()));
        }
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, color: &str) {
        self.ctx.set_fill_style_str(color);
        check("fill_text", self.ctx.fill_text(text, x, y));
    }
}
