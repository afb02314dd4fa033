//! Frame driver: the per-tick loop and input dispatch.
//!
//! [`EngineCore`] holds everything that does not need a browser, so it can be
//! tested headless with a [`crate::render::CommandRecorder`]. The canvas
//! binding wraps it and adds the canvas element.
//!
//! One frame is, in strict order:
//!
//! 1. `check_scene_switch` (a switch requested last frame takes effect),
//! 2. current scene `update`,
//! 3. clear to the stage background, current scene `render`,
//! 4. apply requests the scene recorded in its `SceneContext`.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::rc::Rc;

use crate::geom::Point;
use crate::input::{Button, Key, Modifiers, WheelDelta};
use crate::render::Renderer;
use crate::scene::{Scene, SceneContext, SceneRequests};
use crate::scene_manager::SceneManager;
use crate::stage::StageRef;

/// Core engine state, independent of any drawing surface.
#[derive(Debug)]
pub struct EngineCore {
    stage: StageRef,
    scenes: SceneManager,
    tick: u64,
    screenshot_requested: bool,
}

impl EngineCore {
    #[must_use]
    pub fn new(stage: StageRef) -> Self {
        Self { stage, scenes: SceneManager::new(), tick: 0, screenshot_requested: false }
    }

    #[must_use]
    pub fn stage(&self) -> &StageRef {
        &self.stage
    }

    #[must_use]
    pub fn scenes(&self) -> &SceneManager {
        &self.scenes
    }

    pub fn scenes_mut(&mut self) -> &mut SceneManager {
        &mut self.scenes
    }

    /// Frames run so far.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    // --- Scenes ---

    /// Register a scene. See [`SceneManager::add_scene`].
    pub fn add_scene(&mut self, scene: Box<dyn Scene>) -> bool {
        self.scenes.add_scene(scene)
    }

    /// Request a scene switch for the next frame.
    pub fn switch_to_scene(&mut self, name: Option<&str>) {
        self.scenes.switch_to_scene(name);
    }

    // --- Frame ---

    /// Run one frame against `renderer`.
    pub fn frame(&mut self, renderer: &mut dyn Renderer) {
        self.scenes.check_scene_switch();
        let stage = Rc::clone(&self.stage);
        let mut ctx = SceneContext::new(&stage);
        let scene = self.scenes.current_scene_mut();
        scene.update(&mut ctx, self.tick);
        renderer.clear(stage.background());
        scene.render(&stage, renderer);
        self.apply(ctx.into_requests());
        self.tick += 1;
    }

    /// Whether a screenshot was requested; clears the request.
    pub fn take_screenshot_request(&mut self) -> bool {
        std::mem::take(&mut self.screenshot_requested)
    }

    fn apply(&mut self, requests: SceneRequests) {
        if let Some(target) = requests.switch_to {
            self.scenes.switch_to_scene(target.as_deref());
        }
        if requests.screenshot {
            self.screenshot_requested = true;
        }
    }

    fn dispatch(&mut self, hook: impl FnOnce(&mut dyn Scene, &mut SceneContext<'_>) -> bool) -> bool {
        let stage = Rc::clone(&self.stage);
        let mut ctx = SceneContext::new(&stage);
        let handled = hook(self.scenes.current_scene_mut(), &mut ctx);
        self.apply(ctx.into_requests());
        handled
    }

    // --- Input events ---

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> bool {
        self.dispatch(|scene, ctx| scene.key_down(ctx, key, modifiers))
    }

    pub fn on_key_up(&mut self, key: &Key, modifiers: Modifiers) -> bool {
        self.dispatch(|scene, ctx| scene.key_up(ctx, key, modifiers))
    }

    pub fn on_pointer_down(&mut self, at: Point, button: Button, modifiers: Modifiers) -> bool {
        self.dispatch(|scene, ctx| scene.mouse_down(ctx, at, button, modifiers))
    }

    pub fn on_pointer_up(&mut self, at: Point, button: Button, modifiers: Modifiers) -> bool {
        self.dispatch(|scene, ctx| scene.mouse_up(ctx, at, button, modifiers))
    }

    pub fn on_pointer_move(&mut self, at: Point, modifiers: Modifiers) -> bool {
        self.dispatch(|scene, ctx| scene.mouse_move(ctx, at, modifiers))
    }

    pub fn on_wheel(&mut self, at: Point, delta: WheelDelta, modifiers: Modifiers) -> bool {
        self.dispatch(|scene, ctx| scene.wheel(ctx, at, delta, modifiers))
    }
}
