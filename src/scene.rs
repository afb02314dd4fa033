//! Scenes: one screen's worth of actors plus lifecycle and input hooks.
//!
//! A scene never reaches its [`crate::scene_manager::SceneManager`] directly.
//! Hooks that run while the engine drives the scene receive a
//! [`SceneContext`], which exposes the stage and records requests (switch to
//! another scene, take a screenshot). The driver applies those requests after
//! the hook returns; a switch takes effect at the next
//! `check_scene_switch`.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::fmt;

use crate::actor::SceneObject;
use crate::geom::Point;
use crate::input::{Button, Key, Modifiers, WheelDelta};
use crate::render::Renderer;
use crate::stage::Stage;

// =============================================================
// SceneContext
// =============================================================

/// Requests a scene recorded during one hook call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneRequests {
    /// `Some(Some(name))` asks for a switch, `Some(None)` cancels a pending one.
    pub switch_to: Option<Option<String>>,
    pub screenshot: bool,
}

/// What a scene hook can see and ask for.
#[derive(Debug)]
pub struct SceneContext<'a> {
    stage: &'a Stage,
    requests: SceneRequests,
}

impl<'a> SceneContext<'a> {
    #[must_use]
    pub fn new(stage: &'a Stage) -> Self {
        Self { stage, requests: SceneRequests::default() }
    }

    #[must_use]
    pub fn stage(&self) -> &'a Stage {
        self.stage
    }

    /// Ask for a switch to `name`, or cancel a pending switch with `None`.
    /// The last request in a hook wins.
    pub fn switch_to_scene(&mut self, name: Option<&str>) {
        self.requests.switch_to = Some(name.map(str::to_string));
    }

    pub fn request_screenshot(&mut self) {
        self.requests.screenshot = true;
    }

    #[must_use]
    pub fn requests(&self) -> &SceneRequests {
        &self.requests
    }

    #[must_use]
    pub fn into_requests(self) -> SceneRequests {
        self.requests
    }
}

// =============================================================
// ActorList
// =============================================================

/// Ordered list of scene objects. Insertion order until sorted.
#[derive(Default)]
pub struct ActorList {
    items: Vec<Box<dyn SceneObject>>,
}

impl ActorList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, object: impl SceneObject + 'static) {
        self.items.push(Box::new(object));
    }

    pub fn push_boxed(&mut self, object: Box<dyn SceneObject>) {
        self.items.push(object);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn SceneObject> {
        self.items.iter().map(Box::as_ref)
    }

    /// Sort by z-order, ascending. Unstable: equal keys may swap.
    pub fn sort_by_z_order(&mut self) {
        self.items.sort_unstable_by_key(|o| o.z_order());
    }

    /// Update every object in list order.
    pub fn update(&mut self, stage: &Stage, tick: u64) {
        for object in &mut self.items {
            object.update(stage, tick);
        }
    }

    /// Render every object at its own position, in list order.
    pub fn render(&self, renderer: &mut dyn Renderer) {
        for object in &self.items {
            let p = object.position();
            object.render(p.x, p.y, renderer);
        }
    }
}

impl fmt::Debug for ActorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorList").field("len", &self.items.len()).finish()
    }
}

// =============================================================
// Scene
// =============================================================

/// A screen the engine can drive: menu, play field, game over, ...
///
/// Input hooks return `true` when they handled the event, so the host can
/// suppress the browser's default action.
pub trait Scene {
    /// Registry name; unique within a scene manager.
    fn name(&self) -> &str;

    fn actors(&self) -> &ActorList;

    fn actors_mut(&mut self) -> &mut ActorList;

    /// Called on the new scene right after it becomes current.
    fn activating(&mut self, _previous: &dyn Scene) {}

    /// Called on the current scene right before `next` replaces it.
    fn deactivating(&mut self, _next: &dyn Scene) {}

    /// Advance one frame. Default: update every actor.
    fn update(&mut self, ctx: &mut SceneContext<'_>, tick: u64) {
        self.actors_mut().update(ctx.stage(), tick);
    }

    /// Draw one frame. Default: draw every actor at its position.
    fn render(&self, _stage: &Stage, renderer: &mut dyn Renderer) {
        self.actors().render(renderer);
    }

    /// Re-sort the actor list by z-order. Not automatic.
    fn sort_actors(&mut self) {
        self.actors_mut().sort_by_z_order();
    }

    /// Default: the stage's screenshot key requests a screenshot and is handled.
    fn key_down(&mut self, ctx: &mut SceneContext<'_>, key: &Key, _modifiers: Modifiers) -> bool {
        if key.is(ctx.stage().screenshot_key()) {
            ctx.request_screenshot();
            return true;
        }
        false
    }

    fn key_up(&mut self, _ctx: &mut SceneContext<'_>, _key: &Key, _modifiers: Modifiers) -> bool {
        false
    }

    fn mouse_down(&mut self, _ctx: &mut SceneContext<'_>, _at: Point, _button: Button, _modifiers: Modifiers) -> bool {
        false
    }

    fn mouse_up(&mut self, _ctx: &mut SceneContext<'_>, _at: Point, _button: Button, _modifiers: Modifiers) -> bool {
        false
    }

    fn mouse_move(&mut self, _ctx: &mut SceneContext<'_>, _at: Point, _modifiers: Modifiers) -> bool {
        false
    }

    fn wheel(&mut self, _ctx: &mut SceneContext<'_>, _at: Point, _delta: WheelDelta, _modifiers: Modifiers) -> bool {
        false
    }
}

/// A scene with only the default behavior. Also the manager's placeholder.
#[derive(Debug, Default)]
pub struct BasicScene {
    name: String,
    actors: ActorList,
}

impl BasicScene {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), actors: ActorList::new() }
    }
}

impl Scene for BasicScene {
    fn name(&self) -> &str {
        &self.name
    }

    fn actors(&self) -> &ActorList {
        &self.actors
    }

    fn actors_mut(&mut self) -> &mut ActorList {
        &mut self.actors
    }
}
