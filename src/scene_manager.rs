//! Scene registry and the deferred scene-switch state machine.
//!
//! Exactly one scene is current at any time; before the first switch that is
//! an empty placeholder. At most one scene is pending. `switch_to_scene` only
//! records the pending scene. `check_scene_switch`, called once per frame
//! before update and render, is the only place the current scene changes:
//!
//! 1. `current.deactivating(next)`
//! 2. swap
//! 3. `next.activating(previous)`

#[cfg(test)]
#[path = "scene_manager_test.rs"]
mod scene_manager_test;

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, warn};

use crate::scene::{BasicScene, Scene};

/// Name of the placeholder scene that is current until the first switch.
pub const PLACEHOLDER_SCENE: &str = "(none)";

const PLACEHOLDER_SLOT: usize = 0;

/// Owns every registered scene and tracks which one is driven.
pub struct SceneManager {
    /// Slot 0 holds the placeholder; it is never registered by name.
    scenes: Vec<Box<dyn Scene>>,
    by_name: HashMap<String, usize>,
    current: usize,
    next: Option<usize>,
}

impl Default for SceneManager {
    fn default() -> Self {
        Self {
            scenes: vec![Box::new(BasicScene::new(PLACEHOLDER_SCENE))],
            by_name: HashMap::new(),
            current: PLACEHOLDER_SLOT,
            next: None,
        }
    }
}

impl SceneManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scene under its own name.
    ///
    /// A name that is already taken is logged and the existing scene is kept.
    /// Returns whether the scene was added.
    pub fn add_scene(&mut self, scene: Box<dyn Scene>) -> bool {
        let name = scene.name().to_string();
        if self.by_name.contains_key(&name) {
            warn!(scene = %name, "scene already registered; keeping the existing one");
            return false;
        }
        self.by_name.insert(name, self.scenes.len());
        self.scenes.push(scene);
        true
    }

    /// Request a switch to `name` at the next [`SceneManager::check_scene_switch`].
    ///
    /// `None` cancels a pending switch. The current scene, the already
    /// pending scene and unknown names (logged) leave the state unchanged.
    pub fn switch_to_scene(&mut self, name: Option<&str>) {
        let Some(name) = name else {
            if self.next.take().is_some() {
                debug!("pending scene switch cancelled");
            }
            return;
        };
        let Some(&slot) = self.by_name.get(name) else {
            warn!(scene = %name, "switch to unknown scene ignored");
            return;
        };
        if slot == self.current || self.next == Some(slot) {
            return;
        }
        self.next = Some(slot);
    }

    /// Perform the pending switch, if any. Returns whether a switch happened.
    pub fn check_scene_switch(&mut self) -> bool {
        let Some(next) = self.next.take() else {
            return false;
        };
        let previous = self.current;
        if let Some((old, new)) = split_pair(&mut self.scenes, previous, next) {
            old.deactivating(new);
        }
        self.current = next;
        if let Some((new, old)) = split_pair(&mut self.scenes, next, previous) {
            new.activating(old);
        }
        debug!(from = %self.scenes[previous].name(), to = %self.scenes[next].name(), "scene switched");
        true
    }

    /// The scene being driven.
    #[must_use]
    pub fn current_scene(&self) -> &dyn Scene {
        self.scenes[self.current].as_ref()
    }

    pub fn current_scene_mut(&mut self) -> &mut dyn Scene {
        self.scenes[self.current].as_mut()
    }

    #[must_use]
    pub fn current_name(&self) -> &str {
        self.current_scene().name()
    }

    /// Name of the scene waiting for the next `check_scene_switch`.
    #[must_use]
    pub fn pending_name(&self) -> Option<&str> {
        self.next.map(|slot| self.scenes[slot].name())
    }

    /// Whether the placeholder is still current (no switch has happened yet).
    #[must_use]
    pub fn is_placeholder_current(&self) -> bool {
        self.current == PLACEHOLDER_SLOT
    }

    #[must_use]
    pub fn scene(&self, name: &str) -> Option<&dyn Scene> {
        let slot = *self.by_name.get(name)?;
        self.scenes.get(slot).map(Box::as_ref)
    }

    pub fn scene_mut(&mut self, name: &str) -> Option<&mut (dyn Scene + 'static)> {
        let slot = *self.by_name.get(name)?;
        self.scenes.get_mut(slot).map(Box::as_mut)
    }

    #[must_use]
    pub fn has_scene(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Number of registered scenes (the placeholder not included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl fmt::Debug for SceneManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneManager")
            .field("current", &self.current_name())
            .field("pending", &self.pending_name())
            .field("registered", &self.len())
            .finish()
    }
}

/// Mutable access to `scenes[a]` alongside shared access to `scenes[b]`.
fn split_pair(
    scenes: &mut [Box<dyn Scene>],
    a: usize,
    b: usize,
) -> Option<(&mut (dyn Scene + 'static), &(dyn Scene + 'static))> {
    if a == b || a >= scenes.len() || b >= scenes.len() {
        return None;
    }
    if a < b {
        let (head, tail) = scenes.split_at_mut(b);
        Some((head[a].as_mut(), tail[0].as_ref()))
    } else {
        let (head, tail) = scenes.split_at_mut(a);
        Some((tail[0].as_mut(), head[b].as_ref()))
    }
}
