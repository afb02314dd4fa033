//! Actors: named, drawable colliders that live on the tile grid.
//!
//! An [`Actor`] keeps two synchronized views of where it is. `position` is the
//! top-left in stage pixels; `map_position` is the tile cell, always
//! `floor(position / TILE_SIZE)`. The stage setters move the actor freely and
//! derive the cell; the map setters snap the actor onto the grid.
//!
//! [`SceneObject`] is the capability a scene's actor list drives each frame.
//! It is implemented for actors, for entities, and for shared
//! `Rc<RefCell<_>>` handles so level entities can sit in a scene list while
//! the level keeps its own references.

#[cfg(test)]
#[path = "actor_test.rs"]
mod actor_test;

use std::cell::RefCell;
use std::rc::Rc;

use tracing::warn;

use crate::collider::{Collider, ColliderType};
use crate::consts::TILE_SIZE;
use crate::geom::{Point, Vector2D};
use crate::render::Renderer;
use crate::sprite::{AnimationList, SpriteSheet};
use crate::stage::Stage;

/// Something a scene updates and renders every frame.
pub trait SceneObject {
    /// Advance one frame.
    fn update(&mut self, stage: &Stage, tick: u64);

    /// Draw with the top-left at `(x, y)`.
    fn render(&self, x: f64, y: f64, renderer: &mut dyn Renderer);

    /// Top-left in stage pixels.
    fn position(&self) -> Point;

    /// Ordering key; lower values update and draw first.
    fn z_order(&self) -> i32;
}

/// A named collider with a grid position, z-order and optional sprite.
#[derive(Debug, Clone)]
pub struct Actor {
    name: String,
    collider: Collider,
    map_position: Point,
    z_order: i32,
    sheet: Option<Rc<SpriteSheet>>,
    sprite: Option<usize>,
    animations: Option<AnimationList>,
}

impl Actor {
    /// A rectangular actor with its top-left at `(x, y)` in stage pixels.
    #[must_use]
    pub fn new(name: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::with_collider(name, Collider::rectangle(x, y, width, height))
    }

    /// An actor wrapping an existing collider.
    #[must_use]
    pub fn with_collider(name: impl Into<String>, collider: Collider) -> Self {
        let map_position = collider.position().reduced(TILE_SIZE);
        Self {
            name: name.into(),
            collider,
            map_position,
            z_order: 0,
            sheet: None,
            sprite: None,
            animations: None,
        }
    }

    /// A one-tile actor placed on map cell `(map_x, map_y)`.
    #[must_use]
    pub fn at_map_xy(name: impl Into<String>, map_x: f64, map_y: f64) -> Self {
        let mut actor = Self::new(name, 0.0, 0.0, TILE_SIZE, TILE_SIZE);
        actor.set_map_position_xy(map_x, map_y);
        actor
    }

    /// Debug name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[must_use]
    pub fn collider(&self) -> &Collider {
        &self.collider
    }

    #[must_use]
    pub fn collider_type(&self) -> ColliderType {
        self.collider.collider_type()
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.collider.width()
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.collider.height()
    }

    // --- Position ---

    /// Top-left in stage pixels.
    #[must_use]
    pub fn position(&self) -> Point {
        self.collider.position()
    }

    /// Tile cell containing the top-left.
    #[must_use]
    pub fn map_position(&self) -> Point {
        self.map_position
    }

    /// Move to stage pixel `(x, y)`; the map cell is derived by floor division.
    pub fn set_stage_position_xy(&mut self, x: f64, y: f64) {
        self.set_stage_position(Point::new(x, y));
    }

    pub fn set_stage_position(&mut self, position: Point) {
        self.collider.set_position(position);
        self.map_position = position.reduced(TILE_SIZE);
    }

    /// Move onto map cell `(x, y)`; the pixel position becomes `cell * TILE_SIZE`.
    /// Fractional coordinates are floored onto the cell that contains them.
    pub fn set_map_position_xy(&mut self, x: f64, y: f64) {
        self.set_map_position(Point::new(x, y));
    }

    pub fn set_map_position(&mut self, map_position: Point) {
        let map_position = Point::new(map_position.x.floor(), map_position.y.floor());
        self.map_position = map_position;
        self.collider.set_position(map_position.scaled(TILE_SIZE));
    }

    /// Move by a pixel offset.
    pub fn translate(&mut self, delta: Vector2D) {
        self.set_stage_position(self.position().translated(delta));
    }

    /// Keep the whole actor inside the stage.
    pub fn clamp_to_stage(&mut self, stage: &Stage) {
        self.collider.clamp_to_stage(stage);
        self.map_position = self.collider.position().reduced(TILE_SIZE);
    }

    // --- Shape ---

    pub fn make_rectangle(&mut self, width: f64, height: f64, reset_origin: bool) {
        self.collider.make_rectangle(width, height, reset_origin);
    }

    pub fn make_circle(&mut self, radius: f64, reset_origin: bool) {
        self.collider.make_circle(radius, reset_origin);
    }

    pub fn make_none(&mut self) {
        self.collider.make_none();
    }

    pub fn set_origin(&mut self, origin: Point) {
        self.collider.set_origin(origin);
    }

    #[must_use]
    pub fn angle(&self) -> f64 {
        self.collider.angle()
    }

    pub fn set_angle(&mut self, angle: f64) {
        self.collider.set_angle(angle);
    }

    #[must_use]
    pub fn contains_xy(&self, x: f64, y: f64) -> bool {
        self.collider.contains_xy(x, y)
    }

    #[must_use]
    pub fn collides_with(&self, other: &Actor) -> bool {
        self.collider.collides_with(&other.collider)
    }

    #[must_use]
    pub fn intersect_with_segment_xy(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> Option<Point> {
        self.collider.intersect_with_segment_xy(x0, y0, x1, y1)
    }

    // --- Ordering ---

    #[must_use]
    pub fn z_order(&self) -> i32 {
        self.z_order
    }

    pub fn set_z_order(&mut self, z_order: i32) {
        self.z_order = z_order;
    }

    // --- Sprites ---

    #[must_use]
    pub fn sprite_sheet(&self) -> Option<&SpriteSheet> {
        self.sheet.as_deref()
    }

    pub fn set_sprite_sheet(&mut self, sheet: Option<Rc<SpriteSheet>>) {
        self.sheet = sheet;
    }

    #[must_use]
    pub fn sprite(&self) -> Option<usize> {
        self.sprite
    }

    pub fn set_sprite(&mut self, sprite: Option<usize>) {
        self.sprite = sprite;
    }

    /// The actor's animations, if any were ever requested.
    #[must_use]
    pub fn animations(&self) -> Option<&AnimationList> {
        self.animations.as_ref()
    }

    /// The actor's animation list, created empty on first use.
    pub fn animations_mut(&mut self) -> &mut AnimationList {
        self.animations.get_or_insert_with(AnimationList::new)
    }

    // --- Frame ---

    /// Advance the sprite from the playing animation, if both a sheet and
    /// animations are attached.
    pub fn update(&mut self, _stage: &Stage, tick: u64) {
        if self.sheet.is_none() {
            return;
        }
        if let Some(frame) = self.animations.as_mut().and_then(|list| list.update(tick)) {
            self.sprite = Some(frame);
        }
    }

    /// Draw the current sprite, or the collider outline when there is none.
    pub fn render(&self, x: f64, y: f64, renderer: &mut dyn Renderer) {
        let sprite = self.sheet.as_deref().zip(self.sprite).filter(|(sheet, index)| sheet.is_valid_index(*index));
        let Some((sheet, index)) = sprite else {
            self.collider.render(x, y, renderer);
            return;
        };
        let origin = self.collider.origin();
        renderer.translate_and_rotate(x + origin.x, y + origin.y, self.collider.angle());
        renderer.blit_sprite(sheet, index, -origin.x, -origin.y);
        renderer.restore();
    }
}

impl SceneObject for Actor {
    fn update(&mut self, stage: &Stage, tick: u64) {
        Actor::update(self, stage, tick);
    }

    fn render(&self, x: f64, y: f64, renderer: &mut dyn Renderer) {
        Actor::render(self, x, y, renderer);
    }

    fn position(&self) -> Point {
        Actor::position(self)
    }

    fn z_order(&self) -> i32 {
        Actor::z_order(self)
    }
}

impl<T: SceneObject> SceneObject for Rc<RefCell<T>> {
    fn update(&mut self, stage: &Stage, tick: u64) {
        match self.try_borrow_mut() {
            Ok(mut inner) => inner.update(stage, tick),
            Err(_) => warn!("scene object already borrowed; skipping update"),
        }
    }

    fn render(&self, x: f64, y: f64, renderer: &mut dyn Renderer) {
        match self.try_borrow() {
            Ok(inner) => inner.render(x, y, renderer),
            Err(_) => warn!("scene object mutably borrowed; skipping render"),
        }
    }

    fn position(&self) -> Point {
        self.try_borrow().map_or_else(|_| Point::zero(), |inner| inner.position())
    }

    fn z_order(&self) -> i32 {
        self.try_borrow().map_or(0, |inner| inner.z_order())
    }
}
