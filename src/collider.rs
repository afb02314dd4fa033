//! Positioned collision volumes.
//!
//! A [`Collider`] is a [`CollisionShape`] placed at a top-left `position`, with
//! an `origin` offset naming the shape's reference point (rotation pivot and
//! debug dot) and a render-only `angle`. Collision tests ignore the angle.
//!
//! A circle of radius `r` occupies the square `position .. position + 2r`, so
//! its center is `position + (r, r)`.

#[cfg(test)]
#[path = "collider_test.rs"]
mod collider_test;

use crate::collision::{self, Circle, Rect};
use crate::consts::{DEBUG_ORIGIN_COLOR, DEBUG_ORIGIN_RADIUS, DEBUG_OUTLINE_COLOR};
use crate::geom::{Point, normalize_degrees};
use crate::render::Renderer;
use crate::stage::Stage;

/// Tag naming a collider's shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColliderType {
    /// No collision volume: never collides, contains nothing.
    None,
    Rectangle,
    Circle,
}

/// Shape and size of a collision volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionShape {
    None,
    Rectangle { width: f64, height: f64 },
    Circle { radius: f64 },
}

impl CollisionShape {
    #[must_use]
    pub fn collider_type(&self) -> ColliderType {
        match self {
            Self::None => ColliderType::None,
            Self::Rectangle { .. } => ColliderType::Rectangle,
            Self::Circle { .. } => ColliderType::Circle,
        }
    }

    /// The shape's default origin: top-left for rectangles, center for circles.
    #[must_use]
    pub fn default_origin(&self) -> Point {
        match self {
            Self::None | Self::Rectangle { .. } => Point::zero(),
            Self::Circle { radius } => Point::new(*radius, *radius),
        }
    }
}

/// A collision volume placed in the stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Collider {
    shape: CollisionShape,
    position: Point,
    origin: Point,
    angle: f64,
}

impl Collider {
    /// Place `shape` at `position` with the shape's default origin.
    #[must_use]
    pub fn new(shape: CollisionShape, position: Point) -> Self {
        Self { shape, position, origin: shape.default_origin(), angle: 0.0 }
    }

    #[must_use]
    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(CollisionShape::Rectangle { width, height }, Point::new(x, y))
    }

    #[must_use]
    pub fn circle(x: f64, y: f64, radius: f64) -> Self {
        Self::new(CollisionShape::Circle { radius }, Point::new(x, y))
    }

    #[must_use]
    pub fn none(x: f64, y: f64) -> Self {
        Self::new(CollisionShape::None, Point::new(x, y))
    }

    // --- Shape ---

    #[must_use]
    pub fn shape(&self) -> CollisionShape {
        self.shape
    }

    #[must_use]
    pub fn collider_type(&self) -> ColliderType {
        self.shape.collider_type()
    }

    /// Turn this collider into a rectangle, optionally resetting the origin to the top-left.
    pub fn make_rectangle(&mut self, width: f64, height: f64, reset_origin: bool) {
        self.shape = CollisionShape::Rectangle { width, height };
        if reset_origin {
            self.origin = self.shape.default_origin();
        }
    }

    /// Turn this collider into a circle, optionally resetting the origin to the center.
    pub fn make_circle(&mut self, radius: f64, reset_origin: bool) {
        self.shape = CollisionShape::Circle { radius };
        if reset_origin {
            self.origin = self.shape.default_origin();
        }
    }

    /// Remove the collision volume. Position, origin and angle are kept.
    pub fn make_none(&mut self) {
        self.shape = CollisionShape::None;
    }

    /// Bounding width: rectangle width, circle diameter, 0 for none.
    #[must_use]
    pub fn width(&self) -> f64 {
        match self.shape {
            CollisionShape::None => 0.0,
            CollisionShape::Rectangle { width, .. } => width,
            CollisionShape::Circle { radius } => radius * 2.0,
        }
    }

    /// Bounding height: rectangle height, circle diameter, 0 for none.
    #[must_use]
    pub fn height(&self) -> f64 {
        match self.shape {
            CollisionShape::None => 0.0,
            CollisionShape::Rectangle { height, .. } => height,
            CollisionShape::Circle { radius } => radius * 2.0,
        }
    }

    /// Circle radius; `None` for other shapes.
    #[must_use]
    pub fn radius(&self) -> Option<f64> {
        match self.shape {
            CollisionShape::Circle { radius } => Some(radius),
            _ => None,
        }
    }

    // --- Placement ---

    /// Top-left of the shape's bounds.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Offset from `position` to the shape's reference point.
    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// The reference point in stage coordinates (`position + origin`).
    #[must_use]
    pub fn origin_point(&self) -> Point {
        self.position.translated_xy(self.origin.x, self.origin.y)
    }

    /// Render angle in degrees, in `[0, 360)`.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn set_angle(&mut self, angle: f64) {
        self.angle = normalize_degrees(angle);
    }

    pub fn rotate_by(&mut self, delta: f64) {
        self.set_angle(self.angle + delta);
    }

    /// Axis-aligned bounds of the shape.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.width(), self.height())
    }

    /// The shape as a circle, if it is one.
    #[must_use]
    pub fn as_circle(&self) -> Option<Circle> {
        let r = self.radius()?;
        Some(Circle::new(self.position.x + r, self.position.y + r, r))
    }

    /// Keep the whole shape inside the stage, moving it as little as possible.
    pub fn clamp_to_stage(&mut self, stage: &Stage) {
        let max = Point::new(stage.width() - self.width(), stage.height() - self.height());
        self.position.clamp(Point::zero(), max);
    }

    // --- Queries ---

    /// Whether `(x, y)` lies inside the shape. `None` shapes contain nothing.
    #[must_use]
    pub fn contains_xy(&self, x: f64, y: f64) -> bool {
        let p = Point::new(x, y);
        match self.shape {
            CollisionShape::None => false,
            CollisionShape::Rectangle { .. } => collision::point_in_rect(p, self.bounds()),
            CollisionShape::Circle { .. } => self.as_circle().is_some_and(|c| collision::point_in_circle(p, c)),
        }
    }

    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        self.contains_xy(p.x, p.y)
    }

    /// Whether the two volumes overlap.
    ///
    /// Mixed pairs always resolve to the same rectangle-versus-circle test,
    /// whichever side is the circle.
    #[must_use]
    pub fn collides_with(&self, other: &Collider) -> bool {
        match (self.shape, other.shape) {
            (CollisionShape::None, _) | (_, CollisionShape::None) => false,
            (CollisionShape::Rectangle { .. }, CollisionShape::Rectangle { .. }) => {
                collision::rect_in_rect(self.bounds(), other.bounds())
            }
            (CollisionShape::Circle { .. }, CollisionShape::Circle { .. }) => match (self.as_circle(), other.as_circle()) {
                (Some(a), Some(b)) => collision::circle_in_circle(a, b),
                _ => false,
            },
            (CollisionShape::Rectangle { .. }, CollisionShape::Circle { .. }) => rect_vs_circle(self, other),
            (CollisionShape::Circle { .. }, CollisionShape::Rectangle { .. }) => rect_vs_circle(other, self),
        }
    }

    /// First point where the segment `(x0, y0) -> (x1, y1)` enters this volume.
    ///
    /// Only rectangles support segment queries; circles and `None` shapes
    /// always answer `None`.
    #[must_use]
    pub fn intersect_with_segment_xy(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> Option<Point> {
        match self.shape {
            CollisionShape::Rectangle { .. } => {
                collision::segment_rectangle_intersection(Point::new(x0, y0), Point::new(x1, y1), self.bounds())
            }
            CollisionShape::None | CollisionShape::Circle { .. } => None,
        }
    }

    // --- Drawing ---

    /// Draw the shape outline and an origin dot with the top-left at `(x, y)`,
    /// rotated by `angle` around the origin.
    pub fn render(&self, x: f64, y: f64, renderer: &mut dyn Renderer) {
        let (ox, oy) = (self.origin.x, self.origin.y);
        renderer.translate_and_rotate(x + ox, y + oy, self.angle);
        match self.shape {
            CollisionShape::None => {}
            CollisionShape::Rectangle { width, height } => {
                renderer.stroke_rect(-ox, -oy, width, height, DEBUG_OUTLINE_COLOR);
            }
            CollisionShape::Circle { radius } => {
                renderer.stroke_circle(radius - ox, radius - oy, radius, DEBUG_OUTLINE_COLOR);
            }
        }
        renderer.fill_circle(0.0, 0.0, DEBUG_ORIGIN_RADIUS, DEBUG_ORIGIN_COLOR);
        renderer.restore();
    }
}

fn rect_vs_circle(rect: &Collider, circle: &Collider) -> bool {
    circle.as_circle().is_some_and(|c| collision::rect_in_circle(rect.bounds(), c))
}
