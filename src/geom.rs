//! 2D geometry primitives: [`Point`] coordinates and [`Vector2D`] displacements.
//!
//! Both types are plain `Copy` values. Angles are in degrees throughout the
//! engine; 0 points east (+x) and angles grow clockwise because stage Y grows
//! downward.
//!
//! `Point::scale` / `Point::reduce` floor their results. Pixel coordinates are
//! kept integral by those two operations, so the floor is part of the contract.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::range::clamp_to_range;

/// Normalize an angle in degrees into `[0, 360)`.
#[must_use]
pub fn normalize_degrees(deg: f64) -> f64 {
    let normalized = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative angles.
    if normalized >= 360.0 { 0.0 } else { normalized }
}

/// A position in stage pixels or map tiles, depending on use.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin `(0, 0)`.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Move this point by `(dx, dy)`.
    pub fn translate_xy(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Move this point by a displacement vector.
    pub fn translate(&mut self, v: Vector2D) {
        self.translate_xy(v.x, v.y);
    }

    /// Copy of this point moved by `(dx, dy)`.
    #[must_use]
    pub fn translated_xy(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Copy of this point moved by a displacement vector.
    #[must_use]
    pub fn translated(self, v: Vector2D) -> Self {
        self.translated_xy(v.x, v.y)
    }

    /// Multiply both components by `factor`, then floor.
    pub fn scale(&mut self, factor: f64) {
        self.x = (self.x * factor).floor();
        self.y = (self.y * factor).floor();
    }

    /// Copy of this point multiplied by `factor` and floored.
    #[must_use]
    pub fn scaled(mut self, factor: f64) -> Self {
        self.scale(factor);
        self
    }

    /// Divide both components by `divisor`, then floor.
    ///
    /// A zero divisor yields infinite or NaN components, as with plain division.
    pub fn reduce(&mut self, divisor: f64) {
        self.x = (self.x / divisor).floor();
        self.y = (self.y / divisor).floor();
    }

    /// Copy of this point divided by `divisor` and floored.
    #[must_use]
    pub fn reduced(mut self, divisor: f64) -> Self {
        self.reduce(divisor);
        self
    }

    /// Clamp each axis into the range spanned by `a` and `b`.
    ///
    /// The bounds are order-insensitive per axis: `a.x > b.x` works the same
    /// as `a.x < b.x`.
    pub fn clamp(&mut self, a: Point, b: Point) {
        self.x = clamp_to_range(self.x, a.x, b.x);
        self.y = clamp_to_range(self.y, a.y, b.y);
    }

    /// Copy of this point clamped into the range spanned by `a` and `b`.
    #[must_use]
    pub fn clamped(mut self, a: Point, b: Point) -> Self {
        self.clamp(a, b);
        self
    }

    /// The point `distance` away from this one in direction `angle` (degrees).
    #[must_use]
    pub fn point_at_angle(self, angle: f64, distance: f64) -> Self {
        let rad = angle.to_radians();
        Self::new(self.x + rad.cos() * distance, self.y + rad.sin() * distance)
    }

    /// Angle in degrees from this point towards `(x, y)`.
    ///
    /// This is the raw `atan2` result in `(-180, 180]`, not normalized.
    #[must_use]
    pub fn angle_to_xy(self, x: f64, y: f64) -> f64 {
        (y - self.y).atan2(x - self.x).to_degrees()
    }

    /// Angle in degrees from this point towards `other`.
    #[must_use]
    pub fn angle_to(self, other: Point) -> f64 {
        self.angle_to_xy(other.x, other.y)
    }

    #[must_use]
    pub fn distance_to_xy(self, x: f64, y: f64) -> f64 {
        self.distance_squared_to_xy(x, y).sqrt()
    }

    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        self.distance_to_xy(other.x, other.y)
    }

    /// Squared distance, for comparisons that don't need the square root.
    #[must_use]
    pub fn distance_squared_to_xy(self, x: f64, y: f64) -> f64 {
        let dx = x - self.x;
        let dy = y - self.y;
        dx * dx + dy * dy
    }

    #[must_use]
    pub fn distance_squared_to(self, other: Point) -> f64 {
        self.distance_squared_to_xy(other.x, other.y)
    }

    /// Displacement from this point to `other`.
    #[must_use]
    pub fn vector_to(self, other: Point) -> Vector2D {
        Vector2D::new(other.x - self.x, other.y - self.y)
    }
}

/// A 2D displacement with derived magnitude and direction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Build a vector from a direction in degrees and a magnitude.
    #[must_use]
    pub fn from_displacement(direction: f64, magnitude: f64) -> Self {
        let rad = direction.to_radians();
        Self::new(rad.cos() * magnitude, rad.sin() * magnitude)
    }

    #[must_use]
    pub fn magnitude(self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    #[must_use]
    pub fn magnitude_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Rescale to `magnitude`, keeping the current direction.
    pub fn set_magnitude(&mut self, magnitude: f64) {
        *self = Self::from_displacement(self.direction(), magnitude);
    }

    /// Direction in degrees, normalized to `[0, 360)`. The zero vector reports 0.
    #[must_use]
    pub fn direction(self) -> f64 {
        normalize_degrees(self.y.atan2(self.x).to_degrees())
    }

    /// Point this vector in `direction` degrees, keeping the current magnitude.
    pub fn set_direction(&mut self, direction: f64) {
        *self = Self::from_displacement(direction, self.magnitude());
    }

    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Unit vector in the same direction. The zero vector stays zero.
    #[must_use]
    pub fn normalized(self) -> Self {
        let m = self.magnitude();
        if m == 0.0 { self } else { self.scale(1.0 / m) }
    }

    /// Rotate clockwise (on screen) by `angle` degrees.
    #[must_use]
    pub fn rotate(self, angle: f64) -> Self {
        let (sin, cos) = angle.to_radians().sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Turn this vector 90 degrees without trigonometry.
    ///
    /// `left == false` turns clockwise on screen (east becomes south),
    /// `left == true` turns counter-clockwise (east becomes north).
    pub fn orthogonalize(&mut self, left: bool) {
        let (x, y) = (self.x, self.y);
        if left {
            self.x = y;
            self.y = -x;
        } else {
            self.x = -y;
            self.y = x;
        }
    }

    /// Copy of this vector turned 90 degrees; see [`Vector2D::orthogonalize`].
    #[must_use]
    pub fn orthogonalized(mut self, left: bool) -> Self {
        self.orthogonalize(left);
        self
    }

    /// Inner product. Positive when the vectors point the same general way,
    /// zero when perpendicular.
    #[must_use]
    pub fn dot(self, other: Vector2D) -> f64 {
        self.x * other.x + self.y * other.y
    }
}

impl From<Point> for Vector2D {
    fn from(p: Point) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<Vector2D> for Point {
    fn from(v: Vector2D) -> Self {
        Self::new(v.x, v.y)
    }
}

impl Add for Vector2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vector2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Neg for Vector2D {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Vector2D {
    type Output = Self;

    fn mul(self, factor: f64) -> Self {
        self.scale(factor)
    }
}
