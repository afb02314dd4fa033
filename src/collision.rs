//! Pure intersection tests for points, rectangles, circles, lines and segments.
//!
//! Every function here is total. Boolean queries answer `false` for "no
//! overlap" and point queries answer `None` for "no intersection"; nothing
//! panics, so the functions are safe to call from per-frame collision code.
//!
//! Containment and overlap tests are inclusive: touching shapes collide.

#[cfg(test)]
#[path = "collision_test.rs"]
mod collision_test;

use crate::geom::{Point, Vector2D};
use crate::range::{clamp_to_range, range_in_range, value_in_range};

/// Axis-aligned rectangle given by its top-left corner and size.
///
/// Negative sizes are tolerated: every test below works on the spanned range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// The degenerate rectangle spanned by a segment's two endpoints.
    #[must_use]
    pub fn spanning(a: Point, b: Point) -> Self {
        Self::new(a.x, a.y, b.x - a.x, b.y - a.y)
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// The four edges as segments: top, right, bottom, left.
    #[must_use]
    pub fn edges(&self) -> [(Point, Point); 4] {
        let tl = Point::new(self.x, self.y);
        let tr = Point::new(self.right(), self.y);
        let br = Point::new(self.right(), self.bottom());
        let bl = Point::new(self.x, self.bottom());
        [(tl, tr), (tr, br), (bl, br), (tl, bl)]
    }
}

/// Circle given by its center and radius.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl Circle {
    #[must_use]
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Self { x, y, radius }
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

// =============================================================
// Containment and overlap
// =============================================================

/// Whether `p` lies inside `rect`, edges included.
#[must_use]
pub fn point_in_rect(p: Point, rect: Rect) -> bool {
    value_in_range(p.x, rect.x, rect.right()) && value_in_range(p.y, rect.y, rect.bottom())
}

/// Whether `p` lies inside `circle`, boundary included.
#[must_use]
pub fn point_in_circle(p: Point, circle: Circle) -> bool {
    p.distance_squared_to_xy(circle.x, circle.y) <= circle.radius * circle.radius
}

/// Separating-axis test: the rectangles overlap iff both axis projections overlap.
#[must_use]
pub fn rect_in_rect(a: Rect, b: Rect) -> bool {
    range_in_range(a.x, a.right(), b.x, b.right()) && range_in_range(a.y, a.bottom(), b.y, b.bottom())
}

/// Whether two circles overlap or touch.
#[must_use]
pub fn circle_in_circle(a: Circle, b: Circle) -> bool {
    let reach = a.radius + b.radius;
    a.center().distance_squared_to(b.center()) <= reach * reach
}

/// Exact rectangle/circle overlap.
///
/// The circle center is clamped into the rectangle to find the nearest point
/// of the rectangle, which is then tested against the circle.
#[must_use]
pub fn rect_in_circle(rect: Rect, circle: Circle) -> bool {
    let nearest = Point::new(
        clamp_to_range(circle.x, rect.x, rect.right()),
        clamp_to_range(circle.y, rect.y, rect.bottom()),
    );
    point_in_circle(nearest, circle)
}

// =============================================================
// Lines and segments
// =============================================================

/// Intersection of the infinite lines through `(a0, a1)` and `(b0, b1)`.
///
/// Both lines are put in standard form `Ax + By = C` and the system is solved
/// with Cramer's rule. Parallel and coincident lines both produce a
/// non-finite solution and return `None`; the two cases are not told apart.
#[must_use]
pub fn line_intersection(a0: Point, a1: Point, b0: Point, b1: Point) -> Option<Point> {
    let (a_a, b_a, c_a) = standard_form(a0, a1);
    let (a_b, b_b, c_b) = standard_form(b0, b1);

    let det = a_a * b_b - a_b * b_a;
    let x = (b_b * c_a - b_a * c_b) / det;
    let y = (a_a * c_b - a_b * c_a) / det;

    if x.is_finite() && y.is_finite() { Some(Point::new(x, y)) } else { None }
}

fn standard_form(p0: Point, p1: Point) -> (f64, f64, f64) {
    let a = p1.y - p0.y;
    let b = p0.x - p1.x;
    let c = a * p0.x + b * p0.y;
    (a, b, c)
}

/// Intersection of the finite segments `(a0, a1)` and `(b0, b1)`.
///
/// The infinite-line intersection is accepted only when it falls inside the
/// bounding box of both segments.
#[must_use]
pub fn segment_intersection(a0: Point, a1: Point, b0: Point, b1: Point) -> Option<Point> {
    let hit = line_intersection(a0, a1, b0, b1)?;
    if point_in_rect(hit, Rect::spanning(a0, a1)) && point_in_rect(hit, Rect::spanning(b0, b1)) {
        Some(hit)
    } else {
        None
    }
}

/// First point where the segment `p0 -> p1` meets the boundary of `rect`.
///
/// The segment's own bounding box is checked against the rectangle first. The
/// segment is then tested against each edge. When several edges are hit, the
/// hit that comes first along the segment wins: a later hit replaces the
/// current winner only when the vector from the winner to it points against
/// the segment direction (negative dot product). A segment lying entirely
/// inside the rectangle touches no edge and yields `None`.
#[must_use]
pub fn segment_rectangle_intersection(p0: Point, p1: Point, rect: Rect) -> Option<Point> {
    if !rect_in_rect(Rect::spanning(p0, p1), rect) {
        return None;
    }

    let direction: Vector2D = p0.vector_to(p1);
    let mut first: Option<Point> = None;
    for (e0, e1) in rect.edges() {
        let Some(hit) = segment_intersection(p0, p1, e0, e1) else {
            continue;
        };
        first = match first {
            Some(current) if direction.dot(current.vector_to(hit)) >= 0.0 => Some(current),
            _ => Some(hit),
        };
    }
    first
}
