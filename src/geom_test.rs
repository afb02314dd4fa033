#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn vec_approx_eq(a: Vector2D, b: Vector2D) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// =============================================================
// Point basics
// =============================================================

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_copy_equals_original() {
    let p = Point::new(7.0, -2.5);
    let q = p;
    assert_eq!(p, q);
}

#[test]
fn point_inequality() {
    assert_ne!(Point::new(1.0, 2.0), Point::new(1.0, 3.0));
}

#[test]
fn point_zero_is_origin() {
    assert_eq!(Point::zero(), Point::new(0.0, 0.0));
}

// =============================================================
// Translation
// =============================================================

#[test]
fn translate_in_place() {
    let mut p = Point::new(1.0, 1.0);
    p.translate_xy(2.0, -3.0);
    assert_eq!(p, Point::new(3.0, -2.0));
}

#[test]
fn translate_by_vector() {
    let mut p = Point::new(1.0, 1.0);
    p.translate(Vector2D::new(4.0, 5.0));
    assert_eq!(p, Point::new(5.0, 6.0));
}

#[test]
fn translated_round_trip_returns_original() {
    let p = Point::new(12.0, -7.0);
    for (dx, dy) in [(3.0, 4.0), (-10.0, 2.0), (0.0, 0.0), (100.0, -100.0)] {
        assert_eq!(p.translated_xy(dx, dy).translated_xy(-dx, -dy), p);
    }
}

#[test]
fn translated_does_not_mutate() {
    let p = Point::new(1.0, 2.0);
    let q = p.translated(Vector2D::new(1.0, 1.0));
    assert_eq!(p, Point::new(1.0, 2.0));
    assert_eq!(q, Point::new(2.0, 3.0));
}

// =============================================================
// Scale / reduce floor snapping
// =============================================================

#[test]
fn scale_floors_result() {
    let mut p = Point::new(3.0, 5.0);
    p.scale(0.5);
    assert_eq!(p, Point::new(1.0, 2.0));
}

#[test]
fn scaled_by_integer_is_exact() {
    assert_eq!(Point::new(3.0, 4.0).scaled(32.0), Point::new(96.0, 128.0));
}

#[test]
fn reduce_floors_result() {
    let mut p = Point::new(101.0, 133.0);
    p.reduce(32.0);
    assert_eq!(p, Point::new(3.0, 4.0));
}

#[test]
fn reduced_floors_negative_towards_negative_infinity() {
    assert_eq!(Point::new(-1.0, -33.0).reduced(32.0), Point::new(-1.0, -2.0));
}

// =============================================================
// Clamp
// =============================================================

#[test]
fn clamp_within_bounds() {
    let p = Point::new(50.0, -5.0).clamped(Point::new(0.0, 0.0), Point::new(40.0, 40.0));
    assert_eq!(p, Point::new(40.0, 0.0));
}

#[test]
fn clamp_is_order_insensitive() {
    let a = Point::new(50.0, -5.0).clamped(Point::new(40.0, 40.0), Point::new(0.0, 0.0));
    let b = Point::new(50.0, -5.0).clamped(Point::new(0.0, 0.0), Point::new(40.0, 40.0));
    assert_eq!(a, b);
}

// =============================================================
// Angles and distances
// =============================================================

#[test]
fn point_at_angle_east_and_south() {
    let origin = Point::new(10.0, 10.0);
    let east = origin.point_at_angle(0.0, 5.0);
    assert!(approx_eq(east.x, 15.0) && approx_eq(east.y, 10.0));
    let south = origin.point_at_angle(90.0, 5.0);
    assert!(approx_eq(south.x, 10.0) && approx_eq(south.y, 15.0));
}

#[test]
fn angle_to_xy_is_unnormalized() {
    let p = Point::new(0.0, 0.0);
    assert!(approx_eq(p.angle_to_xy(0.0, 1.0), 90.0));
    assert!(approx_eq(p.angle_to_xy(0.0, -1.0), -90.0));
}

#[test]
fn angle_to_point_matches_xy_variant() {
    let p = Point::new(1.0, 1.0);
    let q = Point::new(4.0, 5.0);
    assert_eq!(p.angle_to(q), p.angle_to_xy(4.0, 5.0));
}

#[test]
fn distance_and_squared_distance() {
    let p = Point::new(0.0, 0.0);
    let q = Point::new(3.0, 4.0);
    assert_eq!(p.distance_to(q), 5.0);
    assert_eq!(p.distance_squared_to(q), 25.0);
    assert_eq!(p.distance_to_xy(3.0, 4.0), 5.0);
    assert_eq!(p.distance_squared_to_xy(3.0, 4.0), 25.0);
}

#[test]
fn vector_to_other_point() {
    assert_eq!(Point::new(1.0, 2.0).vector_to(Point::new(4.0, 0.0)), Vector2D::new(3.0, -2.0));
}

// =============================================================
// Vector2D derived properties
// =============================================================

#[test]
fn vector_magnitude() {
    assert_eq!(Vector2D::new(3.0, 4.0).magnitude(), 5.0);
    assert_eq!(Vector2D::new(3.0, 4.0).magnitude_squared(), 25.0);
}

#[test]
fn zero_vector_direction_is_zero() {
    assert_eq!(Vector2D::default().direction(), 0.0);
}

#[test]
fn direction_is_normalized_into_0_360() {
    assert!(approx_eq(Vector2D::new(0.0, -1.0).direction(), 270.0));
    assert!(approx_eq(Vector2D::new(-1.0, 0.0).direction(), 180.0));
    assert!(approx_eq(Vector2D::new(0.0, 1.0).direction(), 90.0));
    for v in [Vector2D::new(1.0, -1e-18), Vector2D::new(-3.0, -4.0), Vector2D::new(2.0, 7.0)] {
        let d = v.direction();
        assert!((0.0..360.0).contains(&d), "direction {d} out of range");
    }
}

#[test]
fn from_displacement_reconstructs_vector() {
    for v in [
        Vector2D::new(3.0, 4.0),
        Vector2D::new(-3.0, 4.0),
        Vector2D::new(-0.5, -12.0),
        Vector2D::new(7.0, -1.0),
        Vector2D::new(0.0, 2.0),
    ] {
        let rebuilt = Vector2D::from_displacement(v.direction(), v.magnitude());
        assert!(vec_approx_eq(rebuilt, v), "{rebuilt:?} != {v:?}");
    }
}

#[test]
fn set_magnitude_keeps_direction() {
    let mut v = Vector2D::new(3.0, 4.0);
    let dir = v.direction();
    v.set_magnitude(10.0);
    assert!(approx_eq(v.magnitude(), 10.0));
    assert!(approx_eq(v.direction(), dir));
    assert!(vec_approx_eq(v, Vector2D::new(6.0, 8.0)));
}

#[test]
fn set_direction_keeps_magnitude() {
    let mut v = Vector2D::new(3.0, 4.0);
    v.set_direction(180.0);
    assert!(vec_approx_eq(v, Vector2D::new(-5.0, 0.0)));
}

// =============================================================
// Vector2D arithmetic
// =============================================================

#[test]
fn vector_operators() {
    let a = Vector2D::new(1.0, 2.0);
    let b = Vector2D::new(3.0, -1.0);
    assert_eq!(a + b, Vector2D::new(4.0, 1.0));
    assert_eq!(a - b, Vector2D::new(-2.0, 3.0));
    assert_eq!(-a, Vector2D::new(-1.0, -2.0));
    assert_eq!(a * 3.0, Vector2D::new(3.0, 6.0));
}

#[test]
fn normalized_has_unit_length() {
    assert!(approx_eq(Vector2D::new(3.0, 4.0).normalized().magnitude(), 1.0));
    assert_eq!(Vector2D::default().normalized(), Vector2D::default());
}

#[test]
fn rotate_quarter_turn_is_clockwise_on_screen() {
    let v = Vector2D::new(1.0, 0.0).rotate(90.0);
    assert!(vec_approx_eq(v, Vector2D::new(0.0, 1.0)));
}

#[test]
fn orthogonalize_right_matches_rotate_90() {
    let v = Vector2D::new(2.0, 5.0);
    assert!(vec_approx_eq(v.orthogonalized(false), v.rotate(90.0)));
    assert_eq!(Vector2D::new(1.0, 0.0).orthogonalized(false), Vector2D::new(-0.0, 1.0));
}

#[test]
fn orthogonalize_left_turns_east_to_north() {
    let mut v = Vector2D::new(1.0, 0.0);
    v.orthogonalize(true);
    assert_eq!(v, Vector2D::new(0.0, -1.0));
}

#[test]
fn orthogonal_vectors_have_zero_dot() {
    let v = Vector2D::new(4.0, -7.0);
    assert_eq!(v.dot(v.orthogonalized(true)), 0.0);
    assert_eq!(v.dot(v.orthogonalized(false)), 0.0);
}

#[test]
fn dot_sign_reflects_direction() {
    let v = Vector2D::new(1.0, 0.0);
    assert!(v.dot(Vector2D::new(5.0, 1.0)) > 0.0);
    assert!(v.dot(Vector2D::new(-5.0, 1.0)) < 0.0);
}

#[test]
fn point_vector_conversions() {
    let v: Vector2D = Point::new(1.0, 2.0).into();
    assert_eq!(v, Vector2D::new(1.0, 2.0));
    let p: Point = v.into();
    assert_eq!(p, Point::new(1.0, 2.0));
}

// =============================================================
// normalize_degrees
// =============================================================

#[test]
fn normalize_degrees_wraps_both_ways() {
    assert_eq!(normalize_degrees(370.0), 10.0);
    assert_eq!(normalize_degrees(-90.0), 270.0);
    assert_eq!(normalize_degrees(360.0), 0.0);
    assert_eq!(normalize_degrees(-1e-15), 0.0);
}
