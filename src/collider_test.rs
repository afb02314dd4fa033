#![allow(clippy::float_cmp)]

use super::*;
use crate::config::StageConfig;
use crate::render::{CommandRecorder, DrawCommand};

fn all_shapes() -> Vec<Collider> {
    vec![
        Collider::rectangle(0.0, 0.0, 10.0, 10.0),
        Collider::rectangle(5.0, 5.0, 2.0, 2.0),
        Collider::circle(0.0, 0.0, 5.0),
        Collider::circle(3.0, 3.0, 1.0),
    ]
}

// =============================================================
// Construction and shape accessors
// =============================================================

#[test]
fn rectangle_defaults() {
    let c = Collider::rectangle(1.0, 2.0, 30.0, 40.0);
    assert_eq!(c.collider_type(), ColliderType::Rectangle);
    assert_eq!(c.width(), 30.0);
    assert_eq!(c.height(), 40.0);
    assert_eq!(c.radius(), None);
    assert_eq!(c.origin(), Point::zero());
    assert_eq!(c.angle(), 0.0);
}

#[test]
fn circle_reports_diameter_and_radius() {
    let c = Collider::circle(0.0, 0.0, 6.0);
    assert_eq!(c.collider_type(), ColliderType::Circle);
    assert_eq!(c.radius(), Some(6.0));
    assert_eq!(c.width(), 12.0);
    assert_eq!(c.height(), 12.0);
    assert_eq!(c.origin(), Point::new(6.0, 6.0));
}

#[test]
fn circle_center_is_position_plus_radius() {
    let c = Collider::circle(10.0, 20.0, 5.0);
    assert_eq!(c.as_circle(), Some(Circle::new(15.0, 25.0, 5.0)));
    assert_eq!(c.origin_point(), Point::new(15.0, 25.0));
}

#[test]
fn none_has_zero_size() {
    let c = Collider::none(4.0, 4.0);
    assert_eq!(c.collider_type(), ColliderType::None);
    assert_eq!(c.width(), 0.0);
    assert_eq!(c.height(), 0.0);
    assert_eq!(c.as_circle(), None);
}

#[test]
fn make_circle_with_and_without_origin_reset() {
    let mut c = Collider::rectangle(0.0, 0.0, 10.0, 10.0);
    c.set_origin(Point::new(1.0, 1.0));
    c.make_circle(4.0, false);
    assert_eq!(c.origin(), Point::new(1.0, 1.0));
    c.make_circle(4.0, true);
    assert_eq!(c.origin(), Point::new(4.0, 4.0));
    assert_eq!(c.radius(), Some(4.0));
}

#[test]
fn make_rectangle_resets_origin_to_top_left() {
    let mut c = Collider::circle(0.0, 0.0, 4.0);
    c.make_rectangle(8.0, 3.0, true);
    assert_eq!(c.collider_type(), ColliderType::Rectangle);
    assert_eq!(c.origin(), Point::zero());
    assert_eq!((c.width(), c.height()), (8.0, 3.0));
}

#[test]
fn angle_is_normalized() {
    let mut c = Collider::rectangle(0.0, 0.0, 1.0, 1.0);
    c.set_angle(-90.0);
    assert_eq!(c.angle(), 270.0);
    c.rotate_by(100.0);
    assert_eq!(c.angle(), 10.0);
}

// =============================================================
// contains_xy
// =============================================================

#[test]
fn rectangle_contains_inclusive() {
    let c = Collider::rectangle(10.0, 10.0, 10.0, 10.0);
    assert!(c.contains_xy(10.0, 10.0));
    assert!(c.contains_xy(20.0, 20.0));
    assert!(!c.contains_xy(9.0, 15.0));
}

#[test]
fn circle_contains_uses_center() {
    let c = Collider::circle(0.0, 0.0, 5.0);
    assert!(c.contains_xy(5.0, 5.0));
    assert!(c.contains_xy(10.0, 5.0));
    // Bounding-box corner lies outside the circle.
    assert!(!c.contains_xy(0.5, 0.5));
}

#[test]
fn none_contains_nothing() {
    let c = Collider::none(0.0, 0.0);
    for (x, y) in [(0.0, 0.0), (1.0, 1.0), (-3.0, 7.0)] {
        assert!(!c.contains_xy(x, y));
    }
}

// =============================================================
// collides_with
// =============================================================

#[test]
fn none_never_collides_either_side() {
    let none = Collider::none(0.0, 0.0);
    for other in all_shapes() {
        assert!(!none.collides_with(&other));
        assert!(!other.collides_with(&none));
    }
    assert!(!none.collides_with(&none.clone()));
}

#[test]
fn rect_rect_overlap() {
    let a = Collider::rectangle(0.0, 0.0, 10.0, 10.0);
    assert!(a.collides_with(&Collider::rectangle(9.0, 9.0, 5.0, 5.0)));
    assert!(!a.collides_with(&Collider::rectangle(11.0, 0.0, 5.0, 5.0)));
}

#[test]
fn circle_circle_overlap() {
    let a = Collider::circle(0.0, 0.0, 5.0);
    assert!(a.collides_with(&Collider::circle(10.0, 0.0, 5.0)));
    assert!(!a.collides_with(&Collider::circle(10.5, 0.0, 5.0)));
}

#[test]
fn mixed_pair_is_order_independent() {
    let rect = Collider::rectangle(0.0, 0.0, 10.0, 10.0);
    // Center (20, 5): nearest rect point is (10, 5), distance 10.
    let near = Collider::circle(10.0, -5.0, 10.0);
    let far = Collider::circle(11.0, -4.0, 9.0);
    assert!(rect.collides_with(&near));
    assert!(near.collides_with(&rect));
    assert!(!rect.collides_with(&far));
    assert!(!far.collides_with(&rect));
}

#[test]
fn collides_with_is_symmetric() {
    let shapes = all_shapes();
    for a in &shapes {
        for b in &shapes {
            assert_eq!(a.collides_with(b), b.collides_with(a));
        }
    }
}

// =============================================================
// intersect_with_segment_xy
// =============================================================

#[test]
fn rectangle_segment_first_hit() {
    let c = Collider::rectangle(0.0, 0.0, 10.0, 10.0);
    assert_eq!(c.intersect_with_segment_xy(-5.0, 5.0, 15.0, 5.0), Some(Point::new(0.0, 5.0)));
    assert_eq!(c.intersect_with_segment_xy(15.0, 5.0, -5.0, 5.0), Some(Point::new(10.0, 5.0)));
}

#[test]
fn circle_and_none_segments_are_unsupported() {
    let seg = (-5.0, 5.0, 15.0, 5.0);
    assert_eq!(Collider::circle(0.0, 0.0, 5.0).intersect_with_segment_xy(seg.0, seg.1, seg.2, seg.3), None);
    assert_eq!(Collider::none(0.0, 0.0).intersect_with_segment_xy(seg.0, seg.1, seg.2, seg.3), None);
}

// =============================================================
// clamp_to_stage
// =============================================================

#[test]
fn clamp_to_stage_keeps_shape_inside() {
    let stage = Stage::new(StageConfig { width_tiles: 4, height_tiles: 2, ..StageConfig::default() }).unwrap();
    let mut c = Collider::rectangle(200.0, -10.0, 32.0, 16.0);
    c.clamp_to_stage(&stage);
    assert_eq!(c.position(), Point::new(96.0, 0.0));

    let mut circle = Collider::circle(-4.0, 100.0, 8.0);
    circle.clamp_to_stage(&stage);
    assert_eq!(circle.position(), Point::new(0.0, 48.0));
}

// =============================================================
// render
// =============================================================

#[test]
fn render_rectangle_outline_and_origin_dot() {
    let c = Collider::rectangle(0.0, 0.0, 10.0, 20.0);
    let mut r = CommandRecorder::new();
    c.render(5.0, 6.0, &mut r);
    assert_eq!(
        r.commands(),
        &[
            DrawCommand::TranslateAndRotate { x: 5.0, y: 6.0, angle: 0.0 },
            DrawCommand::StrokeRect { x: 0.0, y: 0.0, width: 10.0, height: 20.0, color: DEBUG_OUTLINE_COLOR.into() },
            DrawCommand::FillCircle { x: 0.0, y: 0.0, radius: DEBUG_ORIGIN_RADIUS, color: DEBUG_ORIGIN_COLOR.into() },
            DrawCommand::Restore,
        ]
    );
    assert_eq!(r.transform_depth(), 0);
}

#[test]
fn render_circle_rotates_around_center() {
    let mut c = Collider::circle(0.0, 0.0, 4.0);
    c.set_angle(45.0);
    let mut r = CommandRecorder::new();
    c.render(10.0, 10.0, &mut r);
    assert_eq!(r.commands()[0], DrawCommand::TranslateAndRotate { x: 14.0, y: 14.0, angle: 45.0 });
    assert_eq!(
        r.commands()[1],
        DrawCommand::StrokeCircle { x: 0.0, y: 0.0, radius: 4.0, color: DEBUG_OUTLINE_COLOR.into() }
    );
}

#[test]
fn render_none_draws_only_origin() {
    let mut r = CommandRecorder::new();
    Collider::none(0.0, 0.0).render(0.0, 0.0, &mut r);
    assert_eq!(r.commands().len(), 3);
    assert!(matches!(r.commands()[1], DrawCommand::FillCircle { .. }));
}
