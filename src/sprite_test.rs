#![allow(clippy::float_cmp)]

use super::*;

fn sheet() -> SpriteSheet {
    SpriteSheet::new("hero", 16.0, 24.0, 4, 10)
}

// =============================================================
// SpriteSheet
// =============================================================

#[test]
fn valid_indices() {
    let s = sheet();
    assert!(s.is_valid_index(0));
    assert!(s.is_valid_index(9));
    assert!(!s.is_valid_index(10));
}

#[test]
fn zero_columns_has_no_valid_sprites() {
    let s = SpriteSheet::new("empty", 16.0, 16.0, 0, 4);
    assert!(!s.is_valid_index(0));
    assert_eq!(s.source_rect(0), None);
}

#[test]
fn source_rect_walks_rows() {
    let s = sheet();
    assert_eq!(s.source_rect(0), Some(Rect::new(0.0, 0.0, 16.0, 24.0)));
    assert_eq!(s.source_rect(3), Some(Rect::new(48.0, 0.0, 16.0, 24.0)));
    assert_eq!(s.source_rect(5), Some(Rect::new(16.0, 24.0, 16.0, 24.0)));
    assert_eq!(s.source_rect(10), None);
}

#[test]
fn sheet_deserializes_from_json() {
    let s: SpriteSheet = serde_json::from_str(
        r#"{ "image": "hero", "sprite_width": 16, "sprite_height": 24, "columns": 4, "count": 10 }"#,
    )
    .unwrap();
    assert_eq!(s, sheet());
}

// =============================================================
// Animation
// =============================================================

#[test]
fn looping_animation_wraps() {
    let a = Animation::new(vec![4, 5, 6], 2);
    let frames: Vec<_> = (0..8).map(|t| a.frame_at(t)).collect();
    assert_eq!(frames, vec![Some(4), Some(4), Some(5), Some(5), Some(6), Some(6), Some(4), Some(4)]);
}

#[test]
fn once_animation_holds_last_frame() {
    let a = Animation::once(vec![1, 2], 1);
    assert_eq!(a.frame_at(0), Some(1));
    assert_eq!(a.frame_at(1), Some(2));
    assert_eq!(a.frame_at(50), Some(2));
}

#[test]
fn empty_animation_has_no_frame() {
    assert_eq!(Animation::new(vec![], 3).frame_at(0), None);
}

#[test]
fn zero_ticks_per_frame_advances_every_tick() {
    let a = Animation::new(vec![7, 8], 0);
    assert_eq!(a.frame_at(0), Some(7));
    assert_eq!(a.frame_at(1), Some(8));
}

#[test]
fn animation_looping_defaults_true_in_json() {
    let a: Animation = serde_json::from_str(r#"{ "frames": [1, 2], "ticks_per_frame": 3 }"#).unwrap();
    assert!(a.looping);
}

// =============================================================
// AnimationList
// =============================================================

#[test]
fn update_without_current_is_none() {
    let mut list = AnimationList::new();
    list.add("walk", Animation::new(vec![0, 1], 1));
    assert_eq!(list.update(10), None);
}

#[test]
fn play_anchors_at_first_update() {
    let mut list = AnimationList::new();
    list.add("walk", Animation::new(vec![0, 1, 2], 1));
    assert!(list.play("walk"));
    assert_eq!(list.update(100), Some(0));
    assert_eq!(list.update(101), Some(1));
    assert_eq!(list.update(102), Some(2));
    assert_eq!(list.update(103), Some(0));
}

#[test]
fn play_same_animation_does_not_restart() {
    let mut list = AnimationList::new();
    list.add("walk", Animation::new(vec![0, 1, 2], 1));
    list.play("walk");
    list.update(0);
    list.play("walk");
    assert_eq!(list.update(1), Some(1));
}

#[test]
fn play_other_animation_restarts() {
    let mut list = AnimationList::new();
    list.add("walk", Animation::new(vec![0, 1, 2], 1));
    list.add("idle", Animation::new(vec![9, 8], 1));
    list.play("walk");
    list.update(0);
    list.update(1);
    list.play("idle");
    assert_eq!(list.current(), Some("idle"));
    assert_eq!(list.update(2), Some(9));
}

#[test]
fn play_unknown_is_rejected() {
    let mut list = AnimationList::new();
    assert!(!list.play("missing"));
    assert_eq!(list.current(), None);
}

#[test]
fn stop_clears_current() {
    let mut list = AnimationList::new();
    list.add("walk", Animation::new(vec![0], 1));
    list.play("walk");
    list.stop();
    assert_eq!(list.current(), None);
    assert_eq!(list.update(5), None);
    assert_eq!(list.len(), 1);
    assert!(!list.is_empty());
}
