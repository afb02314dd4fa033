#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// value_in_range
// =============================================================

#[test]
fn value_inside_range() {
    assert!(value_in_range(5.0, 0.0, 10.0));
}

#[test]
fn value_on_bounds_is_inside() {
    assert!(value_in_range(0.0, 0.0, 10.0));
    assert!(value_in_range(10.0, 0.0, 10.0));
}

#[test]
fn value_outside_range() {
    assert!(!value_in_range(-0.5, 0.0, 10.0));
    assert!(!value_in_range(10.5, 0.0, 10.0));
}

#[test]
fn value_in_range_reversed_bounds() {
    assert!(value_in_range(5.0, 10.0, 0.0));
    assert!(!value_in_range(11.0, 10.0, 0.0));
}

// =============================================================
// range_in_range
// =============================================================

#[test]
fn overlapping_ranges() {
    assert!(range_in_range(0.0, 10.0, 5.0, 15.0));
}

#[test]
fn touching_ranges_overlap() {
    assert!(range_in_range(0.0, 10.0, 10.0, 20.0));
}

#[test]
fn disjoint_ranges() {
    assert!(!range_in_range(0.0, 10.0, 11.0, 20.0));
}

#[test]
fn contained_range_overlaps() {
    assert!(range_in_range(0.0, 10.0, 2.0, 3.0));
    assert!(range_in_range(2.0, 3.0, 0.0, 10.0));
}

#[test]
fn range_in_range_is_order_insensitive() {
    assert!(range_in_range(10.0, 0.0, 15.0, 5.0));
    assert!(!range_in_range(10.0, 0.0, 20.0, 11.0));
}

// =============================================================
// clamp_to_range
// =============================================================

#[test]
fn clamp_inside_is_identity() {
    assert_eq!(clamp_to_range(4.0, 0.0, 10.0), 4.0);
}

#[test]
fn clamp_below_and_above() {
    assert_eq!(clamp_to_range(-3.0, 0.0, 10.0), 0.0);
    assert_eq!(clamp_to_range(13.0, 0.0, 10.0), 10.0);
}

#[test]
fn clamp_with_reversed_bounds() {
    assert_eq!(clamp_to_range(13.0, 10.0, 0.0), 10.0);
    assert_eq!(clamp_to_range(-1.0, 10.0, 0.0), 0.0);
}
