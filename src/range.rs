//! Order-insensitive numeric range helpers.
//!
//! A range is given by two bounds in either order; `(0, 10)` and `(10, 0)`
//! describe the same closed interval. Collision code relies on this when a
//! segment's bounding box is expressed with negative extents.

#[cfg(test)]
#[path = "range_test.rs"]
mod range_test;

/// Whether `value` lies in the closed range spanned by `a` and `b`.
#[must_use]
pub fn value_in_range(value: f64, a: f64, b: f64) -> bool {
    value >= a.min(b) && value <= a.max(b)
}

/// Whether the closed ranges `[a0, a1]` and `[b0, b1]` overlap.
#[must_use]
pub fn range_in_range(a0: f64, a1: f64, b0: f64, b1: f64) -> bool {
    a0.max(a1) >= b0.min(b1) && a0.min(a1) <= b0.max(b1)
}

/// Clamp `value` into the closed range spanned by `a` and `b`.
#[must_use]
pub fn clamp_to_range(value: f64, a: f64, b: f64) -> f64 {
    value.max(a.min(b)).min(a.max(b))
}
