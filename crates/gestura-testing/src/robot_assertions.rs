//! Assertion utilities for gesture tests.

/// Assert that a value is within an expected range.
///
/// Accumulated displacements and estimated velocities pick up floating point
/// error, so exact comparisons are too strict for them.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that a collection has an expected count.
pub fn assert_count<T: std::fmt::Debug>(items: &[T], expected: usize, msg: &str) {
    assert_eq!(
        items.len(),
        expected,
        "{}: expected {} items, got {:?}",
        msg,
        expected,
        items
    );
}
