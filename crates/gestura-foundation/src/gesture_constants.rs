//! Shared gesture constants for swipe and pan recognition.
//!
//! Velocities are expressed in logical pixels per millisecond and distances in
//! logical pixels, matching what [`TouchSource`](crate::TouchSource) reports.

/// Minimum speed along the tested axis for a frame to count as a swipe.
///
/// A finger covering 0.7 px every millisecond (700 px/s) reads as a flick on
/// typical phone densities while slow drags stay well below it.
pub const DEFAULT_INITIAL_VELOCITY_THRESHOLD: f32 = 0.7;

/// Maximum drift on the vertical axis while testing a horizontal swipe.
pub const DEFAULT_VERTICAL_THRESHOLD: f32 = 10.0;

/// Maximum drift on the horizontal axis while testing a vertical swipe.
pub const DEFAULT_HORIZONTAL_THRESHOLD: f32 = 10.0;

/// Upper bound applied to velocities reported by the touch source, in px/ms.
///
/// Matches the 8000 px/s fling cap used by common platform view configurations.
pub const MAX_TOUCH_VELOCITY: f32 = 8.0;
