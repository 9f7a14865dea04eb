//! The single gate deciding whether motion along one axis is a swipe.

/// Returns true when the motion is fast enough along the primary axis and
/// straight enough on the cross axis.
///
/// Both bounds are inclusive: `|primary_velocity| == velocity_threshold` and
/// `|cross_axis_distance| == cross_axis_threshold` qualify.
#[inline]
pub fn is_valid_swipe(
    primary_velocity: f32,
    cross_axis_distance: f32,
    velocity_threshold: f32,
    cross_axis_threshold: f32,
) -> bool {
    primary_velocity.abs() >= velocity_threshold
        && cross_axis_distance.abs() <= cross_axis_threshold
}
