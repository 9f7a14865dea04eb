//! Pointer velocity estimation for swipe detection.
//!
//! Uses the impulse strategy: each pair of consecutive samples imparts kinetic
//! energy to a unit mass and the resulting energy is converted back into a
//! velocity. Both axes share one sample history.

use crate::geometry::Point;
use crate::gesture_constants::MAX_TOUCH_VELOCITY;

const HISTORY_SIZE: usize = 20;

/// Only samples within this window of the newest one contribute.
const HORIZON_MS: i64 = 100;

/// A gap longer than this between samples means the pointer had stopped.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Debug)]
struct PositionAtTime {
    time_ms: i64,
    position: Point,
}

/// Two-dimensional velocity, px/ms.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity { x: 0.0, y: 0.0 };
}

/// Tracks recent pointer positions and estimates the current velocity.
///
/// ```ignore
/// let mut tracker = VelocityTracker::new();
/// tracker.add_position(0, Point::new(0.0, 0.0));
/// tracker.add_position(10, Point::new(8.0, 0.0));
/// let v = tracker.velocity(); // ~0.8 px/ms along x
/// ```
#[derive(Clone, Debug)]
pub struct VelocityTracker {
    samples: [Option<PositionAtTime>; HISTORY_SIZE],
    index: usize,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            index: 0,
        }
    }

    pub fn add_position(&mut self, time_ms: i64, position: Point) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(PositionAtTime { time_ms, position });
    }

    /// Current velocity estimate in px/ms, clamped to [`MAX_TOUCH_VELOCITY`].
    ///
    /// Zero until at least two samples fall inside the horizon.
    pub fn velocity(&self) -> Velocity {
        let Some(newest) = self.samples[self.index] else {
            return Velocity::ZERO;
        };

        let mut xs = [0.0f32; HISTORY_SIZE];
        let mut ys = [0.0f32; HISTORY_SIZE];
        let mut times = [0.0f32; HISTORY_SIZE];
        let mut count = 0;

        let mut cursor = self.index;
        let mut previous = newest;
        while let Some(sample) = self.samples[cursor] {
            let age = newest.time_ms - sample.time_ms;
            let gap = (previous.time_ms - sample.time_ms).abs();
            if age > HORIZON_MS || gap > ASSUME_STOPPED_MS {
                break;
            }

            xs[count] = sample.position.x;
            ys[count] = sample.position.y;
            times[count] = -(age as f32);
            previous = sample;
            count += 1;
            if count >= HISTORY_SIZE {
                break;
            }

            cursor = if cursor == 0 {
                HISTORY_SIZE - 1
            } else {
                cursor - 1
            };
        }

        if count < 2 {
            return Velocity::ZERO;
        }

        Velocity {
            x: clamp_velocity(impulse_velocity(&xs[..count], &times[..count])),
            y: clamp_velocity(impulse_velocity(&ys[..count], &times[..count])),
        }
    }

    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.index = 0;
    }
}

fn clamp_velocity(velocity: f32) -> f32 {
    if !velocity.is_finite() {
        return 0.0;
    }
    velocity.clamp(-MAX_TOUCH_VELOCITY, MAX_TOUCH_VELOCITY)
}

/// Positions and times are ordered newest first; times are non-positive ages.
fn impulse_velocity(positions: &[f32], times: &[f32]) -> f32 {
    let oldest = positions.len() - 1;
    let mut work = 0.0f32;

    for i in (1..=oldest).rev() {
        let older_time = times[i];
        let newer_time = times[i - 1];
        if older_time == newer_time {
            continue;
        }

        let v_curr = (positions[i - 1] - positions[i]) / (newer_time - older_time);
        let v_prev = kinetic_energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == oldest {
            work *= 0.5;
        }
    }

    kinetic_energy_to_velocity(work)
}

/// E = 0.5 * m * v^2 with m = 1.
#[inline]
fn kinetic_energy_to_velocity(kinetic_energy: f32) -> f32 {
    kinetic_energy.signum() * (2.0 * kinetic_energy.abs()).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tracker_reports_zero() {
        assert_eq!(VelocityTracker::new().velocity(), Velocity::ZERO);
    }

    #[test]
    fn single_sample_reports_zero() {
        let mut tracker = VelocityTracker::new();
        tracker.add_position(0, Point::new(5.0, 5.0));
        assert_eq!(tracker.velocity(), Velocity::ZERO);
    }

    #[test]
    fn constant_motion_along_x() {
        let mut tracker = VelocityTracker::new();
        // 10 px every 10 ms = 1 px/ms
        for step in 0..4 {
            tracker.add_position(step * 10, Point::new(step as f32 * 10.0, 50.0));
        }

        let velocity = tracker.velocity();
        assert!(
            (velocity.x - 1.0).abs() < 0.1,
            "Expected ~1.0 px/ms, got {}",
            velocity.x
        );
        assert!(velocity.y.abs() < f32::EPSILON);
    }

    #[test]
    fn upward_motion_is_negative() {
        let mut tracker = VelocityTracker::new();
        for step in 0..4 {
            tracker.add_position(step * 10, Point::new(0.0, 100.0 - step as f32 * 8.0));
        }

        let velocity = tracker.velocity();
        assert!(velocity.y < -0.5, "Expected upward velocity, got {}", velocity.y);
    }

    #[test]
    fn pause_longer_than_stop_threshold_discards_history() {
        let mut tracker = VelocityTracker::new();
        tracker.add_position(0, Point::new(0.0, 0.0));
        tracker.add_position(10, Point::new(50.0, 0.0));
        tracker.add_position(10 + ASSUME_STOPPED_MS + 1, Point::new(50.0, 0.0));

        assert_eq!(tracker.velocity(), Velocity::ZERO);
    }

    #[test]
    fn velocity_is_clamped() {
        let mut tracker = VelocityTracker::new();
        tracker.add_position(0, Point::new(0.0, 0.0));
        tracker.add_position(1, Point::new(1_000.0, 0.0));
        tracker.add_position(2, Point::new(2_000.0, 0.0));

        assert_eq!(tracker.velocity().x, MAX_TOUCH_VELOCITY);
    }

    #[test]
    fn reset_clears_history() {
        let mut tracker = VelocityTracker::new();
        tracker.add_position(0, Point::new(0.0, 0.0));
        tracker.add_position(10, Point::new(10.0, 0.0));
        tracker.reset();

        assert_eq!(tracker.velocity(), Velocity::ZERO);
    }
}
