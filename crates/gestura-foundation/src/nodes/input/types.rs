use crate::geometry::Point;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// Raw pointer report as delivered by a platform backend.
///
/// `uptime_ms` must be monotonic for a given pointer; the touch source derives
/// velocities from it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub id: PointerId,
    pub kind: PointerEventKind,
    pub position: Point,
    pub uptime_ms: i64,
}

impl PointerSample {
    pub fn new(id: PointerId, kind: PointerEventKind, position: Point, uptime_ms: i64) -> Self {
        Self {
            id,
            kind,
            position,
            uptime_ms,
        }
    }
}

/// One reported touch-move frame.
///
/// `dx`/`dy` are the displacement since the previous report and `vx`/`vy` the
/// instantaneous velocity in px/ms.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureSample {
    pub dx: f32,
    pub dy: f32,
    pub vx: f32,
    pub vy: f32,
}

impl GestureSample {
    pub const fn new(dx: f32, dy: f32, vx: f32, vy: f32) -> Self {
        Self { dx, dy, vx, vy }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchStart {
    pub touch_count: usize,
    pub origin: Point,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchMove {
    pub sample: GestureSample,
    pub touch_count: usize,
}

impl TouchMove {
    /// A single-touch move frame.
    pub fn single(sample: GestureSample) -> Self {
        Self {
            sample,
            touch_count: 1,
        }
    }
}

/// Gesture lifecycle event consumed by responders.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TouchEvent {
    Start(TouchStart),
    Move(TouchMove),
    /// The last pointer lifted.
    Release,
    /// The platform cancelled the gesture.
    Terminate,
}

