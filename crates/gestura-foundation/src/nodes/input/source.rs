//! Touch source: turns raw pointer samples into gesture lifecycle events.
//!
//! The first pointer to go down is the primary pointer. Its moves become
//! [`TouchEvent::Move`] frames carrying the displacement since the previous
//! frame and the current velocity. Additional pointers only change the touch
//! count reported with those frames.

use super::types::{
    GestureSample, PointerEventKind, PointerId, PointerSample, TouchEvent, TouchMove, TouchStart,
};
use crate::geometry::Point;
use crate::velocity_tracker::VelocityTracker;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug)]
struct ActivePointer {
    id: PointerId,
    position: Point,
}

#[derive(Debug, Default)]
pub struct TouchSource {
    active: SmallVec<[ActivePointer; 4]>,
    primary: Option<PointerId>,
    last_position: Point,
    velocity: VelocityTracker,
}

impl TouchSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pointers currently down.
    pub fn touch_count(&self) -> usize {
        self.active.len()
    }

    pub fn is_active(&self) -> bool {
        !self.active.is_empty()
    }

    /// Processes one pointer sample on its own frame.
    pub fn process(&mut self, sample: PointerSample) -> Option<TouchEvent> {
        self.process_frame(std::slice::from_ref(&sample))
            .into_iter()
            .next()
    }

    /// Processes samples the platform delivered together.
    ///
    /// Pointers going down in the same frame as the gesture start are counted
    /// in that start event, so a two-finger tap reports `touch_count == 2`.
    pub fn process_frame(&mut self, samples: &[PointerSample]) -> SmallVec<[TouchEvent; 2]> {
        let mut events = SmallVec::new();
        let was_idle = self.active.is_empty();

        let mut first_down: Option<PointerSample> = None;
        for sample in samples.iter().filter(|s| s.kind == PointerEventKind::Down) {
            if self.track_down(sample) && first_down.is_none() {
                first_down = Some(*sample);
            }
        }

        if let (true, Some(down)) = (was_idle, first_down) {
            self.primary = Some(down.id);
            self.last_position = down.position;
            self.velocity.reset();
            self.velocity.add_position(down.uptime_ms, down.position);
            events.push(TouchEvent::Start(TouchStart {
                touch_count: self.active.len(),
                origin: down.position,
            }));
        }

        for sample in samples.iter().filter(|s| s.kind != PointerEventKind::Down) {
            let event = match sample.kind {
                PointerEventKind::Move => self.handle_move(sample),
                PointerEventKind::Up => self.handle_up(sample),
                PointerEventKind::Cancel => self.handle_cancel(),
                PointerEventKind::Down => None,
            };
            events.extend(event);
        }

        events
    }

    fn track_down(&mut self, sample: &PointerSample) -> bool {
        if self.active.iter().any(|p| p.id == sample.id) {
            log::trace!("ignoring duplicate down for pointer {}", sample.id);
            return false;
        }
        self.active.push(ActivePointer {
            id: sample.id,
            position: sample.position,
        });
        true
    }

    fn handle_move(&mut self, sample: &PointerSample) -> Option<TouchEvent> {
        let Some(pointer) = self.active.iter_mut().find(|p| p.id == sample.id) else {
            log::trace!("ignoring move for unknown pointer {}", sample.id);
            return None;
        };
        pointer.position = sample.position;

        if self.primary != Some(sample.id) {
            return None;
        }

        let delta = sample.position - self.last_position;
        self.last_position = sample.position;
        self.velocity.add_position(sample.uptime_ms, sample.position);
        let velocity = self.velocity.velocity();

        Some(TouchEvent::Move(TouchMove {
            sample: GestureSample::new(delta.dx, delta.dy, velocity.x, velocity.y),
            touch_count: self.active.len(),
        }))
    }

    fn handle_up(&mut self, sample: &PointerSample) -> Option<TouchEvent> {
        let Some(index) = self.active.iter().position(|p| p.id == sample.id) else {
            log::trace!("ignoring up for unknown pointer {}", sample.id);
            return None;
        };
        self.active.remove(index);

        if self.active.is_empty() {
            self.primary = None;
            self.velocity.reset();
            return Some(TouchEvent::Release);
        }

        if self.primary == Some(sample.id) {
            let next = self.active[0];
            log::trace!("primary pointer {} lifted; promoting {}", sample.id, next.id);
            self.primary = Some(next.id);
            self.last_position = next.position;
            self.velocity.reset();
        }
        None
    }

    fn handle_cancel(&mut self) -> Option<TouchEvent> {
        if self.active.is_empty() {
            return None;
        }
        self.active.clear();
        self.primary = None;
        self.velocity.reset();
        Some(TouchEvent::Terminate)
    }
}
