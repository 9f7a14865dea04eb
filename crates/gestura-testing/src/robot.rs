//! Robot-style driver for gesture tests.
//!
//! The robot owns a [`TouchSource`] and a [`GestureResponderHost`] and feeds
//! them timestamped pointer samples, so tests describe gestures as drags and
//! flicks instead of hand-built velocity frames.
//!
//! # Example
//!
//! ```
//! use gestura_foundation::{SwipeConfig, SwipeRecognizer};
//! use gestura_testing::{GestureRecorder, TouchRobot};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let recorder = GestureRecorder::new();
//! let swipe = Rc::new(RefCell::new(
//!     SwipeRecognizer::new(SwipeConfig::default().horizontal(true))
//!         .with_callbacks(recorder.swipe_callbacks()),
//! ));
//!
//! let mut robot = TouchRobot::new();
//! robot.register(swipe);
//! robot.flick(200.0, 100.0, 40.0, 100.0, 80);
//!
//! assert!(!recorder.is_empty());
//! ```

use gestura_foundation::{
    GestureResponder, GestureResponderHost, Point, PointerEventKind, PointerId, PointerSample,
    TouchSource,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Default spacing between synthesized frames, roughly 60 Hz.
const DEFAULT_FRAME_INTERVAL_MS: i64 = 16;

pub struct TouchRobot {
    source: TouchSource,
    host: GestureResponderHost,
    clock_ms: i64,
    frame_interval_ms: i64,
    positions: Vec<(PointerId, Point)>,
}

impl Default for TouchRobot {
    fn default() -> Self {
        Self::new()
    }
}

impl TouchRobot {
    pub fn new() -> Self {
        Self {
            source: TouchSource::new(),
            host: GestureResponderHost::new(),
            clock_ms: 0,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            positions: Vec::new(),
        }
    }

    pub fn with_frame_interval(mut self, interval_ms: i64) -> Self {
        self.frame_interval_ms = interval_ms.max(1);
        self
    }

    pub fn register<R>(&mut self, responder: Rc<RefCell<R>>)
    where
        R: GestureResponder + 'static,
    {
        self.host.register(responder);
    }

    pub fn host(&self) -> &GestureResponderHost {
        &self.host
    }

    pub fn now_ms(&self) -> i64 {
        self.clock_ms
    }

    /// Advance the robot clock without sending anything.
    pub fn advance_time(&mut self, millis: i64) {
        self.clock_ms += millis;
    }

    /// Deliver samples as one platform frame.
    pub fn dispatch_frame(&mut self, samples: &[PointerSample]) {
        for sample in samples {
            self.remember(sample);
        }
        for event in self.source.process_frame(samples) {
            log::trace!("robot dispatching {:?}", event);
            self.host.dispatch(event);
        }
    }

    pub fn press(&mut self, id: PointerId, x: f32, y: f32) {
        self.send(id, PointerEventKind::Down, Point::new(x, y));
    }

    /// Press several pointers in the same frame.
    pub fn press_together(&mut self, pointers: &[(PointerId, f32, f32)]) {
        let samples: Vec<_> = pointers
            .iter()
            .map(|&(id, x, y)| {
                PointerSample::new(id, PointerEventKind::Down, Point::new(x, y), self.clock_ms)
            })
            .collect();
        self.dispatch_frame(&samples);
    }

    /// Move a pointer after one frame interval.
    pub fn move_to(&mut self, id: PointerId, x: f32, y: f32) {
        self.clock_ms += self.frame_interval_ms;
        self.send(id, PointerEventKind::Move, Point::new(x, y));
    }

    pub fn release(&mut self, id: PointerId) {
        let position = self.position_of(id);
        self.send(id, PointerEventKind::Up, position);
    }

    pub fn cancel(&mut self, id: PointerId) {
        let position = self.position_of(id);
        self.send(id, PointerEventKind::Cancel, position);
    }

    /// Press, move in `steps` equal frames, release.
    pub fn drag(&mut self, from_x: f32, from_y: f32, to_x: f32, to_y: f32, steps: u32) {
        self.press(0, from_x, from_y);
        self.move_in_steps(0, from_x, from_y, to_x, to_y, steps);
        self.release(0);
    }

    /// Drag that covers the distance in `duration_ms`, fast enough to swipe
    /// when the distance is large relative to the duration.
    pub fn flick(&mut self, from_x: f32, from_y: f32, to_x: f32, to_y: f32, duration_ms: i64) {
        let steps = (duration_ms / self.frame_interval_ms).max(1) as u32;
        self.drag(from_x, from_y, to_x, to_y, steps);
    }

    pub fn move_in_steps(
        &mut self,
        id: PointerId,
        from_x: f32,
        from_y: f32,
        to_x: f32,
        to_y: f32,
        steps: u32,
    ) {
        let steps = steps.max(1);
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            let x = from_x + (to_x - from_x) * t;
            let y = from_y + (to_y - from_y) * t;
            self.move_to(id, x, y);
        }
    }

    fn send(&mut self, id: PointerId, kind: PointerEventKind, position: Point) {
        let sample = PointerSample::new(id, kind, position, self.clock_ms);
        self.dispatch_frame(&[sample]);
    }

    fn remember(&mut self, sample: &PointerSample) {
        match self.positions.iter_mut().find(|(id, _)| *id == sample.id) {
            Some(entry) => entry.1 = sample.position,
            None => self.positions.push((sample.id, sample.position)),
        }
    }

    fn position_of(&self, id: PointerId) -> Point {
        self.positions
            .iter()
            .find(|(pointer, _)| *pointer == id)
            .map(|(_, position)| *position)
            .unwrap_or(Point::ZERO)
    }
}
