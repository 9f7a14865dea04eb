//! Pan gesture recognizer.
//!
//! Reports per-frame and cumulative displacement of single-touch drags. The
//! cumulative totals carry over from one gesture to the next so successive
//! drags compose, until a reset is requested.

use crate::geometry::{Offset, Point};
use crate::gesture_state::GestureStateObserver;
use crate::nodes::input::dispatcher::{GestureResponder, Notifications};
use crate::nodes::input::types::{TouchMove, TouchStart};
use std::fmt;
use std::rc::Rc;

/// Payload of `on_pan`, and the live pan state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PanState {
    pub absolute_change_x: f32,
    pub absolute_change_y: f32,
    pub change_x: f32,
    pub change_y: f32,
}

/// Payload of `on_pan_begin`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PanOrigin {
    pub origin_x: f32,
    pub origin_y: f32,
}

impl From<Point> for PanOrigin {
    fn from(point: Point) -> Self {
        Self {
            origin_x: point.x,
            origin_y: point.y,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanConfig {
    pub set_gesture_state: bool,
}

impl Default for PanConfig {
    fn default() -> Self {
        Self {
            set_gesture_state: true,
        }
    }
}

impl PanConfig {
    pub fn set_gesture_state(mut self, enabled: bool) -> Self {
        self.set_gesture_state = enabled;
        self
    }
}

#[derive(Clone, Default)]
pub struct PanCallbacks {
    on_pan_begin: Option<Rc<dyn Fn(PanOrigin)>>,
    on_pan: Option<Rc<dyn Fn(PanState)>>,
    on_pan_end: Option<Rc<dyn Fn()>>,
}

impl PanCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_pan_begin(mut self, callback: impl Fn(PanOrigin) + 'static) -> Self {
        self.on_pan_begin = Some(Rc::new(callback));
        self
    }

    pub fn on_pan(mut self, callback: impl Fn(PanState) + 'static) -> Self {
        self.on_pan = Some(Rc::new(callback));
        self
    }

    pub fn on_pan_end(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_pan_end = Some(Rc::new(callback));
        self
    }
}

impl fmt::Debug for PanCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanCallbacks")
            .field("on_pan_begin", &self.on_pan_begin.is_some())
            .field("on_pan", &self.on_pan.is_some())
            .field("on_pan_end", &self.on_pan_end.is_some())
            .finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanPhase {
    Idle,
    Active,
}

/// Tracks single-touch drags as per-frame and cumulative displacement.
///
/// A gesture starts from the totals the previous one ended at, so successive
/// drags compose. [`reset`](Self::reset) or a rising
/// [`set_reset_signal`](Self::set_reset_signal) edge starts over from zero.
///
/// Claims gestures at their start when exactly one touch is down; it never
/// claims on a move, so a swipe registered alongside it can take over.
pub struct PanRecognizer {
    config: PanConfig,
    callbacks: PanCallbacks,
    observer: Option<Rc<dyn GestureStateObserver<PanState>>>,
    enabled: bool,
    phase: PanPhase,
    /// Totals committed when the previous gesture ended.
    carry: Offset,
    /// Running totals since the last reset.
    absolute: Offset,
    reset_signal: bool,
}

impl PanRecognizer {
    pub fn new(config: PanConfig) -> Self {
        Self {
            config,
            callbacks: PanCallbacks::default(),
            observer: None,
            enabled: true,
            phase: PanPhase::Idle,
            carry: Offset::ZERO,
            absolute: Offset::ZERO,
            reset_signal: false,
        }
    }

    pub fn with_callbacks(mut self, callbacks: PanCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub fn with_observer(mut self, observer: Rc<dyn GestureStateObserver<PanState>>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn phase(&self) -> PanPhase {
        self.phase
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Cumulative displacement since the last reset.
    pub fn absolute_change(&self) -> Offset {
        self.absolute
    }

    /// Displacement the next gesture will continue from.
    pub fn carried_change(&self) -> Offset {
        self.carry
    }

    pub fn set_callbacks(&mut self, callbacks: PanCallbacks) {
        self.callbacks = callbacks;
    }

    /// Detaches or reattaches the recognizer.
    ///
    /// Detaching mid-gesture drops it: no `on_pan_end`, and the in-flight
    /// displacement is not committed to the carry.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        if !enabled && self.phase == PanPhase::Active {
            log::debug!("pan recognizer detached mid-gesture");
            self.absolute = self.carry;
        }
        self.phase = PanPhase::Idle;
    }

    /// Zeroes the carry, the running totals, and the live state.
    pub fn reset(&mut self) {
        log::debug!("pan reset");
        self.carry = Offset::ZERO;
        self.absolute = Offset::ZERO;
        let mut notifications = Notifications::new();
        self.publish(PanState::default(), &mut notifications);
        notifications.run();
    }

    /// Edge-triggered reset: only a false to true transition resets.
    pub fn set_reset_signal(&mut self, asserted: bool) {
        let rising = asserted && !self.reset_signal;
        self.reset_signal = asserted;
        if rising {
            self.reset();
        }
    }

    /// Claims the gesture when exactly one touch is down.
    pub fn handle_start(&mut self, start: &TouchStart) -> bool {
        if !self.admits(start) {
            return false;
        }
        self.begin(start).run();
        true
    }

    pub fn handle_move(&mut self, touch: &TouchMove) {
        self.process_move(touch).run();
    }

    pub fn handle_release(&mut self) {
        self.end_gesture().run();
    }

    fn admits(&self, start: &TouchStart) -> bool {
        self.enabled && start.touch_count == 1
    }

    fn begin(&mut self, start: &TouchStart) -> Notifications {
        let mut notifications = Notifications::new();
        log::debug!("pan began at ({}, {})", start.origin.x, start.origin.y);
        self.phase = PanPhase::Active;
        if let Some(callback) = self.callbacks.on_pan_begin.clone() {
            let origin = PanOrigin::from(start.origin);
            notifications.push(move || callback(origin));
        }
        notifications
    }

    fn process_move(&mut self, touch: &TouchMove) -> Notifications {
        let mut notifications = Notifications::new();
        if !self.enabled || self.phase != PanPhase::Active {
            return notifications;
        }

        let change = Offset::new(touch.sample.dx, touch.sample.dy);
        self.absolute += change;
        let state = PanState {
            absolute_change_x: self.absolute.dx,
            absolute_change_y: self.absolute.dy,
            change_x: change.dx,
            change_y: change.dy,
        };

        log::trace!("pan {:?}", state);
        if let Some(callback) = self.callbacks.on_pan.clone() {
            notifications.push(move || callback(state));
        }
        self.publish(state, &mut notifications);
        notifications
    }

    fn end_gesture(&mut self) -> Notifications {
        let mut notifications = Notifications::new();
        if !self.enabled || self.phase != PanPhase::Active {
            return notifications;
        }

        self.carry = self.absolute;
        self.phase = PanPhase::Idle;
        log::debug!("pan ended at ({}, {})", self.carry.dx, self.carry.dy);
        if let Some(callback) = self.callbacks.on_pan_end.clone() {
            notifications.push(move || callback());
        }
        notifications
    }

    fn publish(&self, state: PanState, notifications: &mut Notifications) {
        if !self.config.set_gesture_state {
            return;
        }
        if let Some(observer) = self.observer.clone() {
            notifications.push(move || observer.gesture_state_changed(&state));
        }
    }
}

impl fmt::Debug for PanRecognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanRecognizer")
            .field("config", &self.config)
            .field("callbacks", &self.callbacks)
            .field("enabled", &self.enabled)
            .field("phase", &self.phase)
            .field("carry", &self.carry)
            .field("absolute", &self.absolute)
            .finish()
    }
}

impl GestureResponder for PanRecognizer {
    fn should_claim_start(&mut self, start: &TouchStart) -> bool {
        self.admits(start)
    }

    fn on_grant(&mut self, start: &TouchStart) -> Notifications {
        self.begin(start)
    }

    fn should_claim_move(&mut self, _touch: &TouchMove) -> bool {
        false
    }

    fn on_move(&mut self, touch: &TouchMove) -> Notifications {
        self.process_move(touch)
    }

    fn on_release(&mut self) -> Notifications {
        self.end_gesture()
    }
}
