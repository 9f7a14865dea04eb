//! Swipe gesture recognizer.
//!
//! Locks one of four compass directions the first time a single-touch move
//! frame is fast enough along one axis and straight enough on the other. The
//! lock holds until the gesture is released or terminated.

use super::validity::is_valid_swipe;
use crate::gesture_constants::{
    DEFAULT_HORIZONTAL_THRESHOLD, DEFAULT_INITIAL_VELOCITY_THRESHOLD, DEFAULT_VERTICAL_THRESHOLD,
};
use crate::gesture_state::GestureStateObserver;
use crate::nodes::input::dispatcher::{GestureResponder, Notifications};
use crate::nodes::input::types::{GestureSample, TouchMove, TouchStart};
use std::fmt;
use std::rc::Rc;

/// Compass direction a swipe locks to.
///
/// Screen coordinates: `Up` is negative `dy`, `Left` is negative `dx`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl SwipeDirection {
    pub const ALL: [SwipeDirection; 4] = [
        SwipeDirection::Up,
        SwipeDirection::Down,
        SwipeDirection::Left,
        SwipeDirection::Right,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SwipeDirection::Up => "SWIPE_UP",
            SwipeDirection::Down => "SWIPE_DOWN",
            SwipeDirection::Left => "SWIPE_LEFT",
            SwipeDirection::Right => "SWIPE_RIGHT",
        }
    }

    pub fn axis(self) -> SwipeAxis {
        match self {
            SwipeDirection::Left | SwipeDirection::Right => SwipeAxis::Horizontal,
            SwipeDirection::Up | SwipeDirection::Down => SwipeAxis::Vertical,
        }
    }
}

impl fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwipeAxis {
    Horizontal,
    Vertical,
}

impl SwipeAxis {
    /// Distance and velocity of `sample` along this axis.
    fn project(self, sample: &GestureSample) -> (f32, f32) {
        match self {
            SwipeAxis::Horizontal => (sample.dx, sample.vx),
            SwipeAxis::Vertical => (sample.dy, sample.vy),
        }
    }
}

/// Payload of `on_swipe_begin` / `on_swipe`, and the live swipe state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SwipeState {
    pub direction: Option<SwipeDirection>,
    pub distance: f32,
    pub velocity: f32,
}

/// Payload of `on_swipe_end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwipeEnd {
    pub direction: SwipeDirection,
}

/// Construction-time swipe options.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeConfig {
    pub horizontal: bool,
    pub vertical: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Keep emitting `on_swipe` on every frame after the lock.
    pub continuous: bool,
    pub initial_velocity_threshold: f32,
    /// Maximum vertical drift for a horizontal swipe.
    pub vertical_threshold: f32,
    /// Maximum horizontal drift for a vertical swipe.
    pub horizontal_threshold: f32,
    pub set_gesture_state: bool,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            horizontal: false,
            vertical: false,
            left: false,
            right: false,
            up: false,
            down: false,
            continuous: true,
            initial_velocity_threshold: DEFAULT_INITIAL_VELOCITY_THRESHOLD,
            vertical_threshold: DEFAULT_VERTICAL_THRESHOLD,
            horizontal_threshold: DEFAULT_HORIZONTAL_THRESHOLD,
            set_gesture_state: true,
        }
    }
}

impl SwipeConfig {
    pub fn horizontal(mut self, enabled: bool) -> Self {
        self.horizontal = enabled;
        self
    }

    pub fn vertical(mut self, enabled: bool) -> Self {
        self.vertical = enabled;
        self
    }

    pub fn left(mut self, enabled: bool) -> Self {
        self.left = enabled;
        self
    }

    pub fn right(mut self, enabled: bool) -> Self {
        self.right = enabled;
        self
    }

    pub fn up(mut self, enabled: bool) -> Self {
        self.up = enabled;
        self
    }

    pub fn down(mut self, enabled: bool) -> Self {
        self.down = enabled;
        self
    }

    pub fn continuous(mut self, continuous: bool) -> Self {
        self.continuous = continuous;
        self
    }

    pub fn initial_velocity_threshold(mut self, threshold: f32) -> Self {
        self.initial_velocity_threshold = threshold;
        self
    }

    pub fn vertical_threshold(mut self, threshold: f32) -> Self {
        self.vertical_threshold = threshold;
        self
    }

    pub fn horizontal_threshold(mut self, threshold: f32) -> Self {
        self.horizontal_threshold = threshold;
        self
    }

    pub fn set_gesture_state(mut self, enabled: bool) -> Self {
        self.set_gesture_state = enabled;
        self
    }

    /// Enables a single direction in addition to those already enabled.
    pub fn with_direction(self, direction: SwipeDirection) -> Self {
        match direction {
            SwipeDirection::Up => self.up(true),
            SwipeDirection::Down => self.down(true),
            SwipeDirection::Left => self.left(true),
            SwipeDirection::Right => self.right(true),
        }
    }

    fn allows(&self, direction: SwipeDirection) -> bool {
        match direction {
            SwipeDirection::Up => self.vertical || self.up,
            SwipeDirection::Down => self.vertical || self.down,
            SwipeDirection::Left => self.horizontal || self.left,
            SwipeDirection::Right => self.horizontal || self.right,
        }
    }
}

/// Consumer callbacks. Missing callbacks are skipped.
#[derive(Clone, Default)]
pub struct SwipeCallbacks {
    on_swipe_begin: Option<Rc<dyn Fn(SwipeState)>>,
    on_swipe: Option<Rc<dyn Fn(SwipeState)>>,
    on_swipe_end: Option<Rc<dyn Fn(SwipeEnd)>>,
}

impl SwipeCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_swipe_begin(mut self, callback: impl Fn(SwipeState) + 'static) -> Self {
        self.on_swipe_begin = Some(Rc::new(callback));
        self
    }

    pub fn on_swipe(mut self, callback: impl Fn(SwipeState) + 'static) -> Self {
        self.on_swipe = Some(Rc::new(callback));
        self
    }

    pub fn on_swipe_end(mut self, callback: impl Fn(SwipeEnd) + 'static) -> Self {
        self.on_swipe_end = Some(Rc::new(callback));
        self
    }
}

impl fmt::Debug for SwipeCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwipeCallbacks")
            .field("on_swipe_begin", &self.on_swipe_begin.is_some())
            .field("on_swipe", &self.on_swipe.is_some())
            .field("on_swipe_end", &self.on_swipe_end.is_some())
            .finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipePhase {
    /// No gesture in progress.
    Idle,
    /// Single-touch moves are arriving but no frame has qualified yet.
    Detecting,
    /// Direction decided for the rest of the gesture.
    Locked(SwipeDirection),
}

/// Classifies single-touch moves into one of four swipe directions.
///
/// The first qualifying frame of a gesture locks its direction and emits
/// `on_swipe_begin`. In continuous mode every later frame emits `on_swipe`
/// with the same direction; otherwise the recognizer stays silent until the
/// gesture ends, when `on_swipe_end` fires. Frames are horizontal candidates
/// first, then vertical.
///
/// Driven directly through [`handle_move`](Self::handle_move) and
/// [`handle_release`](Self::handle_release), or registered with a
/// [`GestureResponderHost`](crate::GestureResponderHost) as a responder that
/// claims gestures on their first qualifying move.
pub struct SwipeRecognizer {
    config: SwipeConfig,
    check_horizontal: bool,
    check_vertical: bool,
    callbacks: SwipeCallbacks,
    observer: Option<Rc<dyn GestureStateObserver<SwipeState>>>,
    enabled: bool,
    phase: SwipePhase,
}

impl SwipeRecognizer {
    pub fn new(config: SwipeConfig) -> Self {
        let check_horizontal = config.horizontal || config.left || config.right;
        let check_vertical = config.vertical || config.up || config.down;
        if !check_horizontal && !check_vertical {
            log::warn!("swipe recognizer has no enabled direction; it will never detect a swipe");
        }

        Self {
            config,
            check_horizontal,
            check_vertical,
            callbacks: SwipeCallbacks::default(),
            observer: None,
            enabled: true,
            phase: SwipePhase::Idle,
        }
    }

    pub fn with_callbacks(mut self, callbacks: SwipeCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// Live state receives every emitted [`SwipeState`] when `set_gesture_state` is on.
    pub fn with_observer(mut self, observer: Rc<dyn GestureStateObserver<SwipeState>>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    pub fn phase(&self) -> SwipePhase {
        self.phase
    }

    pub fn direction(&self) -> Option<SwipeDirection> {
        match self.phase {
            SwipePhase::Locked(direction) => Some(direction),
            _ => None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Replaces the callback set. Takes effect on the next dispatched event.
    pub fn set_callbacks(&mut self, callbacks: SwipeCallbacks) {
        self.callbacks = callbacks;
    }

    /// Detaches or reattaches the recognizer.
    ///
    /// Detaching drops an in-flight gesture without emitting `on_swipe_end`.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        if !enabled && self.phase != SwipePhase::Idle {
            log::debug!("swipe recognizer detached mid-gesture; dropping {:?}", self.phase);
        }
        self.phase = SwipePhase::Idle;
    }

    /// Direction this frame would lock, if any.
    ///
    /// Horizontal candidacy wins when both axes qualify. A qualifying axis whose
    /// sign matches no enabled direction yields `None` without trying the other
    /// axis.
    pub fn classify(&self, sample: &GestureSample) -> Option<SwipeDirection> {
        let config = &self.config;
        let valid_horizontal = self.check_horizontal
            && is_valid_swipe(
                sample.vx,
                sample.dy,
                config.initial_velocity_threshold,
                config.vertical_threshold,
            );

        if valid_horizontal {
            return if sample.dx < 0.0 && config.allows(SwipeDirection::Left) {
                Some(SwipeDirection::Left)
            } else if sample.dx > 0.0 && config.allows(SwipeDirection::Right) {
                Some(SwipeDirection::Right)
            } else {
                None
            };
        }

        let valid_vertical = self.check_vertical
            && is_valid_swipe(
                sample.vy,
                sample.dx,
                config.initial_velocity_threshold,
                config.horizontal_threshold,
            );

        if valid_vertical {
            if sample.dy < 0.0 && config.allows(SwipeDirection::Up) {
                return Some(SwipeDirection::Up);
            } else if sample.dy > 0.0 && config.allows(SwipeDirection::Down) {
                return Some(SwipeDirection::Down);
            }
        }

        None
    }

    /// Consumes one move frame.
    pub fn handle_move(&mut self, touch: &TouchMove) {
        self.process_move(touch).run();
    }

    /// Ends the gesture. Emits `on_swipe_end` only if a direction was locked.
    pub fn handle_release(&mut self) {
        self.end_gesture().run();
    }

    fn process_move(&mut self, touch: &TouchMove) -> Notifications {
        let mut notifications = Notifications::new();
        if !self.enabled {
            return notifications;
        }

        match self.phase {
            SwipePhase::Idle | SwipePhase::Detecting => {
                if touch.touch_count != 1 {
                    log::trace!(
                        "swipe ignoring move with {} touches while detecting",
                        touch.touch_count
                    );
                    return notifications;
                }

                match self.classify(&touch.sample) {
                    Some(direction) => {
                        log::debug!("swipe locked {}", direction);
                        self.phase = SwipePhase::Locked(direction);
                        let state = Self::state_for(direction, &touch.sample);
                        if let Some(callback) = self.callbacks.on_swipe_begin.clone() {
                            notifications.push(move || callback(state));
                        }
                        self.publish(state, &mut notifications);
                    }
                    None => self.phase = SwipePhase::Detecting,
                }
            }
            SwipePhase::Locked(direction) => {
                if !self.config.continuous {
                    return notifications;
                }

                let state = Self::state_for(direction, &touch.sample);
                log::trace!(
                    "swipe {} distance={} velocity={}",
                    direction,
                    state.distance,
                    state.velocity
                );
                if let Some(callback) = self.callbacks.on_swipe.clone() {
                    notifications.push(move || callback(state));
                }
                self.publish(state, &mut notifications);
            }
        }

        notifications
    }

    fn end_gesture(&mut self) -> Notifications {
        let mut notifications = Notifications::new();
        if !self.enabled {
            return notifications;
        }

        if let SwipePhase::Locked(direction) = self.phase {
            log::debug!("swipe {} ended", direction);
            if let Some(callback) = self.callbacks.on_swipe_end.clone() {
                notifications.push(move || callback(SwipeEnd { direction }));
            }
            self.publish(SwipeState::default(), &mut notifications);
        }

        self.phase = SwipePhase::Idle;
        notifications
    }

    fn state_for(direction: SwipeDirection, sample: &GestureSample) -> SwipeState {
        let (distance, velocity) = direction.axis().project(sample);
        SwipeState {
            direction: Some(direction),
            distance,
            velocity,
        }
    }

    fn publish(&self, state: SwipeState, notifications: &mut Notifications) {
        if !self.config.set_gesture_state {
            return;
        }
        if let Some(observer) = self.observer.clone() {
            notifications.push(move || observer.gesture_state_changed(&state));
        }
    }
}

impl fmt::Debug for SwipeRecognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwipeRecognizer")
            .field("config", &self.config)
            .field("callbacks", &self.callbacks)
            .field("enabled", &self.enabled)
            .field("phase", &self.phase)
            .finish()
    }
}

impl GestureResponder for SwipeRecognizer {
    /// Swipes never claim at touch start so siblings get the first chance.
    fn should_claim_start(&mut self, _start: &TouchStart) -> bool {
        // Detecting only arises from direct handle_move calls; behind a host
        // the swipe owns a gesture only once it locks. A lock must be
        // preceded by release or terminate.
        if let SwipePhase::Locked(direction) = self.phase {
            log::debug!(
                "swipe offered a new gesture while locked {}; previous gesture never ended",
                direction
            );
        }
        self.phase = SwipePhase::Idle;
        false
    }

    fn should_claim_move(&mut self, touch: &TouchMove) -> bool {
        self.enabled
            && touch.touch_count == 1
            && matches!(self.phase, SwipePhase::Idle | SwipePhase::Detecting)
            && self.classify(&touch.sample).is_some()
    }

    fn on_move(&mut self, touch: &TouchMove) -> Notifications {
        self.process_move(touch)
    }

    fn on_release(&mut self) -> Notifications {
        self.end_gesture()
    }
}
