//! Responder arbitration for touch gestures.
//!
//! At most one responder receives a gesture's events at a time. Responders are
//! offered the gesture at touch start and again on every move; a responder
//! that wants a gesture already owned by another one takes it over once the
//! owner agrees to terminate.
//!
//! Responders hand their consumer callbacks back as [`Notifications`]. The
//! host runs them only after releasing its borrow of the responder, so a
//! callback may reconfigure the recognizer that produced it.

use super::types::{TouchEvent, TouchMove, TouchStart};
use smallvec::SmallVec;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

/// Consumer callbacks produced while handling one event, in emission order.
#[must_use = "notifications do nothing until run"]
#[derive(Default)]
pub struct Notifications {
    pending: SmallVec<[Box<dyn FnOnce()>; 2]>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notify: impl FnOnce() + 'static) {
        self.pending.push(Box::new(notify));
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn run(self) {
        for notify in self.pending {
            notify();
        }
    }
}

impl fmt::Debug for Notifications {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifications")
            .field("pending", &self.pending.len())
            .finish()
    }
}

/// A gesture recognizer that can own a touch gesture.
pub trait GestureResponder {
    /// Offered when a gesture starts and nobody owns it yet.
    fn should_claim_start(&mut self, start: &TouchStart) -> bool;

    /// Called once this responder won the gesture at its start.
    fn on_grant(&mut self, _start: &TouchStart) -> Notifications {
        Notifications::new()
    }

    /// Offered on every move frame this responder does not already own.
    fn should_claim_move(&mut self, touch: &TouchMove) -> bool;

    fn on_move(&mut self, touch: &TouchMove) -> Notifications;

    /// Asked when another responder wants the gesture.
    fn termination_requested(&mut self) -> bool {
        true
    }

    fn on_release(&mut self) -> Notifications;

    /// Gesture taken away by another responder or cancelled by the platform.
    fn on_terminate(&mut self) -> Notifications {
        self.on_release()
    }
}

pub type ResponderHandle = Rc<RefCell<dyn GestureResponder>>;

/// Delivers touch events to whichever registered responder owns the gesture.
///
/// Events are processed strictly in the order they are pushed.
#[derive(Default)]
pub struct GestureResponderHost {
    responders: Vec<ResponderHandle>,
    current: Option<usize>,
    queue: VecDeque<TouchEvent>,
}

impl GestureResponderHost {
    pub fn new() -> Self {
        Self {
            responders: Vec::new(),
            current: None,
            queue: VecDeque::new(),
        }
    }

    /// Registers a responder. Earlier registrations are offered gestures first.
    pub fn register<R>(&mut self, responder: Rc<RefCell<R>>)
    where
        R: GestureResponder + 'static,
    {
        self.responders.push(responder);
    }

    pub fn has_responder(&self) -> bool {
        self.current.is_some()
    }

    /// Index of the responder that owns the current gesture, in registration order.
    pub fn responder_index(&self) -> Option<usize> {
        self.current
    }

    pub fn push(&mut self, event: TouchEvent) {
        self.queue.push_back(event);
    }

    pub fn dispatch_pending(&mut self) {
        while let Some(event) = self.queue.pop_front() {
            self.dispatch(event);
        }
    }

    pub fn dispatch(&mut self, event: TouchEvent) {
        match event {
            TouchEvent::Start(start) => self.handle_start(&start),
            TouchEvent::Move(touch) => self.handle_move(&touch),
            TouchEvent::Release => {
                if let Some(index) = self.current.take() {
                    let notifications = self.responders[index].borrow_mut().on_release();
                    notifications.run();
                }
            }
            TouchEvent::Terminate => {
                if let Some(index) = self.current.take() {
                    let notifications = self.responders[index].borrow_mut().on_terminate();
                    notifications.run();
                }
            }
        }
    }

    fn handle_start(&mut self, start: &TouchStart) {
        if self.current.is_some() {
            return;
        }

        self.current = self
            .responders
            .iter()
            .position(|responder| responder.borrow_mut().should_claim_start(start));

        if let Some(index) = self.current {
            log::debug!("responder {} claimed gesture at start", index);
            let notifications = self.responders[index].borrow_mut().on_grant(start);
            notifications.run();
        }
    }

    fn handle_move(&mut self, touch: &TouchMove) {
        let current = self.current;
        let claimant = self
            .responders
            .iter()
            .enumerate()
            .filter(|(index, _)| Some(*index) != current)
            .find(|(_, responder)| responder.borrow_mut().should_claim_move(touch))
            .map(|(index, _)| index);

        if let Some(next) = claimant {
            match current {
                Some(owner) => {
                    let yielded = self.responders[owner].borrow_mut().termination_requested();
                    if yielded {
                        let notifications = self.responders[owner].borrow_mut().on_terminate();
                        log::debug!("responder {} took gesture over from {}", next, owner);
                        self.current = Some(next);
                        notifications.run();
                    }
                }
                None => {
                    log::debug!("responder {} claimed gesture on move", next);
                    self.current = Some(next);
                }
            }
        }

        if let Some(index) = self.current {
            let notifications = self.responders[index].borrow_mut().on_move(touch);
            notifications.run();
        }
    }
}
