//! Records recognizer callbacks for later inspection.

use gestura_foundation::{
    PanCallbacks, PanOrigin, PanState, SwipeCallbacks, SwipeDirection, SwipeEnd, SwipeState,
};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub enum RecordedGesture {
    PanBegin(PanOrigin),
    Pan(PanState),
    PanEnd,
    SwipeBegin(SwipeState),
    Swipe(SwipeState),
    SwipeEnd(SwipeEnd),
}

/// Hands out callback sets that append every notification to a shared log.
///
/// One recorder can serve several recognizers; the log keeps the global order.
#[derive(Clone, Default)]
pub struct GestureRecorder {
    events: Rc<RefCell<Vec<RecordedGesture>>>,
}

impl GestureRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pan_callbacks(&self) -> PanCallbacks {
        let begin = self.events.clone();
        let pan = self.events.clone();
        let end = self.events.clone();
        PanCallbacks::new()
            .on_pan_begin(move |origin| begin.borrow_mut().push(RecordedGesture::PanBegin(origin)))
            .on_pan(move |state| pan.borrow_mut().push(RecordedGesture::Pan(state)))
            .on_pan_end(move || end.borrow_mut().push(RecordedGesture::PanEnd))
    }

    pub fn swipe_callbacks(&self) -> SwipeCallbacks {
        let begin = self.events.clone();
        let swipe = self.events.clone();
        let end = self.events.clone();
        SwipeCallbacks::new()
            .on_swipe_begin(move |state| {
                begin
                    .borrow_mut()
                    .push(RecordedGesture::SwipeBegin(state))
            })
            .on_swipe(move |state| swipe.borrow_mut().push(RecordedGesture::Swipe(state)))
            .on_swipe_end(move |end_state| {
                end.borrow_mut()
                    .push(RecordedGesture::SwipeEnd(end_state))
            })
    }

    pub fn events(&self) -> Vec<RecordedGesture> {
        self.events.borrow().clone()
    }

    /// Returns the recorded events and clears the log.
    pub fn take(&self) -> Vec<RecordedGesture> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn pan_states(&self) -> Vec<PanState> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                RecordedGesture::Pan(state) => Some(*state),
                _ => None,
            })
            .collect()
    }

    pub fn last_pan(&self) -> Option<PanState> {
        self.pan_states().last().copied()
    }

    /// Directions of every swipe begin, continue, and end, in order.
    pub fn swipe_directions(&self) -> Vec<SwipeDirection> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                RecordedGesture::SwipeBegin(state) | RecordedGesture::Swipe(state) => {
                    state.direction
                }
                RecordedGesture::SwipeEnd(end) => Some(end.direction),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, predicate: impl Fn(&RecordedGesture) -> bool) -> usize {
        self.events.borrow().iter().filter(|event| predicate(event)).count()
    }
}

impl std::fmt::Debug for GestureRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureRecorder")
            .field("events", &self.events.borrow())
            .finish()
    }
}
