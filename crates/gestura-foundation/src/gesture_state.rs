//! Live gesture state exposed to wrapped content.
//!
//! Recognizers publish into a [`GestureStateObserver`] when their
//! `set_gesture_state` option is on. They never read the observer back, so the
//! classification logic stays independent of whatever renders the state.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub trait GestureStateObserver<T> {
    fn gesture_state_changed(&self, state: &T);
}

/// Shared cell holding the latest published gesture state.
///
/// Clones share the same storage, so the recognizer can own one handle while
/// the content being wrapped reads from another.
pub struct GestureStateCell<T> {
    inner: Rc<RefCell<T>>,
    revision: Rc<RefCell<u64>>,
}

impl<T: Clone> GestureStateCell<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(initial)),
            revision: Rc::new(RefCell::new(0)),
        }
    }

    pub fn get(&self) -> T {
        self.inner.borrow().clone()
    }

    /// Number of updates published so far. Lets content skip redundant redraws.
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }
}

impl<T: Clone + Default> Default for GestureStateCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Clone for GestureStateCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            revision: Rc::clone(&self.revision),
        }
    }
}

impl<T: Clone> GestureStateObserver<T> for GestureStateCell<T> {
    fn gesture_state_changed(&self, state: &T) {
        *self.inner.borrow_mut() = state.clone();
        *self.revision.borrow_mut() += 1;
    }
}

impl<T: fmt::Debug> fmt::Debug for GestureStateCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureStateCell")
            .field("state", &self.inner.borrow())
            .field("revision", &self.revision.borrow())
            .finish()
    }
}
