//! Touch gesture recognition for Gestura.
//!
//! Raw pointer samples flow through a [`TouchSource`] into a
//! [`GestureResponderHost`], which hands each single-touch gesture to one
//! recognizer: a [`SwipeRecognizer`] that locks a compass direction, or a
//! [`PanRecognizer`] that tracks relative and cumulative displacement.
//!
//! ```
//! use gestura_foundation::prelude::*;
//!
//! let mut swipe = SwipeRecognizer::new(SwipeConfig::default().horizontal(true));
//! swipe.handle_move(&TouchMove::single(GestureSample::new(-5.0, 1.0, -0.9, 0.1)));
//! assert_eq!(swipe.direction(), Some(SwipeDirection::Left));
//! ```

pub mod geometry;
pub mod gesture_constants;
pub mod gesture_state;
pub mod nodes;
pub mod velocity_tracker;

pub use geometry::{Offset, Point};
pub use gesture_state::{GestureStateCell, GestureStateObserver};
pub use nodes::input::gestures::{
    is_valid_swipe, PanCallbacks, PanConfig, PanOrigin, PanPhase, PanRecognizer, PanState,
    SwipeAxis, SwipeCallbacks, SwipeConfig, SwipeDirection, SwipeEnd, SwipePhase,
    SwipeRecognizer, SwipeState,
};
pub use nodes::input::{
    GestureResponder, GestureResponderHost, GestureSample, Notifications, PointerEventKind,
    PointerId, PointerSample, ResponderHandle, TouchEvent, TouchMove, TouchSource, TouchStart,
};
pub use velocity_tracker::{Velocity, VelocityTracker};

pub mod prelude {
    pub use crate::geometry::{Offset, Point};
    pub use crate::gesture_state::{GestureStateCell, GestureStateObserver};
    pub use crate::nodes::input::prelude::*;
    pub use crate::nodes::input::gestures::{
        PanOrigin, PanPhase, PanState, SwipeEnd, SwipePhase, SwipeState,
    };
    pub use crate::nodes::input::TouchSource;
}
