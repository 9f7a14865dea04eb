pub mod dispatcher;
pub mod gestures;
pub mod source;
pub mod types;

pub use dispatcher::{GestureResponder, GestureResponderHost, Notifications, ResponderHandle};
pub use source::TouchSource;
pub use types::{
    GestureSample, PointerEventKind, PointerId, PointerSample, TouchEvent, TouchMove, TouchStart,
};

pub mod prelude {
    pub use super::dispatcher::{GestureResponder, GestureResponderHost, Notifications};
    pub use super::gestures::{
        PanCallbacks, PanConfig, PanRecognizer, SwipeCallbacks, SwipeConfig, SwipeDirection,
        SwipeRecognizer,
    };
    pub use super::types::{
        GestureSample, PointerEventKind, PointerId, PointerSample, TouchEvent, TouchMove,
        TouchStart,
    };
}
