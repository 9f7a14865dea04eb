//! Testing utilities and harness for Gestura

pub mod recorder;
pub mod robot;
pub mod robot_assertions;

pub use recorder::{GestureRecorder, RecordedGesture};
pub use robot::TouchRobot;
pub use robot_assertions::{assert_approx_eq, assert_count};

pub mod prelude {
    pub use crate::recorder::{GestureRecorder, RecordedGesture};
    pub use crate::robot::TouchRobot;
    pub use crate::robot_assertions;
}
