pub mod pan;
pub mod swipe;
pub mod validity;

pub use pan::{PanCallbacks, PanConfig, PanOrigin, PanPhase, PanRecognizer, PanState};
pub use swipe::{
    SwipeAxis, SwipeCallbacks, SwipeConfig, SwipeDirection, SwipeEnd, SwipePhase, SwipeRecognizer,
    SwipeState,
};
pub use validity::is_valid_swipe;
