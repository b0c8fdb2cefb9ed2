//! Time-stepping animation over a configured window

mod clock;
mod subscriber;
mod timer;
mod window;

pub use clock::{AnimationClock, AnimationState};
pub use subscriber::TimeSubscriber;
pub use timer::RepeatingTimer;
pub use window::TimeWindow;
