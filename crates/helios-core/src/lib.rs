//! Core functionality for the solar movie viewer
//! 
//! This crate provides the animation clock that walks the scene through a
//! time window, plus the event bus and settings shared by the other crates.

pub mod animation;
pub mod events;
pub mod settings;

// Re-export commonly used types
pub use animation::{
    AnimationClock, AnimationState, RepeatingTimer, TimeSubscriber, TimeWindow,
};
pub use events::EventBus;
pub use settings::ClockSettings;
