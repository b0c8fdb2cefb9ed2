//! Time subscriber trait

use chrono::{DateTime, Utc};

/// Trait for components that need to follow the animation time (the scene)
pub trait TimeSubscriber: Send + Sync {
    /// Called when the clock's current time changes
    fn on_time_changed(&self, time: DateTime<Utc>);
}
