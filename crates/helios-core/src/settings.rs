//! Clock settings

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Initial configuration for an [`AnimationClock`](crate::AnimationClock)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClockSettings {
    /// Seconds of scene time advanced per frame
    pub cadence_secs: f64,

    /// Wall-clock milliseconds between frames
    pub frame_delay_ms: u64,

    /// How far before "now" the initial window starts
    pub initial_span_hours: i64,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            cadence_secs: 3600.0,
            frame_delay_ms: 1000,
            initial_span_hours: 24,
        }
    }
}

impl ClockSettings {
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }

    pub fn initial_span(&self) -> TimeDelta {
        TimeDelta::try_hours(self.initial_span_hours).unwrap_or(TimeDelta::hours(24))
    }
}
