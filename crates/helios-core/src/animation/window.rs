use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// The time range an animation cycles over.
///
/// `start <= end` is expected but never enforced; an inverted window makes
/// every tick wrap straight back to `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Window that ends at `end` and reaches `span` into the past.
    ///
    /// A span reaching before the earliest representable time falls back to 24 hours.
    pub fn trailing(end: DateTime<Utc>, span: TimeDelta) -> Self {
        let start = end
            .checked_sub_signed(span)
            .or_else(|| end.checked_sub_signed(TimeDelta::hours(24)))
            .unwrap_or(end);
        Self { start, end }
    }

    /// Whether `time` lies within `[start, end]`
    pub fn contains(&self, time: DateTime<Utc>) -> bool {
        time >= self.start && time <= self.end
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    /// Length of the window in (possibly fractional) seconds
    pub fn span_seconds(&self) -> f64 {
        (self.end - self.start).num_milliseconds() as f64 / 1000.0
    }
}
