//! Log-backed stand-ins for the scene and UI collaborators

use chrono::{DateTime, Utc};
use helios_core::TimeSubscriber;
use helios_movie::{DateRangeSink, DateRangeValues, ResolvedSource, SourceActivationSink};
use tracing::info;

/// Scene that reports every time change
pub struct SceneLog;

impl TimeSubscriber for SceneLog {
    fn on_time_changed(&self, time: DateTime<Utc>) {
        info!(time = %time.format("%Y-%m-%d %H:%M:%S"), "scene time");
    }
}

/// Reports activated sources
pub struct SourceLog;

impl SourceActivationSink for SourceLog {
    fn activate(&self, source: &ResolvedSource) {
        info!(
            source = %source.source_id,
            start = %source.window.start,
            end = %source.window.end,
            cadence_secs = source.cadence_secs,
            resolution = source.resolution,
            "source activated"
        );
    }
}

/// Reports the date range picker values
pub struct DateRangeLog;

impl DateRangeSink for DateRangeLog {
    fn set_date_range(&self, range: &DateRangeValues) {
        info!(start = %range.start, end = %range.end, frames = range.frames, "date range updated");
    }
}
