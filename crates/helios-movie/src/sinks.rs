//! Collaborators that receive the results of an import

use crate::catalog::SourceId;
use chrono::{DateTime, Utc};
use helios_core::{AnimationClock, TimeWindow};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// A matched source, ready to be activated in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSource {
    pub source_id: SourceId,
    pub window: TimeWindow,
    pub cadence_secs: f64,
    pub resolution: u32,
}

/// Values shown by the date range picker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateRangeValues {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub frames: u32,
}

/// Playback parameters of an imported movie
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationParameters {
    pub fps: f64,
    pub duration_secs: f64,
}

/// Picks the resolution a source is rendered at
pub trait ResolutionSelector: Send + Sync {
    fn resolution_for(&self, source: &SourceId) -> u32;
}

/// Same resolution for every source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedResolution(pub u32);

impl ResolutionSelector for FixedResolution {
    fn resolution_for(&self, _source: &SourceId) -> u32 {
        self.0
    }
}

/// Adds a source to the scene. Fire-and-forget.
pub trait SourceActivationSink: Send + Sync {
    fn activate(&self, source: &ResolvedSource);
}

pub trait DateRangeSink: Send + Sync {
    fn set_date_range(&self, range: &DateRangeValues);
}

pub trait AnimationParameterSink: Send + Sync {
    fn set_animation_parameters(&self, params: &AnimationParameters);
}

/// The clock plays the movie back at its frame rate
impl AnimationParameterSink for AnimationClock {
    fn set_animation_parameters(&self, params: &AnimationParameters) {
        if !(params.fps.is_finite() && params.fps > 0.0) {
            return;
        }
        match Duration::try_from_secs_f64(1.0 / params.fps) {
            Ok(delay) => {
                debug!(fps = params.fps, ?delay, "frame delay set from movie frame rate");
                self.set_frame_delay(delay);
            }
            Err(e) => warn!(fps = params.fps, "frame rate ignored, keeping current delay: {}", e),
        }
    }
}
