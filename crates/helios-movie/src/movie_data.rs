//! Values derived from a movie's metadata

use crate::layers::{parse_layer_string, LayerToken};
use crate::metadata::MovieMetadata;
use crate::sinks::{AnimationParameters, DateRangeValues};
use crate::ImportError;
use chrono::{DateTime, NaiveDateTime, Utc};
use helios_core::TimeWindow;

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Everything an import needs from the metadata, parsed
#[derive(Debug, Clone, PartialEq)]
pub struct MovieData {
    pub window: TimeWindow,
    /// Seconds of scene time per movie frame. Not finite when the movie has no frames.
    pub cadence_secs: f64,
    pub num_frames: u32,
    pub frame_rate: f64,
    pub layers: Vec<LayerToken>,
}

impl MovieData {
    pub fn from_metadata(metadata: &MovieMetadata) -> Result<Self, ImportError> {
        let window = TimeWindow::new(
            parse_movie_timestamp("startDate", &metadata.start_date)?,
            parse_movie_timestamp("endDate", &metadata.end_date)?,
        );

        Ok(Self {
            cadence_secs: derive_cadence(&window, metadata.num_frames),
            window,
            num_frames: metadata.num_frames,
            frame_rate: metadata.frame_rate,
            layers: parse_layer_string(&metadata.layers),
        })
    }

    pub fn date_range(&self) -> DateRangeValues {
        DateRangeValues {
            start: self.window.start,
            end: self.window.end,
            frames: self.num_frames,
        }
    }

    pub fn animation_parameters(&self) -> AnimationParameters {
        AnimationParameters {
            fps: self.frame_rate,
            duration_secs: self.num_frames as f64 / self.frame_rate,
        }
    }
}

/// Seconds between frames. Zero frames are not guarded against.
pub fn derive_cadence(window: &TimeWindow, num_frames: u32) -> f64 {
    window.span_seconds() / num_frames as f64
}

/// Parse a movie timestamp. Values are UTC; a trailing `Z` is accepted.
pub fn parse_movie_timestamp(field: &'static str, value: &str) -> Result<DateTime<Utc>, ImportError> {
    let trimmed = value.trim();
    let naive = trimmed.strip_suffix('Z').unwrap_or(trimmed);

    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(naive, format).ok())
        .map(|time| time.and_utc())
        .ok_or_else(|| ImportError::InvalidTimestamp {
            field,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn metadata(start: &str, end: &str, num_frames: u32) -> MovieMetadata {
        MovieMetadata {
            start_date: start.to_string(),
            end_date: end.to_string(),
            num_frames,
            frame_rate: 15.0,
            layers: "[AIA,171],[EIT,195]".to_string(),
        }
    }

    #[test]
    fn test_cadence_from_window_and_frames() {
        let movie = MovieData::from_metadata(&metadata("2020-01-01T00:00:00Z", "2020-01-01T01:00:00Z", 60)).unwrap();

        assert_eq!(movie.cadence_secs, 60.0);
        assert_eq!(movie.window.start, Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(movie.window.end, Utc.with_ymd_and_hms(2020, 1, 1, 1, 0, 0).unwrap());
        assert_eq!(movie.layers.len(), 2);
    }

    #[test]
    fn test_zero_frames_gives_non_finite_cadence() {
        let movie = MovieData::from_metadata(&metadata("2020-01-01 00:00:00", "2020-01-01 01:00:00", 0)).unwrap();
        assert!(movie.cadence_secs.is_infinite());

        let empty = MovieData::from_metadata(&metadata("2020-01-01 00:00:00", "2020-01-01 00:00:00", 0)).unwrap();
        assert!(empty.cadence_secs.is_nan());
    }

    #[test]
    fn test_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2021, 6, 3, 12, 30, 5).unwrap();
        for value in ["2021-06-03 12:30:05", "2021-06-03T12:30:05", "2021-06-03T12:30:05Z", "2021-06-03 12:30:05.000"] {
            assert_eq!(parse_movie_timestamp("startDate", value).unwrap(), expected, "{value}");
        }
    }

    #[test]
    fn test_invalid_timestamp() {
        let err = parse_movie_timestamp("endDate", "yesterday").unwrap_err();
        assert!(matches!(err, ImportError::InvalidTimestamp { field: "endDate", .. }));
    }

    #[test]
    fn test_derived_ui_values() {
        let mut meta = metadata("2020-01-01 00:00:00", "2020-01-01 01:00:00", 10);
        meta.frame_rate = 2.0;
        let movie = MovieData::from_metadata(&meta).unwrap();

        assert_eq!(movie.animation_parameters(), AnimationParameters { fps: 2.0, duration_secs: 5.0 });
        assert_eq!(movie.date_range().frames, 10);
        assert_eq!(movie.date_range().start, movie.window.start);
    }
}
