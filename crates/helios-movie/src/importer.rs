//! Movie import orchestration

use crate::catalog::{SourceCatalog, SourceId};
use crate::matcher::resolve_layers;
use crate::metadata::MovieMetadataService;
use crate::movie_data::MovieData;
use crate::query::movie_id_from_query;
use crate::sinks::{
    AnimationParameterSink, DateRangeSink, ResolutionSelector, ResolvedSource, SourceActivationSink,
};
use crate::vocabulary::VocabularyMapper;
use crate::ImportError;
use helios_core::events::events::{MovieImportFailed, MovieImported};
use helios_core::{AnimationClock, EventBus, TimeWindow};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where an import reads from
#[derive(Clone)]
pub struct ImportServices {
    pub metadata: Arc<dyn MovieMetadataService>,
    pub catalog: Arc<dyn SourceCatalog>,
    pub vocabulary: Arc<dyn VocabularyMapper>,
    pub resolution: Arc<dyn ResolutionSelector>,
}

/// Where an import writes to
#[derive(Clone)]
pub struct ImportSinks {
    pub activation: Arc<dyn SourceActivationSink>,
    pub date_range: Arc<dyn DateRangeSink>,
    pub animation: Arc<dyn AnimationParameterSink>,
}

/// Outcome of a successful import
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSummary {
    pub movie_id: String,
    pub window: TimeWindow,
    pub cadence_secs: f64,
    pub sources: Vec<SourceId>,
}

/// Reconfigures the scene to match an externally rendered movie.
///
/// Holds no per-import state. Imports are not serialized: two running at
/// once both push their results, and the last write wins.
pub struct MovieImporter {
    services: ImportServices,
    sinks: ImportSinks,
    clock: Arc<AnimationClock>,
    event_bus: Option<Arc<EventBus>>,
}

impl MovieImporter {
    pub fn new(services: ImportServices, sinks: ImportSinks, clock: Arc<AnimationClock>) -> Self {
        Self {
            services,
            sinks,
            clock,
            event_bus: None,
        }
    }

    /// Publish import outcomes on the given bus
    pub fn with_event_bus(mut self, event_bus: Arc<EventBus>) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    /// Import a movie.
    ///
    /// Every layer is matched before anything is activated. Nothing already
    /// pushed to a sink is rolled back if a later step fails.
    pub async fn import(&self, movie_id: &str) -> Result<ImportSummary, ImportError> {
        info!(movie_id, "importing movie");

        let metadata = self.services.metadata.movie_details(movie_id).await?;
        let movie = MovieData::from_metadata(&metadata)?;

        let catalog = self.services.catalog.snapshot();
        let sources = resolve_layers(&movie.layers, &catalog, self.services.vocabulary.as_ref())?;

        for source_id in &sources {
            let resolved = ResolvedSource {
                source_id: source_id.clone(),
                window: movie.window,
                cadence_secs: movie.cadence_secs,
                resolution: self.services.resolution.resolution_for(source_id),
            };
            debug!(source = %resolved.source_id, resolution = resolved.resolution, "activating source");
            self.sinks.activation.activate(&resolved);
        }

        self.sinks.date_range.set_date_range(&movie.date_range());
        self.sinks.animation.set_animation_parameters(&movie.animation_parameters());

        self.clock.set_time_window(movie.window);
        self.clock.set_cadence(movie.cadence_secs);

        Ok(ImportSummary {
            movie_id: movie_id.to_string(),
            window: movie.window,
            cadence_secs: movie.cadence_secs,
            sources,
        })
    }

    /// Import a movie, logging instead of returning any failure
    pub async fn submit(&self, movie_id: &str) -> Option<ImportSummary> {
        match self.import(movie_id).await {
            Ok(summary) => {
                info!(movie_id, sources = summary.sources.len(), "movie imported");
                self.publish(MovieImported {
                    movie_id: movie_id.to_string(),
                    source_ids: summary.sources.iter().map(ToString::to_string).collect(),
                });
                Some(summary)
            }
            Err(e) => {
                warn!(movie_id, "Error: {}", e);
                self.publish(MovieImportFailed {
                    movie_id: movie_id.to_string(),
                    error: e.to_string(),
                });
                None
            }
        }
    }

    /// Submit the movie named by a `movie=<id>` query parameter, if any
    pub async fn submit_from_query(&self, query: &str) -> Option<ImportSummary> {
        let movie_id = movie_id_from_query(query)?;
        self.submit(&movie_id).await
    }

    fn publish<E: helios_core::events::Event>(&self, event: E) {
        if let Some(bus) = &self.event_bus {
            bus.publish(event);
        }
    }
}
