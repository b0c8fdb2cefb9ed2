//! Movie import for the solar movie viewer
//!
//! Takes the id of an externally rendered movie, fetches its metadata and
//! reconfigures the local scene (time window, cadence, image sources) to match.

pub mod catalog;
pub mod config;
pub mod importer;
pub mod layers;
pub mod matcher;
pub mod metadata;
pub mod movie_data;
pub mod query;
pub mod sinks;
pub mod vocabulary;

use thiserror::Error;

// Re-exports
pub use catalog::{SourceCatalog, SourceCatalogEntry, SourceId, StaticCatalog};
pub use config::MovieConfig;
pub use importer::{ImportServices, ImportSinks, ImportSummary, MovieImporter};
pub use layers::{parse_layer_string, LayerToken};
pub use matcher::{match_layer, resolve_layers};
pub use metadata::{FileMetadataService, MovieMetadata, MovieMetadataService};
pub use movie_data::MovieData;
pub use sinks::{
    AnimationParameterSink, AnimationParameters, DateRangeSink, DateRangeValues,
    FixedResolution, ResolutionSelector, ResolvedSource, SourceActivationSink,
};
pub use vocabulary::{IdentityVocabulary, VocabularyMapper, VocabularyTable};

/// Errors that can occur while retrieving movie metadata
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("movie '{0}' not found")]
    NotFound(String),
    
    #[error("invalid movie id '{0}'")]
    InvalidId(String),
    
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    
    #[error("malformed movie metadata: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A layer that resolved to zero or several catalog sources
#[derive(Error, Debug, Clone, PartialEq)]
#[error("couldn't match layer {token} to a supported source ({candidates} candidates left)")]
pub struct MatchError {
    pub token: LayerToken,
    pub candidates: usize,
}

/// Errors that abort a movie import
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("failed to fetch movie details: {0}")]
    Fetch(#[from] FetchError),
    
    #[error(transparent)]
    Match(#[from] MatchError),
    
    #[error("invalid {field} '{value}'")]
    InvalidTimestamp {
        field: &'static str,
        value: String,
    },
}
