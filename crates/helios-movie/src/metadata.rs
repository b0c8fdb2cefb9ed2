//! Movie metadata retrieval

use crate::FetchError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Description of an externally rendered movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieMetadata {
    /// First frame time, UTC without a zone suffix
    pub start_date: String,
    /// Last frame time, UTC without a zone suffix
    pub end_date: String,
    pub num_frames: u32,
    pub frame_rate: f64,
    /// Encoded layer list, e.g. `[SDO,AIA,AIA,171,1,100]`
    pub layers: String,
}

/// Source of movie metadata
#[async_trait]
pub trait MovieMetadataService: Send + Sync {
    /// Fetch the details of the movie with the given id
    async fn movie_details(&self, movie_id: &str) -> Result<MovieMetadata, FetchError>;
}

/// Reads movie metadata from `<dir>/<movie id>.json`
#[derive(Debug, Clone)]
pub struct FileMetadataService {
    dir: PathBuf,
}

impl FileMetadataService {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn movie_path(&self, movie_id: &str) -> Result<PathBuf, FetchError> {
        let valid = !movie_id.is_empty()
            && !movie_id.starts_with('.')
            && !movie_id.contains(['/', '\\']);
        if !valid {
            return Err(FetchError::InvalidId(movie_id.to_string()));
        }
        Ok(self.dir.join(format!("{movie_id}.json")))
    }
}

#[async_trait]
impl MovieMetadataService for FileMetadataService {
    async fn movie_details(&self, movie_id: &str) -> Result<MovieMetadata, FetchError> {
        let path = self.movie_path(movie_id)?;
        debug!(path = %path.display(), "reading movie metadata");

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(FetchError::NotFound(movie_id.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_slice(&bytes)?)
    }
}
