//! Movie import configuration

use crate::catalog::{SourceCatalogEntry, StaticCatalog};
use crate::metadata::FileMetadataService;
use crate::sinks::FixedResolution;
use crate::vocabulary::VocabularyTable;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Configuration for the movie importer and its collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieConfig {
    /// Directory holding `<movie id>.json` metadata files
    pub metadata_dir: PathBuf,
    
    /// Sources the viewer can display, in selector order
    pub catalog: Vec<SourceCatalogEntry>,
    
    /// Movie layer terms rewritten to catalog wording
    pub vocabulary: HashMap<String, String>,
    
    /// Resolution every activated source is rendered at
    pub resolution: u32,
}

impl Default for MovieConfig {
    fn default() -> Self {
        Self {
            metadata_dir: PathBuf::from("movies"),
            catalog: default_catalog(),
            vocabulary: default_vocabulary(),
            resolution: 1024,
        }
    }
}

impl MovieConfig {
    pub fn catalog(&self) -> StaticCatalog {
        StaticCatalog::new(self.catalog.clone())
    }
    
    pub fn vocabulary(&self) -> VocabularyTable {
        VocabularyTable::new(self.vocabulary.clone())
    }
    
    pub fn resolution_selector(&self) -> FixedResolution {
        FixedResolution(self.resolution)
    }
    
    pub fn metadata_service(&self) -> FileMetadataService {
        FileMetadataService::new(self.metadata_dir.clone())
    }
}

/// SDO and SOHO sources with their Helioviewer source ids
fn default_catalog() -> Vec<SourceCatalogEntry> {
    [
        ("EIT 171", "0"),
        ("EIT 195", "1"),
        ("EIT 284", "2"),
        ("EIT 304", "3"),
        ("LASCO C2", "4"),
        ("LASCO C3", "5"),
        ("AIA 94", "8"),
        ("AIA 131", "9"),
        ("AIA 171", "10"),
        ("AIA 193", "11"),
        ("AIA 211", "12"),
        ("AIA 304", "13"),
        ("AIA 335", "14"),
        ("AIA 1600", "15"),
        ("AIA 1700", "16"),
        ("HMI Continuum", "18"),
        ("HMI Magnetogram", "19"),
    ]
    .into_iter()
    .map(|(label, id)| SourceCatalogEntry::new(label, id))
    .collect()
}

/// Observatory names never appear in labels, so they match everything
fn default_vocabulary() -> HashMap<String, String> {
    [
        ("SDO", ""),
        ("SOHO", ""),
        ("continuum", "Continuum"),
        ("magnetogram", "Magnetogram"),
    ]
    .into_iter()
    .map(|(from, to)| (from.to_string(), to.to_string()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{SourceCatalog, SourceId};
    use crate::layers::parse_layer_string;
    use crate::matcher::resolve_layers;

    #[test]
    fn test_defaults_resolve_helioviewer_layers() {
        let config = MovieConfig::default();
        let layers = parse_layer_string(
            "[SDO,AIA,AIA,171,1,100],[SOHO,LASCO,C2,white-light,1,100],[SDO,HMI,HMI,magnetogram,1,100],[SDO,AIA,AIA,1700,1,100]",
        );

        let ids = resolve_layers(&layers, &config.catalog().snapshot(), &config.vocabulary()).unwrap();
        assert_eq!(ids, vec![SourceId::from("10"), SourceId::from("4"), SourceId::from("19"), SourceId::from("16")]);
    }

    #[test]
    fn test_partial_config() {
        let config: MovieConfig = serde_json::from_str(
            r#"{ "catalog": [{ "label": "AIA 171", "id": "x" }], "resolution": 512 }"#,
        )
        .unwrap();

        assert_eq!(config.catalog().len(), 1);
        assert_eq!(config.resolution_selector(), FixedResolution(512));
        assert_eq!(config.metadata_dir, PathBuf::from("movies"));
        assert_eq!(config.vocabulary, default_vocabulary());
    }
}
