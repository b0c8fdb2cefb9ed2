//! Catalog of locally supported image sources

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of an image source
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(String);

impl SourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SourceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A selectable source: display label plus identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCatalogEntry {
    pub label: String,
    pub id: SourceId,
}

impl SourceCatalogEntry {
    pub fn new(label: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            id: SourceId::new(id),
        }
    }
}

/// Read access to the currently known sources
pub trait SourceCatalog: Send + Sync {
    /// Ordered snapshot of the catalog
    fn snapshot(&self) -> Vec<SourceCatalogEntry>;
}

/// Catalog backed by a fixed list
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    entries: Vec<SourceCatalogEntry>,
}

impl StaticCatalog {
    pub fn new(entries: Vec<SourceCatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SourceCatalog for StaticCatalog {
    fn snapshot(&self) -> Vec<SourceCatalogEntry> {
        self.entries.clone()
    }
}

impl FromIterator<SourceCatalogEntry> for StaticCatalog {
    fn from_iter<I: IntoIterator<Item = SourceCatalogEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Entries whose label contains `needle` (case-sensitive), in catalog order
pub fn filter_by_label<'a>(
    entries: &[&'a SourceCatalogEntry],
    needle: &str,
) -> Vec<&'a SourceCatalogEntry> {
    entries
        .iter()
        .copied()
        .filter(|entry| entry.label.contains(needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_by_label_keeps_order() {
        let catalog = [
            SourceCatalogEntry::new("AIA 171", "10"),
            SourceCatalogEntry::new("EIT 171", "0"),
            SourceCatalogEntry::new("AIA 304", "13"),
        ];
        let all: Vec<_> = catalog.iter().collect();

        let matched = filter_by_label(&all, "171");
        assert_eq!(matched, vec![&catalog[0], &catalog[1]]);

        assert!(filter_by_label(&all, "aia").is_empty());
        assert_eq!(filter_by_label(&all, "").len(), 3);
    }

    #[test]
    fn test_source_id_is_transparent_in_json() {
        let entry: SourceCatalogEntry =
            serde_json::from_str(r#"{ "label": "AIA 171", "id": "10" }"#).unwrap();
        assert_eq!(entry.id, SourceId::from("10"));
    }
}
