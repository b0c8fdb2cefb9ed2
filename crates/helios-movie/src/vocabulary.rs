//! Translation of external source terms into catalog vocabulary

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;

/// Maps a term from a movie's layer description to the wording used in
/// catalog labels. Unknown terms come back unchanged.
pub trait VocabularyMapper: Send + Sync {
    fn translate<'a>(&'a self, term: &'a str) -> Cow<'a, str>;
}

/// Mapper that never changes a term
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityVocabulary;

impl VocabularyMapper for IdentityVocabulary {
    fn translate<'a>(&'a self, term: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(term)
    }
}

/// Lookup-table mapper
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VocabularyTable {
    terms: HashMap<String, String>,
}

impl VocabularyTable {
    pub fn new(terms: HashMap<String, String>) -> Self {
        Self { terms }
    }

    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.terms.insert(from.into(), to.into());
    }
}

impl VocabularyMapper for VocabularyTable {
    fn translate<'a>(&'a self, term: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(self.terms.get(term).map_or(term, String::as_str))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VocabularyTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_translates_known_terms() {
        let table: VocabularyTable = [("magnetogram", "Magnetogram"), ("SDO", "")].into_iter().collect();

        assert_eq!(table.translate("magnetogram"), "Magnetogram");
        assert_eq!(table.translate("SDO"), "");
        assert_eq!(table.translate("AIA"), "AIA");
    }

    #[test]
    fn test_translation_borrows_instead_of_copying() {
        let table: VocabularyTable = [("magnetogram", "Magnetogram")].into_iter().collect();

        assert!(matches!(table.translate("magnetogram"), Cow::Borrowed("Magnetogram")));
        assert!(matches!(table.translate("AIA"), Cow::Borrowed("AIA")));
        assert!(matches!(IdentityVocabulary.translate("SDO"), Cow::Borrowed("SDO")));
    }
}
