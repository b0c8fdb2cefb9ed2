//! Matching movie layers against the source catalog

use crate::catalog::{filter_by_label, SourceCatalogEntry, SourceId};
use crate::layers::LayerToken;
use crate::vocabulary::VocabularyMapper;
use crate::MatchError;
use tracing::trace;

/// Resolve one layer to exactly one catalog source.
///
/// Each part of the token is translated and used to narrow the candidates by
/// label substring. Narrowing stops after the first part that reads as an
/// integer (the layer's measurement) or as soon as a single candidate is left.
pub fn match_layer(
    token: &LayerToken,
    catalog: &[SourceCatalogEntry],
    vocabulary: &dyn VocabularyMapper,
) -> Result<SourceId, MatchError> {
    let mut candidates: Vec<&SourceCatalogEntry> = catalog.iter().collect();

    for part in token.parts() {
        let term = vocabulary.translate(part);
        candidates = filter_by_label(&candidates, &term);
        trace!(part = part.as_str(), term = &*term, remaining = candidates.len(), "narrowed layer candidates");

        if parses_as_integer(part) || candidates.len() == 1 {
            break;
        }
    }

    match candidates.as_slice() {
        [only] => Ok(only.id.clone()),
        _ => Err(MatchError {
            token: token.clone(),
            candidates: candidates.len(),
        }),
    }
}

/// Resolve every layer in order, stopping at the first one that doesn't match
pub fn resolve_layers(
    tokens: &[LayerToken],
    catalog: &[SourceCatalogEntry],
    vocabulary: &dyn VocabularyMapper,
) -> Result<Vec<SourceId>, MatchError> {
    tokens
        .iter()
        .map(|token| match_layer(token, catalog, vocabulary))
        .collect()
}

/// Whether an integer can be read from the start of `text`.
///
/// Same acceptance as a lenient `parseInt`: leading whitespace, an optional
/// sign, then a decimal digit or a `0x` prefix followed by a hex digit.
/// Trailing garbage is allowed (`"171a"` reads as 171).
pub fn parses_as_integer(text: &str) -> bool {
    let trimmed = text.trim_start();
    let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);

    if let Some(hex) = unsigned.strip_prefix("0x").or_else(|| unsigned.strip_prefix("0X")) {
        return hex.starts_with(|c: char| c.is_ascii_hexdigit());
    }
    unsigned.starts_with(|c: char| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::{IdentityVocabulary, VocabularyTable};

    fn catalog() -> Vec<SourceCatalogEntry> {
        vec![
            SourceCatalogEntry::new("AIA 171", "10"),
            SourceCatalogEntry::new("AIA 304", "13"),
            SourceCatalogEntry::new("EIT 195", "1"),
        ]
    }

    #[test]
    fn test_match_with_measurement() {
        let token = LayerToken::new(["AIA", "171"]);
        let id = match_layer(&token, &catalog(), &IdentityVocabulary).unwrap();
        assert_eq!(id, SourceId::from("10"));
    }

    #[test]
    fn test_ambiguous_layer_fails() {
        let token = LayerToken::new(["AIA"]);
        let err = match_layer(&token, &catalog(), &IdentityVocabulary).unwrap_err();

        assert_eq!(err.token, token);
        assert_eq!(err.candidates, 2);
    }

    #[test]
    fn test_unknown_layer_fails() {
        let token = LayerToken::new(["HMI", "continuum"]);
        let err = match_layer(&token, &catalog(), &IdentityVocabulary).unwrap_err();
        assert_eq!(err.candidates, 0);
    }

    #[test]
    fn test_stops_once_unique() {
        // "EIT" alone is unique; later parts would otherwise filter everything out
        let token = LayerToken::new(["EIT", "EIT", "no-such-label"]);
        let id = match_layer(&token, &catalog(), &IdentityVocabulary).unwrap();
        assert_eq!(id, SourceId::from("1"));
    }

    #[test]
    fn test_stops_at_first_integer() {
        let catalog = vec![
            SourceCatalogEntry::new("AIA 171 full disk", "a"),
            SourceCatalogEntry::new("AIA 171 half disk", "b"),
        ];
        let token = LayerToken::new(["AIA", "171", "half"]);

        let err = match_layer(&token, &catalog, &IdentityVocabulary).unwrap_err();
        assert_eq!(err.candidates, 2);
    }

    #[test]
    fn test_trailing_numbers_are_never_used() {
        let token = LayerToken::new(["AIA", "304", "1", "100"]);
        let id = match_layer(&token, &catalog(), &IdentityVocabulary).unwrap();
        assert_eq!(id, SourceId::from("13"));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let token = LayerToken::new(["aia", "171"]);
        assert!(match_layer(&token, &catalog(), &IdentityVocabulary).is_err());
    }

    #[test]
    fn test_vocabulary_is_applied() {
        let catalog = vec![
            SourceCatalogEntry::new("HMI Magnetogram", "19"),
            SourceCatalogEntry::new("HMI Continuum", "18"),
            SourceCatalogEntry::new("AIA 171", "10"),
        ];
        let vocabulary: VocabularyTable = [("SDO", ""), ("magnetogram", "Magnetogram")].into_iter().collect();
        let token = LayerToken::new(["SDO", "HMI", "HMI", "magnetogram", "1", "100"]);

        let id = match_layer(&token, &catalog, &vocabulary).unwrap();
        assert_eq!(id, SourceId::from("19"));
    }

    #[test]
    fn test_catalog_is_not_modified() {
        let catalog = catalog();
        let before = catalog.clone();
        let _ = match_layer(&LayerToken::new(["AIA", "171"]), &catalog, &IdentityVocabulary);
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_resolve_layers_in_order() {
        let tokens = [LayerToken::new(["EIT", "195"]), LayerToken::new(["AIA", "171"])];
        let ids = resolve_layers(&tokens, &catalog(), &IdentityVocabulary).unwrap();
        assert_eq!(ids, vec![SourceId::from("1"), SourceId::from("10")]);
    }

    #[test]
    fn test_resolve_layers_stops_at_failure() {
        let tokens = [LayerToken::new(["AIA"]), LayerToken::new(["EIT", "195"])];
        let err = resolve_layers(&tokens, &catalog(), &IdentityVocabulary).unwrap_err();
        assert_eq!(err.token, LayerToken::new(["AIA"]));
    }

    #[test]
    fn test_parses_as_integer() {
        for text in ["171", "  42", "-5", "+3", "1.5", "171abc", "0x1F", "0"] {
            assert!(parses_as_integer(text), "{text:?} should read as an integer");
        }
        for text in ["", "AIA", "white-light", "0x", "0xg", "-", " ", "x171"] {
            assert!(!parses_as_integer(text), "{text:?} should not read as an integer");
        }
    }
}
