//! Parsing of the compact layer description attached to a movie

use std::fmt;

/// One image layer of a movie, e.g. `[SDO,AIA,AIA,171,1,100]` split into its parts.
///
/// Categorical tags come first, followed by numeric parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayerToken(Vec<String>);

impl LayerToken {
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(parts.into_iter().map(Into::into).collect())
    }

    pub fn parts(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for LayerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(","))
    }
}

/// Split a layer string such as `[AIA,171],[EIT,195]` into tokens.
///
/// Layers are separated by the literal `],[`; any bracket left on a piece is
/// dropped before splitting it on commas. Never fails: an empty string gives a
/// single token holding one empty part.
pub fn parse_layer_string(layers: &str) -> Vec<LayerToken> {
    layers
        .split("],[")
        .map(|piece| {
            let stripped = piece.replace(['[', ']'], "");
            LayerToken(stripped.split(',').map(str::to_string).collect())
        })
        .collect()
}
