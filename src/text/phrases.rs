// Phrase merging — joins adjacent token pairs that a pre-trained phrase
// model has learned to treat as one unit ("machine learning" →
// "machine_learning").
//
// The model is an external artifact: a table of token pairs with the
// co-occurrence score they reached in training, plus the threshold a pair
// must exceed to be merged. It is loaded once and never mutated.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ArtifactError;

fn default_delimiter() -> String {
    "_".to_string()
}

/// A trained pair-merge model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhraseModel {
    /// String placed between the two halves of a merged pair
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    /// Minimum (exclusive) score a pair needs to be merged
    #[serde(default)]
    pub threshold: f64,
    /// Trained pair scores, keyed by "left right"
    pub phrasegrams: HashMap<String, f64>,
}

impl PhraseModel {
    /// Build a model from explicit `(left, right, score)` triples.
    pub fn from_pairs<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str, f64)>,
        threshold: f64,
    ) -> Self {
        Self {
            delimiter: default_delimiter(),
            threshold,
            phrasegrams: pairs
                .into_iter()
                .map(|(a, b, score)| (format!("{a} {b}"), score))
                .collect(),
        }
    }

    /// Load a model from its JSON artifact.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        if !path.exists() {
            return Err(ArtifactError::Missing {
                name: "phrase model",
                path: path.to_path_buf(),
            });
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model: PhraseModel =
            serde_json::from_str(&raw).map_err(|source| ArtifactError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        // Merged tokens must stay single, non-empty tokens
        if model.delimiter.is_empty() || model.delimiter.chars().any(char::is_whitespace) {
            return Err(ArtifactError::Invalid {
                path: path.to_path_buf(),
                reason: format!(
                    "phrase delimiter {:?} must be non-empty and contain no whitespace",
                    model.delimiter
                ),
            });
        }

        info!(
            phrasegrams = model.phrasegrams.len(),
            threshold = model.threshold,
            path = %path.display(),
            "Loaded phrase model"
        );
        Ok(model)
    }

    /// Score of the pair `(left, right)` if it clears the threshold.
    fn merge_score(&self, left: &str, right: &str) -> Option<f64> {
        self.phrasegrams
            .get(&format!("{left} {right}"))
            .copied()
            .filter(|score| *score > self.threshold)
    }

    /// Merge qualifying adjacent pairs, scanning left to right.
    ///
    /// Merges never overlap: once a token has been joined to its left
    /// neighbour it can't also be joined to its right one.
    pub fn apply(&self, tokens: &[String]) -> Vec<String> {
        let mut out = Vec::with_capacity(tokens.len());
        let mut i = 0;
        while i < tokens.len() {
            if i + 1 < tokens.len() && self.merge_score(&tokens[i], &tokens[i + 1]).is_some() {
                out.push(format!("{}{}{}", tokens[i], self.delimiter, tokens[i + 1]));
                i += 2;
            } else {
                out.push(tokens[i].clone());
                i += 1;
            }
        }
        out
    }
}

/// Phrase-merging step of the Normalizer.
///
/// Holds an optional shared model. With no model loaded it is the identity,
/// so asking for phrase merging without an artifact is a harmless no-op.
#[derive(Debug, Clone, Default)]
pub struct PhraseJoiner {
    model: Option<Arc<PhraseModel>>,
}

impl PhraseJoiner {
    pub fn new(model: Option<Arc<PhraseModel>>) -> Self {
        Self { model }
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn join(&self, tokens: Vec<String>) -> Vec<String> {
        match &self.model {
            Some(model) => model.apply(&tokens),
            None => tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    fn model() -> PhraseModel {
        PhraseModel::from_pairs(
            [
                ("machine", "learning", 40.0),
                ("learning", "engineer", 25.0),
                ("rest", "api", 5.0),
            ],
            10.0,
        )
    }

    #[test]
    fn test_merges_pairs_above_threshold() {
        let out = model().apply(&toks("senior machine learning role"));
        assert_eq!(out, toks("senior machine_learning role"));
    }

    #[test]
    fn test_pair_below_threshold_is_kept_apart() {
        let out = model().apply(&toks("design rest api endpoints"));
        assert_eq!(out, toks("design rest api endpoints"));
    }

    #[test]
    fn test_merges_do_not_overlap() {
        // "learning engineer" also qualifies, but "learning" is already taken
        let out = model().apply(&toks("machine learning engineer"));
        assert_eq!(out, toks("machine_learning engineer"));
    }

    #[test]
    fn test_joiner_without_model_is_identity() {
        let joiner = PhraseJoiner::default();
        assert!(!joiner.is_loaded());
        let input = toks("machine learning engineer");
        assert_eq!(joiner.join(input.clone()), input);
    }

    #[test]
    fn test_load_missing_artifact_fails() {
        let err = PhraseModel::load(Path::new("/nonexistent/wordscan/phraser.json")).unwrap_err();
        assert!(matches!(err, ArtifactError::Missing { .. }));
    }

    #[test]
    fn test_model_deserializes_with_defaults() {
        let json = r#"{"phrasegrams": {"new york": 12.5}}"#;
        let model: PhraseModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.delimiter, "_");
        assert_eq!(model.threshold, 0.0);
        assert_eq!(model.apply(&toks("new york city")), toks("new_york city"));
    }
}
