// Skill matching — scan a cleaned corpus for known skill terms.
//
// The reference vocabulary maps each skill term to an external popularity
// count and was built by running the same normalization pipeline over a
// larger corpus. Matching only works when this run cleans text with that
// same configuration, so the matcher owns its Normalizer rather than taking
// pre-cleaned tokens from whoever calls it.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::info;

use crate::error::ArtifactError;
use crate::text::normalizer::Normalizer;

/// One matched skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillEntry {
    pub skill: String,
    /// Occurrences in this run's documents
    pub local_count: u32,
    /// Popularity from the reference vocabulary
    pub popularity: u64,
}

/// Precomputed skill term → popularity table. Read-only once loaded.
#[derive(Debug, Clone, Default)]
pub struct SkillVocabulary {
    popularity: HashMap<String, u64>,
}

impl SkillVocabulary {
    pub fn from_map(popularity: HashMap<String, u64>) -> Self {
        Self { popularity }
    }

    /// Load the vocabulary from its JSON artifact (`{"term": count, ...}`).
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        if !path.exists() {
            return Err(ArtifactError::Missing {
                name: "skill vocabulary",
                path: path.to_path_buf(),
            });
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let popularity: HashMap<String, u64> =
            serde_json::from_str(&raw).map_err(|source| ArtifactError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        info!(skills = popularity.len(), path = %path.display(), "Loaded skill vocabulary");
        Ok(Self { popularity })
    }

    pub fn contains(&self, term: &str) -> bool {
        self.popularity.contains_key(term)
    }

    /// External popularity of `term`, 0 if unknown.
    pub fn popularity(&self, term: &str) -> u64 {
        self.popularity.get(term).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.popularity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.popularity.is_empty()
    }
}

/// Scans documents for skills in a shared vocabulary.
#[derive(Debug)]
pub struct SkillMatcher {
    vocabulary: Arc<SkillVocabulary>,
    normalizer: Normalizer,
}

impl SkillMatcher {
    /// `normalizer` must be configured the way the vocabulary was built.
    pub fn new(vocabulary: Arc<SkillVocabulary>, normalizer: Normalizer) -> Self {
        Self {
            vocabulary,
            normalizer,
        }
    }

    /// Normalize every document, then match the flattened tokens.
    pub fn scan(&self, docs: &[String]) -> Vec<SkillEntry> {
        let tokens: Vec<String> = docs
            .iter()
            .flat_map(|doc| self.normalizer.normalize(doc))
            .collect();
        self.match_tokens(&tokens)
    }

    /// Match already-cleaned tokens, most popular skill first.
    ///
    /// Skills with equal popularity stay in first-encountered order.
    pub fn match_tokens(&self, tokens: &[String]) -> Vec<SkillEntry> {
        let mut local: IndexMap<&str, u32> = IndexMap::new();
        for token in tokens {
            if self.vocabulary.contains(token) {
                *local.entry(token.as_str()).or_insert(0) += 1;
            }
        }

        let mut matches: Vec<SkillEntry> = local
            .into_iter()
            .map(|(skill, local_count)| SkillEntry {
                skill: skill.to_string(),
                local_count,
                popularity: self.vocabulary.popularity(skill),
            })
            .collect();
        matches.sort_by(|a, b| b.popularity.cmp(&a.popularity));

        info!(
            tokens = tokens.len(),
            matched = matches.len(),
            "Matched skills against vocabulary"
        );
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::normalizer::CleaningConfig;

    fn vocabulary() -> Arc<SkillVocabulary> {
        Arc::new(SkillVocabulary::from_map(HashMap::from([
            ("python".to_string(), 500),
            ("java".to_string(), 300),
        ])))
    }

    #[test]
    fn test_sorted_by_popularity_with_local_counts() {
        let matcher = SkillMatcher::new(vocabulary(), Normalizer::new(CleaningConfig::default()));
        let tokens: Vec<String> = ["java", "python", "python", "kubernetes", "python"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let out = matcher.match_tokens(&tokens);
        assert_eq!(
            out,
            vec![
                SkillEntry {
                    skill: "python".to_string(),
                    local_count: 3,
                    popularity: 500
                },
                SkillEntry {
                    skill: "java".to_string(),
                    local_count: 1,
                    popularity: 300
                },
            ]
        );
    }

    #[test]
    fn test_no_matches_is_empty_not_error() {
        let matcher = SkillMatcher::new(vocabulary(), Normalizer::new(CleaningConfig::default()));
        assert!(matcher.scan(&["the and of".to_string()]).is_empty());
        assert!(matcher.scan(&[]).is_empty());
    }

    #[test]
    fn test_unknown_term_popularity_is_zero() {
        assert_eq!(vocabulary().popularity("cobol"), 0);
    }
}
