// TF-IDF ranking over a document set.
//
// Uses the `keyword_extraction` crate, with each cleaned document treated as
// a separate IDF document: terms common to every résumé get pushed down,
// terms that set some documents apart get pushed up.

use keyword_extraction::tf_idf::{TfIdf, TfIdfParams};
use tracing::info;

use super::frequency::DEFAULT_TOP_N;
use super::ScoredTerm;
use crate::text::normalizer::Normalizer;
use crate::text::stopwords::stopwords;

/// TF-IDF ranker over normalized documents.
#[derive(Debug, Clone)]
pub struct TfIdfRanker {
    /// How many terms to return (0 = all)
    pub top_n: usize,
}

impl Default for TfIdfRanker {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl TfIdfRanker {
    /// Clean every document with `normalizer`, then rank terms by TF-IDF.
    ///
    /// Returns an empty ranking when nothing survives cleaning.
    pub fn rank(&self, normalizer: &Normalizer, docs: &[String]) -> Vec<ScoredTerm> {
        let cleaned: Vec<String> = docs
            .iter()
            .map(|doc| normalizer.normalize(doc).join(" "))
            .filter(|doc| !doc.is_empty())
            .collect();

        if cleaned.is_empty() {
            return Vec::new();
        }

        let vocabulary = cleaned
            .iter()
            .flat_map(|doc| doc.split_whitespace())
            .collect::<std::collections::HashSet<_>>()
            .len();
        let limit = if self.top_n == 0 {
            vocabulary
        } else {
            self.top_n.min(vocabulary)
        };

        let stop_words: Vec<String> = stopwords().iter().cloned().collect();
        let params = TfIdfParams::UnprocessedDocuments(&cleaned, &stop_words, None);
        let tfidf = TfIdf::new(params);

        let mut ranked: Vec<ScoredTerm> = tfidf
            .get_ranked_word_scores(limit)
            .into_iter()
            .map(|(term, score)| ScoredTerm {
                term,
                score: score as f64,
            })
            .collect();

        // Library output order for equal scores isn't stable; make it so.
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.term.cmp(&b.term))
        });

        if let Some(top) = ranked.first() {
            info!(
                documents = cleaned.len(),
                terms = ranked.len(),
                top_term = %top.term,
                top_score = top.score,
                "Ranked TF-IDF terms"
            );
        }
        ranked
    }
}
