// RAKE (Rapid Automatic Keyword Extraction) over raw, uncleaned text.
//
// Candidate phrases are the runs of words between stopwords and punctuation.
// Each word gets a degree (summed length of every candidate phrase it occurs
// in) and a frequency (how many times it occurs in candidate phrases). A
// phrase scores the sum of degree/frequency over its words, so words that
// keep company with other content words, and the phrases made of them,
// float above lone high-frequency words.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use tracing::info;

use super::ScoredTerm;
use crate::text::lemma::{split_sentences, word_tokens};
use crate::text::stopwords;

/// RAKE keyword ranker.
#[derive(Debug, Clone)]
pub struct KeywordRanker {
    stopwords: HashSet<String>,
    /// Candidate phrases with fewer words than this are discarded
    pub min_length: usize,
    /// Candidate phrases with more words than this are discarded
    pub max_length: usize,
}

/// Phrase boundaries are the NLTK English function words only; the broader
/// cleaning list would split "computer information systems" into pieces.
impl Default for KeywordRanker {
    fn default() -> Self {
        Self::with_stopwords(stopwords::english())
    }
}

impl KeywordRanker {
    /// Build a ranker with a custom stopword list (matched case-insensitively).
    pub fn with_stopwords(words: impl IntoIterator<Item = String>) -> Self {
        Self {
            stopwords: words.into_iter().map(|w| w.to_lowercase()).collect(),
            min_length: 1,
            max_length: usize::MAX,
        }
    }

    /// Restrict candidate phrases to `min..=max` words.
    pub fn with_phrase_length(mut self, min: usize, max: usize) -> Self {
        self.min_length = min.max(1);
        self.max_length = max.max(self.min_length);
        self
    }

    fn is_boundary(&self, token: &str) -> bool {
        !token.chars().any(char::is_alphanumeric) || self.stopwords.contains(token)
    }

    /// Split `text` into candidate phrases (lowercased word lists), in the
    /// order they occur. Repeated phrases are kept.
    pub fn candidate_phrases(&self, text: &str) -> Vec<Vec<String>> {
        let mut phrases = Vec::new();
        for sentence in split_sentences(text) {
            let mut current: Vec<String> = Vec::new();
            for token in word_tokens(sentence) {
                let word = token.to_lowercase();
                if self.is_boundary(&word) {
                    if !current.is_empty() {
                        phrases.push(std::mem::take(&mut current));
                    }
                } else {
                    current.push(word);
                }
            }
            if !current.is_empty() {
                phrases.push(current);
            }
        }
        phrases.retain(|p| p.len() >= self.min_length && p.len() <= self.max_length);
        phrases
    }

    /// Rank the candidate phrases of `text` by score, highest first.
    ///
    /// Each distinct phrase appears once; equal scores keep the order in
    /// which the phrases were first extracted.
    pub fn rank(&self, text: &str) -> Vec<ScoredTerm> {
        let phrases = self.candidate_phrases(text);

        let mut frequency: HashMap<&str, f64> = HashMap::new();
        let mut degree: HashMap<&str, f64> = HashMap::new();
        for phrase in &phrases {
            for word in phrase {
                *frequency.entry(word.as_str()).or_insert(0.0) += 1.0;
                *degree.entry(word.as_str()).or_insert(0.0) += phrase.len() as f64;
            }
        }

        let mut unique: IndexMap<String, f64> = IndexMap::new();
        for phrase in &phrases {
            let key = phrase.join(" ");
            if unique.contains_key(&key) {
                continue;
            }
            let score: f64 = phrase
                .iter()
                .map(|w| degree[w.as_str()] / frequency[w.as_str()])
                .sum();
            unique.insert(key, score);
        }

        let mut ranked: Vec<ScoredTerm> = unique
            .into_iter()
            .map(|(term, score)| ScoredTerm { term, score })
            .collect();
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        if let Some(top) = ranked.first() {
            info!(
                phrases = ranked.len(),
                top_phrase = %top.term,
                top_score = top.score,
                "Ranked RAKE keywords"
            );
        }
        ranked
    }

    /// Rank a document set as one text blob.
    pub fn rank_documents(&self, docs: &[String]) -> Vec<ScoredTerm> {
        self.rank(&docs.join(" "))
    }
}
