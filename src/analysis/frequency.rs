// Frequency aggregation over one or many cleaned token sequences.
//
// Counting keeps terms in first-encountered order and all sorts are stable,
// so ties always come out in the order the terms first appeared.
//
// For document sets we also track document frequency: how many documents
// contain a term at least once, regardless of how often it repeats inside
// any one of them. Coverage is that count divided by the number of documents.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default number of rows returned by a frequency ranking.
pub const DEFAULT_TOP_N: usize = 100;

/// How to order a frequency ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Raw occurrence count, descending
    #[default]
    Count,
    /// Fraction of documents containing the term, descending
    Coverage,
}

/// One row of a frequency ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyEntry {
    pub term: String,
    pub count: u32,
    /// Document coverage in (0, 1]; only present for document sets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<f64>,
}

/// Term counts, plus document frequencies when built from a document set.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    counts: IndexMap<String, u32>,
    document_frequency: Option<IndexMap<String, u32>>,
    documents: usize,
}

impl FrequencyTable {
    /// Count a single token sequence.
    pub fn from_tokens(tokens: &[String]) -> Self {
        let mut counts: IndexMap<String, u32> = IndexMap::new();
        for token in tokens {
            *counts.entry(token.clone()).or_insert(0) += 1;
        }
        Self {
            counts,
            document_frequency: None,
            documents: 1,
        }
    }

    /// Count a document set: global counts across all documents plus the
    /// number of documents each term appears in.
    pub fn from_documents(docs: &[Vec<String>]) -> Self {
        let mut counts: IndexMap<String, u32> = IndexMap::new();
        let mut document_frequency: IndexMap<String, u32> = IndexMap::new();

        for doc in docs {
            let mut seen: HashSet<&str> = HashSet::new();
            for token in doc {
                *counts.entry(token.clone()).or_insert(0) += 1;
                if seen.insert(token.as_str()) {
                    *document_frequency.entry(token.clone()).or_insert(0) += 1;
                }
            }
        }

        debug!(
            documents = docs.len(),
            vocabulary = counts.len(),
            "Built document frequency table"
        );

        Self {
            counts,
            document_frequency: Some(document_frequency),
            documents: docs.len(),
        }
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of documents the table was built from.
    pub fn document_count(&self) -> usize {
        self.documents
    }

    /// Occurrences of `term` (0 if absent).
    pub fn count(&self, term: &str) -> u32 {
        self.counts.get(term).copied().unwrap_or(0)
    }

    /// Fraction of documents containing `term`.
    ///
    /// `None` for tables built from a single token sequence or for terms
    /// that never appeared.
    pub fn coverage(&self, term: &str) -> Option<f64> {
        let df = self.document_frequency.as_ref()?.get(term)?;
        Some(*df as f64 / self.documents as f64)
    }

    /// The `top_n` most frequent terms, then ordered by `sort`.
    ///
    /// Terms are always selected by raw count first; `SortKey::Coverage`
    /// reorders that selection by coverage. `top_n` larger than the
    /// vocabulary returns the whole vocabulary, and `0` means "no limit".
    pub fn top(&self, top_n: usize, sort: SortKey) -> Vec<FrequencyEntry> {
        let mut entries: Vec<FrequencyEntry> = self
            .counts
            .iter()
            .map(|(term, &count)| FrequencyEntry {
                term: term.clone(),
                count,
                coverage: self.coverage(term),
            })
            .collect();

        entries.sort_by(|a, b| b.count.cmp(&a.count));
        let limit = if top_n == 0 {
            entries.len()
        } else {
            top_n.min(entries.len())
        };
        entries.truncate(limit);

        if sort == SortKey::Coverage {
            entries.sort_by(|a, b| {
                b.coverage
                    .unwrap_or(0.0)
                    .partial_cmp(&a.coverage.unwrap_or(0.0))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }
        entries
    }
}

/// Rank the terms of a single document by count.
pub fn aggregate_tokens(tokens: &[String], top_n: usize) -> Vec<FrequencyEntry> {
    FrequencyTable::from_tokens(tokens).top(top_n, SortKey::Count)
}

/// Rank the terms of a document set by count or coverage.
pub fn aggregate_documents(docs: &[Vec<String>], top_n: usize, sort: SortKey) -> Vec<FrequencyEntry> {
    FrequencyTable::from_documents(docs).top(top_n, sort)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_ties_keep_first_encountered_order() {
        let ranked = aggregate_tokens(&toks("rust go rust zig go java"), 10);
        let terms: Vec<&str> = ranked.iter().map(|e| e.term.as_str()).collect();
        assert_eq!(terms, vec!["rust", "go", "zig", "java"]);
        assert_eq!(ranked[0].count, 2);
        assert!(ranked[0].coverage.is_none());
    }

    #[test]
    fn test_multi_document_counts_and_coverage() {
        let docs = vec![toks("a a b"), toks("a c")];
        let table = FrequencyTable::from_documents(&docs);
        assert_eq!(table.count("a"), 3);
        assert_eq!(table.count("b"), 1);
        assert_eq!(table.count("c"), 1);
        assert_eq!(table.count("z"), 0);
        assert_eq!(table.coverage("a"), Some(1.0));
        assert_eq!(table.coverage("b"), Some(0.5));
        assert_eq!(table.coverage("z"), None);
    }

    #[test]
    fn test_coverage_sort_reorders_selection() {
        // "x" repeats inside one document; "y" appears once in each
        let docs = vec![toks("x x x y"), toks("y"), toks("y")];
        let by_count = aggregate_documents(&docs, 10, SortKey::Count);
        assert_eq!(by_count[0].term, "x");

        let by_coverage = aggregate_documents(&docs, 10, SortKey::Coverage);
        assert_eq!(by_coverage[0].term, "y");
        assert_eq!(by_coverage[0].coverage, Some(1.0));
        assert_eq!(by_coverage[1].term, "x");
    }

    #[test]
    fn test_top_n_clamps_and_zero_means_all() {
        let tokens = toks("one two three four five");
        assert_eq!(aggregate_tokens(&tokens, 1000).len(), 5);
        assert_eq!(aggregate_tokens(&tokens, 0).len(), 5);
        assert_eq!(aggregate_tokens(&tokens, 2).len(), 2);
    }

    #[test]
    fn test_empty_input_gives_empty_ranking() {
        assert!(aggregate_tokens(&[], DEFAULT_TOP_N).is_empty());
        assert!(aggregate_documents(&[], DEFAULT_TOP_N, SortKey::Coverage).is_empty());
        assert!(aggregate_documents(&[vec![], vec![]], DEFAULT_TOP_N, SortKey::Count).is_empty());
    }
}
