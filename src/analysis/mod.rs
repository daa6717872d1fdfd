// Analysis — turning cleaned tokens (or raw text, for RAKE) into ranked
// result lists.

pub mod frequency;
pub mod rake;
pub mod skills;
pub mod tfidf;

use serde::Serialize;

use self::frequency::FrequencyEntry;
use self::skills::SkillEntry;

/// A term or phrase with a single numeric score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredTerm {
    pub term: String,
    pub score: f64,
}

/// The final output of every mode, already in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "entries", rename_all = "snake_case")]
pub enum RankedResult {
    /// Token counts, with document coverage for multi-document sets
    Frequencies(Vec<FrequencyEntry>),
    /// RAKE phrases and their degree/frequency scores
    Keywords(Vec<ScoredTerm>),
    /// Skills found in the corpus with local count and external popularity
    Skills(Vec<SkillEntry>),
    /// TF-IDF terms that distinguish documents from one another
    Distinctive(Vec<ScoredTerm>),
}

impl RankedResult {
    pub fn len(&self) -> usize {
        match self {
            RankedResult::Frequencies(v) => v.len(),
            RankedResult::Keywords(v) | RankedResult::Distinctive(v) => v.len(),
            RankedResult::Skills(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
