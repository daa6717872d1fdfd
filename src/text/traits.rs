// Morphology traits — swap-ready abstractions for the lemmatization pass.
//
// Like the SourceAdapter trait, these let us replace the rule-based tagger
// and lemmatizer with dictionary-backed ones without touching the Normalizer.

use super::lemma::PosTag;

/// Assigns a Penn Treebank style tag ("NN", "VBG", "JJ", ...) to each token
/// of a single sentence. The returned vector has one tag per input token.
pub trait PosTagger: Send + Sync {
    fn tag(&self, tokens: &[&str]) -> Vec<String>;
}

/// Reduces a word to its dictionary base form for a given part of speech.
pub trait Lemmatizer: Send + Sync {
    fn lemmatize(&self, word: &str, pos: PosTag) -> String;
}
