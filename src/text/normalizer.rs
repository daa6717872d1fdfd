// The normalization pipeline — raw text in, clean token sequence out.
//
// Stages run in a fixed order:
//
//   1. lemmatize (optional)      6. delete digit runs
//   2. lowercase                 7. drop stopwords
//   3. strip <tags>              8. drop tokens shorter than 3 chars
//   4. punctuation runs → space  9. stem (optional)
//   5. collapse whitespace      10. merge phrases (optional)
//
// Every stage is total: any string goes in, a (possibly empty) token
// sequence comes out. Tokens are never empty and never contain whitespace.

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use regex_lite::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::lemma::{lemmatize_text, split_sentences, RuleLemmatizer, RuleTagger};
use super::phrases::{PhraseJoiner, PhraseModel};
use super::stopwords::stopwords;
use super::traits::{Lemmatizer, PosTagger};

static RE_TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));
static RE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[[:punct:]]+").expect("valid punctuation regex"));
static RE_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("valid digit regex"));

/// Tokens shorter than this (in characters) are dropped.
pub const MIN_TOKEN_CHARS: usize = 3;

/// Which optional stages to run. All combinations are allowed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningConfig {
    /// Apply suffix-stripping stemming to every surviving token
    pub stem: bool,
    /// Lemmatize with part-of-speech context before anything else
    pub lemma: bool,
    /// Merge frequent adjacent pairs using the loaded phrase model
    pub phrases: bool,
}

/// A configured cleaning pipeline.
///
/// Built once per mode run and reused for every document. The phrase model
/// is shared read-only; without one, `phrases` is a no-op.
pub struct Normalizer {
    config: CleaningConfig,
    stopwords: &'static HashSet<String>,
    stemmer: Stemmer,
    phrases: PhraseJoiner,
    tagger: Box<dyn PosTagger>,
    lemmatizer: Box<dyn Lemmatizer>,
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("config", &self.config)
            .field("phrase_model", &self.phrases.is_loaded())
            .finish()
    }
}

impl Normalizer {
    /// A pipeline with the rule-based tagger/lemmatizer and no phrase model.
    pub fn new(config: CleaningConfig) -> Self {
        Self {
            config,
            stopwords: stopwords(),
            stemmer: Stemmer::create(Algorithm::English),
            phrases: PhraseJoiner::default(),
            tagger: Box::new(RuleTagger),
            lemmatizer: Box::new(RuleLemmatizer),
        }
    }

    /// Attach a loaded phrase model (used only when `config.phrases` is set).
    pub fn with_phrase_model(mut self, model: Option<Arc<PhraseModel>>) -> Self {
        self.phrases = PhraseJoiner::new(model);
        self
    }

    /// Replace the tagger and lemmatizer used by the morphological pass.
    pub fn with_morphology(
        mut self,
        tagger: Box<dyn PosTagger>,
        lemmatizer: Box<dyn Lemmatizer>,
    ) -> Self {
        self.tagger = tagger;
        self.lemmatizer = lemmatizer;
        self
    }

    pub fn config(&self) -> CleaningConfig {
        self.config
    }

    /// Clean `text` into a flat token sequence.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let tokens = if self.config.lemma {
            let lemmatized =
                lemmatize_text(text, self.tagger.as_ref(), self.lemmatizer.as_ref()).join(" ");
            self.filter(&lemmatized)
        } else {
            self.filter(text)
        };
        let tokens = self.reduce(tokens);
        debug!(
            input_chars = text.len(),
            tokens = tokens.len(),
            "Normalized document"
        );
        tokens
    }

    /// Clean `text` sentence by sentence.
    ///
    /// Returns one cleaned, space-joined string per input sentence. A
    /// sentence that cleans down to nothing becomes an empty string, so the
    /// output stays aligned with the sentences of the input.
    pub fn normalize_sentences(&self, text: &str) -> Vec<String> {
        let sentences: Vec<String> = if self.config.lemma {
            lemmatize_text(text, self.tagger.as_ref(), self.lemmatizer.as_ref())
        } else {
            split_sentences(text)
                .into_iter()
                .map(str::to_string)
                .collect()
        };

        sentences
            .iter()
            .map(|sentence| self.reduce(self.filter(sentence)).join(" "))
            .collect()
    }

    /// Stages 2–8: case-fold, strip tags, punctuation, digits, stopwords and
    /// short tokens.
    fn filter(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let untagged = RE_TAGS.replace_all(&lowered, "");
        let unpunctuated = RE_PUNCT.replace_all(&untagged, " ");
        let collapsed = unpunctuated.split_whitespace().collect::<Vec<_>>().join(" ");
        let digitless = RE_DIGITS.replace_all(&collapsed, "");

        digitless
            .split_whitespace()
            .filter(|word| !self.stopwords.contains(*word))
            .filter(|word| word.chars().count() >= MIN_TOKEN_CHARS)
            .map(str::to_string)
            .collect()
    }

    /// Stages 9–10: optional stemming and phrase merging.
    fn reduce(&self, tokens: Vec<String>) -> Vec<String> {
        let tokens = if self.config.stem {
            tokens
                .iter()
                .map(|t| self.stemmer.stem(t).into_owned())
                .filter(|t| !t.is_empty())
                .collect()
        } else {
            tokens
        };

        if self.config.phrases {
            self.phrases.join(tokens)
        } else {
            tokens
        }
    }
}

/// One-shot convenience: clean `text` with a fresh pipeline and no phrase
/// model.
pub fn normalize(text: &str, config: CleaningConfig) -> Vec<String> {
    Normalizer::new(config).normalize(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::lemma::PosTag;

    fn plain() -> CleaningConfig {
        CleaningConfig::default()
    }

    #[test]
    fn test_stopwords_and_short_tokens_removed() {
        assert_eq!(normalize("the cat sat on it", plain()), vec!["cat", "sat"]);
    }

    #[test]
    fn test_digit_removal_fuses_letters() {
        assert_eq!(normalize("abc123def", plain()), vec!["abcdef"]);
    }

    #[test]
    fn test_tags_are_stripped_before_punctuation() {
        let out = normalize("<div class=\"x\">kubernetes</div> <br/>docker", plain());
        assert_eq!(out, vec!["kubernetes", "docker"]);
    }

    #[test]
    fn test_punctuation_runs_split_tokens() {
        let out = normalize("python/django...postgres,redis", plain());
        assert_eq!(out, vec!["python", "django", "postgres", "redis"]);
    }

    #[test]
    fn test_case_folding() {
        assert_eq!(normalize("PYTHON Python python", plain()), vec!["python"; 3]);
    }

    #[test]
    fn test_domain_noise_dropped() {
        let out = normalize("Web development experience with Kubernetes", plain());
        assert_eq!(out, vec!["kubernetes"]);
    }

    #[test]
    fn test_empty_and_all_stopword_input() {
        assert!(normalize("", plain()).is_empty());
        assert!(normalize("   \n\t ", plain()).is_empty());
        assert!(normalize("and the of it is", plain()).is_empty());
    }

    #[test]
    fn test_stemming_applies_after_filtering() {
        let config = CleaningConfig {
            stem: true,
            ..Default::default()
        };
        assert_eq!(normalize("deploying clusters", config), vec!["deploy", "cluster"]);
    }

    #[test]
    fn test_phrases_without_model_is_noop() {
        let with = CleaningConfig {
            phrases: true,
            ..Default::default()
        };
        let text = "Machine learning engineer building machine learning pipelines";
        assert_eq!(normalize(text, with), normalize(text, plain()));
    }

    #[test]
    fn test_phrases_with_model_merge() {
        let model = PhraseModel::from_pairs([("machine", "learning", 50.0)], 10.0);
        let normalizer = Normalizer::new(CleaningConfig {
            phrases: true,
            ..Default::default()
        })
        .with_phrase_model(Some(Arc::new(model)));
        let out = normalizer.normalize("Machine learning pipelines");
        assert_eq!(out, vec!["machine_learning", "pipelines"]);
    }

    #[test]
    fn test_loaded_model_ignored_when_flag_off() {
        let model = PhraseModel::from_pairs([("machine", "learning", 50.0)], 10.0);
        let normalizer = Normalizer::new(plain()).with_phrase_model(Some(Arc::new(model)));
        let out = normalizer.normalize("Machine learning pipelines");
        assert_eq!(out, vec!["machine", "learning", "pipelines"]);
    }

    #[test]
    fn test_lemma_reduces_inflections() {
        let config = CleaningConfig {
            lemma: true,
            ..Default::default()
        };
        let out = normalize("Engineers managed deployments of clusters.", config);
        assert_eq!(out, vec!["engineer", "manage", "deployment", "cluster"]);
    }

    struct VerbTagger;

    impl PosTagger for VerbTagger {
        fn tag(&self, tokens: &[&str]) -> Vec<String> {
            vec!["VB".to_string(); tokens.len()]
        }
    }

    /// Rewrites one verb and leaves everything else as written.
    struct ShipLemmatizer;

    impl Lemmatizer for ShipLemmatizer {
        fn lemmatize(&self, word: &str, pos: PosTag) -> String {
            match (word, pos) {
                ("shipped", PosTag::Verb) => "deliver".to_string(),
                _ => word.to_string(),
            }
        }
    }

    #[test]
    fn test_custom_morphology_replaces_rule_based() {
        let config = CleaningConfig {
            lemma: true,
            ..Default::default()
        };
        let normalizer =
            Normalizer::new(config).with_morphology(Box::new(VerbTagger), Box::new(ShipLemmatizer));
        // The rule-based lemmatizer would reduce "engineers" to "engineer"
        assert_eq!(
            normalizer.normalize("Engineers shipped clusters."),
            vec!["engineers", "deliver", "clusters"]
        );
        assert_eq!(
            normalizer.normalize_sentences("Engineers shipped clusters. Kubernetes operators."),
            vec!["engineers deliver clusters", "kubernetes operators"]
        );
    }

    #[test]
    fn test_custom_morphology_unused_without_lemma_flag() {
        let normalizer =
            Normalizer::new(plain()).with_morphology(Box::new(VerbTagger), Box::new(ShipLemmatizer));
        assert_eq!(
            normalizer.normalize("Engineers shipped clusters."),
            vec!["engineers", "shipped", "clusters"]
        );
    }

    #[test]
    fn test_content_words_kept_boilerplate_dropped() {
        let out = normalize(
            "Computer system research: test information, run results on open problems.",
            plain(),
        );
        assert_eq!(
            out,
            vec!["research", "test", "information", "run", "results", "open", "problems"]
        );
    }

    #[test]
    fn test_sentence_variant_preserves_boundaries() {
        let normalizer = Normalizer::new(plain());
        let out = normalizer
            .normalize_sentences("Kubernetes clusters autoscale. It is so. Docker containers restart.");
        assert_eq!(
            out,
            vec!["kubernetes clusters autoscale", "", "docker containers restart"]
        );
    }
}
