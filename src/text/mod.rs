// Text cleaning — the normalization pipeline and the optional steps
// (lemmatization, stemming, phrase merging) that plug into it.

pub mod lemma;
pub mod normalizer;
pub mod phrases;
pub mod stopwords;
pub mod traits;
