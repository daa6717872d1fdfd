// Mode dispatch: which source to read × which analysis to run.
//
// A Mode is fixed before anything is fetched. `validate` rejects the
// combinations that make no sense (RAKE over résumé dumps, coverage sorting
// over a single document), `run` does the one fetch and then hands the
// documents to the synchronous core.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::analysis::frequency::{aggregate_documents, aggregate_tokens, SortKey};
use crate::analysis::rake::KeywordRanker;
use crate::analysis::skills::{SkillMatcher, SkillVocabulary};
use crate::analysis::tfidf::TfIdfRanker;
use crate::analysis::RankedResult;
use crate::config::Config;
use crate::sources::archive::ArchiveSource;
use crate::sources::jobs::JobPostingSource;
use crate::sources::text::TextSource;
use crate::sources::traits::SourceAdapter;
use crate::sources::wikipedia::WikipediaSource;
use crate::sources::{DocumentSet, SourceKind};
use crate::text::normalizer::{CleaningConfig, Normalizer};
use crate::text::phrases::PhraseModel;

/// Where the documents come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Text files, one document each; stdin when empty
    Text(Vec<PathBuf>),
    /// Wikipedia article titles or URLs
    Wikipedia(Vec<String>),
    /// Zips of résumé quick view pages
    Archive(Vec<PathBuf>),
    /// Job posting requisition ids
    JobPosting(Vec<String>),
}

impl Input {
    pub fn kind(&self) -> SourceKind {
        match self {
            Input::Text(_) => SourceKind::Text,
            Input::Wikipedia(_) => SourceKind::Wikipedia,
            Input::Archive(_) => SourceKind::Archive,
            Input::JobPosting(_) => SourceKind::JobPosting,
        }
    }

    /// Whether this input produces a set of documents rather than one.
    pub fn is_multi_document(&self) -> bool {
        match self {
            Input::Archive(_) => true,
            Input::Text(paths) => paths.len() > 1,
            Input::Wikipedia(items) | Input::JobPosting(items) => items.len() > 1,
        }
    }

    fn is_remote(&self) -> bool {
        matches!(self, Input::Wikipedia(_) | Input::JobPosting(_))
    }
}

/// What to compute over the documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Analysis {
    /// RAKE keyword phrases over the raw text
    Keywords,
    /// Token frequencies, with coverage for document sets
    Counts { top_n: usize, sort: SortKey },
    /// Skill matches against the reference vocabulary
    Skills,
    /// Distinctive terms by TF-IDF
    TfIdf { top_n: usize },
}

/// One complete run: input, analysis and cleaning options.
#[derive(Debug, Clone)]
pub struct Mode {
    pub input: Input,
    pub analysis: Analysis,
    pub cleaning: CleaningConfig,
}

/// Reference artifacts, loaded once and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct Artifacts {
    pub skills: Option<Arc<SkillVocabulary>>,
    pub phrases: Option<Arc<PhraseModel>>,
}

impl Artifacts {
    /// Load exactly the artifacts `mode` needs. A missing artifact is fatal.
    pub fn load(config: &Config, mode: &Mode) -> Result<Self> {
        let mut artifacts = Artifacts::default();

        if matches!(mode.analysis, Analysis::Skills) {
            config.require_skills()?;
            let vocabulary = SkillVocabulary::load(&config.skills_path)
                .context("Failed to load skill vocabulary")?;
            artifacts.skills = Some(Arc::new(vocabulary));
        }

        if mode.cleaning.phrases && mode.analysis != Analysis::Keywords {
            config.require_phraser()?;
            let model = PhraseModel::load(&config.phraser_path)
                .context("Failed to load phrase model")?;
            artifacts.phrases = Some(Arc::new(model));
        }

        Ok(artifacts)
    }
}

impl Mode {
    /// Reject combinations that can't run before doing any work.
    pub fn validate(&self) -> Result<()> {
        if self.analysis == Analysis::Keywords
            && !matches!(self.input, Input::Text(_) | Input::JobPosting(_))
        {
            anyhow::bail!(
                "Keyword extraction works on pasted text or job postings, not {} input.\n\
                 Try `counts` or `tfidf` instead.",
                self.input.kind()
            );
        }

        if let Analysis::Counts {
            sort: SortKey::Coverage,
            ..
        } = self.analysis
        {
            if !self.input.is_multi_document() {
                anyhow::bail!(
                    "--sort coverage needs several documents (an archive, or more than one input)."
                );
            }
        }

        match &self.input {
            Input::Archive(paths) if paths.is_empty() => {
                anyhow::bail!("No archive given. Pass the path of a résumé zip.")
            }
            Input::Wikipedia(items) if items.is_empty() => {
                anyhow::bail!("No article given. Pass a Wikipedia URL or article title.")
            }
            Input::JobPosting(items) if items.is_empty() => {
                anyhow::bail!("No requisition given. Pass a job requisition id.")
            }
            _ => {}
        }

        if self.analysis == Analysis::Keywords && self.cleaning != CleaningConfig::default() {
            warn!("Keyword extraction runs on raw text; cleaning flags are ignored");
        }

        Ok(())
    }

    /// Whether fetching will hit the network or unpack an archive (worth a
    /// spinner).
    pub fn is_slow_fetch(&self) -> bool {
        self.input.is_remote() || matches!(self.input, Input::Archive(_))
    }

    /// Build the source adapter for this mode's input.
    pub fn adapter(&self, config: &Config) -> Result<Box<dyn SourceAdapter>> {
        let adapter: Box<dyn SourceAdapter> = match &self.input {
            Input::Text(paths) => Box::new(TextSource::from_paths(paths.clone())),
            Input::Wikipedia(articles) => Box::new(
                WikipediaSource::new(&config.wiki_base_url, articles.clone())
                    .context("Failed to build HTTP client")?,
            ),
            Input::Archive(paths) => Box::new(ArchiveSource::new(paths.clone())),
            Input::JobPosting(reqs) => Box::new(
                JobPostingSource::new(&config.jobs_url, reqs.clone())
                    .context("Failed to build HTTP client")?,
            ),
        };
        Ok(adapter)
    }

    /// Fetch the documents for this mode.
    pub async fn fetch(&self, config: &Config) -> Result<DocumentSet> {
        let adapter = self.adapter(config)?;
        let kind = adapter.kind();
        let docs = adapter
            .fetch()
            .await
            .with_context(|| format!("Failed to read {kind} input"))?;
        info!(source = %kind, documents = docs.len(), "Fetched documents");
        Ok(docs)
    }

    /// Validate, fetch, then analyze. The one path every entry point takes.
    pub async fn run(
        &self,
        config: &Config,
        artifacts: &Artifacts,
    ) -> Result<(DocumentSet, RankedResult)> {
        self.validate()?;
        let docs = self.fetch(config).await?;
        let result = analyze(self.analysis, self.cleaning, &docs, artifacts)?;
        Ok((docs, result))
    }
}

/// Run one analysis over fetched documents.
///
/// Pure apart from logging: the same documents, options and artifacts
/// always give the same result. Empty input gives an empty result.
pub fn analyze(
    analysis: Analysis,
    cleaning: CleaningConfig,
    docs: &DocumentSet,
    artifacts: &Artifacts,
) -> Result<RankedResult> {
    let texts = docs.texts();
    let normalizer = || Normalizer::new(cleaning).with_phrase_model(artifacts.phrases.clone());

    let result = match analysis {
        Analysis::Keywords => RankedResult::Keywords(KeywordRanker::default().rank_documents(&texts)),

        Analysis::Counts { top_n, sort } => {
            let normalizer = normalizer();
            let multi = docs.len() > 1 || docs.iter().any(|d| d.source == SourceKind::Archive);
            if multi {
                let tokenized: Vec<Vec<String>> =
                    texts.iter().map(|t| normalizer.normalize(t)).collect();
                RankedResult::Frequencies(aggregate_documents(&tokenized, top_n, sort))
            } else {
                let tokens: Vec<String> = texts.iter().flat_map(|t| normalizer.normalize(t)).collect();
                RankedResult::Frequencies(aggregate_tokens(&tokens, top_n))
            }
        }

        Analysis::Skills => {
            let vocabulary = artifacts
                .skills
                .clone()
                .context("Skill matching needs a loaded skill vocabulary")?;
            let matcher = SkillMatcher::new(vocabulary, normalizer());
            RankedResult::Skills(matcher.scan(&texts))
        }

        Analysis::TfIdf { top_n } => {
            RankedResult::Distinctive(TfIdfRanker { top_n }.rank(&normalizer(), &texts))
        }
    };

    info!(entries = result.len(), "Analysis complete");
    Ok(result)
}
