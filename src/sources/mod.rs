// Source adapters — everything that turns an outside input (files, stdin,
// web pages, a zip of résumé pages) into raw document text.
//
// Adapters only fetch and extract. Cleaning and ranking happen downstream and
// never see where a document came from, apart from its source tag.

pub mod archive;
pub mod html;
pub mod jobs;
pub mod text;
pub mod traits;
pub mod wikipedia;

use serde::{Deserialize, Serialize};

/// Where a document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Text,
    Wikipedia,
    Archive,
    JobPosting,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SourceKind::Text => "text",
            SourceKind::Wikipedia => "wikipedia",
            SourceKind::Archive => "archive",
            SourceKind::JobPosting => "job posting",
        };
        f.write_str(name)
    }
}

/// One piece of natural-language text plus where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub text: String,
    pub source: SourceKind,
    /// Human-readable origin: a file name, a URL, a candidate name
    pub label: String,
}

impl RawDocument {
    pub fn new(text: impl Into<String>, source: SourceKind, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source,
            label: label.into(),
        }
    }
}

/// Ordered documents from one fetch. Order is kept so per-document
/// accounting lines up with the inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSet(pub Vec<RawDocument>);

impl DocumentSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RawDocument> {
        self.0.iter()
    }

    /// Document texts, in order.
    pub fn texts(&self) -> Vec<String> {
        self.0.iter().map(|d| d.text.clone()).collect()
    }

    pub fn push(&mut self, doc: RawDocument) {
        self.0.push(doc);
    }

    /// Append every document from `other`.
    pub fn extend(&mut self, other: DocumentSet) {
        self.0.extend(other.0);
    }
}

impl From<Vec<RawDocument>> for DocumentSet {
    fn from(docs: Vec<RawDocument>) -> Self {
        Self(docs)
    }
}

impl IntoIterator for DocumentSet {
    type Item = RawDocument;
    type IntoIter = std::vec::IntoIter<RawDocument>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
