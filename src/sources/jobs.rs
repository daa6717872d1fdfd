// Job posting scraper.
//
// Postings live at `<base>/<requisition id>`. The description block is
// flattened one text node per line, section headers like "Who You'll Work
// With" or "What You'll Do" are dropped, and what's left is joined into a
// single line of prose.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex_lite::Regex;
use tracing::{debug, info};

use super::html::HtmlDocument;
use super::traits::SourceAdapter;
use super::{DocumentSet, RawDocument, SourceKind};
use crate::error::SourceError;

/// Class of the element holding the posting body.
const DESCRIPTION_CLASS: &str = "job_description";

static RE_SECTION_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((What|Who|Why) (Cisco|You|We))").expect("valid section header regex")
});

/// Scrapes job postings by requisition id, one document per posting.
pub struct JobPostingSource {
    client: reqwest::Client,
    base_url: String,
    requisitions: Vec<String>,
}

impl JobPostingSource {
    pub fn new(base_url: &str, requisitions: Vec<String>) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("wordscan/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| SourceError::Fetch {
                url: base_url.to_string(),
                source,
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            requisitions,
        })
    }

    pub fn posting_url(&self, requisition: &str) -> String {
        format!("{}/{}", self.base_url, requisition.trim())
    }

    /// Fetch one posting's description text.
    pub async fn fetch_posting(&self, requisition: &str) -> Result<String, SourceError> {
        let url = self.posting_url(requisition);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| SourceError::Fetch {
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(SourceError::Status {
                url,
                status: response.status().as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|source| SourceError::Fetch {
            url: url.clone(),
            source,
        })?;
        debug!(url = %url, bytes = bytes.len(), "Fetched job posting");

        description_text(&String::from_utf8_lossy(&bytes)).ok_or(SourceError::ElementNotFound {
            element: DESCRIPTION_CLASS,
            location: url,
        })
    }
}

/// Description text of a posting page with section headers removed.
///
/// `None` if the page has no description element.
pub fn description_text(page: &str) -> Option<String> {
    let doc = HtmlDocument::parse(page);
    let description = doc.find_by_class(DESCRIPTION_CLASS)?;
    let raw = doc.text_with_separator(&description, "\n");
    let kept: Vec<&str> = raw
        .lines()
        .filter(|line| !RE_SECTION_HEADER.is_match(line))
        .collect();
    Some(kept.join(" "))
}

#[async_trait]
impl SourceAdapter for JobPostingSource {
    fn kind(&self) -> SourceKind {
        SourceKind::JobPosting
    }

    async fn fetch(&self) -> Result<DocumentSet, SourceError> {
        let mut docs = DocumentSet::default();
        for requisition in &self.requisitions {
            let text = self.fetch_posting(requisition).await?;
            info!(requisition = %requisition, chars = text.len(), "Scraped job posting");
            docs.push(RawDocument::new(
                text,
                SourceKind::JobPosting,
                self.posting_url(requisition),
            ));
        }
        Ok(docs)
    }
}
