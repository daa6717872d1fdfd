// Wikipedia article scraper.
//
// Fetches the rendered article page and keeps only the prose: the text of
// the paragraph and list blocks directly under the `mw-parser-output`
// content div. Infoboxes, tables, headings and navboxes are dropped.

use async_trait::async_trait;
use tracing::{debug, info};

use super::html::HtmlDocument;
use super::traits::SourceAdapter;
use super::{DocumentSet, RawDocument, SourceKind};
use crate::error::SourceError;

/// Class of the div that wraps the article body.
const CONTENT_CLASS: &str = "mw-parser-output";

/// Scrapes one or more Wikipedia articles, one document per article.
pub struct WikipediaSource {
    client: reqwest::Client,
    base_url: String,
    articles: Vec<String>,
}

impl WikipediaSource {
    /// `articles` may be full URLs or article titles; titles are resolved
    /// against `base_url` (e.g. `https://en.wikipedia.org/wiki`).
    pub fn new(base_url: &str, articles: Vec<String>) -> Result<Self, SourceError> {
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
            articles,
        })
    }

    /// Full URL for an article given as a URL or a title.
    pub fn article_url(&self, article: &str) -> String {
        if article.starts_with("http://") || article.starts_with("https://") {
            article.to_string()
        } else {
            format!("{}/{}", self.base_url, article.trim().replace(' ', "_"))
        }
    }

    async fn fetch_article(&self, url: &str) -> Result<String, SourceError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| SourceError::Fetch {
                url: url.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(SourceError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|source| SourceError::Fetch {
            url: url.to_string(),
            source,
        })?;
        let page = String::from_utf8_lossy(&bytes);
        debug!(url, bytes = bytes.len(), "Fetched Wikipedia page");

        article_text(&page).ok_or_else(|| SourceError::ElementNotFound {
            element: CONTENT_CLASS,
            location: url.to_string(),
        })
    }
}

/// Extract the prose of an article page: text of each `<p>` and `<ul>`
/// directly inside the content div, joined with spaces.
///
/// `None` if the page has no content div.
pub fn article_text(page: &str) -> Option<String> {
    let doc = HtmlDocument::parse(page);
    let content = doc.find_by_class(CONTENT_CLASS)?;
    let blocks: Vec<String> = doc
        .children(&content)
        .iter()
        .filter(|child| child.name == "p" || child.name == "ul")
        .map(|child| doc.text(child))
        .collect();
    Some(blocks.join(" "))
}

#[async_trait]
impl SourceAdapter for WikipediaSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Wikipedia
    }

    async fn fetch(&self) -> Result<DocumentSet, SourceError> {
        let mut docs = DocumentSet::default();
        for article in &self.articles {
            let url = self.article_url(article);
            let text = self.fetch_article(&url).await?;
            info!(url = %url, chars = text.len(), "Scraped Wikipedia article");
            docs.push(RawDocument::new(text, SourceKind::Wikipedia, url));
        }
        Ok(docs)
    }
}
