// Typed errors at the two places the core can fail: fetching source text and
// loading reference artifacts. Normalization and aggregation never fail.
//
// Everything above these boundaries (mode dispatch, the CLI) works in
// anyhow::Result and wraps these with context.

use std::path::PathBuf;

use thiserror::Error;

/// Requested source content could not be obtained.
///
/// Returned instead of empty text so a caller never silently analyzes
/// nothing when a fetch failed.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("getting page {url} returned status code {status}")]
    Status { url: String, status: u16 },

    #[error("expected element '{element}' not found at {location}")]
    ElementNotFound {
        element: &'static str,
        location: String,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid archive {path}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
}

/// A reference artifact (skill vocabulary, phrase model) could not be loaded.
/// Fatal for any mode that needs the artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("{name} not found at {path}")]
    Missing { name: &'static str, path: PathBuf },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid artifact {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}
