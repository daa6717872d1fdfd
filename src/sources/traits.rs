// Source adapter trait — one fetch, one DocumentSet.
//
// Network-backed adapters need async, so the trait is async for everyone;
// local adapters just never await.

use async_trait::async_trait;

use super::{DocumentSet, SourceKind};
use crate::error::SourceError;

/// Something that can produce raw documents for analysis.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// The tag put on every document this adapter produces.
    fn kind(&self) -> SourceKind;

    /// Fetch or load the documents.
    ///
    /// Unavailable content is an error, never an empty set: an empty
    /// `DocumentSet` means the source really had nothing in it.
    async fn fetch(&self) -> Result<DocumentSet, SourceError>;
}
