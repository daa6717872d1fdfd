// Plain text input — files given on the command line, or stdin.
//
// Each file is one document; stdin is one document. Bytes that aren't valid
// UTF-8 are replaced rather than rejected, since pasted résumé text is often
// in some legacy encoding.

use std::io::Read;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use super::traits::SourceAdapter;
use super::{DocumentSet, RawDocument, SourceKind};
use crate::error::SourceError;

/// Where pasted text comes from.
#[derive(Debug, Clone)]
pub enum TextInput {
    /// Read standard input to the end
    Stdin,
    /// Read each file as its own document
    Files(Vec<PathBuf>),
    /// Text already in memory
    Inline(String),
}

pub struct TextSource {
    input: TextInput,
}

impl TextSource {
    pub fn new(input: TextInput) -> Self {
        Self { input }
    }

    /// Files if any were given, otherwise stdin.
    pub fn from_paths(paths: Vec<PathBuf>) -> Self {
        if paths.is_empty() {
            Self::new(TextInput::Stdin)
        } else {
            Self::new(TextInput::Files(paths))
        }
    }
}

/// Read a file as text, replacing invalid UTF-8.
pub fn read_lossy(path: &std::path::Path) -> Result<String, SourceError> {
    let bytes = std::fs::read(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[async_trait]
impl SourceAdapter for TextSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Text
    }

    async fn fetch(&self) -> Result<DocumentSet, SourceError> {
        let mut docs = DocumentSet::default();
        match &self.input {
            TextInput::Stdin => {
                let mut bytes = Vec::new();
                std::io::stdin()
                    .read_to_end(&mut bytes)
                    .map_err(|source| SourceError::Io {
                        path: PathBuf::from("<stdin>"),
                        source,
                    })?;
                docs.push(RawDocument::new(
                    String::from_utf8_lossy(&bytes).into_owned(),
                    SourceKind::Text,
                    "stdin",
                ));
            }
            TextInput::Files(paths) => {
                for path in paths {
                    let text = read_lossy(path)?;
                    debug!(path = %path.display(), chars = text.len(), "Read text file");
                    docs.push(RawDocument::new(
                        text,
                        SourceKind::Text,
                        path.display().to_string(),
                    ));
                }
            }
            TextInput::Inline(text) => {
                docs.push(RawDocument::new(text.clone(), SourceKind::Text, "inline"));
            }
        }
        Ok(docs)
    }
}
