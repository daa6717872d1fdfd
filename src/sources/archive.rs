// Résumé archive extraction.
//
// The input is a zip of HTML "quick view" pages exported from an applicant
// tracking system, one page per candidate. The zip is unpacked next to
// itself (into a directory named after the archive, left alone if it already
// exists) and each page yields one résumé document.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use async_trait::async_trait;
use regex_lite::Regex;
use serde::Serialize;
use tracing::{debug, info};

use super::html::HtmlDocument;
use super::text::read_lossy;
use super::traits::SourceAdapter;
use super::{DocumentSet, RawDocument, SourceKind};
use crate::error::SourceError;

static RE_BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\n ?){2,}").expect("valid blank line regex"));

/// One candidate pulled from a quick view page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub first_name: String,
    pub last_name: String,
    pub job_title: String,
    pub employer: String,
    pub resume: String,
}

impl Candidate {
    /// Parse a quick view page. Missing fields come back empty.
    pub fn from_page(page: &str) -> Self {
        let doc = HtmlDocument::parse(page);
        let field = |class: &str| {
            doc.find_by_class_containing(class)
                .map(|el| doc.text(&el))
                .unwrap_or_default()
        };

        Self {
            first_name: strip_label(&field("firstName"), "First Name"),
            last_name: strip_label(&field("lastName"), "Last Name"),
            job_title: strip_label(&field("jobTitle"), "Job title"),
            employer: strip_label(&field("employer"), "Current employer"),
            resume: collapse_blank_lines(&field("value attachment")),
        }
    }

    /// "First Last", or None if the page had no name.
    pub fn display_name(&self) -> Option<String> {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();
        (!name.is_empty()).then(|| name.to_string())
    }
}

/// Field text looks like `"First NameJane"`: keep what follows the label.
/// Anything that doesn't split into exactly two parts on the label is
/// treated as missing.
fn strip_label(raw: &str, label: &str) -> String {
    let parts: Vec<&str> = raw.split(label).collect();
    if parts.len() == 2 {
        parts[1].to_string()
    } else {
        String::new()
    }
}

/// Collapse runs of blank (or single-space) lines into one newline.
pub fn collapse_blank_lines(text: &str) -> String {
    RE_BLANK_LINES.replace_all(text, "\n").into_owned()
}

/// Directory an archive is unpacked into: next to it, named after its stem.
pub fn extraction_dir(zip_path: &Path) -> PathBuf {
    let stem = zip_path
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "archive".into());
    zip_path
        .parent()
        .map(|p| p.join(&stem))
        .unwrap_or_else(|| PathBuf::from(&stem))
}

/// Unpack `zip_path` unless its extraction directory already exists.
/// Returns the extraction directory.
pub fn extract(zip_path: &Path) -> Result<PathBuf, SourceError> {
    let out_dir = extraction_dir(zip_path);
    if out_dir.is_dir() {
        debug!(dir = %out_dir.display(), "Archive already extracted");
        return Ok(out_dir);
    }

    let file = File::open(zip_path).map_err(|source| SourceError::Io {
        path: zip_path.to_path_buf(),
        source,
    })?;
    let mut archive = zip::ZipArchive::new(file).map_err(|source| SourceError::Archive {
        path: zip_path.to_path_buf(),
        source,
    })?;
    archive
        .extract(&out_dir)
        .map_err(|source| SourceError::Archive {
            path: zip_path.to_path_buf(),
            source,
        })?;

    info!(
        archive = %zip_path.display(),
        files = archive.len(),
        dir = %out_dir.display(),
        "Extracted archive"
    );
    Ok(out_dir)
}

/// Parse every page in an extracted directory, in file-name order.
pub fn read_candidates(dir: &Path) -> Result<Vec<(PathBuf, Candidate)>, SourceError> {
    let io_err = |source| SourceError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut pages: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(io_err)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<_, _>>()
        .map_err(io_err)?;
    pages.retain(|p| p.is_file());
    pages.sort();

    pages
        .into_iter()
        .map(|path| {
            let page = read_lossy(&path)?;
            let candidate = Candidate::from_page(&page);
            Ok((path, candidate))
        })
        .collect()
}

/// Résumés from one or more quick view archives.
pub struct ArchiveSource {
    archives: Vec<PathBuf>,
}

impl ArchiveSource {
    pub fn new(archives: Vec<PathBuf>) -> Self {
        Self { archives }
    }
}

#[async_trait]
impl SourceAdapter for ArchiveSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Archive
    }

    async fn fetch(&self) -> Result<DocumentSet, SourceError> {
        let mut docs = DocumentSet::default();
        for zip_path in &self.archives {
            let dir = extract(zip_path)?;
            let candidates = read_candidates(&dir)?;
            info!(
                archive = %zip_path.display(),
                resumes = candidates.len(),
                "Read résumés"
            );
            for (path, candidate) in candidates {
                let label = candidate
                    .display_name()
                    .unwrap_or_else(|| path.display().to_string());
                docs.push(RawDocument::new(candidate.resume, SourceKind::Archive, label));
            }
        }
        Ok(docs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUICK_VIEW: &str = r#"<html><body>
<div class="field firstName"><span>First Name</span>Jane</div>
<div class="field lastName"><span>Last Name</span>Doe</div>
<div class="field jobTitle"><span>Job title</span>Site Reliability Engineer</div>
<div class="field employer"><span>Current employer</span>Acme</div>
<div class="value attachment">Kubernetes


Terraform</div>
</body></html>"#;

    #[test]
    fn test_candidate_fields() {
        let c = Candidate::from_page(QUICK_VIEW);
        assert_eq!(c.first_name, "Jane");
        assert_eq!(c.last_name, "Doe");
        assert_eq!(c.job_title, "Site Reliability Engineer");
        assert_eq!(c.employer, "Acme");
        assert_eq!(c.resume, "Kubernetes\nTerraform");
        assert_eq!(c.display_name().as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_missing_fields_are_empty() {
        let c = Candidate::from_page("<html><body><p>nothing</p></body></html>");
        assert_eq!(c, Candidate::default());
        assert!(c.display_name().is_none());
    }

    #[test]
    fn test_strip_label_needs_exactly_one_label() {
        assert_eq!(strip_label("First NameJane", "First Name"), "Jane");
        assert_eq!(strip_label("Jane", "First Name"), "");
        assert_eq!(strip_label("First NameA First NameB", "First Name"), "");
    }

    #[test]
    fn test_extraction_dir_is_sibling_named_after_stem() {
        assert_eq!(
            extraction_dir(Path::new("/tmp/exports/batch-7.zip")),
            PathBuf::from("/tmp/exports/batch-7")
        );
    }
}
