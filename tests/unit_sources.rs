// Unit tests for the source adapters.
//
// HTTP adapters run against a local wiremock server; the archive adapter
// runs against zips built in a temp dir. No real network access.

use std::io::Write;
use std::path::{Path, PathBuf};

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wordscan::error::SourceError;
use wordscan::sources::archive::{extract, extraction_dir, ArchiveSource};
use wordscan::sources::jobs::JobPostingSource;
use wordscan::sources::text::TextSource;
use wordscan::sources::traits::SourceAdapter;
use wordscan::sources::wikipedia::WikipediaSource;
use wordscan::sources::SourceKind;

const ARTICLE: &str = r#"<html><body>
<div id="mw-content-text"><div class="mw-content-ltr mw-parser-output">
<table class="infobox"><tr><td>Developer</td></tr></table>
<p><b>Rust</b> is a systems programming language.</p>
<h2>Features</h2>
<ul><li>Ownership</li></ul>
</div></div></body></html>"#;

const POSTING: &str = r#"<html><body><div class="job_description">
<h3>What You'll Do</h3><p>Operate Kubernetes clusters.</p>
<h3>Who You Are</h3><p>Fluent in Rust &amp; Go.</p>
</div></body></html>"#;

fn quick_view(first: &str, last: &str, resume: &str) -> String {
    format!(
        r#"<html><body>
<div class="field firstName"><label>First Name</label>{first}</div>
<div class="field lastName"><label>Last Name</label>{last}</div>
<div class="value attachment">{resume}</div>
</body></html>"#
    )
}

fn write_zip(path: &Path, pages: &[(&str, String)]) {
    let file = std::fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    for (name, body) in pages {
        zip.start_file(*name, zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(body.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

// ============================================================
// Wikipedia
// ============================================================

#[tokio::test]
async fn wikipedia_article_by_title() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wiki/Rust_(programming_language)"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ARTICLE))
        .mount(&server)
        .await;

    let source = WikipediaSource::new(
        &format!("{}/wiki", server.uri()),
        vec!["Rust (programming language)".to_string()],
    )
    .unwrap();
    let docs = source.fetch().await.unwrap();

    assert_eq!(docs.len(), 1);
    assert_eq!(docs.0[0].source, SourceKind::Wikipedia);
    assert_eq!(
        docs.0[0].text,
        "Rust is a systems programming language. Ownership"
    );
}

#[tokio::test]
async fn wikipedia_page_without_content_is_element_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wiki/Empty"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
        .mount(&server)
        .await;

    let source =
        WikipediaSource::new(&format!("{}/wiki", server.uri()), vec!["Empty".to_string()]).unwrap();
    let err = source.fetch().await.unwrap_err();
    assert!(matches!(
        err,
        SourceError::ElementNotFound {
            element: "mw-parser-output",
            ..
        }
    ));
}

// ============================================================
// Job postings
// ============================================================

#[tokio::test]
async fn job_posting_text_without_section_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs/ProjectDetail/1401234"))
        .respond_with(ResponseTemplate::new(200).set_body_string(POSTING))
        .mount(&server)
        .await;

    let source = JobPostingSource::new(
        &format!("{}/jobs/ProjectDetail", server.uri()),
        vec!["1401234".to_string()],
    )
    .unwrap();
    let docs = source.fetch().await.unwrap();

    assert_eq!(docs.len(), 1);
    let text = &docs.0[0].text;
    assert!(text.contains("Operate Kubernetes clusters."));
    assert!(text.contains("Fluent in Rust & Go."));
    assert!(!text.contains("What You"));
    assert!(!text.contains("Who You"));
}

#[tokio::test]
async fn job_posting_skips_elements_with_longer_class_names() {
    let server = MockServer::start().await;
    let page = format!(
        r#"<html><body><div class="job_description_header">Apply by Friday</div>{}</body></html>"#,
        POSTING
    );
    Mock::given(method("GET"))
        .and(path("/jobs/ProjectDetail/77"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(&server)
        .await;

    let source = JobPostingSource::new(
        &format!("{}/jobs/ProjectDetail", server.uri()),
        vec!["77".to_string()],
    )
    .unwrap();
    let docs = source.fetch().await.unwrap();
    let text = &docs.0[0].text;
    assert!(!text.contains("Apply by Friday"));
    assert!(text.contains("Operate Kubernetes clusters."));
}

#[tokio::test]
async fn job_posting_non_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs/ProjectDetail/404404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let source = JobPostingSource::new(
        &format!("{}/jobs/ProjectDetail", server.uri()),
        vec!["404404".to_string()],
    )
    .unwrap();
    let err = source.fetch().await.unwrap_err();
    match err {
        SourceError::Status { url, status } => {
            assert_eq!(status, 404);
            assert!(url.ends_with("/jobs/ProjectDetail/404404"));
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn job_posting_without_description_element() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs/ProjectDetail/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<div class=\"other\"></div>"))
        .mount(&server)
        .await;

    let source = JobPostingSource::new(
        &format!("{}/jobs/ProjectDetail", server.uri()),
        vec!["1".to_string()],
    )
    .unwrap();
    let err = source.fetch().await.unwrap_err();
    assert!(matches!(
        err,
        SourceError::ElementNotFound {
            element: "job_description",
            ..
        }
    ));
}

// ============================================================
// Résumé archives
// ============================================================

#[tokio::test]
async fn archive_yields_one_document_per_resume() {
    let dir = tempfile::tempdir().unwrap();
    let zip_path = dir.path().join("export.zip");
    write_zip(
        &zip_path,
        &[
            ("a.html", quick_view("Jane", "Doe", "Kubernetes\n\n\nTerraform")),
            ("b.html", quick_view("Sam", "Lee", "Python and pandas")),
        ],
    );

    let docs = ArchiveSource::new(vec![zip_path.clone()]).fetch().await.unwrap();

    assert_eq!(docs.len(), 2);
    assert_eq!(docs.0[0].label, "Jane Doe");
    assert_eq!(docs.0[0].text, "Kubernetes\nTerraform");
    assert_eq!(docs.0[1].label, "Sam Lee");
    assert!(docs.iter().all(|d| d.source == SourceKind::Archive));
    assert!(extraction_dir(&zip_path).is_dir());
}

#[test]
fn archive_extraction_is_skipped_when_directory_exists() {
    let dir = tempfile::tempdir().unwrap();
    let zip_path = dir.path().join("export.zip");
    write_zip(&zip_path, &[("a.html", quick_view("Jane", "Doe", "Rust"))]);

    let out = extract(&zip_path).unwrap();
    std::fs::remove_file(out.join("a.html")).unwrap();

    // Second call leaves the (now empty) directory alone
    let again = extract(&zip_path).unwrap();
    assert_eq!(again, out);
    assert!(!out.join("a.html").exists());
}

#[test]
fn archive_errors_are_typed() {
    let dir = tempfile::tempdir().unwrap();

    let missing = extract(&dir.path().join("missing.zip")).unwrap_err();
    assert!(matches!(missing, SourceError::Io { .. }));

    let not_zip = dir.path().join("broken.zip");
    std::fs::write(&not_zip, b"this is not a zip").unwrap();
    let invalid = extract(&not_zip).unwrap_err();
    assert!(matches!(invalid, SourceError::Archive { .. }));
}

// ============================================================
// Text
// ============================================================

#[tokio::test]
async fn text_files_are_separate_documents() {
    let dir = tempfile::tempdir().unwrap();
    let paths: Vec<PathBuf> = ["one.txt", "two.txt"]
        .iter()
        .map(|name| dir.path().join(name))
        .collect();
    std::fs::write(&paths[0], "Rust compiler").unwrap();
    std::fs::write(&paths[1], "Go scheduler").unwrap();

    let docs = TextSource::from_paths(paths).fetch().await.unwrap();
    assert_eq!(docs.texts(), vec!["Rust compiler", "Go scheduler"]);
}
