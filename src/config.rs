use std::env;
use std::path::{Path, PathBuf};

use anyhow::Result;

/// Default Wikipedia article base for titles given without a URL.
pub const DEFAULT_WIKI_BASE_URL: &str = "https://en.wikipedia.org/wiki";

/// Default job posting base URL; postings live at `<base>/<requisition>`.
pub const DEFAULT_JOBS_URL: &str = "https://jobs.cisco.com/jobs/ProjectDetail";

/// Skill vocabulary file name inside the model directory.
pub const SKILLS_FILE: &str = "skills.json";

/// Phrase model file name inside the model directory.
pub const PHRASER_FILE: &str = "phraser.json";

/// Default location for reference artifacts: the platform data dir.
pub fn default_model_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wordscan")
        .join("models")
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Nothing is
/// required up front: artifact paths are only checked by the modes that
/// need them.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the reference artifacts
    pub model_dir: PathBuf,
    /// Skill vocabulary artifact (skill term → popularity)
    pub skills_path: PathBuf,
    /// Phrase model artifact
    pub phraser_path: PathBuf,
    pub wiki_base_url: String,
    pub jobs_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let model_dir = env::var("WORDSCAN_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_model_dir());

        Ok(Self {
            skills_path: env::var("WORDSCAN_SKILLS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| model_dir.join(SKILLS_FILE)),
            phraser_path: env::var("WORDSCAN_PHRASER_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| model_dir.join(PHRASER_FILE)),
            wiki_base_url: env::var("WORDSCAN_WIKI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_WIKI_BASE_URL.to_string()),
            jobs_url: env::var("WORDSCAN_JOBS_URL").unwrap_or_else(|_| DEFAULT_JOBS_URL.to_string()),
            model_dir,
        })
    }

    /// Configuration rooted at `model_dir` with default URLs, ignoring the
    /// environment.
    pub fn with_model_dir(model_dir: &Path) -> Self {
        Self {
            model_dir: model_dir.to_path_buf(),
            skills_path: model_dir.join(SKILLS_FILE),
            phraser_path: model_dir.join(PHRASER_FILE),
            wiki_base_url: DEFAULT_WIKI_BASE_URL.to_string(),
            jobs_url: DEFAULT_JOBS_URL.to_string(),
        }
    }

    /// Check that the skill vocabulary exists.
    /// Call this before skill matching.
    pub fn require_skills(&self) -> Result<()> {
        if !self.skills_path.is_file() {
            anyhow::bail!(
                "Skill vocabulary not found at {}\n\
                 Place skills.json in {} or set WORDSCAN_SKILLS_PATH.",
                self.skills_path.display(),
                self.model_dir.display()
            );
        }
        Ok(())
    }

    /// Check that the phrase model exists.
    /// Call this before any run with `--phrases`.
    pub fn require_phraser(&self) -> Result<()> {
        if !self.phraser_path.is_file() {
            anyhow::bail!(
                "Phrase model not found at {}\n\
                 Place phraser.json in {} or set WORDSCAN_PHRASER_PATH.",
                self.phraser_path.display(),
                self.model_dir.display()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_dir_is_under_wordscan() {
        let dir = default_model_dir();
        let path_str = dir.to_string_lossy();
        assert!(
            path_str.contains("wordscan") && path_str.contains("models"),
            "Expected path containing wordscan/models, got: {path_str}"
        );
    }

    #[test]
    fn test_artifact_paths_follow_model_dir() {
        let config = Config::with_model_dir(Path::new("/tmp/wordscan-models"));
        assert_eq!(config.skills_path, PathBuf::from("/tmp/wordscan-models/skills.json"));
        assert_eq!(config.phraser_path, PathBuf::from("/tmp/wordscan-models/phraser.json"));
        assert_eq!(config.wiki_base_url, DEFAULT_WIKI_BASE_URL);
    }

    #[test]
    fn test_require_artifacts_reports_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_model_dir(dir.path());

        let err = config.require_skills().unwrap_err().to_string();
        assert!(err.contains("WORDSCAN_SKILLS_PATH"), "got: {err}");
        assert!(config.require_phraser().is_err());

        std::fs::write(&config.skills_path, "{}").unwrap();
        std::fs::write(&config.phraser_path, "{}").unwrap();
        assert!(config.require_skills().is_ok());
        assert!(config.require_phraser().is_ok());
    }
}
