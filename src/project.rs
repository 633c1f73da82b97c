//! Project session
//!
//! A project is a folder holding `config.yaml`, a `videos/` and `tables/`
//! directory for the collaborator's inputs, and the generated artifacts
//! (table cache, summary workbooks). The session object is the explicit
//! handle to the currently loaded project: create or open one per project,
//! drop it to unload.

use std::path::{Path, PathBuf};

use crate::config::{ProjectConfig, CONFIG_FILE};
use crate::error::ProcessError;
use crate::pipeline::{DEFAULT_DURATION_FILE, DEFAULT_FREQUENCY_FILE};

/// Directory for the recordings the collaborator consumes
pub const VIDEO_DIR: &str = "videos";

/// Directory for the collaborator's tracking tables
pub const TABLE_DIR: &str = "tables";

/// Cached supervised table mapping, JSON
pub const CACHE_FILE: &str = "supervised_data.json";

/// Handle to one loaded project folder
#[derive(Debug, Clone)]
pub struct ProjectSession {
    root: PathBuf,
    config: ProjectConfig,
}

impl ProjectSession {
    /// Scaffold a new project folder under `base_dir` and load it.
    ///
    /// Creates `<base_dir>/<name>/` with `videos/`, `tables/`, and an
    /// initial `config.yaml`. Existing directories are reused.
    pub fn create(base_dir: &Path, name: &str) -> Result<Self, ProcessError> {
        let root = base_dir.join(name);
        std::fs::create_dir_all(root.join(VIDEO_DIR))?;
        std::fs::create_dir_all(root.join(TABLE_DIR))?;

        let config = ProjectConfig::for_project(&root, name);
        config.save(&root.join(CONFIG_FILE))?;
        tracing::info!(root = %root.display(), "project created");

        Ok(Self { root, config })
    }

    /// Open an existing project folder
    pub fn open(root: &Path) -> Result<Self, ProcessError> {
        let config_path = root.join(CONFIG_FILE);
        if !config_path.exists() {
            return Err(ProcessError::ConfigError(format!(
                "no {} in {}",
                CONFIG_FILE,
                root.display()
            )));
        }

        let config = ProjectConfig::load(&config_path)?;
        tracing::info!(root = %root.display(), project = %config.project_name, "project opened");

        Ok(Self {
            root: root.to_path_buf(),
            config,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// Path of the cached supervised table mapping
    pub fn cache_path(&self) -> PathBuf {
        self.root.join(CACHE_FILE)
    }

    pub fn frequency_report_path(&self) -> PathBuf {
        self.root.join(DEFAULT_FREQUENCY_FILE)
    }

    pub fn duration_report_path(&self) -> PathBuf {
        self.root.join(DEFAULT_DURATION_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_scaffolds_folder_layout() {
        let dir = tempfile::tempdir().unwrap();
        let session = ProjectSession::create(dir.path(), "exp1").unwrap();

        assert!(session.root().join(VIDEO_DIR).is_dir());
        assert!(session.root().join(TABLE_DIR).is_dir());
        assert!(session.config_path().is_file());
        assert_eq!(session.config().project_name, "exp1");
        assert_eq!(
            session.cache_path(),
            dir.path().join("exp1").join(CACHE_FILE)
        );
    }

    #[test]
    fn test_open_round_trips_config() {
        let dir = tempfile::tempdir().unwrap();
        let created = ProjectSession::create(dir.path(), "exp2").unwrap();

        let opened = ProjectSession::open(created.root()).unwrap();
        assert_eq!(opened.config().project_name, "exp2");
        assert_eq!(opened.config().video_scale, 400);
    }

    #[test]
    fn test_open_without_config_fails() {
        let dir = tempfile::tempdir().unwrap();

        assert!(matches!(
            ProjectSession::open(dir.path()),
            Err(ProcessError::ConfigError(_))
        ));
    }
}
