//! Project configuration
//!
//! The YAML `config.yaml` at a project root. The key set is consumed by the
//! external annotation library's project constructor; this crate only reads
//! the paths and writes the initial file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::ProcessError;

/// Config file name at a project root
pub const CONFIG_FILE: &str = "config.yaml";

/// A project's configuration document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub video_path: PathBuf,
    pub table_path: PathBuf,
    pub project_path: PathBuf,
    pub arena: String,
    pub project_name: String,
    /// Experimental condition per cage, if the experiment defines any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp_conditions: Option<BTreeMap<String, String>>,
    pub exclude_bodyparts: Vec<String>,
    pub bodypart_graph: String,
    pub video_scale: u32,
    pub preprocess_data: bool,
}

impl ProjectConfig {
    /// The initial config for a freshly created project folder
    pub fn for_project(root: &Path, name: &str) -> Self {
        Self {
            video_path: root.join("videos"),
            table_path: root.join("tables"),
            project_path: root.to_path_buf(),
            arena: "polygonal-manual".to_string(),
            project_name: name.to_string(),
            exp_conditions: None,
            exclude_bodyparts: vec![
                "Tail_1".to_string(),
                "Tail_2".to_string(),
                "Tail_tip".to_string(),
            ],
            bodypart_graph: "deepof_14".to_string(),
            video_scale: 400,
            preprocess_data: true,
        }
    }

    /// Load a config from a YAML file
    pub fn load(path: &Path) -> Result<Self, ProcessError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save the config as YAML, overwriting any existing file
    pub fn save(&self, path: &Path) -> Result<(), ProcessError> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_initial_config_defaults() {
        let config = ProjectConfig::for_project(Path::new("/data/exp1"), "exp1");

        assert_eq!(config.video_path, PathBuf::from("/data/exp1/videos"));
        assert_eq!(config.table_path, PathBuf::from("/data/exp1/tables"));
        assert_eq!(config.arena, "polygonal-manual");
        assert_eq!(config.bodypart_graph, "deepof_14");
        assert_eq!(config.video_scale, 400);
        assert!(config.preprocess_data);
        assert_eq!(
            config.exclude_bodyparts,
            vec!["Tail_1", "Tail_2", "Tail_tip"]
        );
        assert!(config.exp_conditions.is_none());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let mut config = ProjectConfig::for_project(dir.path(), "exp1");
        config.exp_conditions = Some(BTreeMap::from([(
            "cage_a".to_string(),
            "treatment".to_string(),
        )]));
        config.save(&path).unwrap();

        let loaded = ProjectConfig::load(&path).unwrap();
        assert_eq!(loaded.project_name, "exp1");
        assert_eq!(loaded.video_scale, 400);
        assert_eq!(
            loaded.exp_conditions.unwrap()["cage_a"],
            "treatment".to_string()
        );
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(matches!(
            ProjectConfig::load(Path::new("/nonexistent/config.yaml")),
            Err(ProcessError::Io(_))
        ));
    }

    #[test]
    fn test_load_malformed_yaml_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "arena: [unclosed").unwrap();

        assert!(matches!(
            ProjectConfig::load(&path),
            Err(ProcessError::YamlError(_))
        ));
    }
}
