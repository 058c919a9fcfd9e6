//! Configuration Loader
//!
//! Finds the project file for a working directory and loads it.

use crate::project::ProjectConfig;
use crate::ConfigResult;
use std::path::Path;

/// Project file looked up by default
pub const DEFAULT_PROJECT_FILE: &str = "pyproject.toml";

/// Configuration loader
///
/// Walks up from a starting directory until it finds the project file. The
/// result is read once; later edits to the file are not observed.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    file_name: String,
}

impl ConfigLoader {
    /// Create a loader looking for [`DEFAULT_PROJECT_FILE`]
    pub fn new() -> Self {
        Self {
            file_name: DEFAULT_PROJECT_FILE.to_string(),
        }
    }

    /// Look for a different project file name
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Project file name this loader looks for
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Load configuration starting from the given directory
    ///
    /// When no project file exists between `start_dir` and the filesystem
    /// root, an empty configuration without a project root is returned.
    pub fn load_from_directory(&self, start_dir: &Path) -> ConfigResult<ProjectConfig> {
        let mut current = Some(start_dir);

        while let Some(dir) = current {
            let config_path = dir.join(&self.file_name);
            if config_path.is_file() {
                tracing::debug!(path = %config_path.display(), "loading project configuration");
                return ProjectConfig::load_from_file(&config_path);
            }
            current = dir.parent();
        }

        tracing::debug!(
            start = %start_dir.display(),
            file = %self.file_name,
            "no project file found, using empty configuration"
        );
        Ok(ProjectConfig::default())
    }

    /// Load configuration from a specific project file
    pub fn load_from_file(&self, config_path: &Path) -> ConfigResult<ProjectConfig> {
        ProjectConfig::load_from_file(config_path)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
