//! Project configuration document
//!
//! The project file is owned by the host package manager. Only the
//! `[tool.sourcepin]` section is interpreted here; everything else is kept
//! as an opaque TOML table.

use crate::rules::EnforcementRules;
use crate::{ConfigError, ConfigResult};
use std::path::{Path, PathBuf};

/// A loaded project configuration document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectConfig {
    document: toml::Table,
    root: Option<PathBuf>,
}

impl ProjectConfig {
    /// Wrap an already parsed document
    pub fn new(document: toml::Table) -> Self {
        Self {
            document,
            root: None,
        }
    }

    /// Parse a project document from TOML text
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> ConfigResult<Self> {
        Ok(Self::new(toml::from_str(content)?))
    }

    /// Load a project document from a file
    ///
    /// The project root is the directory containing the file.
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        let document: toml::Table =
            toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
                file: path.to_path_buf(),
                error: e,
            })?;

        Ok(Self {
            document,
            root: path.parent().map(Path::to_path_buf),
        })
    }

    /// Source-enforcement rules declared by this project
    pub fn enforcement_rules(&self) -> EnforcementRules {
        EnforcementRules::from_document(&self.document)
    }

    /// The raw configuration document
    pub fn document(&self) -> &toml::Table {
        &self.document
    }

    /// Directory containing the project file, if one was found
    pub fn project_root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Check if this configuration was loaded from a project file
    pub fn is_project(&self) -> bool {
        self.root.is_some()
    }
}
