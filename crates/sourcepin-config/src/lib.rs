//! sourcepin configuration
//!
//! Loads the source-enforcement rules a project declares in its
//! configuration document:
//!
//! ```toml
//! [tool.sourcepin.enforce-source]
//! "acme-*" = "internal"
//! "*-private" = "private-mirror"
//! ```
//!
//! Rules keep the order in which they appear in the file; the first rule
//! whose glob matches a dependency name decides its repository.
//!
//! # Example
//!
//! ```no_run
//! use sourcepin_config::ConfigLoader;
//! use std::path::Path;
//!
//! let loader = ConfigLoader::new();
//! let project = loader.load_from_directory(Path::new(".")).unwrap();
//! let rules = project.enforcement_rules();
//! ```

pub mod loader;
pub mod pattern;
pub mod project;
pub mod rules;

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("Invalid TOML syntax: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

// Re-export main types
pub use loader::ConfigLoader;
pub use pattern::{NamePattern, PatternError};
pub use project::ProjectConfig;
pub use rules::{EnforcementRule, EnforcementRules};
