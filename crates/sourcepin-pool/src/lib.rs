//! sourcepin repository selection
//!
//! Replaces a package manager's default repository lookup with a policy that
//! honours, in order:
//! 1. source-enforcement rules (`[tool.sourcepin.enforce-source]`)
//! 2. an explicit source pinned on the dependency
//! 3. the first repository, in pool order, that has any candidate
//!
//! The host keeps owning its [`RepositoryPool`]; [`SourcePinPlugin`] builds a
//! [`SourceSelector`] sharing that pool, and the host uses it as its
//! [`PackageFinder`] for every dependency lookup.

pub mod package;
pub mod plugin;
pub mod repository;
pub mod selector;

pub use package::{Dependency, Package, VersionConstraint};
pub use plugin::{Application, SourcePinPlugin};
pub use repository::{InMemoryRepository, PackageFinder, Repository, RepositoryPool};
pub use selector::SourceSelector;

pub use sourcepin_config::{EnforcementRule, EnforcementRules, ProjectConfig};

/// Error reported by a repository implementation
pub type RepositoryError = Box<dyn std::error::Error + Send + Sync>;

/// Repository pool and selection errors
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("Repository '{0}' does not exist")]
    UnknownRepository(String),

    #[error("Repository '{0}' is already registered")]
    DuplicateRepository(String),

    #[error(transparent)]
    Pattern(#[from] sourcepin_config::PatternError),

    #[error("Repository '{name}' failed: {source}")]
    Repository {
        name: String,
        source: RepositoryError,
    },
}

pub type PoolResult<T> = std::result::Result<T, PoolError>;
