//! Repositories and the host's repository pool

use crate::package::{Dependency, Package};
use crate::{PoolError, PoolResult, RepositoryError};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// A named source of packages
///
/// Implementations own their caching, retries and network handling; errors
/// they return are passed through to the caller untouched.
pub trait Repository: Send + Sync {
    /// Name identifying this repository within a pool
    fn name(&self) -> &str;

    /// Candidates matching `dependency`, possibly none
    fn find_packages(&self, dependency: &Dependency) -> Result<Vec<Package>, RepositoryError>;
}

/// The lookup the host consults for every dependency during resolution
pub trait PackageFinder: Send + Sync {
    fn find_packages(&self, dependency: &Dependency) -> PoolResult<Vec<Package>>;
}

/// Query one repository, tagging its failure with the repository name
pub(crate) fn query(
    repository: &dyn Repository,
    dependency: &Dependency,
) -> PoolResult<Vec<Package>> {
    repository
        .find_packages(dependency)
        .map_err(|source| PoolError::Repository {
            name: repository.name().to_string(),
            source,
        })
}

/// The host's ordered set of repositories
///
/// Repositories are consulted in registration order. Names are unique.
/// Once wrapped in an `Arc` and handed to a [`crate::SourceSelector`], the
/// pool is shared as is and can only change through exclusive access.
#[derive(Clone, Default)]
pub struct RepositoryPool {
    repositories: Vec<Arc<dyn Repository>>,
    ignore_repository_names: HashSet<String>,
}

impl RepositoryPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pool from repositories in priority order
    pub fn from_repositories<I>(repositories: I) -> PoolResult<Self>
    where
        I: IntoIterator<Item = Arc<dyn Repository>>,
    {
        let mut pool = Self::new();
        for repository in repositories {
            pool.add_repository(repository)?;
        }
        Ok(pool)
    }

    /// Append a repository with the lowest priority so far
    pub fn add_repository(&mut self, repository: Arc<dyn Repository>) -> PoolResult<()> {
        if self.has_repository(repository.name()) {
            return Err(PoolError::DuplicateRepository(repository.name().to_string()));
        }
        self.repositories.push(repository);
        Ok(())
    }

    /// Remove a repository by name, returning it
    pub fn remove_repository(&mut self, name: &str) -> PoolResult<Arc<dyn Repository>> {
        let index = self
            .repositories
            .iter()
            .position(|repo| repo.name() == name)
            .ok_or_else(|| PoolError::UnknownRepository(name.to_string()))?;
        Ok(self.repositories.remove(index))
    }

    pub fn has_repository(&self, name: &str) -> bool {
        self.repositories.iter().any(|repo| repo.name() == name)
    }

    /// Repository registered under `name`
    pub fn repository(&self, name: &str) -> PoolResult<&Arc<dyn Repository>> {
        self.repositories
            .iter()
            .find(|repo| repo.name() == name)
            .ok_or_else(|| PoolError::UnknownRepository(name.to_string()))
    }

    pub fn repositories(&self) -> &[Arc<dyn Repository>] {
        &self.repositories
    }

    /// Mark a repository name as ignored
    pub fn ignore_repository_name(&mut self, name: impl Into<String>) {
        self.ignore_repository_names.insert(name.into());
    }

    pub fn ignored_repository_names(&self) -> &HashSet<String> {
        &self.ignore_repository_names
    }

    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }
}

/// Default host behaviour: a pinned dependency queries its repository,
/// anything else collects candidates from every repository.
impl PackageFinder for RepositoryPool {
    fn find_packages(&self, dependency: &Dependency) -> PoolResult<Vec<Package>> {
        if let Some(source) = dependency.source_name() {
            return query(self.repository(source)?.as_ref(), dependency);
        }

        let mut packages = Vec::new();
        for repository in self.repositories.iter() {
            packages.extend(query(repository.as_ref(), dependency)?);
        }
        Ok(packages)
    }
}

impl fmt::Debug for RepositoryPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepositoryPool")
            .field("repositories", &repository_names(&self.repositories))
            .field("ignore_repository_names", &self.ignore_repository_names)
            .finish()
    }
}

pub(crate) fn repository_names(repositories: &[Arc<dyn Repository>]) -> Vec<&str> {
    repositories.iter().map(|repo| repo.name()).collect()
}

/// Repository backed by a fixed list of packages
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    name: String,
    packages: Vec<Package>,
}

impl InMemoryRepository {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            packages: Vec::new(),
        }
    }

    /// Add a package; its source becomes this repository
    pub fn add_package(&mut self, package: Package) {
        let package = package.with_source(self.name.clone());
        self.packages.push(package);
    }

    pub fn with_package(mut self, name: &str, version: semver::Version) -> Self {
        self.add_package(Package::new(name, version));
        self
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }
}

impl Repository for InMemoryRepository {
    fn name(&self) -> &str {
        &self.name
    }

    fn find_packages(&self, dependency: &Dependency) -> Result<Vec<Package>, RepositoryError> {
        Ok(self
            .packages
            .iter()
            .filter(|p| {
                p.name == dependency.name() && dependency.constraint().matches(&p.version)
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semver::Version;

    fn repo(name: &str, packages: &[(&str, Version)]) -> Arc<dyn Repository> {
        let mut repository = InMemoryRepository::new(name);
        for (pkg, version) in packages {
            repository.add_package(Package::new(*pkg, version.clone()));
        }
        Arc::new(repository)
    }

    #[test]
    fn test_pool_keeps_registration_order() {
        let pool = RepositoryPool::from_repositories([
            repo("pypi", &[]),
            repo("internal", &[]),
            repo("mirror", &[]),
        ])
        .unwrap();

        assert_eq!(
            repository_names(pool.repositories()),
            vec!["pypi", "internal", "mirror"]
        );
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn test_pool_rejects_duplicate_names() {
        let mut pool = RepositoryPool::new();
        pool.add_repository(repo("pypi", &[])).unwrap();

        let err = pool.add_repository(repo("pypi", &[])).unwrap_err();
        assert!(matches!(err, PoolError::DuplicateRepository(name) if name == "pypi"));
    }

    #[test]
    fn test_pool_unknown_repository() {
        let pool = RepositoryPool::new();
        assert!(pool.is_empty());
        assert!(matches!(
            pool.repository("ghost"),
            Err(PoolError::UnknownRepository(name)) if name == "ghost"
        ));
    }

    #[test]
    fn test_pool_remove_repository() {
        let mut pool =
            RepositoryPool::from_repositories([repo("a", &[]), repo("b", &[])]).unwrap();

        let removed = pool.remove_repository("a").unwrap();
        assert_eq!(removed.name(), "a");
        assert!(!pool.has_repository("a"));
        assert!(pool.remove_repository("a").is_err());
    }

    #[test]
    fn test_pool_default_lookup_aggregates() {
        let pool = RepositoryPool::from_repositories([
            repo("pypi", &[("requests", Version::new(2, 31, 0))]),
            repo("mirror", &[("requests", Version::new(2, 30, 0))]),
        ])
        .unwrap();

        let packages = pool.find_packages(&Dependency::new("requests")).unwrap();
        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].source.as_deref(), Some("pypi"));
        assert_eq!(packages[1].source.as_deref(), Some("mirror"));
    }

    #[test]
    fn test_pool_default_lookup_honours_pin() {
        let pool = RepositoryPool::from_repositories([
            repo("pypi", &[("requests", Version::new(2, 31, 0))]),
            repo("mirror", &[("requests", Version::new(2, 30, 0))]),
        ])
        .unwrap();

        let packages = pool
            .find_packages(&Dependency::new("requests").with_source("mirror"))
            .unwrap();
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].version, Version::new(2, 30, 0));
    }

    #[test]
    fn test_in_memory_repository_filters_by_constraint() {
        let repository = InMemoryRepository::new("pypi")
            .with_package("requests", Version::new(1, 0, 0))
            .with_package("requests", Version::new(2, 0, 0))
            .with_package("urllib3", Version::new(2, 0, 0));

        let dep = Dependency::parse("requests", "^2").unwrap();
        let packages = repository.find_packages(&dep).unwrap();
        assert_eq!(
            packages,
            vec![Package::new("requests", Version::new(2, 0, 0)).with_source("pypi")]
        );
    }

    #[test]
    fn test_ignored_names_are_recorded() {
        let mut pool = RepositoryPool::new();
        pool.ignore_repository_name("legacy");
        assert!(pool.ignored_repository_names().contains("legacy"));
    }
}
