//! Source-enforcing package selector

use crate::package::{Dependency, Package};
use crate::repository::{self, PackageFinder, Repository, RepositoryPool};
use crate::PoolResult;
use sourcepin_config::EnforcementRules;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Chooses which repositories answer a dependency lookup
///
/// For each dependency, the first applicable step decides:
/// 1. an enforcement rule matching the name (only when the dependency is not
///    pinned) queries that rule's repository and nothing else
/// 2. a pinned source queries that repository and nothing else
/// 3. otherwise repositories are queried in pool order and the first
///    non-empty answer is returned
///
/// Steps 1 and 2 are final even when the repository has no candidates.
/// The selector holds no mutable state, so lookups can run concurrently.
#[derive(Clone)]
pub struct SourceSelector {
    pool: Arc<RepositoryPool>,
    rules: Arc<EnforcementRules>,
}

impl SourceSelector {
    /// Build a selector over the host's own `pool`
    pub fn new(pool: Arc<RepositoryPool>, rules: EnforcementRules) -> Self {
        Self {
            pool,
            rules: Arc::new(rules),
        }
    }

    /// Candidates for `dependency`
    pub fn find_packages(&self, dependency: &Dependency) -> PoolResult<Vec<Package>> {
        if !self.rules.is_empty() && dependency.source_name().is_none() {
            if let Some(name) = self.rules.repository_for(dependency.name())? {
                tracing::debug!(
                    dependency = dependency.name(),
                    repository = name,
                    "source enforced by rule"
                );
                return self.query_only(name, dependency);
            }
        }

        if let Some(name) = dependency.source_name() {
            tracing::debug!(
                dependency = dependency.name(),
                repository = name,
                "using pinned source"
            );
            return self.query_only(name, dependency);
        }

        for repo in self.pool.repositories() {
            tracing::trace!(
                dependency = dependency.name(),
                repository = repo.name(),
                "querying"
            );
            let packages = repository::query(repo.as_ref(), dependency)?;
            if !packages.is_empty() {
                tracing::debug!(
                    dependency = dependency.name(),
                    repository = repo.name(),
                    count = packages.len(),
                    "found candidates"
                );
                return Ok(packages);
            }
        }

        tracing::debug!(dependency = dependency.name(), "no repository has candidates");
        Ok(Vec::new())
    }

    fn query_only(&self, name: &str, dependency: &Dependency) -> PoolResult<Vec<Package>> {
        let repo = self.pool.repository(name)?;
        repository::query(repo.as_ref(), dependency)
    }

    pub fn rules(&self) -> &EnforcementRules {
        &self.rules
    }

    /// The pool shared with the host
    pub fn pool(&self) -> &Arc<RepositoryPool> {
        &self.pool
    }

    pub fn repositories(&self) -> &[Arc<dyn Repository>] {
        self.pool.repositories()
    }

    /// Ignored names carried over from the pool; not used for selection
    pub fn ignored_repository_names(&self) -> &HashSet<String> {
        self.pool.ignored_repository_names()
    }
}

impl PackageFinder for SourceSelector {
    fn find_packages(&self, dependency: &Dependency) -> PoolResult<Vec<Package>> {
        SourceSelector::find_packages(self, dependency)
    }
}

impl fmt::Debug for SourceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceSelector")
            .field("pool", &self.pool)
            .field("rules", &self.rules)
            .finish()
    }
}
