//! Plugin activation
//!
//! Activation runs once per application start. It reads the enforcement
//! rules from the project configuration and returns a [`SourceSelector`]
//! over the host's repositories; the host installs it in place of its own
//! lookup.

use crate::repository::{PackageFinder, RepositoryPool};
use crate::selector::SourceSelector;
use sourcepin_config::ProjectConfig;
use std::sync::Arc;

/// What the plugin needs from the running host application
pub trait Application {
    /// The host's ordered repository pool, shared with the installed lookup
    fn pool(&self) -> &Arc<RepositoryPool>;

    /// The project configuration document
    fn project_config(&self) -> &ProjectConfig;

    /// Replace the lookup used for all subsequent dependency queries
    fn install_finder(&mut self, finder: Box<dyn PackageFinder>);
}

/// The source-pinning plugin
#[derive(Debug, Default, Clone, Copy)]
pub struct SourcePinPlugin;

impl SourcePinPlugin {
    pub fn new() -> Self {
        Self
    }

    /// Build the selector for `pool` using the rules in `config`
    ///
    /// The selector keeps a reference to `pool` itself, not a copy. A missing
    /// or malformed enforcement section yields a selector without rules.
    /// Rules are read here only; later edits to the project file are not
    /// picked up.
    pub fn activate(&self, pool: &Arc<RepositoryPool>, config: &ProjectConfig) -> SourceSelector {
        let rules = config.enforcement_rules();
        tracing::debug!(
            repositories = pool.len(),
            rules = rules.len(),
            "activating source selector"
        );
        SourceSelector::new(Arc::clone(pool), rules)
    }

    /// Activate against a host and install the selector as its lookup
    pub fn activate_application<A>(&self, application: &mut A)
    where
        A: Application + ?Sized,
    {
        let selector = self.activate(application.pool(), application.project_config());
        application.install_finder(Box::new(selector));
    }
}
