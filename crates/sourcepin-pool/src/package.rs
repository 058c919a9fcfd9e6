//! Dependency requests and package candidates

use semver::{Version, VersionReq};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Version constraint of a dependency request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VersionConstraint {
    /// `*` or no constraint at all
    #[default]
    Any,
    /// A bare version, e.g. `1.2.3`
    Exact(Version),
    /// Any other requirement (`^1.2`, `~1.2.3`, `>=1, <2`)
    Req(VersionReq),
}

impl VersionConstraint {
    /// Parse version constraint from string
    pub fn parse(s: &str) -> Result<Self, semver::Error> {
        let s = s.trim();
        if s.is_empty() || s == "*" {
            return Ok(VersionConstraint::Any);
        }

        match Version::parse(s) {
            Ok(v) => Ok(VersionConstraint::Exact(v)),
            Err(_) => Ok(VersionConstraint::Req(VersionReq::parse(s)?)),
        }
    }

    /// Check if version satisfies constraint
    pub fn matches(&self, version: &Version) -> bool {
        match self {
            VersionConstraint::Any => true,
            VersionConstraint::Exact(v) => version == v,
            VersionConstraint::Req(req) => req.matches(version),
        }
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionConstraint::Any => f.write_str("*"),
            VersionConstraint::Exact(v) => write!(f, "{}", v),
            VersionConstraint::Req(req) => write!(f, "{}", req),
        }
    }
}

/// A requested package
///
/// Built by the host for each resolution step and only read here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    name: String,
    constraint: VersionConstraint,
    source_name: Option<String>,
}

impl Dependency {
    /// Request any version of `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraint: VersionConstraint::Any,
            source_name: None,
        }
    }

    /// Request `name` with a textual constraint such as `^1.2`
    pub fn parse(name: impl Into<String>, constraint: &str) -> Result<Self, semver::Error> {
        Ok(Self::new(name).with_constraint(VersionConstraint::parse(constraint)?))
    }

    pub fn with_constraint(mut self, constraint: VersionConstraint) -> Self {
        self.constraint = constraint;
        self
    }

    /// Pin this dependency to a single repository
    pub fn with_source(mut self, source_name: impl Into<String>) -> Self {
        self.source_name = Some(source_name.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn constraint(&self) -> &VersionConstraint {
        &self.constraint
    }

    /// Repository this dependency is pinned to, if any
    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.constraint)?;
        if let Some(source) = &self.source_name {
            write!(f, " from {}", source)?;
        }
        Ok(())
    }
}

/// A package version offered by a repository
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub version: Version,
    /// Name of the repository that provided this candidate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Package {
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            version,
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constraint_any() {
        assert_eq!(VersionConstraint::parse("*").unwrap(), VersionConstraint::Any);
        assert_eq!(VersionConstraint::parse("").unwrap(), VersionConstraint::Any);
        assert!(VersionConstraint::Any.matches(&Version::new(0, 0, 1)));
    }

    #[test]
    fn test_version_constraint_exact() {
        let constraint = VersionConstraint::parse("1.2.3").unwrap();
        assert!(constraint.matches(&Version::new(1, 2, 3)));
        assert!(!constraint.matches(&Version::new(1, 2, 4)));
    }

    #[test]
    fn test_version_constraint_caret() {
        let constraint = VersionConstraint::parse("^1.2.3").unwrap();
        assert!(constraint.matches(&Version::new(1, 9, 9)));
        assert!(!constraint.matches(&Version::new(2, 0, 0)));
    }

    #[test]
    fn test_version_constraint_range() {
        let constraint = VersionConstraint::parse(">=1.0.0, <1.5.0").unwrap();
        assert!(constraint.matches(&Version::new(1, 4, 0)));
        assert!(!constraint.matches(&Version::new(1, 5, 0)));
    }

    #[test]
    fn test_version_constraint_invalid() {
        assert!(VersionConstraint::parse("not a version").is_err());
    }

    #[test]
    fn test_dependency_source_pin() {
        let dep = Dependency::parse("acme-widgets", "^1.0").unwrap();
        assert_eq!(dep.source_name(), None);

        let pinned = dep.with_source("pypi");
        assert_eq!(pinned.source_name(), Some("pypi"));
        assert_eq!(pinned.name(), "acme-widgets");
    }

    #[test]
    fn test_package_without_source_omits_field() {
        let package = Package::new("requests", Version::new(2, 31, 0));
        let text = toml::to_string(&package).unwrap();
        assert!(!text.contains("source"));

        let parsed: Package = toml::from_str(&text).unwrap();
        assert_eq!(parsed, package);
    }

    #[test]
    fn test_package_with_source_serializes_version_as_string() {
        let package = Package::new("requests", Version::new(2, 31, 0)).with_source("pypi");
        let text = toml::to_string(&package).unwrap();
        assert!(text.contains(r#"version = "2.31.0""#));
        assert!(text.contains(r#"source = "pypi""#));
    }

    #[test]
    fn test_dependency_display() {
        let dep = Dependency::parse("acme-widgets", "1.0.0")
            .unwrap()
            .with_source("internal");
        assert_eq!(dep.to_string(), "acme-widgets (1.0.0) from internal");
    }
}
