//! Source-enforcement rules (`[tool.sourcepin.enforce-source]`)

use crate::pattern::{NamePattern, PatternError};
use crate::ConfigResult;

/// Top-level namespace shared by tool configuration sections
pub const TOOL_SECTION: &str = "tool";

/// Table under [`TOOL_SECTION`] owned by this plugin
pub const PLUGIN_SECTION: &str = "sourcepin";

/// Key of the pattern -> repository table
pub const ENFORCE_SOURCE_KEY: &str = "enforce-source";

/// A single glob -> repository mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnforcementRule {
    pub pattern: NamePattern,
    pub repository: String,
}

impl EnforcementRule {
    pub fn new(pattern: impl Into<String>, repository: impl Into<String>) -> Self {
        Self {
            pattern: NamePattern::new(pattern),
            repository: repository.into(),
        }
    }
}

/// Ordered set of enforcement rules
///
/// Iteration order is declaration order. When several patterns match a
/// name, the earliest rule wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnforcementRules {
    rules: Vec<EnforcementRule>,
}

impl EnforcementRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract rules from a parsed project document
    ///
    /// A missing section, or a section that is not a table, gives an empty
    /// rule set. Entries whose value is not a string are skipped.
    pub fn from_document(document: &toml::Table) -> Self {
        let Some(table) = enforce_source_table(document) else {
            tracing::debug!("no enforce-source section, source enforcement disabled");
            return Self::default();
        };

        let mut rules = Self::new();
        for (pattern, value) in table {
            match value.as_str() {
                Some(repository) => rules.push(EnforcementRule::new(pattern, repository)),
                None => tracing::warn!(
                    pattern = %pattern,
                    found = value.type_str(),
                    "ignoring enforce-source entry, repository name must be a string"
                ),
            }
        }

        tracing::debug!(count = rules.len(), "loaded source enforcement rules");
        rules
    }

    /// Parse a project document and extract its rules
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> ConfigResult<Self> {
        let document: toml::Table = toml::from_str(content)?;
        Ok(Self::from_document(&document))
    }

    /// Append a rule after all existing ones
    pub fn push(&mut self, rule: EnforcementRule) {
        self.rules.push(rule);
    }

    /// Repository forced for `name` by the first matching rule
    pub fn repository_for(&self, name: &str) -> Result<Option<&str>, PatternError> {
        for rule in &self.rules {
            if rule.pattern.matches(name)? {
                return Ok(Some(rule.repository.as_str()));
            }
        }
        Ok(None)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnforcementRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<EnforcementRule> for EnforcementRules {
    fn from_iter<I: IntoIterator<Item = EnforcementRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a EnforcementRules {
    type Item = &'a EnforcementRule;
    type IntoIter = std::slice::Iter<'a, EnforcementRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

fn enforce_source_table(document: &toml::Table) -> Option<&toml::Table> {
    document
        .get(TOOL_SECTION)?
        .as_table()?
        .get(PLUGIN_SECTION)?
        .as_table()?
        .get(ENFORCE_SOURCE_KEY)?
        .as_table()
}
