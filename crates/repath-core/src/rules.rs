//! External root rules.
//!
//! Before the reorganization every file lived directly in the root, so each
//! reference to a directory outside the root used the same number of
//! parent hops (the rule's baseline). A file now at depth `d` needs
//! `baseline + d` hops to reach the same directory.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{RepathError, RepathResult};
use crate::relocation::{is_word, is_word_char};

/// Rewrite rule for one directory outside the reorganized root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalRootRule {
    /// First path segment after the parent hops, e.g. `types`.
    pub name: String,
    /// Parent hops used by root-level files before the reorganization.
    pub baseline: usize,
    /// Identifiers directly under `name/` that moved into the subtree.
    #[serde(default, rename = "exclude", skip_serializing_if = "Vec::is_empty")]
    pub excluded_identifiers: Vec<String>,
}

impl ExternalRootRule {
    /// Create a rule with no exclusions.
    pub fn new(name: impl Into<String>, baseline: usize) -> Self {
        ExternalRootRule {
            name: name.into(),
            baseline,
            excluded_identifiers: Vec::new(),
        }
    }

    /// Add excluded identifiers.
    pub fn excluding<I, S>(mut self, identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_identifiers
            .extend(identifiers.into_iter().map(Into::into));
        self
    }

    /// Parent hops a file at `depth` needs to reach this root.
    pub fn required_hops(&self, depth: usize) -> usize {
        self.baseline + depth
    }

    /// Whether the segment following `name/` is excluded.
    ///
    /// An excluded identifier matches the segment itself or any segment it
    /// prefixes up to a non-word character, so `TimeSystem` also covers
    /// `TimeSystem.types`.
    pub fn excludes(&self, next_segment: &str) -> bool {
        self.excluded_identifiers.iter().any(|id| {
            next_segment
                .strip_prefix(id.as_str())
                .is_some_and(|rest| !rest.starts_with(is_word_char))
        })
    }
}

/// Ordered set of external root rules with unique names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalRuleSet {
    rules: Vec<ExternalRootRule>,
}

impl ExternalRuleSet {
    /// Build a rule set, rejecting malformed or colliding rules.
    pub fn new(rules: impl IntoIterator<Item = ExternalRootRule>) -> RepathResult<Self> {
        let rules: Vec<ExternalRootRule> = rules.into_iter().collect();
        let mut seen = HashSet::new();
        for rule in &rules {
            if rule.name.is_empty() || rule.name.contains('/') || rule.name == "." || rule.name == ".." {
                return Err(RepathError::invalid_rule(
                    &rule.name,
                    "name must be a single path segment",
                ));
            }
            if rule.baseline == 0 {
                return Err(RepathError::invalid_rule(
                    &rule.name,
                    "baseline must be at least one parent hop",
                ));
            }
            if let Some(bad) = rule.excluded_identifiers.iter().find(|id| !is_word(id)) {
                return Err(RepathError::invalid_rule(
                    &rule.name,
                    format!("excluded identifier '{}' is not a word", bad),
                ));
            }
            if !seen.insert(rule.name.as_str()) {
                return Err(RepathError::invalid_rule(&rule.name, "duplicate root name"));
            }
        }
        Ok(ExternalRuleSet { rules })
    }

    /// Find the rule for `name` whose baseline equals `hops`.
    pub fn matching(&self, name: &str, hops: usize) -> Option<&ExternalRootRule> {
        self.rules
            .iter()
            .find(|rule| rule.name == name && rule.baseline == hops)
    }

    /// Iterate rules in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &ExternalRootRule> {
        self.rules.iter()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
