//! Relocation map: bare module identifier to its new root-relative path.
//!
//! The map preserves insertion order (rewrites iterate in configuration
//! order) and rejects duplicate identifiers at construction time.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{RepathError, RepathResult};

/// `[A-Za-z0-9_]`
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Check that a string is usable as a bare identifier or path segment.
pub(crate) fn is_word(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_word_char)
}

/// One relocated module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelocationEntry {
    /// Bare module name (no extension, no directory).
    pub identifier: String,
    /// New location relative to the reorganized root, e.g. `economy/InventorySystem`.
    #[serde(rename = "path")]
    pub new_relative_path: String,
}

impl RelocationEntry {
    /// Create a new entry without validation.
    pub fn new(identifier: impl Into<String>, new_relative_path: impl Into<String>) -> Self {
        RelocationEntry {
            identifier: identifier.into(),
            new_relative_path: new_relative_path.into(),
        }
    }

    /// Top-level subfolder the identifier moved into.
    pub fn top_level_folder(&self) -> &str {
        self.new_relative_path
            .split('/')
            .next()
            .unwrap_or(&self.new_relative_path)
    }

    /// Directory segments of the new location (everything but the identifier).
    pub fn directory_segments(&self) -> Vec<&str> {
        let mut segments: Vec<&str> = self.new_relative_path.split('/').collect();
        segments.pop();
        segments
    }

    fn validate(&self) -> RepathResult<()> {
        let fail = |reason: &str| -> RepathResult<()> {
            Err(RepathError::invalid_relocation(
                &self.identifier,
                &self.new_relative_path,
                reason,
            ))
        };

        if !is_word(&self.identifier) {
            return fail("identifier must be a non-empty word ([A-Za-z0-9_])");
        }
        if self.new_relative_path.starts_with('/') {
            return fail("path must be relative to the root");
        }
        let segments: Vec<&str> = self.new_relative_path.split('/').collect();
        if segments.len() < 2 {
            return fail("path must place the identifier inside a subfolder");
        }
        if segments
            .iter()
            .any(|s| s.is_empty() || *s == "." || *s == "..")
        {
            return fail("path segments must not be empty, '.' or '..'");
        }
        if segments.last() != Some(&self.identifier.as_str()) {
            return fail("final path segment must equal the identifier");
        }
        Ok(())
    }
}

/// Validated, insertion-ordered relocation table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelocationMap {
    entries: Vec<RelocationEntry>,
    index: HashMap<String, usize>,
}

impl RelocationMap {
    /// Build a map from entries, failing on the first malformed or duplicate one.
    pub fn from_entries(entries: impl IntoIterator<Item = RelocationEntry>) -> RepathResult<Self> {
        let mut map = RelocationMap::default();
        for entry in entries {
            map.insert(entry)?;
        }
        Ok(map)
    }

    /// Add one entry.
    pub fn insert(&mut self, entry: RelocationEntry) -> RepathResult<()> {
        entry.validate()?;
        if let Some(&existing) = self.index.get(&entry.identifier) {
            return Err(RepathError::DuplicateIdentifier {
                identifier: entry.identifier,
                first: self.entries[existing].new_relative_path.clone(),
                second: entry.new_relative_path,
            });
        }
        self.index
            .insert(entry.identifier.clone(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    /// Look up an identifier.
    pub fn get(&self, identifier: &str) -> Option<&RelocationEntry> {
        self.index.get(identifier).map(|&i| &self.entries[i])
    }

    /// Whether `path` is the new location of some relocated identifier.
    pub fn is_relocated_path(&self, path: &str) -> bool {
        path.rsplit('/')
            .next()
            .and_then(|identifier| self.get(identifier))
            .is_some_and(|entry| entry.new_relative_path == path)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &RelocationEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
