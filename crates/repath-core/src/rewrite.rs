//! The import rewriter: external references first, then cross-references.
//!
//! This is a pure function of (content, file descriptor, relocation map,
//! rule table). It never touches the filesystem.

use crate::cross::{rewrite_cross_with_edits, CrossReferenceMode};
use crate::depth::FileDescriptor;
use crate::external::rewrite_external_with_edits;
use crate::reference::{ReferenceEdit, ReferenceKind};
use crate::relocation::RelocationMap;
use crate::rules::ExternalRuleSet;

/// Result of rewriting one file's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// Rewritten content (equal to the input when nothing matched).
    pub content: String,
    /// Applied edits in application order.
    pub edits: Vec<ReferenceEdit>,
}

impl Rewrite {
    /// Whether any specifier changed.
    pub fn is_changed(&self) -> bool {
        !self.edits.is_empty()
    }

    /// Number of edits of `kind`.
    pub fn count(&self, kind: ReferenceKind) -> usize {
        self.edits.iter().filter(|e| e.kind == kind).count()
    }
}

/// Rewrites the imports of files relocated under one root.
#[derive(Debug, Clone, Copy)]
pub struct ImportRewriter<'a> {
    relocations: &'a RelocationMap,
    rules: &'a ExternalRuleSet,
    mode: CrossReferenceMode,
}

impl<'a> ImportRewriter<'a> {
    pub fn new(
        relocations: &'a RelocationMap,
        rules: &'a ExternalRuleSet,
        mode: CrossReferenceMode,
    ) -> Self {
        ImportRewriter {
            relocations,
            rules,
            mode,
        }
    }

    /// Rewrite `content` as it appears in `file`.
    ///
    /// Root-level files (depth 0) are returned unchanged.
    pub fn rewrite(&self, content: &str, file: &FileDescriptor) -> Rewrite {
        if !file.is_migrated() {
            return Rewrite {
                content: content.to_string(),
                edits: Vec::new(),
            };
        }

        let (external, mut edits) =
            rewrite_external_with_edits(content, file.depth, self.rules, self.relocations);
        let (content, cross_edits) =
            rewrite_cross_with_edits(&external, file, self.relocations, self.mode);
        edits.extend(cross_edits);

        for edit in &edits {
            tracing::trace!(
                "{}:{} {} '{}' -> '{}'",
                file.relative_path,
                edit.line,
                edit.kind,
                edit.old,
                edit.new
            );
        }

        Rewrite { content, edits }
    }
}

// ============================================================================
// Tests
// ============================================================================
