//! Import reference scanning.
//!
//! Every rewrite works on the specifier of a `from <quote><path><quote>`
//! clause. This module finds those clauses once and hands each specifier to a
//! classifier, so the rewriters never run overlapping regexes over raw text.
//!
//! ## Coordinate Conventions
//!
//! - Lines are **1-indexed**
//! - Spans are byte ranges of the specifier, excluding the quotes

use std::fmt;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static FROM_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bfrom\s+(?:"([^"\r\n]*)"|'([^'\r\n]*)')"#).expect("static regex is valid")
});

/// One `from "<specifier>"` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReference {
    /// 1-indexed line of the specifier.
    pub line: usize,
    pub specifier: String,
    /// Byte range of the specifier (quotes excluded).
    pub span: Range<usize>,
}

/// Which rewriter produced an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    /// Reference leaving the reorganized root.
    External,
    /// Reference to another relocated identifier.
    Cross,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceKind::External => write!(f, "external"),
            ReferenceKind::Cross => write!(f, "cross"),
        }
    }
}

/// A specifier that was rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEdit {
    pub line: usize,
    pub kind: ReferenceKind,
    pub old: String,
    pub new: String,
}

/// Find every `from` clause with a quoted specifier, in source order.
pub fn scan_references(content: &str) -> Vec<ImportReference> {
    let mut refs = Vec::new();
    let mut line = 1;
    let mut counted_to = 0;

    for caps in FROM_CLAUSE.captures_iter(content) {
        let Some(m) = caps.get(1).or_else(|| caps.get(2)) else {
            continue;
        };
        line += content[counted_to..m.start()].matches('\n').count();
        counted_to = m.start();
        refs.push(ImportReference {
            line,
            specifier: m.as_str().to_string(),
            span: m.range(),
        });
    }

    refs
}

/// Rewrite specifiers in place.
///
/// `classify` returns the replacement for a specifier, or `None` to keep it.
/// Replacements equal to the original are not reported as edits.
pub fn rewrite_specifiers<F>(
    content: &str,
    kind: ReferenceKind,
    mut classify: F,
) -> (String, Vec<ReferenceEdit>)
where
    F: FnMut(&str) -> Option<String>,
{
    let mut out = String::with_capacity(content.len());
    let mut edits = Vec::new();
    let mut last = 0;

    for reference in scan_references(content) {
        let Some(new) = classify(&reference.specifier) else {
            continue;
        };
        if new == reference.specifier {
            continue;
        }
        out.push_str(&content[last..reference.span.start]);
        out.push_str(&new);
        last = reference.span.end;
        edits.push(ReferenceEdit {
            line: reference.line,
            kind,
            old: reference.specifier,
            new,
        });
    }

    if edits.is_empty() {
        return (content.to_string(), edits);
    }
    out.push_str(&content[last..]);
    (out, edits)
}

// ============================================================================
// Tests
// ============================================================================
