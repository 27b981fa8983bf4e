//! Unified diff generation for rewritten files.
//!
//! Rewrites only replace specifiers inside a line, so the old and new text
//! always have the same line count. Each changed line becomes its own hunk.

/// Generate a unified diff for one file.
///
/// Returns an empty string when the contents are identical.
pub fn generate_unified_diff(file: &str, old: &str, new: &str) -> String {
    let mut hunks = String::new();
    for (index, (before, after)) in old.lines().zip(new.lines()).enumerate() {
        if before == after {
            continue;
        }
        let line = index + 1;
        hunks.push_str(&format!("@@ -{},{} +{},{} @@\n", line, 1, line, 1));
        hunks.push_str(&format!("-{}\n", before));
        hunks.push_str(&format!("+{}\n", after));
    }

    if hunks.is_empty() {
        return hunks;
    }

    let mut diff = String::new();
    diff.push_str(&format!("--- a/{}\n", file));
    diff.push_str(&format!("+++ b/{}\n", file));
    diff.push_str(&hunks);
    diff
}

// ============================================================================
// Tests
// ============================================================================
