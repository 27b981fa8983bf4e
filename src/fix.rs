//! File-level driver and tree walk.
//!
//! This is the only place repath reads or writes source files. Each file is
//! read whole, rewritten in memory, and written back whole only when the text
//! changed.

use std::fs;
use std::path::{Path, PathBuf};

use repath_core::config::RewriteConfig;
use repath_core::depth::FileDescriptor;
use repath_core::error::{RepathError, RepathResult};
use repath_core::reference::ReferenceEdit;
use repath_core::rewrite::ImportRewriter;

use crate::files::collect_source_files;
use crate::output::{FixReport, FixedFile};

/// Options for a fix run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixOptions {
    /// Write rewritten files back to disk (false = dry run).
    pub apply: bool,
}

impl Default for FixOptions {
    fn default() -> Self {
        FixOptions { apply: true }
    }
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    /// Path relative to the root, forward slashes.
    pub relative_path: String,
    /// Set when the file sits at the root and was not read.
    pub skipped: bool,
    pub original: String,
    pub rewritten: String,
    pub edits: Vec<ReferenceEdit>,
}

impl FileOutcome {
    /// Whether the rewritten text differs from the original.
    pub fn is_modified(&self) -> bool {
        !self.skipped && self.original != self.rewritten
    }

    /// 1 if modified, 0 otherwise.
    pub fn count(&self) -> usize {
        usize::from(self.is_modified())
    }
}

/// Rewrite a single file under `root`.
///
/// Files directly in the root (depth 0) are skipped without being read.
pub fn fix_file(
    root: &Path,
    path: &Path,
    rewriter: &ImportRewriter<'_>,
    options: FixOptions,
) -> RepathResult<FileOutcome> {
    let file = FileDescriptor::under_root(root, path).ok_or_else(|| {
        RepathError::internal(format!(
            "{} is not under root {}",
            path.display(),
            root.display()
        ))
    })?;

    if !file.is_migrated() {
        tracing::debug!("Skipping root-level file {}", file.relative_path);
        return Ok(FileOutcome {
            path: file.absolute_path,
            relative_path: file.relative_path,
            skipped: true,
            original: String::new(),
            rewritten: String::new(),
            edits: Vec::new(),
        });
    }

    let original = fs::read_to_string(path).map_err(|e| RepathError::read(path, e))?;
    let rewrite = rewriter.rewrite(&original, &file);

    if options.apply && rewrite.content != original {
        fs::write(path, &rewrite.content).map_err(|e| RepathError::write(path, e))?;
        tracing::info!(
            "Rewrote {} ({} edits)",
            file.relative_path,
            rewrite.edits.len()
        );
    }

    Ok(FileOutcome {
        path: file.absolute_path,
        relative_path: file.relative_path,
        skipped: false,
        original,
        rewritten: rewrite.content,
        edits: rewrite.edits,
    })
}

/// Rewrite every eligible file under the configured root.
///
/// `on_modified` is called for each modified file as soon as it is
/// processed, before the next file is read. The first error, from I/O or from
/// the callback, aborts the run.
pub fn fix_tree<F>(
    config: &RewriteConfig,
    options: FixOptions,
    mut on_modified: F,
) -> RepathResult<FixReport>
where
    F: FnMut(&FileOutcome) -> RepathResult<()>,
{
    let rewriter = config.rewriter();
    let files = collect_source_files(config)?;
    tracing::debug!(
        "Collected {} files under {}",
        files.len(),
        config.root.display()
    );

    let mut fixed = Vec::new();
    let mut total_fixed = 0;
    for path in files {
        let outcome = fix_file(&config.root, &path, &rewriter, options)?;
        if outcome.count() == 0 {
            continue;
        }
        total_fixed += outcome.count();
        on_modified(&outcome)?;
        fixed.push(FixedFile {
            path: outcome.relative_path,
            edits: outcome.edits,
        });
    }

    Ok(FixReport::new(
        &config.root,
        !options.apply,
        fixed,
        total_fixed,
    ))
}

// ============================================================================
// Tests
// ============================================================================
