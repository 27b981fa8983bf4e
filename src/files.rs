//! Source file collection under the reorganized root.
//!
//! Walks each configured top-level subfolder recursively and yields files
//! with a configured extension, minus anything matching an exclude glob.

use std::io;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use repath_core::config::RewriteConfig;
use repath_core::error::{RepathError, RepathResult};

/// Compile exclude globs, matched against root-relative paths.
pub fn build_exclude_set(patterns: &[String]) -> RepathResult<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| {
            RepathError::config(format!("invalid exclude glob '{}': {}", pattern, e))
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| RepathError::config(format!("invalid exclude globs: {}", e)))
}

/// Collect every eligible source file, subfolder by subfolder.
///
/// Missing subfolders are skipped. Within a subfolder, entries are visited in
/// file-name order.
pub fn collect_source_files(config: &RewriteConfig) -> RepathResult<Vec<PathBuf>> {
    if !config.root.is_dir() {
        return Err(RepathError::RootNotFound {
            path: config.root.clone(),
        });
    }
    let excludes = build_exclude_set(&config.exclude)?;
    let mut files = Vec::new();

    for subfolder in &config.subfolders {
        let folder = config.root.join(subfolder);
        if !folder.is_dir() {
            tracing::debug!("Skipping missing subfolder {}", folder.display());
            continue;
        }

        for entry in WalkDir::new(&folder)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| folder.clone());
                RepathError::read(path, io::Error::from(e))
            })?;
            if !entry.file_type().is_file() || !config.matches_extension(entry.path()) {
                continue;
            }

            let rel = match entry.path().strip_prefix(&config.root) {
                Ok(rel) => rel,
                Err(_) => continue,
            };
            if excludes.is_match(rel) {
                tracing::debug!("Excluded {}", rel.display());
                continue;
            }
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

// ============================================================================
// Tests
// ============================================================================
