//! File descriptors and depth calculation.
//!
//! A file's depth is the number of directories between the reorganized root
//! and the file. Files at depth 0 sit directly in the root and have not been
//! migrated into a subfolder.

use std::path::{Path, PathBuf};

/// Count the directory levels in a root-relative path.
///
/// Both `/` and `\` are treated as separators. Leading `./` segments and
/// repeated separators do not add depth.
pub fn depth_of(relative_path: &str) -> usize {
    let segments = path_segments(relative_path);
    segments.len().saturating_sub(1)
}

/// Split a root-relative path into its non-empty, non-`.` segments.
fn path_segments(relative_path: &str) -> Vec<&str> {
    relative_path
        .split(['/', '\\'])
        .filter(|s| !s.is_empty() && *s != ".")
        .collect()
}

/// A source file located relative to the reorganized root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    /// Absolute (or caller-supplied) path used for I/O.
    pub absolute_path: PathBuf,
    /// Path relative to the root, always with forward slashes.
    pub relative_path: String,
    /// Directory levels below the root.
    pub depth: usize,
}

impl FileDescriptor {
    /// Describe a file from its root-relative path alone.
    pub fn from_relative(relative_path: &str) -> Self {
        let normalized = path_segments(relative_path).join("/");
        FileDescriptor {
            absolute_path: PathBuf::from(&normalized),
            depth: depth_of(&normalized),
            relative_path: normalized,
        }
    }

    /// Describe a file under `root`.
    ///
    /// Returns `None` when `path` is not inside `root`.
    pub fn under_root(root: &Path, path: &Path) -> Option<Self> {
        let rel = path.strip_prefix(root).ok()?;
        let relative_path = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if relative_path.is_empty() {
            return None;
        }
        Some(FileDescriptor {
            absolute_path: path.to_path_buf(),
            depth: depth_of(&relative_path),
            relative_path,
        })
    }

    /// The first directory under the root, or `None` for root-level files.
    pub fn top_level_folder(&self) -> Option<&str> {
        if self.depth == 0 {
            return None;
        }
        self.relative_path.split('/').next()
    }

    /// Directory segments between the root and the file.
    pub fn directory_segments(&self) -> Vec<&str> {
        let mut segments: Vec<&str> = self.relative_path.split('/').collect();
        segments.pop();
        segments
    }

    /// Whether the file has been moved into a subfolder.
    pub fn is_migrated(&self) -> bool {
        self.depth >= 1
    }
}

// ============================================================================
// Tests
// ============================================================================
