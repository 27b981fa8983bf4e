//! Shared helpers for integration tests.
//!
//! Builds throwaway source trees in a `TempDir` and reads them back.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary reorganized root.
pub struct Tree {
    dir: TempDir,
}

impl Tree {
    pub fn new() -> Self {
        Tree {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    /// The reorganized root.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file at a root-relative path, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, content).expect("write fixture file");
        path
    }

    /// Read a file at a root-relative path.
    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.root().join(relative)).expect("read fixture file")
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// TOML config with `root` pointing at `root`.
pub fn config_toml(root: &Path, body: &str) -> String {
    format!("root = {:?}\n{}", root.display().to_string(), body)
}
