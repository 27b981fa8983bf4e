//! Rewrite configuration.
//!
//! Configuration is plain data loaded from TOML:
//!
//! ```toml
//! root = "src/domain/simulation/systems"
//! subfolders = ["agents", "economy"]
//! extensions = ["ts"]
//! exclude = ["**/*.test.ts"]
//! cross_reference_mode = "top_level"   # or "exact"
//!
//! [[external_roots]]
//! name = "types"
//! baseline = 2
//!
//! [[relocations]]
//! identifier = "InventorySystem"
//! path = "economy/InventorySystem"
//! ```
//!
//! A relative `root` resolves against the directory of the config file it
//! came from. Validation happens once, at load time.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cross::CrossReferenceMode;
use crate::error::{RepathError, RepathResult};
use crate::relocation::{RelocationEntry, RelocationMap};
use crate::rewrite::ImportRewriter;
use crate::rules::{ExternalRootRule, ExternalRuleSet};

/// Default config file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "repath.toml";

/// Built-in preset for the simulation systems reorganization.
pub const BUILTIN_PRESET: &str = include_str!("../config/simulation-systems.toml");

fn default_extensions() -> Vec<String> {
    vec!["ts".to_string()]
}

/// On-disk shape of a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub root: PathBuf,
    #[serde(default)]
    pub subfolders: Vec<String>,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub cross_reference_mode: CrossReferenceMode,
    #[serde(default)]
    pub external_roots: Vec<ExternalRootRule>,
    #[serde(default)]
    pub relocations: Vec<RelocationEntry>,
}

/// Validated configuration for one rewrite run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteConfig {
    /// The reorganized root.
    pub root: PathBuf,
    /// Top-level subfolders to walk, in order.
    pub subfolders: Vec<String>,
    /// File extensions to rewrite (without leading dot).
    pub extensions: Vec<String>,
    /// Root-relative globs to skip.
    pub exclude: Vec<String>,
    pub cross_reference_mode: CrossReferenceMode,
    pub relocations: RelocationMap,
    pub external_rules: ExternalRuleSet,
}

impl RewriteConfig {
    /// Validate a parsed config file.
    ///
    /// `origin` is the file the config was read from, used to resolve a
    /// relative root.
    pub fn from_file(file: ConfigFile, origin: Option<&Path>) -> RepathResult<Self> {
        let relocations = RelocationMap::from_entries(file.relocations)?;
        let external_rules = ExternalRuleSet::new(file.external_roots)?;

        if file.root.as_os_str().is_empty() {
            return Err(config_error(origin, "root must not be empty"));
        }
        let root = match origin.and_then(Path::parent) {
            Some(dir) if file.root.is_relative() => dir.join(&file.root),
            _ => file.root,
        };

        let subfolders = if file.subfolders.is_empty() {
            derive_subfolders(&relocations)
        } else {
            file.subfolders
        };
        if let Some(bad) = subfolders
            .iter()
            .find(|s| s.is_empty() || s.contains(['/', '\\']) || *s == "." || *s == "..")
        {
            return Err(config_error(
                origin,
                format!("subfolder '{}' must be a single directory name", bad),
            ));
        }

        let extensions: Vec<String> = file
            .extensions
            .into_iter()
            .map(|e| e.trim_start_matches('.').to_string())
            .collect();
        if extensions.is_empty() || extensions.iter().any(String::is_empty) {
            return Err(config_error(origin, "extensions must be non-empty"));
        }

        Ok(RewriteConfig {
            root,
            subfolders,
            extensions,
            exclude: file.exclude,
            cross_reference_mode: file.cross_reference_mode,
            relocations,
            external_rules,
        })
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(text: &str, origin: Option<&Path>) -> RepathResult<Self> {
        let file: ConfigFile =
            toml::from_str(text).map_err(|e| config_error(origin, e.message().to_string()))?;
        Self::from_file(file, origin)
    }

    /// Load a config file from disk.
    pub fn load(path: &Path) -> RepathResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| RepathError::read(path, e))?;
        tracing::debug!("Loaded config from {}", path.display());
        Self::from_toml_str(&text, Some(path))
    }

    /// The built-in simulation systems preset.
    pub fn builtin() -> RepathResult<Self> {
        Self::from_toml_str(BUILTIN_PRESET, None)
    }

    /// Replace the root.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Whether `path` has one of the configured extensions.
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    /// Build a rewriter borrowing this config's tables.
    pub fn rewriter(&self) -> ImportRewriter<'_> {
        ImportRewriter::new(
            &self.relocations,
            &self.external_rules,
            self.cross_reference_mode,
        )
    }

    /// Convert back into the on-disk shape.
    pub fn to_file(&self) -> ConfigFile {
        ConfigFile {
            root: self.root.clone(),
            subfolders: self.subfolders.clone(),
            extensions: self.extensions.clone(),
            exclude: self.exclude.clone(),
            cross_reference_mode: self.cross_reference_mode,
            external_roots: self.external_rules.iter().cloned().collect(),
            relocations: self.relocations.iter().cloned().collect(),
        }
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> RepathResult<String> {
        toml::to_string_pretty(&self.to_file())
            .map_err(|e| RepathError::internal(format!("TOML serialization error: {}", e)))
    }
}

fn config_error(origin: Option<&Path>, message: impl Into<String>) -> RepathError {
    match origin {
        Some(path) => RepathError::config_at(path, message),
        None => RepathError::config(message),
    }
}

/// Top-level folders of the relocation targets, in first-seen order.
fn derive_subfolders(relocations: &RelocationMap) -> Vec<String> {
    let mut folders: Vec<String> = Vec::new();
    for entry in relocations.iter() {
        let folder = entry.top_level_folder();
        if !folders.iter().any(|f| f == folder) {
            folders.push(folder.to_string());
        }
    }
    folders
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_preset_is_valid() {
        let config = RewriteConfig::builtin().unwrap();
        assert_eq!(config.root, PathBuf::from("src/domain/simulation/systems"));
        assert_eq!(config.subfolders.len(), 9);
        assert_eq!(config.subfolders[0], "agents");
        assert_eq!(config.extensions, vec!["ts"]);
        assert_eq!(config.relocations.len(), 34);
        assert_eq!(config.external_rules.len(), 6);
        assert_eq!(config.cross_reference_mode, CrossReferenceMode::TopLevel);
        let core = config.external_rules.matching("core", 1).unwrap();
        assert!(core.excludes("ChunkLoadingSystem"));
        assert_eq!(
            config.relocations.get("SharedKnowledgeSystem").unwrap().new_relative_path,
            "agents/ai/SharedKnowledgeSystem"
        );
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let config = RewriteConfig::from_toml_str(
            r#"
root = "systems"

[[relocations]]
identifier = "AISystem"
path = "agents/AISystem"

[[relocations]]
identifier = "EconomySystem"
path = "economy/EconomySystem"

[[relocations]]
identifier = "RoleSystem"
path = "agents/RoleSystem"
"#,
            None,
        )
        .unwrap();
        assert_eq!(config.subfolders, vec!["agents", "economy"]);
        assert_eq!(config.extensions, vec!["ts"]);
        assert!(config.exclude.is_empty());
        assert!(config.external_rules.is_empty());
    }

    #[test]
    fn relative_root_resolves_against_config_dir() {
        let config = RewriteConfig::from_toml_str(
            "root = \"src/systems\"\n",
            Some(Path::new("/work/project/repath.toml")),
        )
        .unwrap();
        assert_eq!(config.root, PathBuf::from("/work/project/src/systems"));
    }

    #[test]
    fn duplicate_relocations_fail_fast() {
        let err = RewriteConfig::from_toml_str(
            r#"
root = "systems"

[[relocations]]
identifier = "TaskSystem"
path = "objectives/TaskSystem"

[[relocations]]
identifier = "TaskSystem"
path = "agents/TaskSystem"
"#,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, RepathError::DuplicateIdentifier { .. }));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = RewriteConfig::from_toml_str(
            "root = \"systems\"\nsubfolder = [\"agents\"]\n",
            Some(Path::new("repath.toml")),
        )
        .unwrap_err();
        assert!(matches!(err, RepathError::InvalidConfig { .. }));
        assert!(err.to_string().contains("repath.toml"));
    }

    #[test]
    fn rejects_bad_subfolders_and_extensions() {
        assert!(RewriteConfig::from_toml_str(
            "root = \"s\"\nsubfolders = [\"a/b\"]\n",
            None
        )
        .is_err());
        assert!(RewriteConfig::from_toml_str("root = \"s\"\nextensions = []\n", None).is_err());
        assert!(RewriteConfig::from_toml_str("root = \"\"\n", None).is_err());
    }

    #[test]
    fn extensions_accept_leading_dot() {
        let config =
            RewriteConfig::from_toml_str("root = \"s\"\nextensions = [\".ts\", \"tsx\"]\n", None)
                .unwrap();
        assert_eq!(config.extensions, vec!["ts", "tsx"]);
        assert!(config.matches_extension(Path::new("a/B.tsx")));
        assert!(!config.matches_extension(Path::new("a/B.js")));
        assert!(!config.matches_extension(Path::new("a/README")));
    }

    #[test]
    fn toml_output_reloads_to_same_config() {
        let config = RewriteConfig::builtin().unwrap();
        let text = config.to_toml().unwrap();
        let reloaded = RewriteConfig::from_toml_str(&text, None).unwrap();
        assert_eq!(config, reloaded);
    }

    #[test]
    fn with_root_overrides() {
        let config = RewriteConfig::builtin().unwrap().with_root("/tmp/systems");
        assert_eq!(config.root, PathBuf::from("/tmp/systems"));
    }
}
