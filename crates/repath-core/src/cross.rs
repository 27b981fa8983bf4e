//! Cross-reference rewriting.
//!
//! Before the reorganization every module sat directly in the root, so other
//! modules were referenced as `./Name`, `../Name` or `./sub/Name`. Each such
//! reference to a relocated identifier is rewritten to reach the identifier's
//! new location from the referencing file's new location.

use serde::{Deserialize, Serialize};

use crate::depth::FileDescriptor;
use crate::reference::{rewrite_specifiers, ReferenceEdit, ReferenceKind};
use crate::relocation::{is_word, RelocationEntry, RelocationMap};

const PARENT: &str = "../";

/// How the path to a relocated identifier is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossReferenceMode {
    /// Same top-level subfolder: `./Name`; otherwise climb `depth` levels and
    /// descend into the target's full path.
    ///
    /// Only exact when both files end up in the same directory; files in
    /// different nested directories of one subfolder get `./Name` anyway.
    #[default]
    TopLevel,
    /// True relative path between the two directories.
    Exact,
}

/// The identifier named by a pre-reorganization cross-reference specifier.
///
/// Recognized forms: `./Name`, `../Name`, `./a/b/Name`.
pub fn cross_reference_identifier(specifier: &str) -> Option<&str> {
    if let Some(rest) = specifier.strip_prefix("./") {
        let mut segments = rest.split('/');
        let identifier = segments.next_back()?;
        if is_word(identifier) && segments.all(is_word) {
            return Some(identifier);
        }
        return None;
    }
    if let Some(rest) = specifier.strip_prefix(PARENT) {
        if is_word(rest) {
            return Some(rest);
        }
    }
    None
}

/// Compute the new specifier for `target` as seen from `file`.
pub fn resolve_cross_reference(
    file: &FileDescriptor,
    target: &RelocationEntry,
    mode: CrossReferenceMode,
) -> String {
    match mode {
        CrossReferenceMode::TopLevel => {
            if file.top_level_folder() == Some(target.top_level_folder()) {
                format!("./{}", target.identifier)
            } else {
                format!("{}{}", PARENT.repeat(file.depth), target.new_relative_path)
            }
        }
        CrossReferenceMode::Exact => relative_specifier(
            &file.directory_segments(),
            &target.directory_segments(),
            &target.identifier,
        ),
    }
}

fn relative_specifier(from_dir: &[&str], to_dir: &[&str], identifier: &str) -> String {
    let common = from_dir
        .iter()
        .zip(to_dir)
        .take_while(|(a, b)| a == b)
        .count();
    let ups = from_dir.len() - common;

    let mut down: Vec<&str> = to_dir[common..].to_vec();
    down.push(identifier);
    let down = down.join("/");

    if ups == 0 {
        format!("./{}", down)
    } else {
        format!("{}{}", PARENT.repeat(ups), down)
    }
}

/// Rewrite a single specifier, or `None` when it is not a cross-reference.
pub fn rewrite_cross_specifier(
    specifier: &str,
    file: &FileDescriptor,
    relocations: &RelocationMap,
    mode: CrossReferenceMode,
) -> Option<String> {
    let identifier = cross_reference_identifier(specifier)?;
    let target = relocations.get(identifier)?;
    Some(resolve_cross_reference(file, target, mode))
}

/// Rewrite all cross-references in `content` for `file`.
///
/// Files still at the root are returned unchanged.
pub fn rewrite_cross_with_edits(
    content: &str,
    file: &FileDescriptor,
    relocations: &RelocationMap,
    mode: CrossReferenceMode,
) -> (String, Vec<ReferenceEdit>) {
    if !file.is_migrated() {
        return (content.to_string(), Vec::new());
    }
    rewrite_specifiers(content, ReferenceKind::Cross, |spec| {
        rewrite_cross_specifier(spec, file, relocations, mode)
    })
}

/// Rewrite all cross-references in `content`, discarding edit details.
pub fn rewrite_cross(
    content: &str,
    file: &FileDescriptor,
    relocations: &RelocationMap,
    mode: CrossReferenceMode,
) -> String {
    rewrite_cross_with_edits(content, file, relocations, mode).0
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn relocations() -> RelocationMap {
        RelocationMap::from_entries(vec![
            RelocationEntry::new("InventorySystem", "economy/InventorySystem"),
            RelocationEntry::new("EconomySystem", "economy/EconomySystem"),
            RelocationEntry::new("AISystem", "agents/AISystem"),
            RelocationEntry::new("NeedsSystem", "agents/needs/NeedsSystem"),
            RelocationEntry::new("MovementSystem", "agents/movement/MovementSystem"),
            RelocationEntry::new("AnimalSystem", "world/animals/AnimalSystem"),
        ])
        .unwrap()
    }

    #[test]
    fn recognizes_legacy_forms() {
        assert_eq!(cross_reference_identifier("./AISystem"), Some("AISystem"));
        assert_eq!(cross_reference_identifier("../AISystem"), Some("AISystem"));
        assert_eq!(
            cross_reference_identifier("./agents/needs/NeedsSystem"),
            Some("NeedsSystem")
        );
        assert_eq!(cross_reference_identifier("../agents/AISystem"), None);
        assert_eq!(cross_reference_identifier("../../types/AISystem"), None);
        assert_eq!(cross_reference_identifier("./bad-dir/AISystem"), None);
        assert_eq!(cross_reference_identifier("AISystem"), None);
        assert_eq!(cross_reference_identifier("./"), None);
    }

    #[test]
    fn same_subfolder_becomes_same_directory() {
        let file = FileDescriptor::from_relative("economy/MarketSystem.ts");
        let out = rewrite_cross(
            "import { InventorySystem } from \"./InventorySystem\";\n",
            &file,
            &relocations(),
            CrossReferenceMode::TopLevel,
        );
        assert_eq!(out, "import { InventorySystem } from \"./InventorySystem\";\n");
    }

    #[test]
    fn other_subfolder_climbs_depth_levels() {
        let file = FileDescriptor::from_relative("agents/AISystem.ts");
        let out = rewrite_cross(
            "import { EconomySystem } from \"../EconomySystem\";\n",
            &file,
            &relocations(),
            CrossReferenceMode::TopLevel,
        );
        assert_eq!(out, "import { EconomySystem } from \"../economy/EconomySystem\";\n");
    }

    #[test]
    fn nested_target_from_nested_file() {
        let file = FileDescriptor::from_relative("agents/needs/NeedsSystem.ts");
        let spec = rewrite_cross_specifier(
            "./AnimalSystem",
            &file,
            &relocations(),
            CrossReferenceMode::TopLevel,
        );
        assert_eq!(spec.as_deref(), Some("../../world/animals/AnimalSystem"));
    }

    #[test]
    fn top_level_mode_flattens_same_subfolder_nesting() {
        let file = FileDescriptor::from_relative("agents/needs/NeedsSystem.ts");
        let spec = rewrite_cross_specifier(
            "./MovementSystem",
            &file,
            &relocations(),
            CrossReferenceMode::TopLevel,
        );
        assert_eq!(spec.as_deref(), Some("./MovementSystem"));
    }

    #[test]
    fn exact_mode_computes_true_relative_path() {
        let map = relocations();
        let nested = FileDescriptor::from_relative("agents/needs/NeedsSystem.ts");
        let top = FileDescriptor::from_relative("agents/AISystem.ts");
        let resolve = |file: &FileDescriptor, spec: &str| {
            rewrite_cross_specifier(spec, file, &map, CrossReferenceMode::Exact)
        };

        assert_eq!(
            resolve(&nested, "./MovementSystem").as_deref(),
            Some("../movement/MovementSystem")
        );
        assert_eq!(resolve(&nested, "./AISystem").as_deref(), Some("../AISystem"));
        assert_eq!(resolve(&top, "./NeedsSystem").as_deref(), Some("./needs/NeedsSystem"));
        assert_eq!(
            resolve(&top, "../EconomySystem").as_deref(),
            Some("../economy/EconomySystem")
        );
        assert_eq!(
            resolve(&nested, "./EconomySystem").as_deref(),
            Some("../../economy/EconomySystem")
        );
    }

    #[test]
    fn unknown_identifiers_are_untouched() {
        let file = FileDescriptor::from_relative("agents/AISystem.ts");
        let src = "import { Helper } from \"./Helper\";\n";
        let (out, edits) =
            rewrite_cross_with_edits(src, &file, &relocations(), CrossReferenceMode::TopLevel);
        assert_eq!(out, src);
        assert!(edits.is_empty());
    }

    #[test]
    fn root_level_files_are_untouched() {
        let file = FileDescriptor::from_relative("SystemRegistry.ts");
        let src = "import { AISystem } from \"./AISystem\";\n";
        let out = rewrite_cross(src, &file, &relocations(), CrossReferenceMode::TopLevel);
        assert_eq!(out, src);
    }

    #[test]
    fn rewritten_output_is_stable() {
        let map = relocations();
        for mode in [CrossReferenceMode::TopLevel, CrossReferenceMode::Exact] {
            for path in ["agents/AISystem.ts", "agents/needs/NeedsSystem.ts", "world/animals/AnimalBehavior.ts"] {
                let file = FileDescriptor::from_relative(path);
                let src = "import a from './AISystem';\nimport b from '../EconomySystem';\nimport c from './agents/needs/NeedsSystem';\n";
                let once = rewrite_cross(src, &file, &map, mode);
                let twice = rewrite_cross(&once, &file, &map, mode);
                assert_eq!(once, twice, "{:?} {}", mode, path);
            }
        }
    }
}
