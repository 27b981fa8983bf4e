//! External-reference rewriting.
//!
//! A specifier `("../" * h) + name + "/" + rest` is rewritten to
//! `("../" * (baseline + depth)) + name + "/" + rest` when a rule for `name`
//! has `baseline == h`. Specifiers that already carry a different hop count
//! do not match, which keeps the rewrite idempotent.

use crate::reference::{rewrite_specifiers, ReferenceEdit, ReferenceKind};
use crate::relocation::RelocationMap;
use crate::rules::ExternalRuleSet;

const PARENT: &str = "../";

/// Split a specifier into its leading parent-hop count and the remainder.
pub fn split_parent_hops(specifier: &str) -> (usize, &str) {
    let mut hops = 0;
    let mut rest = specifier;
    while let Some(stripped) = rest.strip_prefix(PARENT) {
        hops += 1;
        rest = stripped;
    }
    (hops, rest)
}

/// Rewrite a single specifier, or `None` when no rule applies.
pub fn rewrite_external_specifier(
    specifier: &str,
    depth: usize,
    rules: &ExternalRuleSet,
    relocations: &RelocationMap,
) -> Option<String> {
    let (hops, rest) = split_parent_hops(specifier);
    if hops == 0 {
        return None;
    }

    let (root, tail) = rest.split_once('/')?;
    let rule = rules.matching(root, hops)?;

    let next_segment = tail.split('/').next().unwrap_or(tail);
    if rule.excludes(next_segment) {
        return None;
    }
    // Cross-reference output never climbs more than `depth` levels.
    if hops <= depth && relocations.is_relocated_path(rest) {
        return None;
    }

    Some(format!("{}{}", PARENT.repeat(rule.required_hops(depth)), rest))
}

/// Rewrite all external references in `content` for a file at `depth`.
pub fn rewrite_external_with_edits(
    content: &str,
    depth: usize,
    rules: &ExternalRuleSet,
    relocations: &RelocationMap,
) -> (String, Vec<ReferenceEdit>) {
    rewrite_specifiers(content, ReferenceKind::External, |spec| {
        rewrite_external_specifier(spec, depth, rules, relocations)
    })
}

/// Rewrite all external references in `content`, discarding edit details.
pub fn rewrite_external(
    content: &str,
    depth: usize,
    rules: &ExternalRuleSet,
    relocations: &RelocationMap,
) -> String {
    rewrite_external_with_edits(content, depth, rules, relocations).0
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relocation::RelocationEntry;
    use crate::rules::ExternalRootRule;

    fn rules() -> ExternalRuleSet {
        ExternalRuleSet::new(vec![
            ExternalRootRule::new("types", 2),
            ExternalRootRule::new("world", 2),
            ExternalRootRule::new("shared", 3),
            ExternalRootRule::new("core", 1).excluding([
                "TimeSystem",
                "ChunkLoadingSystem",
                "TerrainSystem",
            ]),
        ])
        .unwrap()
    }

    fn relocations() -> RelocationMap {
        RelocationMap::from_entries(vec![
            RelocationEntry::new("TimeSystem", "core/TimeSystem"),
            RelocationEntry::new("AnimalSystem", "world/animals/AnimalSystem"),
        ])
        .unwrap()
    }

    #[test]
    fn split_counts_parent_hops() {
        assert_eq!(split_parent_hops("../../types/X"), (2, "types/X"));
        assert_eq!(split_parent_hops("./X"), (0, "./X"));
        assert_eq!(split_parent_hops("X"), (0, "X"));
    }

    #[test]
    fn depth_one_adds_one_hop() {
        let out = rewrite_external(
            "import { Thing } from \"../../types/Thing\";\n",
            1,
            &rules(),
            &relocations(),
        );
        assert_eq!(out, "import { Thing } from \"../../../types/Thing\";\n");
    }

    #[test]
    fn hops_equal_baseline_plus_depth() {
        for depth in 0..=4 {
            let spec = rewrite_external_specifier(
                "../../../shared/logger",
                depth,
                &rules(),
                &relocations(),
            )
            .unwrap();
            let (hops, rest) = split_parent_hops(&spec);
            assert_eq!(hops, 3 + depth);
            assert_eq!(rest, "shared/logger");
        }
    }

    #[test]
    fn wrong_baseline_is_left_alone() {
        let r = rules();
        let m = relocations();
        assert_eq!(rewrite_external_specifier("../types/X", 1, &r, &m), None);
        assert_eq!(rewrite_external_specifier("../../../types/X", 1, &r, &m), None);
        assert_eq!(rewrite_external_specifier("../../unknown/X", 1, &r, &m), None);
        assert_eq!(rewrite_external_specifier("../../types", 1, &r, &m), None);
    }

    #[test]
    fn core_exclusions_are_skipped() {
        let r = rules();
        let m = relocations();
        assert_eq!(
            rewrite_external_specifier("../core/Simulation", 2, &r, &m).as_deref(),
            Some("../../../core/Simulation")
        );
        assert_eq!(rewrite_external_specifier("../core/TimeSystem", 2, &r, &m), None);
        assert_eq!(
            rewrite_external_specifier("../core/TerrainSystem/helpers", 2, &r, &m),
            None
        );
        assert_eq!(rewrite_external_specifier("../core/TimeSystem.types", 1, &r, &m), None);
        assert_eq!(
            rewrite_external_specifier("../core/TimeSystemUtils", 1, &r, &m).as_deref(),
            Some("../../core/TimeSystemUtils")
        );
    }

    #[test]
    fn relocated_targets_are_not_external() {
        // A cross-reference already rewritten to `../../world/animals/AnimalSystem`
        // from depth 2 must not be bumped by the `world` rule.
        let r = rules();
        let m = relocations();
        assert_eq!(
            rewrite_external_specifier("../../world/animals/AnimalSystem", 2, &r, &m),
            None
        );
        assert!(rewrite_external_specifier("../../world/ResourceMap", 2, &r, &m).is_some());
    }

    #[test]
    fn relocated_target_beyond_depth_is_still_external() {
        let r = rules();
        let m = RelocationMap::from_entries(vec![RelocationEntry::new(
            "WorldResourceSystem",
            "world/WorldResourceSystem",
        )])
        .unwrap();
        assert_eq!(
            rewrite_external_specifier("../../world/WorldResourceSystem", 1, &r, &m).as_deref(),
            Some("../../../world/WorldResourceSystem")
        );
        assert_eq!(
            rewrite_external_specifier("../../world/WorldResourceSystem", 2, &r, &m),
            None
        );
    }

    #[test]
    fn builtin_preset_rewrites_world_reference_at_depth_one() {
        let config = crate::config::RewriteConfig::builtin().unwrap();
        assert_eq!(
            rewrite_external_specifier(
                "../../world/WorldResourceSystem",
                1,
                &config.external_rules,
                &config.relocations,
            )
            .as_deref(),
            Some("../../../world/WorldResourceSystem")
        );
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let src = "import a from '../../types/A';\nimport b from \"../../../shared/b\";\n";
        let once = rewrite_external(src, 2, &rules(), &relocations());
        let twice = rewrite_external(&once, 2, &rules(), &relocations());
        assert_eq!(once, twice);
        assert!(once.contains("'../../../../types/A'"));
        assert!(once.contains("\"../../../../../shared/b\""));
    }

    #[test]
    fn edits_record_kind_and_line() {
        let src = "// header\nimport { T } from '../../types/T';\n";
        let (_, edits) = rewrite_external_with_edits(src, 1, &rules(), &relocations());
        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].line, 2);
        assert_eq!(edits[0].kind, ReferenceKind::External);
        assert_eq!(edits[0].new, "../../../types/T");
    }
}
