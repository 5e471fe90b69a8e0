//! Whole-tree validation of version-gated constraints.
//!
//! Per-entity sorting weights are only understood by web UI version 3,
//! but they are declared on the entities themselves, which live in
//! arbitrary sibling sections of the configuration tree at arbitrary
//! depth. The walker here therefore visits the *entire* tree, not just
//! the web UI section, and collects every violation with its exact path
//! so the user can fix all offending entities in one pass.

use std::fmt;

use serde::Serialize;

use crate::node::{ConfigNode, TreePath};
use crate::version::WebVersion;

/// Config key that assigns an entity its web UI sorting weight.
pub const SORTING_WEIGHT_KEY: &str = "web_ui_sorting_weight";

/// A structural constraint violated somewhere in the configuration tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Exact location of the offending node.
    pub path: TreePath,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Check the whole configuration tree for sorting weights declared under
/// a version that does not support them.
///
/// Returns every violation in deterministic pre-order (parent before
/// child, sequence elements in index order). Empty for version 3, which
/// supports sorting weights everywhere.
pub fn validate_sorting_weights(root: &ConfigNode, version: WebVersion) -> Vec<Violation> {
    let mut violations = Vec::new();
    if !version.supports_sorting_weight() {
        walk(root, &TreePath::root(), version, &mut violations);
    }
    violations
}

fn walk(node: &ConfigNode, path: &TreePath, version: WebVersion, out: &mut Vec<Violation>) {
    match node {
        ConfigNode::Scalar(_) => {}
        ConfigNode::Sequence(items) => {
            for (i, item) in items.iter().enumerate() {
                walk(item, &path.index(i), version, out);
            }
        }
        ConfigNode::Mapping(entries) => {
            // The violation points at the key itself. Traversal continues
            // into every value regardless, including the offending one:
            // a nested structure must neither suppress nor duplicate the
            // outer violation.
            if node.get(SORTING_WEIGHT_KEY).is_some() {
                out.push(Violation {
                    path: path.child(SORTING_WEIGHT_KEY),
                    message: format!(
                        "sorting weight on entities is not supported in web UI version {version}"
                    ),
                });
            }
            for (key, value) in entries {
                walk(value, &path.child(key), version, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(json: serde_json::Value) -> ConfigNode {
        ConfigNode::from(json)
    }

    fn paths(violations: &[Violation]) -> Vec<String> {
        violations.iter().map(|v| v.path.to_string()).collect()
    }

    #[test]
    fn test_empty_tree_has_no_violations() {
        let root = ConfigNode::empty_mapping();
        assert!(validate_sorting_weights(&root, WebVersion::V1).is_empty());
        assert!(validate_sorting_weights(&root, WebVersion::V2).is_empty());
    }

    #[test]
    fn test_weight_at_root() {
        let root = tree(serde_json::json!({"web_ui_sorting_weight": 10}));
        let violations = validate_sorting_weights(&root, WebVersion::V1);
        assert_eq!(paths(&violations), ["web_ui_sorting_weight"]);
        assert!(violations[0].message.contains("version 1"));
    }

    #[test]
    fn test_weight_in_nested_mapping() {
        let root = tree(serde_json::json!({
            "sensor": {"kitchen": {"web_ui_sorting_weight": 5.0}},
        }));
        let violations = validate_sorting_weights(&root, WebVersion::V2);
        assert_eq!(paths(&violations), ["sensor.kitchen.web_ui_sorting_weight"]);
    }

    #[test]
    fn test_weight_in_sequence_element() {
        let root = tree(serde_json::json!({
            "switch": [
                {"name": "a"},
                {"name": "b", "web_ui_sorting_weight": 20},
            ],
        }));
        let violations = validate_sorting_weights(&root, WebVersion::V2);
        assert_eq!(paths(&violations), ["switch[1].web_ui_sorting_weight"]);
    }

    #[test]
    fn test_multiple_violations_in_preorder() {
        let root = tree(serde_json::json!({
            "binary_sensor": [
                {"web_ui_sorting_weight": 1},
                {"web_ui_sorting_weight": 2},
            ],
            "light": {
                "web_ui_sorting_weight": 3,
                "effects": {"web_ui_sorting_weight": 4},
            },
        }));
        let violations = validate_sorting_weights(&root, WebVersion::V1);
        // serde_json maps iterate in key order; the walk itself is
        // parent-before-child, elements in index order.
        assert_eq!(
            paths(&violations),
            [
                "binary_sensor[0].web_ui_sorting_weight",
                "binary_sensor[1].web_ui_sorting_weight",
                "light.web_ui_sorting_weight",
                "light.effects.web_ui_sorting_weight",
            ]
        );
    }

    #[test]
    fn test_mapping_valued_weight_still_flagged_once() {
        // Degenerate shape: the forbidden key's own value is a mapping.
        // The key location is flagged, and the walk continues into the
        // value, flagging any further offenders inside it.
        let root = tree(serde_json::json!({
            "web_ui_sorting_weight": {"web_ui_sorting_weight": 1},
        }));
        let violations = validate_sorting_weights(&root, WebVersion::V2);
        assert_eq!(
            paths(&violations),
            [
                "web_ui_sorting_weight",
                "web_ui_sorting_weight.web_ui_sorting_weight",
            ]
        );
    }

    #[test]
    fn test_version_3_allows_weights_everywhere() {
        let root = tree(serde_json::json!({
            "sensor": [{"web_ui_sorting_weight": 1}],
            "web_ui_sorting_weight": 2,
        }));
        assert!(validate_sorting_weights(&root, WebVersion::V3).is_empty());
    }

    #[test]
    fn test_violation_display() {
        let root = tree(serde_json::json!({
            "fan": {"web_ui_sorting_weight": 1},
        }));
        let violations = validate_sorting_weights(&root, WebVersion::V2);
        assert_eq!(
            violations[0].to_string(),
            "fan.web_ui_sorting_weight: sorting weight on entities is not supported in web UI version 2"
        );
    }
}
