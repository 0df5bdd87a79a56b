//! Edits over built forests.
//!
//! [`delete_first`] mutates the forest in place; [`filter_out`] returns a new
//! forest and leaves its input untouched.

use std::collections::HashSet;

use serde_json::Value;

use crate::{
    tree::{Forest, TreeNode},
    types::{Record, RecordKey},
};

/// Removes the first node whose key equals `target`'s key, with its subtree.
///
/// Each level's own list is scanned before descending into the children, in
/// order. The whole traversal stops at the first removal.
///
/// # Returns
/// * `bool` - Whether a node was removed; the forest is unchanged otherwise
pub fn delete_first(forest: &mut Forest, target: &Record, key_field: &str) -> bool {
    let key = RecordKey::of(target, key_field);
    delete_in(forest, &key, key_field)
}

fn delete_in(nodes: &mut Vec<TreeNode>, key: &RecordKey, key_field: &str) -> bool {
    if let Some(position) = nodes.iter().position(|node| node.key(key_field) == *key) {
        nodes.remove(position);
        return true;
    }

    nodes.iter_mut().any(|node| {
        node.children
            .as_mut()
            .is_some_and(|children| delete_in(children, key, key_field))
    })
}

/// Returns a copy of the forest without any node whose key is in `excluded`,
/// at any depth. Excluded nodes take their subtrees with them.
pub fn filter_out(forest: &[TreeNode], excluded: &[Value], key_field: &str) -> Forest {
    let excluded: HashSet<RecordKey> = excluded
        .iter()
        .map(|id| RecordKey::from_value(Some(id)))
        .collect();
    filter_level(forest, &excluded, key_field)
}

fn filter_level(nodes: &[TreeNode], excluded: &HashSet<RecordKey>, key_field: &str) -> Forest {
    nodes
        .iter()
        .filter(|node| !excluded.contains(&node.key(key_field)))
        .map(|node| {
            let children = node
                .children
                .as_deref()
                .map(|children| filter_level(children, excluded, key_field));
            node.with_children(children)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        forest::{builder::build_from_roots, query::find_first_by_key},
        types::test_support::{coded, coded_fields, records, sample},
        FieldNames,
    };

    fn forest() -> Forest {
        build_from_roots(&sample(), &FieldNames::default()).unwrap()
    }

    fn target(id: i64) -> Record {
        records(json!([{ "id": id }])).remove(0)
    }

    #[test]
    fn deletes_nested_node() {
        let mut forest = forest();
        assert!(delete_first(&mut forest, &target(4), "id"));

        assert!(find_first_by_key(&forest, &json!(4), "id").is_none());
        assert_eq!(forest[0].node_count(), 3);
        assert_eq!(forest[0].child_nodes()[0].children, Some(Vec::new()));
    }

    #[test]
    fn deletes_subtree_with_node() {
        let mut forest = forest();
        assert!(delete_first(&mut forest, &target(2), "id"));
        assert_eq!(forest[0].node_count(), 2);
        assert!(find_first_by_key(&forest, &json!(4), "id").is_none());
    }

    #[test]
    fn stops_after_first_removal() {
        let input = records(json!([
            {"id": 1, "pid": 0},
            {"id": 2, "pid": 0},
        ]));
        let mut forest = build_from_roots(&input, &FieldNames::default()).unwrap();
        // Plant a second node with key 9 under each root
        for root in forest.iter_mut() {
            root.children = Some(vec![TreeNode::from_record(&target(9))]);
        }

        assert!(delete_first(&mut forest, &target(9), "id"));
        assert!(forest[0].child_nodes().is_empty());
        assert_eq!(forest[1].child_nodes().len(), 1);
    }

    #[test]
    fn missing_target_is_noop() {
        let mut forest = forest();
        let before = forest.clone();
        assert!(!delete_first(&mut forest, &target(77), "id"));
        assert_eq!(forest, before);
    }

    #[test]
    fn custom_key_field_applies_at_every_depth() {
        let forest = build_from_roots(&coded(), &coded_fields()).unwrap();

        let filtered = filter_out(&forest, &[json!("c")], "code");
        assert_eq!(filtered[0].node_count(), 3);
        assert!(find_first_by_key(&filtered, &json!("c"), "code").is_none());
        assert_eq!(filtered[0].child_nodes()[0].children, Some(Vec::new()));

        let mut edited = forest.clone();
        let target = records(json!([{"code": "c", "id": 100}])).remove(0);
        assert!(delete_first(&mut edited, &target, "code"));
        assert_eq!(edited[0].node_count(), 3);
        assert!(find_first_by_key(&edited, &json!("b"), "code").is_some());
        assert!(find_first_by_key(&edited, &json!("c"), "code").is_none());
    }

    #[test]
    fn filter_out_clones() {
        let original = forest();
        let filtered = filter_out(&original, &[json!(3), json!(4)], "id");

        assert_eq!(filtered[0].node_count(), 2);
        assert_eq!(original[0].node_count(), 4);
        assert_eq!(filter_out(&filtered, &[json!(3), json!(4)], "id"), filtered);
    }

    #[test]
    fn filter_out_roots() {
        assert!(filter_out(&forest(), &[json!(1)], "id").is_empty());
        assert_eq!(filter_out(&forest(), &[], "id"), forest());
    }
}
