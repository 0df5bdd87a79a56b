//! Read-only queries over built forests.

use std::collections::HashSet;

use serde_json::Value;

use crate::{
    tree::{Forest, TreeNode},
    types::RecordKey,
};

/// Returns the minimal sub-forest leading to every node whose key is in `ids`.
///
/// A matching node is included as-is, with whatever children it already has.
/// A non-matching node is included only if some descendant matches, as a copy
/// whose children are reduced to the matching branches.
pub fn find_by_ids(forest: &[TreeNode], ids: &[Value], key_field: &str) -> Forest {
    let wanted: HashSet<RecordKey> = ids
        .iter()
        .map(|id| RecordKey::from_value(Some(id)))
        .collect();
    if wanted.is_empty() {
        return Vec::new();
    }
    forest
        .iter()
        .filter_map(|node| path_to(node, &wanted, key_field))
        .collect()
}

fn path_to(node: &TreeNode, wanted: &HashSet<RecordKey>, key_field: &str) -> Option<TreeNode> {
    if wanted.contains(&node.key(key_field)) {
        return Some(node.clone());
    }

    let matched: Vec<TreeNode> = node
        .child_nodes()
        .iter()
        .filter_map(|child| path_to(child, wanted, key_field))
        .collect();

    if matched.is_empty() {
        None
    } else {
        Some(node.with_children(Some(matched)))
    }
}

/// Depth-first, pre-order, left-to-right search returning the first node the
/// predicate accepts.
pub fn find_first<'a, P>(forest: &'a [TreeNode], mut predicate: P) -> Option<&'a TreeNode>
where
    P: FnMut(&TreeNode) -> bool,
{
    let mut stack: Vec<&TreeNode> = forest.iter().rev().collect();

    while let Some(node) = stack.pop() {
        if predicate(node) {
            return Some(node);
        }
        // Reverse so the leftmost child is visited next
        stack.extend(node.child_nodes().iter().rev());
    }

    None
}

/// Finds the first node whose `key_field` equals `key`.
pub fn find_first_by_key<'a>(
    forest: &'a [TreeNode],
    key: &Value,
    key_field: &str,
) -> Option<&'a TreeNode> {
    let key = RecordKey::from_value(Some(key));
    find_first(forest, |node| node.key(key_field) == key)
}
