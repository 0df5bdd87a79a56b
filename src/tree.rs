//! Tree data structure for hierarchical record views.
//!
//! A [`TreeNode`] is a record decorated with traversal metadata: its children,
//! leaf and root flags, the root-to-self breadcrumb, and the UI expansion flag.
//! It serializes to the shape the picker widget consumes, with the record's own
//! fields flattened next to the decoration.

use serde::{Deserialize, Serialize};

use crate::types::{Record, RecordKey};

/// Field names owned by [`TreeNode`]. They are stripped from records when a
/// node is materialized so that stale decoration never leaks through.
pub const DECORATION_FIELDS: [&str; 5] =
    ["children", "isLeaf", "isRoot", "pathNodes", "haveExpanded"];

/// Ordered sequence of root nodes.
pub type Forest = Vec<TreeNode>;

/// A record together with its position in the hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    /// The record's own fields
    #[serde(flatten)]
    pub record: Record,
    /// `None` means not yet materialized, `Some(vec![])` means a known leaf
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
    #[serde(default)]
    pub is_leaf: bool,
    #[serde(default)]
    pub is_root: bool,
    /// Record snapshots from a root ancestor down to and including this node
    #[serde(default)]
    pub path_nodes: Vec<Record>,
    /// UI expansion flag. Only the lazy loader and the path reconstructor set
    /// it; bulk-built nodes leave it unset and omit it when serialized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub have_expanded: Option<bool>,
}

impl TreeNode {
    /// Creates an undecorated node from a record, dropping any decoration
    /// fields the record already carries.
    pub fn from_record(record: &Record) -> TreeNode {
        let mut record = record.clone();
        for field in DECORATION_FIELDS {
            record.remove(field);
        }

        TreeNode {
            record,
            children: None,
            is_leaf: false,
            is_root: false,
            path_nodes: Vec::new(),
            have_expanded: None,
        }
    }

    pub fn key(&self, key_field: &str) -> RecordKey {
        RecordKey::of(&self.record, key_field)
    }

    /// Snapshot of the record fields, as stored in `path_nodes`.
    pub fn snapshot(&self) -> Record {
        self.record.clone()
    }

    /// Copies everything but the children, which are replaced.
    pub fn with_children(&self, children: Option<Vec<TreeNode>>) -> TreeNode {
        TreeNode {
            record: self.record.clone(),
            children,
            is_leaf: self.is_leaf,
            is_root: self.is_root,
            path_nodes: self.path_nodes.clone(),
            have_expanded: self.have_expanded,
        }
    }

    /// Materialized children, empty when none are present.
    pub fn child_nodes(&self) -> &[TreeNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Number of materialized nodes in this subtree, itself included.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];

        while let Some(current) = stack.pop() {
            count += 1;
            stack.extend(current.child_nodes());
        }

        count
    }

    /// Distance from the root, derived from the breadcrumb.
    pub fn depth(&self) -> usize {
        self.path_nodes.len().saturating_sub(1)
    }
}
