use std::collections::VecDeque;

use crate::tree::TreeNode;

/// Controls the shape of flattened output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlattenOptions {
    /// Keep each node's `children` in the output. When false every emitted
    /// node has `children` set to `None`.
    pub include_children: bool,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            include_children: true,
        }
    }
}

/// Serializes a forest into a flat list, breadth-first, roots in order.
/// Every node appears exactly once, in dequeue order.
pub fn flatten(forest: &[TreeNode], options: FlattenOptions) -> Vec<TreeNode> {
    let mut queue: VecDeque<&TreeNode> = forest.iter().collect();
    let mut out = Vec::new();

    while let Some(node) = queue.pop_front() {
        queue.extend(node.child_nodes());
        if options.include_children {
            out.push(node.clone());
        } else {
            out.push(node.with_children(None));
        }
    }

    out
}
