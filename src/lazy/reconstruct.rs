use tracing::debug;

use crate::{
    store::NodeStore,
    tree::TreeNode,
    types::{FieldNames, Record, RecordKey},
};

/// Rebuilds the flat, partially expanded strip of the hierarchy around a
/// known breadcrumb.
///
/// `path` runs root to target. It is walked target first, and each entry
/// contributes as follows:
/// - a lone entry: its own children, then itself;
/// - the target of a longer path: its own children, then its sibling group;
/// - an intermediate ancestor: its sibling group;
/// - the root of a longer path: itself.
///
/// Sibling groups are fetched from `records` and include the entry itself.
/// Every emitted node is unexpanded, carries no children or breadcrumb, and
/// has its leaf and root flags judged against `records`. The result is meant
/// to be rendered directly or fed back into a builder.
pub fn reconstruct(records: &[Record], path: &[Record], fields: &FieldNames) -> Vec<TreeNode> {
    let store = NodeStore::new(records, fields);
    let last = path.len().saturating_sub(1);
    let mut strip = Vec::new();

    for (index, entry) in path.iter().rev().enumerate() {
        let node = decorate(&store, entry);

        if path.len() == 1 {
            strip.extend(level(&store, &RecordKey::of(entry, &fields.key)));
            strip.push(node);
            continue;
        }
        if index == last {
            strip.push(node);
            continue;
        }
        if index == 0 {
            strip.extend(level(&store, &RecordKey::of(entry, &fields.key)));
        }
        strip.extend(level(&store, &RecordKey::of(entry, &fields.parent)));
    }

    debug!(
        records = records.len(),
        path_len = path.len(),
        emitted = strip.len(),
        "Reconstructed path strip"
    );
    strip
}

/// Nodes whose parent key equals `parent`, in input order.
fn level(store: &NodeStore<'_>, parent: &RecordKey) -> Vec<TreeNode> {
    store
        .children_of(parent)
        .iter()
        .map(|&index| decorate(store, store.record(index)))
        .collect()
}

fn decorate(store: &NodeStore<'_>, record: &Record) -> TreeNode {
    let fields = store.fields();
    let mut node = TreeNode::from_record(record);
    node.is_leaf = !store.declares_children(&RecordKey::of(record, &fields.key));
    node.is_root = !store.contains(&RecordKey::of(record, &fields.parent));
    node.have_expanded = Some(false);
    node
}
