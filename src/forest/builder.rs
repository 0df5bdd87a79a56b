//! Assembly of flat record collections into forests.
//!
//! Two strategies are provided. [`build_from_roots`] needs no ordering and
//! grows each tree downwards from the records whose parent is absent.
//! [`build_ordered`] sorts by a depth field and links every node to its parent
//! through a lookup table.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    error::{Result, TreeError},
    store::NodeStore,
    tree::{Forest, TreeNode},
    types::{FieldNames, Record, RecordKey},
};

/// Builds a forest by locating the roots first and recursively collecting
/// each node's children.
///
/// Roots and children keep their input order. Every node is fully
/// materialized: leaves carry an empty `children` list.
///
/// # Returns
/// * `Result<Forest>` - The forest, or `MalformedHierarchy` if some records
///   sit on a parent cycle and can never be reached from a root
pub fn build_from_roots(records: &[Record], fields: &FieldNames) -> Result<Forest> {
    let store = NodeStore::new(records, fields);
    let roots = store.roots();
    let mut placed = vec![false; store.len()];

    let forest: Forest = roots
        .iter()
        .map(|&root| {
            let mut node = TreeNode::from_record(store.record(root));
            node.is_root = true;
            node.path_nodes = vec![node.snapshot()];
            attach_children(&store, root, node, &mut placed)
        })
        .collect::<Result<_>>()?;

    ensure_all_placed(&store, &placed)?;

    debug!(
        records = records.len(),
        nodes = store.len(),
        roots = forest.len(),
        "Built forest from roots"
    );
    Ok(forest)
}

fn attach_children(
    store: &NodeStore<'_>,
    index: usize,
    mut node: TreeNode,
    placed: &mut [bool],
) -> Result<TreeNode> {
    if placed[index] {
        return Err(malformed(store.key(index)));
    }
    placed[index] = true;

    let children = store
        .children_of(store.key(index))
        .iter()
        .map(|&child| {
            let mut child_node = TreeNode::from_record(store.record(child));
            child_node.path_nodes = node.path_nodes.clone();
            child_node.path_nodes.push(child_node.snapshot());
            attach_children(store, child, child_node, placed)
        })
        .collect::<Result<Vec<_>>>()?;

    node.is_leaf = children.is_empty();
    node.children = Some(children);
    Ok(node)
}

/// Builds a forest from records carrying a depth field.
///
/// Records are sorted by ascending layer (stable), indexed by key, then each
/// one is linked under its parent. Records whose parent is absent become
/// roots. Children appear in layer order, ties in input order.
///
/// # Returns
/// * `Result<Forest>` - The forest, `MissingLayer` if a record has no usable
///   layer, or `MalformedHierarchy` on a parent cycle
pub fn build_ordered(records: &[Record], fields: &FieldNames) -> Result<Forest> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let store = NodeStore::new(records, fields);

    let mut layers = Vec::with_capacity(store.len());
    for index in 0..store.len() {
        layers.push(layer_of(store.record(index), store.key(index), &fields.layer)?);
    }
    let mut order: Vec<usize> = (0..store.len()).collect();
    order.sort_by_key(|&index| layers[index]);

    // Lookup table, then a single linking pass in sorted order.
    let mut nodes: HashMap<usize, TreeNode> = order
        .iter()
        .map(|&index| {
            let mut node = TreeNode::from_record(store.record(index));
            node.is_leaf = true;
            node.children = Some(Vec::new());
            (index, node)
        })
        .collect();

    let mut roots = Vec::new();
    let mut links: HashMap<usize, Vec<usize>> = HashMap::new();
    let mut paths: HashMap<usize, Vec<Record>> = HashMap::with_capacity(store.len());

    for &index in &order {
        let path = path_of(&store, index, &mut paths)?;
        let node = nodes.get_mut(&index).ok_or_else(|| malformed(store.key(index)))?;
        node.path_nodes = path;

        match store.parent_of(index) {
            Some(parent) => {
                links.entry(parent).or_default().push(index);
                if let Some(parent_node) = nodes.get_mut(&parent) {
                    parent_node.is_leaf = false;
                }
            }
            None => {
                node.is_root = true;
                roots.push(index);
            }
        }
    }

    let mut placed = vec![false; store.len()];
    let forest = roots
        .iter()
        .map(|&root| assemble(&store, root, &mut nodes, &links, &mut placed))
        .collect::<Result<Forest>>()?;

    ensure_all_placed(&store, &placed)?;

    debug!(
        records = records.len(),
        nodes = store.len(),
        roots = forest.len(),
        "Built layer-ordered forest"
    );
    Ok(forest)
}

fn layer_of(record: &Record, key: &RecordKey, layer_field: &str) -> Result<u64> {
    record
        .get(layer_field)
        .and_then(Value::as_u64)
        .ok_or_else(|| TreeError::MissingLayer {
            key: key.clone(),
            field: layer_field.to_string(),
        })
}

/// Breadcrumb of `index`: its parent's breadcrumb plus its own snapshot.
/// Walks up the parent chain for ancestors not yet resolved, so a violated
/// layer ordering still yields correct paths.
fn path_of(
    store: &NodeStore<'_>,
    index: usize,
    paths: &mut HashMap<usize, Vec<Record>>,
) -> Result<Vec<Record>> {
    let mut pending = vec![index];
    let mut current = index;
    while let Some(parent) = store.parent_of(current) {
        if paths.contains_key(&parent) {
            break;
        }
        if pending.contains(&parent) {
            return Err(malformed(store.key(parent)));
        }
        pending.push(parent);
        current = parent;
    }

    for &unresolved in pending.iter().rev() {
        let mut path = store
            .parent_of(unresolved)
            .and_then(|parent| paths.get(&parent).cloned())
            .unwrap_or_default();
        path.push(TreeNode::from_record(store.record(unresolved)).snapshot());
        paths.insert(unresolved, path);
    }

    paths.get(&index).cloned().ok_or_else(|| malformed(store.key(index)))
}

fn assemble(
    store: &NodeStore<'_>,
    index: usize,
    nodes: &mut HashMap<usize, TreeNode>,
    links: &HashMap<usize, Vec<usize>>,
    placed: &mut [bool],
) -> Result<TreeNode> {
    if placed[index] {
        return Err(malformed(store.key(index)));
    }
    placed[index] = true;

    let mut node = nodes.remove(&index).ok_or_else(|| malformed(store.key(index)))?;
    let children = links
        .get(&index)
        .map(Vec::as_slice)
        .unwrap_or(&[])
        .iter()
        .map(|&child| assemble(store, child, nodes, links, placed))
        .collect::<Result<Vec<_>>>()?;
    node.children = Some(children);
    Ok(node)
}

/// Every record must be reachable from a root. An unreachable record either
/// lies on a parent cycle or descends from one; the cycle member is reported.
fn ensure_all_placed(store: &NodeStore<'_>, placed: &[bool]) -> Result<()> {
    let Some(orphan) = placed.iter().position(|&reached| !reached) else {
        return Ok(());
    };

    let mut seen = vec![false; store.len()];
    let mut current = orphan;
    while !seen[current] {
        seen[current] = true;
        match store.parent_of(current) {
            Some(parent) => current = parent,
            None => break,
        }
    }
    Err(malformed(store.key(current)))
}

fn malformed(key: &RecordKey) -> TreeError {
    warn!(key = %key, "Malformed hierarchy: parent chain cycles");
    TreeError::MalformedHierarchy { key: key.clone() }
}
