use tracing::debug;

use crate::{
    store::NodeStore,
    tree::TreeNode,
    types::{FieldNames, Record},
};

/// Materializes one level of the hierarchy from a flat collection.
///
/// With `parent` set to `None` the roots are returned, i.e. the records whose
/// parent is absent from `records`. Otherwise the records naming `parent` as
/// their parent are returned. Nodes keep input order and are left
/// unexpanded, with `children` not materialized.
///
/// # Arguments
/// * `records` - A page of flat records, not necessarily the whole hierarchy
/// * `parent` - The node being expanded, or `None` for the root level
/// * `fields` - Key and parent field names
pub fn load_children(
    records: &[Record],
    parent: Option<&TreeNode>,
    fields: &FieldNames,
) -> Vec<TreeNode> {
    let store = NodeStore::new(records, fields);

    let selected = match parent {
        None => store.roots(),
        Some(parent) => store.children_of(&parent.key(&fields.key)).to_vec(),
    };
    let parent_path = parent.map(|p| p.path_nodes.as_slice()).unwrap_or(&[]);

    let nodes: Vec<TreeNode> = selected
        .into_iter()
        .map(|index| {
            let mut node = TreeNode::from_record(store.record(index));
            // Leafness is judged against the whole input, not the selected level
            node.is_leaf = !store.declares_children(store.key(index));
            node.is_root = parent.is_none();
            node.have_expanded = Some(false);
            node.path_nodes = parent_path.to_vec();
            node.path_nodes.push(node.snapshot());
            node
        })
        .collect();

    debug!(
        records = records.len(),
        loaded = nodes.len(),
        root_level = parent.is_none(),
        "Loaded children"
    );
    nodes
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::test_support::{records, sample};

    #[test]
    fn loads_root_level() {
        let roots = load_children(&sample(), None, &FieldNames::default());

        assert_eq!(roots.len(), 1);
        let root = &roots[0];
        assert_eq!(root.record["id"], json!(1));
        assert!(root.is_root);
        assert!(!root.is_leaf);
        assert_eq!(root.have_expanded, Some(false));
        assert!(root.children.is_none());
        assert_eq!(root.path_nodes.len(), 1);
    }

    #[test]
    fn loads_children_of_node() {
        let fields = FieldNames::default();
        let roots = load_children(&sample(), None, &fields);
        let children = load_children(&sample(), Some(&roots[0]), &fields);

        assert_eq!(children.len(), 2);
        assert_eq!(children[0].record["id"], json!(2));
        assert!(!children[0].is_leaf);
        assert_eq!(children[1].record["id"], json!(3));
        assert!(children[1].is_leaf);
        assert!(children.iter().all(|child| !child.is_root && child.have_expanded == Some(false)));

        let grandchildren = load_children(&sample(), Some(&children[0]), &fields);
        let path: Vec<_> = grandchildren[0].path_nodes.iter().map(|r| r["id"].clone()).collect();
        assert_eq!(path, vec![json!(1), json!(2), json!(4)]);
    }

    #[test]
    fn leafness_uses_full_page() {
        // Node 2's only child is a duplicate key that dedup drops.
        let page = records(json!([
            {"id": 1, "pid": 0},
            {"id": 2, "pid": 1},
            {"id": 1, "pid": 2},
        ]));
        let fields = FieldNames::default();
        let roots = load_children(&page, None, &fields);
        let children = load_children(&page, Some(&roots[0]), &fields);

        assert_eq!(children.len(), 1);
        assert!(!children[0].is_leaf);
    }

    #[test]
    fn stale_decoration_is_reset() {
        let page = records(json!([
            {"id": 1, "pid": 0, "haveExpanded": true, "children": [{"id": 5}]},
        ]));
        let roots = load_children(&page, None, &FieldNames::default());

        assert_eq!(roots[0].have_expanded, Some(false));
        assert!(roots[0].children.is_none());
        assert!(!roots[0].record.contains_key("children"));
    }

    #[test]
    fn unknown_parent_has_no_children() {
        let page = sample();
        let stranger = TreeNode::from_record(&records(json!([{"id": 99}])).remove(0));
        assert!(load_children(&page, Some(&stranger), &FieldNames::default()).is_empty());
        assert!(load_children(&[], None, &FieldNames::default()).is_empty());
    }
}
