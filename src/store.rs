//! De-duplicated, indexed view over a flat record collection.
//!
//! Every builder and loader goes through a [`NodeStore`] so that identifier
//! uniqueness is enforced in one place: the first record carrying a key wins,
//! later duplicates are silently dropped.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::types::{FieldNames, Record, RecordKey};

/// Borrowed, de-duplicated view of a record collection with key and parent
/// indexes.
pub struct NodeStore<'a> {
    fields: &'a FieldNames,
    records: Vec<&'a Record>,
    keys: Vec<RecordKey>,
    parents: Vec<RecordKey>,
    by_key: HashMap<RecordKey, usize>,
    children: HashMap<RecordKey, Vec<usize>>,
    /// Parent keys declared anywhere in the input, duplicates included
    declared_parents: HashSet<RecordKey>,
}

impl<'a> NodeStore<'a> {
    pub fn new(source: &'a [Record], fields: &'a FieldNames) -> Self {
        let mut records = Vec::with_capacity(source.len());
        let mut keys = Vec::with_capacity(source.len());
        let mut parents = Vec::with_capacity(source.len());
        let mut by_key = HashMap::with_capacity(source.len());
        let mut children: HashMap<RecordKey, Vec<usize>> = HashMap::new();
        let mut declared_parents = HashSet::with_capacity(source.len());

        for record in source {
            let parent = RecordKey::of(record, &fields.parent);
            declared_parents.insert(parent.clone());

            let key = RecordKey::of(record, &fields.key);
            if by_key.contains_key(&key) {
                continue;
            }

            let index = records.len();
            by_key.insert(key.clone(), index);
            children.entry(parent.clone()).or_default().push(index);
            records.push(record);
            keys.push(key);
            parents.push(parent);
        }

        let dropped = source.len() - records.len();
        if dropped > 0 {
            debug!(dropped, kept = records.len(), "Dropped duplicate records");
        }

        Self {
            fields,
            records,
            keys,
            parents,
            by_key,
            children,
            declared_parents,
        }
    }

    pub fn fields(&self) -> &FieldNames {
        self.fields
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn record(&self, index: usize) -> &'a Record {
        self.records[index]
    }

    pub fn key(&self, index: usize) -> &RecordKey {
        &self.keys[index]
    }

    /// Index of the record whose key equals this record's parent key, if any.
    /// A self-parenting record resolves to itself.
    pub fn parent_of(&self, index: usize) -> Option<usize> {
        self.by_key.get(&self.parents[index]).copied()
    }

    pub fn contains(&self, key: &RecordKey) -> bool {
        self.by_key.contains_key(key)
    }

    /// Records with no parent present in the collection, in input order.
    pub fn roots(&self) -> Vec<usize> {
        (0..self.len())
            .filter(|&index| self.parent_of(index).is_none())
            .collect()
    }

    /// Records whose parent key equals `key`, in input order.
    pub fn children_of(&self, key: &RecordKey) -> &[usize] {
        self.children.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether any record of the full input, dropped duplicates included,
    /// names `key` as its parent.
    pub fn declares_children(&self, key: &RecordKey) -> bool {
        self.declared_parents.contains(key)
    }
}
