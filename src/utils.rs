//! Utility functions for loading and displaying record collections.
//!
//! This module provides helper functions for:
//! - Reading flat records from JSON files
//! - Pretty printing forests

use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::{
    error::{Result, TreeError},
    tree::TreeNode,
    types::Record,
};

/// Reads a JSON array of objects from `path`.
///
/// # Returns
/// * `Result<Vec<Record>>` - The records in file order, or an error if the file
///   is unreadable or not an array of objects
pub fn read_records(path: &Path) -> Result<Vec<Record>> {
    let body = std::fs::read_to_string(path)?;
    parse_records(&body)
}

/// Parses a JSON array of objects.
pub fn parse_records(body: &str) -> Result<Vec<Record>> {
    let values: Vec<Value> = serde_json::from_str(body)?;
    values
        .into_iter()
        .map(|value| match value {
            Value::Object(record) => Ok(record),
            other => Err(TreeError::Json(serde::de::Error::custom(format!(
                "expected a record object, found {}",
                other
            )))),
        })
        .collect()
}

/// Pretty prints a forest, showing the hierarchy with indentation.
/// Each line shows the node's key and its leaf flag.
///
/// # Arguments
/// * `forest` - The roots to print
/// * `key_field` - Field to label nodes with
pub fn pretty_print_forest(forest: &[TreeNode], key_field: &str) {
    // Stack holds (node, depth) pairs
    let mut stack: Vec<(&TreeNode, usize)> = forest.iter().rev().map(|node| (node, 0)).collect();

    while let Some((node, depth)) = stack.pop() {
        let indent = " | ".repeat(depth);
        info!("{}Node {} (leaf: {})", indent, node.key(key_field), node.is_leaf);

        // Add children to the stack in reverse order (so they print in correct order)
        for child in node.child_nodes().iter().rev() {
            stack.push((child, depth + 1));
        }
    }
}
