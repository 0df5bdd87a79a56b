//! Core type definitions for flat record collections.
//!
//! This module contains the record representation, the canonical key used to
//! compare identifiers, and the configurable field names.

use core::fmt;
use std::fmt::Display;

use serde_json::{Map, Value};

use crate::error::{Result, TreeError};

/// A flat input datum. Only the configured key, parent and layer fields are
/// interpreted; everything else is carried through untouched.
pub type Record = Map<String, Value>;

/// Hashable canonical form of an identifier value.
///
/// Two values are the same key iff their JSON encodings are identical, so the
/// string `"1"` and the number `1` are different keys. Whole-valued floats are
/// encoded as integers first, making `1.0` and `1` the same key. A missing
/// field is the same key as an explicit `null`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey(String);

/// Largest magnitude below which every whole `f64` is an exact integer.
const EXACT_FLOAT_BOUND: f64 = 9_007_199_254_740_992.0;

impl RecordKey {
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Number(number)) if number.is_f64() => {
                let float = number.as_f64().unwrap_or(f64::NAN);
                if float.fract() == 0.0 && float.abs() < EXACT_FLOAT_BOUND {
                    RecordKey((float as i64).to_string())
                } else {
                    RecordKey(number.to_string())
                }
            }
            Some(other) => RecordKey(other.to_string()),
            None => RecordKey(Value::Null.to_string()),
        }
    }

    /// Reads `field` from `record` and canonicalizes it.
    pub fn of(record: &Record, field: &str) -> Self {
        Self::from_value(record.get(field))
    }
}

impl Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Names of the fields the algorithms interpret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNames {
    /// Identifier field, unique within a collection
    pub key: String,
    /// Parent identifier field, same domain as `key`
    pub parent: String,
    /// Depth field, only read by the layer-ordered builder
    pub layer: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            key: "id".to_string(),
            parent: "pid".to_string(),
            layer: "layer".to_string(),
        }
    }
}

impl FieldNames {
    /// Loads field name overrides from `TREE_KEY_FIELD`, `TREE_PARENT_FIELD`
    /// and `TREE_LAYER_FIELD`, falling back to the defaults when unset.
    ///
    /// # Returns
    /// * `Result<Self>` - The resolved names, or an error if a variable is set but blank
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let defaults = Self::default();
        Ok(Self {
            key: field_from_env("TREE_KEY_FIELD", defaults.key)?,
            parent: field_from_env("TREE_PARENT_FIELD", defaults.parent)?,
            layer: field_from_env("TREE_LAYER_FIELD", defaults.layer)?,
        })
    }
}

fn field_from_env(var: &str, default: String) -> Result<String> {
    match dotenv::var(var) {
        Ok(value) if value.trim().is_empty() => Err(TreeError::InvalidEnvVar(format!(
            "{} must not be empty",
            var
        ))),
        Ok(value) => Ok(value.trim().to_string()),
        Err(_) => Ok(default),
    }
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn keys_compare_strictly() {
        let number = RecordKey::from_value(Some(&json!(1)));
        assert_eq!(number, RecordKey::from_value(Some(&json!(1))));
        assert_ne!(number, RecordKey::from_value(Some(&json!("1"))));
    }

    #[test]
    fn whole_floats_match_integers() {
        let one = RecordKey::from_value(Some(&json!(1)));
        assert_eq!(RecordKey::from_value(Some(&json!(1.0))), one);
        assert_eq!(
            RecordKey::from_value(Some(&json!(-0.0))),
            RecordKey::from_value(Some(&json!(0)))
        );
        assert_ne!(RecordKey::from_value(Some(&json!(1.5))), one);
    }

    #[test]
    fn missing_field_is_null_key() {
        let record = test_support::records(json!([{"id": 1}])).remove(0);
        assert_eq!(RecordKey::of(&record, "pid"), RecordKey::from_value(None));
        assert_eq!(RecordKey::from_value(None), RecordKey::from_value(Some(&Value::Null)));
    }

    #[test]
    fn field_overrides_are_trimmed_and_validated() {
        std::env::set_var("FLAT_FOREST_TEST_FIELD_SET", "  code ");
        std::env::set_var("FLAT_FOREST_TEST_FIELD_BLANK", "   ");
        std::env::remove_var("FLAT_FOREST_TEST_FIELD_UNSET");

        assert_eq!(
            field_from_env("FLAT_FOREST_TEST_FIELD_SET", "id".to_string()).unwrap(),
            "code"
        );
        assert_eq!(
            field_from_env("FLAT_FOREST_TEST_FIELD_UNSET", "pid".to_string()).unwrap(),
            "pid"
        );
        let err = field_from_env("FLAT_FOREST_TEST_FIELD_BLANK", "layer".to_string()).unwrap_err();
        assert!(
            matches!(err, TreeError::InvalidEnvVar(ref message) if message.contains("FLAT_FOREST_TEST_FIELD_BLANK"))
        );
    }

    #[test]
    fn default_field_names() {
        let fields = FieldNames::default();
        assert_eq!(fields.key, "id");
        assert_eq!(fields.parent, "pid");
        assert_eq!(fields.layer, "layer");
    }
}
