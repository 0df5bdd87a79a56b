use thiserror::Error;

use crate::types::RecordKey;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("Invalid environment variable value: {0}")]
    InvalidEnvVar(String),

    #[error("Malformed hierarchy: record {key} lies on a parent cycle")]
    MalformedHierarchy { key: RecordKey },

    #[error("Record {key} has no non-negative integer `{field}` value")]
    MissingLayer { key: RecordKey, field: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TreeError>;
