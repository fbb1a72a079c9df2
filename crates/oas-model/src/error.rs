//! # Model Error Types
//!
//! Errors surfaced by document (de)serialization. The traversal and mutation
//! API itself is infallible; only the JSON/YAML boundary can fail.

use thiserror::Error;

/// Error converting a [`Document`](crate::Document) to or from text.
#[derive(Error, Debug)]
pub enum ModelError {
    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization or deserialization failed.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
