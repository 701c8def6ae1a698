//! Error types for lager-core.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LagerError {
    #[error("expected {expected} values (one per label), got {got}")]
    Arity { expected: usize, got: usize },

    #[error("label not found: {0}")]
    LabelNotFound(String),

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("row index {index} out of range for buffer of {capacity} rows")]
    IndexOutOfRange { index: isize, capacity: usize },

    #[error("invalid labels: {0}")]
    InvalidLabels(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("visualizer error: {0}")]
    Visualizer(String),
}

pub type Result<T> = std::result::Result<T, LagerError>;
