use std::path::PathBuf;

use thiserror::Error;

/// Structured decoding of a manifest failed. Recovered inside the extractor.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object at the top level, found {0}")]
    NotAnObject(&'static str),
}

/// The model could not produce a verdict. Recovered by the rule-based fallback.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassifierError {
    #[error("no trained model is loaded")]
    Unavailable,

    #[error("feature row has {actual} columns, model expects {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("model produced an invalid output: {0}")]
    InvalidOutput(String),
}

/// Loading the trained model artifact failed.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed model artifact: {0}")]
    Json(#[from] serde_json::Error),

    #[error("inconsistent model artifact: {0}")]
    Invalid(String),
}
