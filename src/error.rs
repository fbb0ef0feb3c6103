//! Error taxonomy for the inference core.

use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while validating input or running a model.
///
/// Everything except [`InferError::ArtifactLoad`] and [`InferError::Inference`]
/// is a client error: the request named an unregistered model or carried data
/// that cannot be shaped into the tensor the models expect. `ArtifactLoad` only
/// occurs at startup and is fatal; the server never runs with a partial
/// registry.
#[derive(Error, Debug)]
pub enum InferError {
    #[error("unknown model name: {name} (choose from LSTM, CNN, CNN+LSTM)")]
    UnknownModel { name: String },

    #[error(
        "input must reshape to ({expected_rows}, {expected_cols}), got {actual} values"
    )]
    ShapeMismatch {
        expected_rows: usize,
        expected_cols: usize,
        actual: usize,
    },

    #[error("incorrect number of columns: expected {expected}, got {actual}")]
    ColumnCountMismatch { expected: usize, actual: usize },

    #[error("not enough time steps: expected at least {expected} rows, got {actual}")]
    InsufficientRows { expected: usize, actual: usize },

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("failed to load model artifact {}: {source}", path.display())]
    ArtifactLoad {
        path: PathBuf,
        #[source]
        source: ort::Error,
    },

    #[error("inference failed: {0}")]
    Inference(String),
}

pub type Result<T> = std::result::Result<T, InferError>;
