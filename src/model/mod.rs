//! Model variants and the opaque prediction handle.

mod onnx;
mod registry;

pub use onnx::OnnxModel;
pub use registry::ModelRegistry;

use std::fmt;
use std::str::FromStr;

use ndarray::Array3;

use crate::error::InferError;

/// Rows of the temporal window every variant consumes.
pub const TIME_STEPS: usize = 20;

/// Numeric feature columns per time step.
pub const FEATURES: usize = 80;

/// The fixed set of served classifier variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelVariant {
    Lstm,
    Cnn,
    CnnLstm,
}

impl ModelVariant {
    pub const ALL: [ModelVariant; 3] = [
        ModelVariant::Lstm,
        ModelVariant::Cnn,
        ModelVariant::CnnLstm,
    ];

    /// Wire name used by the HTTP API.
    pub fn name(&self) -> &'static str {
        match self {
            ModelVariant::Lstm => "LSTM",
            ModelVariant::Cnn => "CNN",
            ModelVariant::CnnLstm => "CNN+LSTM",
        }
    }

    /// Artifact file name under the models directory.
    pub fn artifact(&self) -> &'static str {
        match self {
            ModelVariant::Lstm => "lstm.onnx",
            ModelVariant::Cnn => "cnn.onnx",
            ModelVariant::CnnLstm => "cnn_lstm.onnx",
        }
    }

    /// (time_steps, features) required after normalization. Every variant
    /// shares the same window; the shape rule is keyed here rather than
    /// special-cased per endpoint.
    pub fn input_shape(&self) -> (usize, usize) {
        (TIME_STEPS, FEATURES)
    }
}

impl fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelVariant {
    type Err = InferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LSTM" => Ok(ModelVariant::Lstm),
            "CNN" => Ok(ModelVariant::Cnn),
            "CNN+LSTM" => Ok(ModelVariant::CnnLstm),
            other => Err(InferError::UnknownModel {
                name: other.to_string(),
            }),
        }
    }
}

/// Opaque trained-model handle. Object-safe so tests can substitute stubs.
pub trait Model: Send + Sync {
    /// Single-batch prediction on a `(1, TIME_STEPS, FEATURES)` tensor.
    /// Blocking for the duration of the model call.
    fn predict(&self, input: &Array3<f32>) -> Result<Vec<f32>, InferError>;
}
