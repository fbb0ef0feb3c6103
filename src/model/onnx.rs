//! ONNX-backed model handle.

use std::path::Path;
use std::sync::Mutex;

use ndarray::Array3;
use ort::session::Session;
use tracing::info;

use crate::error::InferError;

use super::Model;

/// A loaded ONNX session. `Session::run` takes `&mut self`, so the session
/// sits behind a mutex; the registry shares one handle per variant.
pub struct OnnxModel {
    session: Mutex<Session>,
}

impl std::fmt::Debug for OnnxModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxModel").finish_non_exhaustive()
    }
}

impl OnnxModel {
    pub fn load(path: &Path) -> Result<Self, InferError> {
        let session = Session::builder()
            .and_then(|mut builder| builder.commit_from_file(path))
            .map_err(|source| InferError::ArtifactLoad {
                path: path.to_path_buf(),
                source,
            })?;
        info!(path = %path.display(), "loaded ONNX model");
        Ok(Self {
            session: Mutex::new(session),
        })
    }
}

impl Model for OnnxModel {
    fn predict(&self, input: &Array3<f32>) -> Result<Vec<f32>, InferError> {
        let shape = input.shape().to_vec();
        let flat: Vec<f32> = input.iter().copied().collect();
        let value = ort::value::Value::from_array((shape.as_slice(), flat))
            .map_err(|e| InferError::Inference(e.to_string()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| InferError::Inference("model session poisoned".to_string()))?;

        let outputs = session
            .run(ort::inputs![value])
            .map_err(|e| InferError::Inference(e.to_string()))?;

        let output_value = outputs
            .iter()
            .next()
            .map(|(_, v)| v)
            .ok_or_else(|| InferError::Inference("model produced no outputs".to_string()))?;
        let data = output_value
            .try_extract_tensor::<f32>()
            .map_err(|e| InferError::Inference(e.to_string()))?;

        Ok(data.1.to_vec())
    }
}
