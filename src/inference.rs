//! Inference dispatch: model lookup, blocking prediction, threshold labeling.

use ndarray::Array3;
use serde::Serialize;

use crate::error::InferError;
use crate::model::{ModelRegistry, ModelVariant};

/// Cutoff applied to the first model output when deriving the label. A score
/// of exactly 0.5 is Damaged.
pub const DAMAGE_THRESHOLD: f32 = 0.5;

/// Binary category derived from the model's continuous output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Label {
    Damaged,
    Undamaged,
}

impl Label {
    pub fn from_score(score: f32) -> Self {
        if score >= DAMAGE_THRESHOLD {
            Label::Damaged
        } else {
            Label::Undamaged
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Damaged => "Damaged",
            Label::Undamaged => "Undamaged",
        }
    }
}

/// Raw model output plus the thresholded label. Both endpoints return the
/// same result shape.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub label: Label,
    pub score: Vec<f32>,
}

/// Run single-batch inference for `variant` on a normalized tensor.
///
/// Blocks the calling context for the duration of the model call; no timeout
/// or cancellation exists at this layer.
pub fn infer(
    registry: &ModelRegistry,
    variant: ModelVariant,
    tensor: &Array3<f32>,
) -> Result<Prediction, InferError> {
    let model = registry.get(variant);
    let score = model.predict(tensor)?;
    let first = *score
        .first()
        .ok_or_else(|| InferError::Inference("model returned empty output".to_string()))?;

    Ok(Prediction {
        label: Label::from_score(first),
        score,
    })
}
