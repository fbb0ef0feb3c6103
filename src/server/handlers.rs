//! HTTP request handlers

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::inference;
use crate::model::ModelVariant;
use crate::normalize;

use super::error::{Result, ServerError};
use super::state::AppState;

#[derive(Deserialize)]
pub struct PredictRequest {
    pub model_name: String,
    pub input_data: Value,
}

/// Run inference on a raw nested numeric array.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<Value>> {
    let variant: ModelVariant = request.model_name.parse()?;
    let tensor = normalize::tensor_from_array(&request.input_data)?;
    let prediction = inference::infer(&state.registry, variant, &tensor)?;

    Ok(Json(json!({
        "model_used": variant.name(),
        "prediction": prediction.label,
        "score": prediction.score,
    })))
}

/// Run inference on an uploaded CSV window.
pub async fn predict_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<Value>> {
    let mut model_name: Option<String> = None;
    let mut file: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(e.to_string()))?
    {
        match field.name() {
            Some("model_name") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ServerError::BadRequest(e.to_string()))?;
                model_name = Some(text);
            }
            Some("file") => {
                let file_name = field.file_name().unwrap_or("data.csv").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ServerError::BadRequest(e.to_string()))?;
                file = Some((file_name, data));
            }
            _ => {}
        }
    }

    let model_name = model_name
        .ok_or_else(|| ServerError::BadRequest("missing form field: model_name".to_string()))?;
    let (file_name, data) =
        file.ok_or_else(|| ServerError::BadRequest("missing form field: file".to_string()))?;

    info!(
        file = %file_name,
        bytes = data.len(),
        model = %model_name,
        "received file for inference"
    );

    let variant: ModelVariant = model_name.parse()?;
    let tensor = normalize::tensor_from_csv(&data)?;
    let prediction = inference::infer(&state.registry, variant, &tensor)?;

    Ok(Json(json!({
        "model_used": variant.name(),
        "prediction": prediction.label,
        "score": prediction.score,
    })))
}

/// List the registered model variant names.
pub async fn list_models() -> Json<Value> {
    let models: Vec<&str> = ModelVariant::ALL.iter().map(|v| v.name()).collect();
    Json(json!({ "models": models }))
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
