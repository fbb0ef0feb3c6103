//! Error-to-response mapping for the HTTP layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::error::InferError;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Infer(#[from] InferError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::Infer(err) => match &err {
                // Validation failures carry their message verbatim so the
                // client can see what was wrong with the request.
                InferError::UnknownModel { .. }
                | InferError::ShapeMismatch { .. }
                | InferError::ColumnCountMismatch { .. }
                | InferError::InsufficientRows { .. }
                | InferError::MalformedInput(_) => (StatusCode::BAD_REQUEST, err.to_string()),
                InferError::Inference(_) | InferError::ArtifactLoad { .. } => {
                    tracing::error!(detail = %err, "inference failed");
                    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
                }
            },
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
