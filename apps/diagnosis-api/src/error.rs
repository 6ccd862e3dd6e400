//! Error types for the diagnosis API

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use shared_types::ConfigurationError;

/// One per-field validation diagnostic, as returned in the 422 body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request payload")]
    Validation(Vec<FieldError>),

    #[error("fine table configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(vec![FieldError::new("body", rejection.body_text())])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(details) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "detail": details })),
            )
                .into_response(),
            ApiError::Configuration(err) => {
                // A table defect is a deployment problem, not a client one;
                // log it loudly and keep the body generic.
                tracing::error!("fine table defect: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "configuration error", "status": 500 })),
                )
                    .into_response()
            }
            ApiError::Internal(err) => {
                tracing::error!("internal error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal error", "status": 500 })),
                )
                    .into_response()
            }
        }
    }
}
