//! Error types for Lectern server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed")]
    Validation(#[from] validator::ValidationErrors),

    #[error("{field} {message}")]
    Invalid { field: String, message: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Single-field domain violation, rendered as a field-keyed error map
    pub fn invalid(field: &str, message: &str) -> Self {
        AppError::Invalid {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Error response body for non-validation errors
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Build a Rails-style field→messages map from validator errors
fn validation_error_map(errors: &validator::ValidationErrors) -> Value {
    let map: serde_json::Map<String, Value> = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let messages: Vec<Value> = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                        .into()
                })
                .collect();
            (field.to_string(), Value::Array(messages))
        })
        .collect();
    Value::Object(map)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "not_found".to_string(),
                    message: msg.clone(),
                }),
            )
                .into_response(),
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(validation_error_map(errors)),
            )
                .into_response(),
            AppError::Invalid { field, message } => {
                let mut map = serde_json::Map::new();
                map.insert(field.clone(), json!([message]));
                (StatusCode::UNPROCESSABLE_ENTITY, Json(Value::Object(map))).into_response()
            }
            AppError::Conflict(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "base": [msg] })),
            )
                .into_response(),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "db_failure".to_string(),
                        message: "Database error".to_string(),
                    }),
                )
                    .into_response()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "internal".to_string(),
                        message: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
