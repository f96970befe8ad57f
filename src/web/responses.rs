//! HTTP response types and utilities
//!
//! Success bodies are the plain JSON documents clients expect (`{ok, driver}`,
//! `{ok, message}`, the meal record itself). Every error becomes
//! `{ok: false, detail}` with a status derived from [`AppError`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::errors::AppError;

/// Body of every error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub detail: String,
}

impl ErrorResponse {
    pub fn new<S: Into<String>>(detail: S) -> Self {
        Self {
            ok: false,
            detail: detail.into(),
        }
    }
}

/// Convert AppError to appropriate HTTP response
pub fn handle_error(error: AppError) -> Response {
    let (status, message) = match &error {
        AppError::Validation { message } => (StatusCode::UNPROCESSABLE_ENTITY, message.clone()),
        AppError::NotFound { resource, id } => {
            (StatusCode::NOT_FOUND, format!("no {} stored for {}", resource, id))
        }
        AppError::BackendUnavailable { message } => (
            StatusCode::SERVICE_UNAVAILABLE,
            format!("storage backend unavailable: {}", message),
        ),
        AppError::Repository(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "storage operation failed".to_string(),
        ),
        AppError::Configuration { message } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("configuration error: {}", message),
        ),
    };

    if status.is_server_error() {
        error!(status = status.as_u16(), error = %error, "Request failed");
    } else {
        warn!(status = status.as_u16(), error = %error, "Request rejected");
    }

    (status, Json(ErrorResponse::new(message))).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        handle_error(self)
    }
}
