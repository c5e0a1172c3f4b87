//! Application error types and HTTP response mapping.
//!
//! Defines `AppError` for every failure the tree manager, the repositories
//! and the server can report, and implements Axum's `IntoResponse` so the
//! server answers with JSON error bodies. `HttpRepository` maps the status
//! codes back into the same variants on the client side.
//!
//! Error mappings:
//! - `Validation` → 400
//! - `Permission` → 403
//! - `NotFound` → 404
//! - `Structural` → 422
//! - `Http` → 502
//! - `Serialization`, `Io`, `Internal` → 500

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid operation: {0}")]
    Validation(String),

    #[error("Permission denied: {0}")]
    Permission(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid structure: {0}")]
    Structural(String),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Permission(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Structural(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Http(_) => StatusCode::BAD_GATEWAY,
            AppError::Serialization(_) | AppError::Io(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The message without the kind prefix.
    pub fn detail(&self) -> String {
        match self {
            AppError::Validation(msg)
            | AppError::Permission(msg)
            | AppError::NotFound(msg)
            | AppError::Structural(msg)
            | AppError::Internal(msg) => msg.clone(),
            AppError::Http(e) => e.to_string(),
            AppError::Serialization(e) => e.to_string(),
            AppError::Io(e) => e.to_string(),
        }
    }

    /// Rebuild an error from a status code and detail sent by the server.
    pub fn from_status(status: StatusCode, detail: String) -> Self {
        match status {
            StatusCode::BAD_REQUEST => AppError::Validation(detail),
            StatusCode::FORBIDDEN => AppError::Permission(detail),
            StatusCode::NOT_FOUND => AppError::NotFound(detail),
            StatusCode::UNPROCESSABLE_ENTITY => AppError::Structural(detail),
            _ => AppError::Internal(format!("HTTP {}: {}", status, detail)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = Json(json!({
            "error": self.to_string(),
            "detail": self.detail(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
