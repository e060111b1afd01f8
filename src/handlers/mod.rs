pub mod alerts;
pub mod health;
pub mod incidents;
pub mod kits;
pub mod newsletter;
pub mod safe_spots;
pub mod upload;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    PayloadTooLarge(String),
    /// `message` is shown to the client; `source` is only logged.
    #[error("{message}")]
    Internal {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    /// For `map_err`: wraps any error under a client-facing message.
    pub fn internal<E: Into<anyhow::Error>>(message: &'static str) -> impl FnOnce(E) -> AppError {
        move |e| AppError::Internal { message, source: e.into() }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal { message: "Internal server error", source: err }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge("Request body too large".to_string());
        }
        AppError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(format!("Invalid query string: {}", rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Internal { message, source } => {
                tracing::error!(error = ?source, "{}", message);
            }
            other => tracing::warn!(status = status.as_u16(), "{}", other),
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Returns the field's value or a `"<field> is required"` error.
pub(crate) fn required<T>(value: Option<T>, field: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::bad_request(format!("{} is required", field)))
}

/// Like [`required`], but blank strings count as missing.
pub(crate) fn required_text(value: Option<String>, field: &str) -> Result<String, AppError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(AppError::bad_request(format!("{} is required", field))),
    }
}

/// Identifiers that do not parse can never match a record.
pub(crate) fn parse_id(raw: &str, not_found: &'static str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::not_found(not_found))
}

pub async fn not_found() -> AppError {
    AppError::not_found("Not found")
}
