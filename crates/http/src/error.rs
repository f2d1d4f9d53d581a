//! Error handling for the handyhub HTTP layer
//!
//! Three outcomes cover every failing request: a malformed payload (400), a
//! key or filter that matched nothing (404), and anything the store reported
//! (500). Store driver detail is logged under a trace id but never leaves
//! the process in a response body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use handyhub_store::StoreError;

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    #[error("bad request: {message}")]
    BadRequest { message: String },

    #[error("not found: {message}")]
    NotFound { message: String },

    #[error("internal error: {message}")]
    Internal {
        message: String,
        cause: Option<anyhow::Error>,
    },
}

impl AppError {
    /// Malformed or undecodable payload.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// The requested key or filter matched nothing.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// A store call failed. `message` is what the client sees; the store
    /// error itself only reaches the logs.
    pub fn store(message: impl Into<String>, source: StoreError) -> Self {
        Self::Internal {
            message: message.into(),
            cause: Some(source.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let trace_id = Uuid::new_v4();
        let timestamp = OffsetDateTime::now_utc().to_string();

        let (status, code, message) = match self {
            AppError::BadRequest { message } => {
                (StatusCode::BAD_REQUEST, "bad_request", message)
            }
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, "not_found", message),
            AppError::Internal { message, cause } => {
                if let Some(cause) = &cause {
                    tracing::error!(
                        trace_id = %trace_id,
                        error = %cause,
                        "store-layer failure"
                    );
                }
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
            }
        };

        tracing::error!(
            trace_id = %trace_id,
            error_code = code,
            status_code = %status.as_u16(),
            "request error"
        );

        let error_response = json!({
            "error": {
                "code": code,
                "message": message,
                "trace_id": trace_id.to_string(),
                "timestamp": timestamp
            }
        });

        (status, Json(error_response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use std::time::Duration;

    #[test]
    fn bad_request_maps_to_400() {
        let response = AppError::bad_request("invalid payload").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = AppError::not_found("no book found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_failure_maps_to_500() {
        let err = AppError::store(
            "could not insert book",
            StoreError::DeadlineExceeded(Duration::from_secs(5)),
        );
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn client_message_does_not_carry_store_detail() {
        let err = AppError::store(
            "could not fetch books",
            StoreError::Backend("connection pool exhausted at 10.0.0.7".into()),
        );
        match &err {
            AppError::Internal { message, .. } => {
                assert_eq!(message, "could not fetch books");
            }
            other => panic!("expected Internal error, got {other:?}"),
        }
    }
}
