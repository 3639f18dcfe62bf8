//! Typed API error for HTTP handlers.
//!
//! Converts domain errors into HTTP responses with a
//! `{"success": false, "message": ...}` body. Handlers return
//! `Result<Json<T>, ApiError>` instead of a bare `StatusCode`.

use applicant_ingest_service::ServiceError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::response_types::ErrorResponse;

#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request: unusable upload or query from the caller.
    BadRequest(String),
    /// 404 Not Found.
    NotFound(String),
    /// 429 Too Many Requests.
    TooManyRequests(String),
    /// 500 Internal Server Error. `detail` is always logged and shown to
    /// the client only when `expose` is set.
    Internal { context: &'static str, detail: String, expose: bool },
}

impl ApiError {
    /// Maps a service failure. 500 messages are `context`, followed by the
    /// error text when `expose_detail` is set.
    pub fn service(context: &'static str, err: ServiceError, expose_detail: bool) -> Self {
        if err.is_client_error() {
            Self::BadRequest(err.to_string())
        } else if err.is_not_found() {
            Self::NotFound(err.to_string())
        } else {
            Self::Internal { context, detail: err.to_string(), expose: expose_detail }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::TooManyRequests(msg) => (StatusCode::TOO_MANY_REQUESTS, msg),
            Self::Internal { context, detail, expose } => {
                tracing::error!(%detail, "{context}");
                let message = if expose {
                    format!("{context}: {detail}")
                } else {
                    context.to_owned()
                };
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            },
        };
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
