//! API error taxonomy.
//!
//! A closed set of error variants covering the request path, mapped to HTTP
//! status codes at the response boundary. Storage failures carry their cause
//! for logging but the client only ever sees a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad input, user-correctable (400).
    #[error("{0}")]
    Validation(String),

    /// Duplicate email (409).
    #[error("Email already registered")]
    Conflict,

    /// Per-client rate limit exceeded (429).
    #[error("Too many requests. Please try again later.")]
    RateLimited,

    /// Missing or wrong API key (401).
    #[error("Unauthorized")]
    Auth,

    /// Storage failure (500).
    #[error("Server error")]
    Storage(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict => StatusCode::CONFLICT,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Auth => StatusCode::UNAUTHORIZED,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db) = e {
            if db.is_unique_violation() {
                return ApiError::Conflict;
            }
        }
        ApiError::Storage(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Storage(ref cause) = self {
            tracing::error!("Storage error: {cause:#}");
        }
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
