//! Unified error handling for the page handlers.
//!
//! This module provides a centralized error type that implements `IntoResponse`,
//! allowing handlers to use `?` operator naturally while returning appropriate
//! HTTP status codes and a minimal HTML error page.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::auth::AuthError;
use crate::pages;
use crate::repository::StoreError;

/// Unified error type for page handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Data store failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Password hashing or credential lookup failure
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Generic anyhow error
    #[error("{0}")]
    Internal(#[from] anyhow::Error),

    /// Resource not found; the message is shown to the user
    #[error("{0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }
}

fn store_error_status(err: &StoreError) -> (StatusCode, String) {
    match err {
        StoreError::ConnectionPool(e) => {
            tracing::error!("Connection pool error: {:?}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "Database connection unavailable".to_string(),
            )
        }
        StoreError::Database(e) => {
            tracing::error!("Database error: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database operation failed".to_string(),
            )
        }
        StoreError::UsernameTaken(name) => {
            (StatusCode::BAD_REQUEST, format!("User {} already exists", name))
        }
        StoreError::Internal(e) => {
            tracing::error!("Store error: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Store(e) | ApiError::Auth(AuthError::Store(e)) => store_error_status(e),
            ApiError::Auth(AuthError::Password(e)) => {
                tracing::error!("Password hashing error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        (status, Html(pages::error_page(status, &message))).into_response()
    }
}

/// Result type alias for page handlers
pub type ApiResult<T> = Result<T, ApiError>;
