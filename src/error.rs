//! Unified error model
//! Defines all error kinds and the JSON error response format

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Username already taken")]
    UsernameTaken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Malformed token")]
    MalformedToken,

    #[error("Token signature invalid")]
    SignatureInvalid,

    #[error("Token expired")]
    TokenExpired,

    #[error("Resource not found or access denied")]
    NotFoundOrDenied,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::UsernameTaken => StatusCode::CONFLICT,
            AppError::InvalidCredentials
            | AppError::MalformedToken
            | AppError::SignatureInvalid
            | AppError::TokenExpired => StatusCode::UNAUTHORIZED,
            AppError::NotFoundOrDenied => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Client-facing message (no sensitive detail, no existence leakage).
    /// The token error kinds render identically so a caller probing the
    /// gate cannot tell a bad MAC from an expired claim; likewise a
    /// missing note and a foreign note read the same.
    pub fn user_message(&self) -> String {
        match self {
            AppError::UsernameTaken => "Username already taken".to_string(),
            AppError::InvalidCredentials => "Invalid username or password".to_string(),
            AppError::MalformedToken | AppError::SignatureInvalid | AppError::TokenExpired => {
                "Invalid or expired token".to_string()
            }
            AppError::NotFoundOrDenied => "Not found".to_string(),
            AppError::Validation(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Database(_) => "Database error occurred".to_string(),
            AppError::Config(_) => "Configuration error".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    /// Numeric error code
    pub fn code(&self) -> u16 {
        self.status_code().as_u16()
    }

    // Convenience constructors
    pub fn validation(msg: &str) -> Self {
        AppError::Validation(msg.to_string())
    }

    pub fn internal(msg: &str) -> Self {
        AppError::Internal(msg.to_string())
    }
}

/// Error response DTO
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: u16,
    pub message: String,
    pub request_id: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let request_id = uuid::Uuid::new_v4().to_string();

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: self.code(),
                message: self.user_message(),
                request_id,
            },
        };

        if status.is_server_error() {
            tracing::error!(
                code = self.code(),
                detail = %self,
                request_id = %error_response.error.request_id,
                "Request failed"
            );
        } else {
            tracing::debug!(
                code = self.code(),
                detail = %self,
                request_id = %error_response.error.request_id,
                "Request rejected"
            );
        }

        (status, Json(error_response)).into_response()
    }
}

impl From<config::ConfigError> for AppError {
    fn from(e: config::ConfigError) -> Self {
        AppError::Config(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string())
    }
}
