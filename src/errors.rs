use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Authentication required: {0}")]
    AuthRequired(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Env error: {0}")]
    EnvError(String),
}

impl AppError {
    pub fn to_response(&self) -> (StatusCode, String) {
        match self {
            AppError::AuthRequired(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Storage(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            AppError::EnvError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        }
    }

    /// Only transient storage failures are safe to retry unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Storage(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_response().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_each_kind_to_its_status() {
        assert_eq!(
            AppError::AuthRequired("x".into()).to_response().0,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Validation("x".into()).to_response().0,
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::NotFound("x".into()).to_response().0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Storage("x".into()).to_response().0,
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn only_storage_errors_are_retryable() {
        assert!(AppError::Storage("timed out".into()).is_retryable());
        assert!(!AppError::Validation("bad score".into()).is_retryable());
        assert!(!AppError::AuthRequired("sign in".into()).is_retryable());
        assert!(!AppError::NotFound("venue".into()).is_retryable());
    }
}
