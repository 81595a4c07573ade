//! Error types for Data Insights Hub
//!
//! Provides:
//! - Distinct error types for different failure modes
//! - HTTP status code mapping
//! - Structured error responses
//! - Error codes for client handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::CatalogIssue;

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Error codes for machine-readable error identification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors (1xxx)
    ValidationError,
    InvalidCategory,

    // Resource errors (4xxx)
    NotFound,
    ProjectNotFound,

    // Rate limiting (6xxx)
    RateLimited,

    // Internal errors (9xxx)
    InternalError,
    ConfigurationError,
    InvalidCatalog,
    SerializationError,
    IoError,
}

impl ErrorCode {
    /// Get the numeric code for this error
    pub fn as_code(&self) -> u16 {
        match self {
            ErrorCode::ValidationError => 1001,
            ErrorCode::InvalidCategory => 1002,

            ErrorCode::NotFound => 4001,
            ErrorCode::ProjectNotFound => 4002,

            ErrorCode::RateLimited => 6001,

            ErrorCode::InternalError => 9001,
            ErrorCode::ConfigurationError => 9002,
            ErrorCode::InvalidCatalog => 9003,
            ErrorCode::SerializationError => 9004,
            ErrorCode::IoError => 9005,
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("Unknown category: {key}")]
    InvalidCategory { key: String },

    #[error("Resource not found: {path}")]
    NotFound { path: String },

    #[error("Project not found: {id}")]
    ProjectNotFound { id: String },

    #[error("Rate limit exceeded: {limit} requests per second")]
    RateLimited { limit: u32 },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Invalid catalog: {}", summarize(.issues))]
    InvalidCatalog { issues: Vec<CatalogIssue> },

    #[error("Internal server error: {message}")]
    Internal { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

fn summarize(issues: &[CatalogIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl AppError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { .. } => ErrorCode::ValidationError,
            AppError::InvalidCategory { .. } => ErrorCode::InvalidCategory,
            AppError::NotFound { .. } => ErrorCode::NotFound,
            AppError::ProjectNotFound { .. } => ErrorCode::ProjectNotFound,
            AppError::RateLimited { .. } => ErrorCode::RateLimited,
            AppError::Configuration { .. } => ErrorCode::ConfigurationError,
            AppError::InvalidCatalog { .. } => ErrorCode::InvalidCatalog,
            AppError::Internal { .. } => ErrorCode::InternalError,
            AppError::Serialization(_) => ErrorCode::SerializationError,
            AppError::Io(_) => ErrorCode::IoError,
            AppError::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            AppError::Validation { .. } | AppError::InvalidCategory { .. } => {
                StatusCode::BAD_REQUEST
            }

            // 404 Not Found
            AppError::NotFound { .. } | AppError::ProjectNotFound { .. } => StatusCode::NOT_FOUND,

            // 429 Too Many Requests
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,

            // 500 Internal Server Error
            AppError::Configuration { .. }
            | AppError::InvalidCatalog { .. }
            | AppError::Internal { .. }
            | AppError::Serialization(_)
            | AppError::Io(_)
            | AppError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Check if this error should be logged at error level
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Check if this error is a client error
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

/// Structured error response for API
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let message = self.to_string();

        if self.is_server_error() {
            tracing::error!(
                error = %message,
                code = ?code,
                status = status.as_u16(),
                "Server error"
            );
        } else if self.is_client_error() {
            tracing::warn!(
                error = %message,
                code = ?code,
                status = status.as_u16(),
                "Client error"
            );
        }

        let field = match self {
            AppError::Validation { field, .. } => field,
            _ => None,
        };

        let body = ErrorResponse {
            error: ErrorDetails {
                code,
                message,
                field,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration {
            message: err.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation {
            message: err.to_string(),
            field: err.field_errors().keys().next().map(|f| f.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_mapping() {
        let err = AppError::ProjectNotFound { id: "test".into() };
        assert_eq!(err.code(), ErrorCode::ProjectNotFound);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.code().as_code(), 4002);
    }

    #[test]
    fn test_validation_error() {
        let err = AppError::Validation {
            message: "query too long".into(),
            field: Some("q".into()),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(!err.is_server_error());
        assert!(err.is_client_error());
    }

    #[test]
    fn test_invalid_catalog_message_lists_issues() {
        let err = AppError::InvalidCatalog {
            issues: vec![
                CatalogIssue::DuplicateId { id: "a".into() },
                CatalogIssue::InvalidId { id: "B".into() },
            ],
        };
        let message = err.to_string();
        assert!(message.contains("duplicate project id: a"));
        assert!(message.contains("\"B\""));
        assert!(err.is_server_error());
    }

    #[test]
    fn test_io_error_is_server_error() {
        let err: AppError = std::io::Error::new(std::io::ErrorKind::Other, "disk").into();
        assert_eq!(err.code(), ErrorCode::IoError);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
