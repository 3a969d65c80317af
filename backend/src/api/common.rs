//! Error handling utilities for API responses.
//!
//! Provides structured responses and conversion between service-layer
//! errors and HTTP responses. Includes:
//! - Standard response format
//! - ServiceError to HTTP status code mapping
//!
//! # Response Format
//! All errors return consistent JSON responses containing:
//! - `error`: Human-readable message
//! - `error_type`: Machine-readable error category
//! - `details`: Optional field-specific validation errors

use crate::errors::{FieldError, ServiceError};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Standard API response wrapper for all endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Indicates if the request was successful
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable message
    pub message: String,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,
    /// Request timestamp
    pub timestamp: String,
}

/// Error details for failed requests
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Machine-readable error type identifier
    pub error_type: String,
    /// Field-specific validation errors when applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Create an error response
    pub fn error(
        message: impl Into<String>,
        error_type: impl Into<String>,
        details: Option<Vec<FieldError>>,
    ) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message: message.into(),
            error: Some(ErrorDetails {
                error_type: error_type.into(),
                details,
            }),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Converts ServiceError to appropriate HTTP response with standard format
pub fn service_error_to_http(error: ServiceError) -> (StatusCode, String) {
    let mut details = None;
    let (status, error_type, message) = match error {
        ServiceError::Validation { message, fields } => {
            if !fields.is_empty() {
                details = Some(fields);
            }
            (StatusCode::BAD_REQUEST, "validation_error", message)
        }
        ServiceError::NotFound { entity, identifier } => (
            StatusCode::NOT_FOUND,
            "not_found",
            format!("{} '{}' not found", entity, identifier),
        ),
        ServiceError::Conflict { entity, identifier } => (
            StatusCode::CONFLICT,
            "already_exists",
            format!("{} '{}' already exists", entity, identifier),
        ),
        ServiceError::AuthenticationFailed => (
            StatusCode::UNAUTHORIZED,
            "authentication_failed",
            "Invalid email or password".to_string(),
        ),
        ServiceError::TokenMissing { .. } => (
            StatusCode::UNAUTHORIZED,
            "token_missing",
            "No refresh token provided".to_string(),
        ),
        ServiceError::TokenInvalid { .. } => (
            StatusCode::UNAUTHORIZED,
            "token_invalid",
            "Invalid token".to_string(),
        ),
        ServiceError::TokenExpired => (
            StatusCode::UNAUTHORIZED,
            "token_expired",
            "Token expired".to_string(),
        ),
        ServiceError::Internal { source } => {
            tracing::error!("Internal error: {}", source);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Internal server error".to_string(),
            )
        }
    };

    let error_response = ApiResponse::<()>::error(message, error_type, details);
    (status, serde_json::to_string(&error_response).unwrap())
}
