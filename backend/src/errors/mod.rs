//! Global application error types and handlers.
//!
//! This module defines the service-level error taxonomy used across the
//! backend and provides mechanisms for consistent error handling and
//! response formatting.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Field-specific validation error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the field with validation error
    pub field: String,
    /// Description of the validation failure
    pub message: String,
}

/// Generic service error that can be used across all entities
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        fields: Vec<FieldError>,
    },

    #[error("{entity} not found: {identifier}")]
    NotFound { entity: String, identifier: String },

    #[error("{entity} already exists: {identifier}")]
    Conflict { entity: String, identifier: String },

    /// Wrong password. Carries no identifier so the rendered message can
    /// never reveal which part of the credentials was wrong.
    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("No refresh token on session: {user_id}")]
    TokenMissing { user_id: String },

    #[error("Token invalid: {message}")]
    TokenInvalid { message: String },

    #[error("Token expired")]
    TokenExpired,

    /// Infrastructure failure (database, hashing, token signing). Rendered
    /// as an opaque 500; the cause goes to the logs only.
    #[error("Internal error: {source}")]
    Internal {
        #[from]
        source: anyhow::Error,
    },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    // Helper constructors for common patterns

    pub fn not_found(entity: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            identifier: identifier.into(),
        }
    }

    pub fn conflict(entity: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::Conflict {
            entity: entity.into(),
            identifier: identifier.into(),
        }
    }

    pub fn token_missing(user_id: impl Into<String>) -> Self {
        Self::TokenMissing {
            user_id: user_id.into(),
        }
    }

    pub fn token_invalid(message: impl Into<String>) -> Self {
        Self::TokenInvalid {
            message: message.into(),
        }
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    /// Flattens validator output into a `Validation` error carrying both a
    /// joined summary message and the per-field details.
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| FieldError {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .unwrap_or(&"Invalid value".into())
                        .to_string(),
                })
            })
            .collect();
        let message = fields
            .iter()
            .map(|f| format!("{}: {}", f.field, f.message))
            .collect::<Vec<_>>()
            .join(", ");
        ServiceError::Validation { message, fields }
    }
}
