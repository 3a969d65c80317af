//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the database. Note that these may differ from API-specific models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    /// bcrypt hash, never the plaintext.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One session per user. `access_token` and `refresh_token` hold the empty
/// string when no token is issued.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub user_id: String,
    /// Denormalized copy of the user's firstname, kept in sync on profile
    /// updates.
    pub firstname: String,
    pub access_token: String,
    pub refresh_token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(length(min = 1, message = "User ID is required"))]
    pub id: String,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Firstname must be between 1-255 characters"
    ))]
    pub firstname: String,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Lastname must be between 1-255 characters"
    ))]
    pub lastname: String,

    #[validate(
        email(message = "Must be a valid email"),
        length(max = 255, message = "Email too long")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "Password hash is required"))]
    pub password_hash: String,
}

/// Profile update payload. Every field is optional; a present `password`
/// is the explicit signal that the password changed and must be re-hashed.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Firstname must be between 1-255 characters"
    ))]
    pub firstname: Option<String>,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Lastname must be between 1-255 characters"
    ))]
    pub lastname: Option<String>,

    #[validate(
        email(message = "Must be a valid email"),
        length(max = 255, message = "Email too long")
    )]
    pub email: Option<String>,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
}

/// Field-scoped changes to a user record. `None` leaves a field untouched.
/// A present `password_hash` is the explicit signal that the password
/// changed and has already been re-hashed.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

/// Field-scoped changes to a session record. `None` leaves a field
/// untouched; clearing a token writes `Some(String::new())`.
#[derive(Debug, Clone, Default)]
pub struct SessionChanges {
    pub firstname: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl SessionChanges {
    /// Changes that clear both tokens (logout).
    pub fn cleared_tokens() -> Self {
        Self {
            firstname: None,
            access_token: Some(String::new()),
            refresh_token: Some(String::new()),
        }
    }
}
