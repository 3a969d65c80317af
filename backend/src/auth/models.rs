//! Data structures for authentication-related entities.
//!
//! Request and response models for registration, login, and token refresh,
//! used for data transfer within the authentication flow.

use crate::database::models::{Session, User};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration request payload
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
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

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Registration response: the new user and its paired session. The session
/// is created alongside the user with both tokens empty.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: UserInfo,
    pub session: Session,
}

/// Login request payload
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login response containing tokens and user info
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserInfo,
    pub expires_in: i64, // Access token expiration in seconds
}

/// User information returned in auth responses
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        UserInfo {
            id: user.id,
            firstname: user.firstname,
            lastname: user.lastname,
            email: user.email,
        }
    }
}

/// Token refresh response
#[derive(Debug, Serialize)]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub expires_in: i64,
}
