//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle user registration, login, token refresh, and logout.
//! They are designed to be integrated into the main Axum router.

use crate::auth::handlers::*;
use axum::{Router, routing::post};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh/{id}", post(refresh_token))
        .route("/logout/{id}", post(logout))
}
