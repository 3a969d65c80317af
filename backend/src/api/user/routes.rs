//! Defines the HTTP routes for user profile and management.
//!
//! These routes provide endpoints for accessing and updating user-specific
//! data beyond authentication credentials.

use super::handlers::{delete_user, get_user_by_id, get_users, update_user};
use crate::auth::middleware::jwt_auth;
use axum::{Router, middleware, routing::get};

pub async fn user_router() -> Router {
    Router::new()
        .route("/", get(get_users))
        .route(
            "/{id}",
            get(get_user_by_id).put(update_user).delete(delete_user),
        )
        .layer(middleware::from_fn(jwt_auth))
}
