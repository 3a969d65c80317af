//! Handler functions for user profile and management API endpoints.
//!
//! These functions process requests for user data, interact with the
//! `UserService`, and return user-specific information. All routes here
//! sit behind the access-token middleware.

use crate::api::common::{ApiResponse, service_error_to_http};
use crate::database::models::{UpdateUserRequest, User};
use crate::services::user_service::UserService;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
};
use sqlx::SqlitePool;

/// Retrieves a user by its ID.
#[axum::debug_handler]
pub async fn get_user_by_id(
    Extension(claims): Extension<Claims>,
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<User>>, (StatusCode, String)> {
    tracing::info!("Getting user {} for caller {}", id, claims.sub);

    let user_service = UserService::from_pool(&pool);
    let user = user_service
        .get_user(&id)
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(
        user,
        "User retrieved successfully",
    )))
}

/// Retrieves all users.
#[axum::debug_handler]
pub async fn get_users(
    Extension(pool): Extension<SqlitePool>,
) -> Result<Json<ApiResponse<Vec<User>>>, (StatusCode, String)> {
    let user_service = UserService::from_pool(&pool);
    let users = user_service
        .get_users()
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(
        users,
        "Users retrieved successfully",
    )))
}

/// Applies a profile update to a user.
#[axum::debug_handler]
pub async fn update_user(
    Extension(claims): Extension<Claims>,
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<User>>, (StatusCode, String)> {
    tracing::info!("Updating user {} for caller {}", id, claims.sub);

    let user_service = UserService::from_pool(&pool);
    let user = user_service
        .update_user(&id, payload)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update user {}: {}", id, e);
            service_error_to_http(e)
        })?;

    Ok(Json(ApiResponse::success(
        user,
        "User updated successfully",
    )))
}

/// Deletes a user and its paired session.
#[axum::debug_handler]
pub async fn delete_user(
    Extension(claims): Extension<Claims>,
    Extension(pool): Extension<SqlitePool>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, String)> {
    tracing::info!("Deleting user {} for caller {}", id, claims.sub);

    let user_service = UserService::from_pool(&pool);
    user_service
        .delete_user(&id)
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success((), "User deleted successfully")))
}
