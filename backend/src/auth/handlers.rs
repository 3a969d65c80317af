//! Handler functions for authentication-related API endpoints.
//!
//! These functions process incoming HTTP requests for registration, login,
//! token refresh, and logout, and interact with the `auth::service` for
//! core business logic.

use crate::api::common::{ApiResponse, service_error_to_http};
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::config::Config;
use crate::errors::ServiceError;
use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
    response::Json as ResponseJson,
};
use sqlx::SqlitePool;

/// Handle user registration request
#[axum::debug_handler]
pub async fn register(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Json(payload): Json<RegisterRequest>,
) -> Result<ResponseJson<ApiResponse<RegisterResponse>>, (StatusCode, String)> {
    let auth_service = AuthService::from_pool(&pool, &config);

    match auth_service.register(payload).await {
        Ok(response) => Ok(ResponseJson(ApiResponse::success(
            response,
            "User registered successfully",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Json(payload): Json<LoginRequest>,
) -> Result<ResponseJson<ApiResponse<LoginResponse>>, (StatusCode, String)> {
    let auth_service = AuthService::from_pool(&pool, &config);

    match auth_service.login(payload).await {
        Ok(response) => Ok(ResponseJson(ApiResponse::success(
            response,
            "Login successful",
        ))),
        // Unknown email and wrong password must read the same to callers
        Err(ServiceError::NotFound { .. }) | Err(ServiceError::AuthenticationFailed) => {
            Err(service_error_to_http(ServiceError::AuthenticationFailed))
        }
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle token refresh request.
///
/// Authorized by a bare user id, matching the system this replaces: the
/// stored refresh token is verified but never presented by the caller.
#[axum::debug_handler]
pub async fn refresh_token(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Path(id): Path<String>,
) -> Result<ResponseJson<ApiResponse<RefreshTokenResponse>>, (StatusCode, String)> {
    let auth_service = AuthService::from_pool(&pool, &config);

    match auth_service.refresh(&id).await {
        Ok(session) => Ok(ResponseJson(ApiResponse::success(
            RefreshTokenResponse {
                access_token: session.access_token,
                expires_in: auth_service.access_token_ttl_secs(),
            },
            "Access token refreshed",
        ))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle logout request: clears both tokens on the user's session.
#[axum::debug_handler]
pub async fn logout(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Path(id): Path<String>,
) -> Result<ResponseJson<ApiResponse<()>>, (StatusCode, String)> {
    let auth_service = AuthService::from_pool(&pool, &config);

    match auth_service.logout(&id).await {
        Ok(()) => Ok(ResponseJson(ApiResponse::success((), "Logout successful"))),
        Err(error) => Err(service_error_to_http(error)),
    }
}
