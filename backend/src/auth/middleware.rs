//! Middleware for protecting authenticated routes.
//!
//! Validates the bearer access token on incoming requests and injects its
//! claims for downstream handlers.

use crate::config::Config;
use crate::utils::jwt::TokenCodec;
use axum::{
    extract::Request,
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

/// Access-token authentication middleware
pub async fn jwt_auth(mut request: Request, next: Next) -> Result<Response, StatusCode> {
    // Extract Authorization header
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    // Check if it's a Bearer token
    if !auth_header.starts_with("Bearer ") {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let token = auth_header[7..].to_string(); // Remove "Bearer " prefix

    // Config is injected as an Extension layer on the outer router
    let config = request
        .extensions()
        .get::<Config>()
        .ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;

    let codec = TokenCodec::new(&config.access_token_secret, config.access_token_ttl_secs);

    match codec.verify(&token) {
        Ok(claims) => {
            // Add claims to request extensions for use in handlers
            request.extensions_mut().insert(claims);
            Ok(next.run(request).await)
        }
        Err(_) => Err(StatusCode::UNAUTHORIZED),
    }
}
