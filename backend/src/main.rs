//! Main entry point for the AuthGate backend.
//!
//! This file initializes the Axum web server, sets up the database pool and
//! migrations, and registers all API routes and middleware.
//! Configuration (including both token signing secrets) is loaded here so a
//! misconfigured process fails at startup, not on its first request.

mod api;
mod auth;
mod config;
mod database;
mod errors;
mod repositories;
mod services;
mod utils;

use crate::api::common::ApiResponse;
use axum::{Extension, Router, response::Json, routing::get};
use config::Config;
use database::Database;
use tracing::info;
use tracing_subscriber::fmt::init;

#[tokio::main]
async fn main() {
    init();

    let config = Config::from_env().unwrap();
    let db = Database::new(&config).await.unwrap();
    let pool = db.pool().clone();

    let app = Router::new()
        .route("/", get(root_handler))
        .nest("/auth", auth::routes::auth_router())
        .nest("/api/user", api::user::routes::user_router().await)
        .layer(Extension(pool))
        .layer(Extension(config.clone()));

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await.unwrap();

    info!("Starting AuthGate server on port {}", config.server_port);
    axum::serve(listener, app).await.unwrap();
}

async fn root_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        serde_json::json!({
            "service": "AuthGate Backend",
            "version": "0.1.0"
        }),
        "Welcome to AuthGate API",
    ))
}
