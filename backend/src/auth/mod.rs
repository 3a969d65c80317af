//! Authentication module for managing user accounts and session tokens.
//!
//! This module provides the public interface for authentication-related
//! functionality such as registration, login, token refresh, logout, and
//! the bearer-token middleware protecting other routes.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
