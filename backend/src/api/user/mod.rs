//! User profile and management API endpoints.

pub mod handlers;
pub mod routes;
