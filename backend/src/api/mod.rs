//! Central module for organizing the application's main API endpoints.
//!
//! This module acts as a top-level container for the user-management
//! endpoints and shared response plumbing, excluding core authentication
//! routes which are handled separately.

pub mod common;
pub mod user;
