//! Module for core business logic services.
//!
//! This module encapsulates services that perform specific business
//! operations outside the authentication flow itself.

pub mod user_service;
