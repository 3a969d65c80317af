//! Collection of small, reusable helpers shared across the backend.

pub mod jwt;
pub mod password;
