//! Persistence layer for users and their sessions.
//!
//! The service layer only ever sees the two narrow store traits defined
//! here; the SQLite-backed repositories implement them over a shared
//! connection pool.

use crate::database::models::{CreateUser, Session, SessionChanges, User, UserChanges};
use anyhow::Result;
use async_trait::async_trait;

pub mod session_repository;
pub mod user_repository;

/// Keyed store of user records, unique on email.
#[async_trait]
pub trait UserDirectory {
    async fn create(&self, user: CreateUser) -> Result<User>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    /// Applies the given changes; returns `None` if no such user.
    async fn update(&self, id: &str, changes: UserChanges) -> Result<Option<User>>;
    /// Returns whether a record was deleted.
    async fn delete(&self, id: &str) -> Result<bool>;
    async fn list(&self) -> Result<Vec<User>>;
}

/// Keyed store of session records, one per user id.
///
/// Implementations must apply `update` as a single atomic write per record
/// so concurrent token issuances on the same session cannot interleave
/// field-by-field.
#[async_trait]
pub trait SessionStore {
    async fn create(&self, user_id: &str, firstname: &str) -> Result<Session>;
    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<Session>>;
    /// Applies the given changes; returns `None` if no such session.
    async fn update(&self, user_id: &str, changes: SessionChanges) -> Result<Option<Session>>;
    /// Returns whether a record was deleted.
    async fn delete(&self, user_id: &str) -> Result<bool>;
}
