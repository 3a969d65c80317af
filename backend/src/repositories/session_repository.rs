//! Database repository for session records.
//!
//! Backs the `SessionStore` contract with SQLite. Every mutation is a
//! single UPDATE statement scoped to the fields the caller owns, so
//! concurrent writers on the same session (e.g. a login racing a refresh)
//! cannot leave a record holding one token from each write.

use crate::database::models::{Session, SessionChanges};
use crate::repositories::SessionStore;
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

const SESSION_COLUMNS: &str =
    "user_id, firstname, access_token, refresh_token, created_at, updated_at";

/// Repository for session database operations.
pub struct SessionRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> SessionRepository<'a> {
    /// Creates a new SessionRepository instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for SessionRepository<'_> {
    /// Creates the session paired with a user, with both tokens empty.
    async fn create(&self, user_id: &str, firstname: &str) -> Result<Session> {
        let now = Utc::now();
        let session = sqlx::query_as::<_, Session>(&format!(
            "INSERT INTO sessions (user_id, firstname, access_token, refresh_token, created_at, updated_at) \
             VALUES (?, ?, '', '', ?, ?) \
             RETURNING {SESSION_COLUMNS}"
        ))
        .bind(user_id)
        .bind(firstname)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        Ok(session)
    }

    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<Session>> {
        let session = sqlx::query_as::<_, Session>(&format!(
            "SELECT {SESSION_COLUMNS} FROM sessions WHERE user_id = ?"
        ))
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(session)
    }

    /// Applies the given field changes in a single UPDATE statement.
    /// Fields left as `None` keep their stored value; clearing a token
    /// writes the empty string.
    async fn update(&self, user_id: &str, changes: SessionChanges) -> Result<Option<Session>> {
        let session = sqlx::query_as::<_, Session>(&format!(
            "UPDATE sessions SET \
             firstname = COALESCE(?, firstname), \
             access_token = COALESCE(?, access_token), \
             refresh_token = COALESCE(?, refresh_token), \
             updated_at = ? \
             WHERE user_id = ? \
             RETURNING {SESSION_COLUMNS}"
        ))
        .bind(&changes.firstname)
        .bind(&changes.access_token)
        .bind(&changes.refresh_token)
        .bind(Utc::now())
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(session)
    }

    async fn delete(&self, user_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = ?")
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
