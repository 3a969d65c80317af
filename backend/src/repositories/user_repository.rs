//! Database repository for user management operations.
//!
//! Provides CRUD operations for user records, backing the `UserDirectory`
//! contract with SQLite.

use crate::database::models::{CreateUser, User, UserChanges};
use crate::repositories::UserDirectory;
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

const USER_COLUMNS: &str = "id, firstname, lastname, email, password_hash, created_at, updated_at";

/// Repository for user database operations.
pub struct UserRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for UserRepository<'_> {
    /// Creates a new user in the database.
    ///
    /// # Returns
    /// The newly created User with all fields populated
    async fn create(&self, user: CreateUser) -> Result<User> {
        let now = Utc::now();
        let created = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (id, firstname, lastname, email, password_hash, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&user.id)
        .bind(&user.firstname)
        .bind(&user.lastname)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
                .bind(email)
                .fetch_optional(self.pool)
                .await?;

        Ok(user)
    }

    /// Applies the given field changes in a single UPDATE statement.
    /// Fields left as `None` keep their stored value.
    async fn update(&self, id: &str, changes: UserChanges) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET \
             firstname = COALESCE(?, firstname), \
             lastname = COALESCE(?, lastname), \
             email = COALESCE(?, email), \
             password_hash = COALESCE(?, password_hash), \
             updated_at = ? \
             WHERE id = ? \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&changes.firstname)
        .bind(&changes.lastname)
        .bind(&changes.email)
        .bind(&changes.password_hash)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }
}
