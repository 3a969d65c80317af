//! User business logic service.
//!
//! Plain directory operations (get/list/update/delete) plus the rules that
//! couple a user record to its session: a password change is re-hashed, a
//! firstname change is mirrored onto the session, and deleting a user
//! removes the paired session in the same logical operation.

use crate::database::models::{SessionChanges, UpdateUserRequest, User, UserChanges};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::session_repository::SessionRepository;
use crate::repositories::user_repository::UserRepository;
use crate::repositories::{SessionStore, UserDirectory};
use crate::utils::password::CredentialHasher;
use sqlx::SqlitePool;
use validator::Validate;

pub struct UserService<D, S> {
    directory: D,
    sessions: S,
    hasher: CredentialHasher,
}

impl<'a> UserService<UserRepository<'a>, SessionRepository<'a>> {
    /// Creates a UserService over the SQLite-backed stores.
    pub fn from_pool(pool: &'a SqlitePool) -> Self {
        Self::new(UserRepository::new(pool), SessionRepository::new(pool))
    }
}

impl<D, S> UserService<D, S>
where
    D: UserDirectory + Sync,
    S: SessionStore + Sync,
{
    /// Creates a new UserService instance over the given stores.
    pub fn new(directory: D, sessions: S) -> Self {
        UserService {
            directory,
            sessions,
            hasher: CredentialHasher::new(),
        }
    }

    /// Retrieves a user by ID with existence verification.
    ///
    /// # Errors
    /// Returns `ServiceError::NotFound` if the user doesn't exist
    pub async fn get_user(&self, id: &str) -> ServiceResult<User> {
        let user = self
            .directory
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id))?;
        Ok(user)
    }

    /// Retrieves all users.
    pub async fn get_users(&self) -> ServiceResult<Vec<User>> {
        Ok(self.directory.list().await?)
    }

    /// Applies a profile update.
    ///
    /// A present `password` field is the explicit signal that the password
    /// changed; only then is it re-hashed. A present `firstname` is also
    /// written to the session's denormalized copy. An email change to an
    /// address another user holds fails with `Conflict`.
    pub async fn update_user(&self, id: &str, request: UpdateUserRequest) -> ServiceResult<User> {
        request.validate().map_err(ServiceError::from)?;

        self.directory
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id))?;

        if let Some(ref email) = request.email {
            if let Some(existing) = self.directory.find_by_email(email).await? {
                if existing.id != id {
                    return Err(ServiceError::conflict("User", email));
                }
            }
        }

        let password_hash = match request.password {
            Some(ref password) => Some(self.hasher.hash(password)?),
            None => None,
        };

        let firstname = request.firstname.clone();

        let user = self
            .directory
            .update(
                id,
                UserChanges {
                    firstname: request.firstname,
                    lastname: request.lastname,
                    email: request.email,
                    password_hash,
                },
            )
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id))?;

        // Keep the session's firstname copy in sync
        if firstname.is_some() {
            self.sessions
                .update(
                    id,
                    SessionChanges {
                        firstname,
                        access_token: None,
                        refresh_token: None,
                    },
                )
                .await?
                .ok_or_else(|| ServiceError::not_found("Session", id))?;
        }

        tracing::info!("Updated user {}", id);

        Ok(user)
    }

    /// Deletes a user and its paired session.
    ///
    /// # Errors
    /// Returns `ServiceError::NotFound` if the user doesn't exist
    pub async fn delete_user(&self, id: &str) -> ServiceResult<()> {
        self.directory
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id))?;

        // The session never outlives its user
        self.sessions.delete(id).await?;
        self.directory.delete(id).await?;

        tracing::info!("Deleted user {}", id);

        Ok(())
    }
}
