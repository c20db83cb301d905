//! Repository for the `users` table (the credential store).

use bookshelf_core::types::DbId;
use sqlx::PgPool;

use crate::error::StoreResult;
use crate::models::user::{CreateUser, User};
use crate::tx::classify_username_violation;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, password_hash, is_deleted, created_at";

/// Provides credential storage for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// Username uniqueness is decided by the `uq_users_username` constraint
    /// alone, across deleted and live users, so two concurrent registrations
    /// of the same name cannot both succeed. A violation is reported as
    /// `CoreError::DuplicateUsername`.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> StoreResult<User> {
        let query = format!(
            "INSERT INTO users (username, password_hash)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
            .map_err(|e| classify_username_violation(e, &input.username))
    }

    /// Find a user by internal ID, deleted or not.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a non-deleted user by username (case-sensitive).
    pub async fn find_active_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM users WHERE username = $1 AND is_deleted = false");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }
}
