//! User entity model and DTOs.

use bookshelf_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Holds the password hash and is not `Serialize`; handlers copy the public
/// fields into their own response types.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    /// Excludes the user from login. Nothing in the service sets it yet.
    pub is_deleted: bool,
    pub created_at: Timestamp,
}

/// DTO for inserting a new user. The password must already be hashed.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
}
