//! User registration and lookup on top of [`UserRepo`].

use bookshelf_core::credentials::validate_registration;
use bookshelf_db::models::user::{CreateUser, User};
use bookshelf_db::repositories::UserRepo;
use bookshelf_db::DbPool;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};

/// Register a new user with a freshly salted Argon2id hash of `password`.
///
/// Fails with `CoreError::Validation` for a blank username or a password
/// shorter than the minimum, and with `CoreError::DuplicateUsername` if the
/// name is taken by any user, deleted or not.
pub async fn register(pool: &DbPool, username: &str, password: &str) -> AppResult<User> {
    validate_registration(username, password)?;

    let password_hash = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let input = CreateUser {
        username: username.to_string(),
        password_hash,
    };
    let user = UserRepo::create(pool, &input).await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");
    Ok(user)
}

/// Find the user who may log in as `username`. Deleted users are invisible.
pub async fn find_active_by_username(pool: &DbPool, username: &str) -> AppResult<Option<User>> {
    Ok(UserRepo::find_active_by_username(pool, username).await?)
}
