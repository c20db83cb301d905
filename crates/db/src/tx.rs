//! Helpers shared by repository operations that run inside a transaction.
//!
//! The case-insensitive title comparison lives here, in SQL, so the
//! pre-write checks agree exactly with the `uq_books_live_title` index.

use bookshelf_core::error::CoreError;
use bookshelf_core::types::DbId;
use sqlx::PgConnection;

use crate::error::StoreError;

/// PostgreSQL SQLSTATE for `unique_violation`.
pub const UNIQUE_VIOLATION: &str = "23505";

/// Partial unique index on `LOWER(title)` over live books.
pub const UQ_BOOKS_LIVE_TITLE: &str = "uq_books_live_title";

/// Unique constraint on `users.username`.
pub const UQ_USERS_USERNAME: &str = "uq_users_username";

/// Name of the unique constraint or index `err` violated, if that is what
/// `err` is.
pub fn violated_unique_constraint(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            db_err.constraint()
        }
        _ => None,
    }
}

/// Map a `uq_books_live_title` violation to [`CoreError::DuplicateTitle`]
/// naming `titles`; anything else stays a storage failure.
pub fn classify_title_violation(err: sqlx::Error, titles: impl FnOnce() -> Vec<String>) -> StoreError {
    if violated_unique_constraint(&err) == Some(UQ_BOOKS_LIVE_TITLE) {
        tracing::debug!("Live title uniqueness enforced by storage constraint");
        CoreError::DuplicateTitle { titles: titles() }.into()
    } else {
        err.into()
    }
}

/// Map a `uq_users_username` violation to [`CoreError::DuplicateUsername`].
pub fn classify_username_violation(err: sqlx::Error, username: &str) -> StoreError {
    if violated_unique_constraint(&err) == Some(UQ_USERS_USERNAME) {
        CoreError::DuplicateUsername(username.to_string()).into()
    } else {
        err.into()
    }
}

/// Whether a live book already holds `title` (case-insensitive).
///
/// When `exclude_id` is set, that row is left out of the collision set.
pub async fn live_title_exists(
    conn: &mut PgConnection,
    title: &str,
    exclude_id: Option<DbId>,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS ( \
             SELECT 1 FROM books \
             WHERE is_deleted = false \
               AND LOWER(title) = LOWER($1) \
               AND ($2::BIGINT IS NULL OR id <> $2) \
         )",
    )
    .bind(title)
    .bind(exclude_id)
    .fetch_one(conn)
    .await
}

/// The subset of `titles` that collide with a live book, in input order.
pub async fn live_title_collisions(
    conn: &mut PgConnection,
    titles: &[String],
) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        "SELECT t.title \
         FROM UNNEST($1::TEXT[]) WITH ORDINALITY AS t(title, ord) \
         WHERE EXISTS ( \
             SELECT 1 FROM books b \
             WHERE b.is_deleted = false AND LOWER(b.title) = LOWER(t.title) \
         ) \
         ORDER BY t.ord",
    )
    .bind(titles)
    .fetch_all(conn)
    .await
}
