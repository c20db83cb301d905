//! Repository for the `books` table (the book store).
//!
//! Every read, update and delete only sees live rows (`is_deleted = false`).
//! Check-then-write operations run in one transaction, and the
//! `uq_books_live_title` index closes the window between the check and the
//! write: a violation raised by a concurrent writer is reported as the same
//! `CoreError::DuplicateTitle` the check would have produced.

use bookshelf_core::books::{batch_duplicate_titles, TitleCollisionPolicy};
use bookshelf_core::error::CoreError;
use bookshelf_core::pagination::PageRequest;
use bookshelf_core::types::DbId;
use sqlx::PgPool;

use crate::error::StoreResult;
use crate::models::book::{Book, CreateBook, UpdateBook};
use crate::tx::{classify_title_violation, live_title_collisions, live_title_exists};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, author_name, publication_year, views_count, \
                        is_deleted, created_at, updated_at";

/// Provides CRUD and soft-delete operations for books.
pub struct BookRepo;

impl BookRepo {
    /// Insert a new book with zero views.
    ///
    /// Fails with `DuplicateTitle` if a live book already has the title,
    /// ignoring case.
    pub async fn create(pool: &PgPool, input: &CreateBook) -> StoreResult<Book> {
        let mut tx = pool.begin().await?;

        if live_title_exists(&mut tx, &input.title, None).await? {
            return Err(CoreError::duplicate_title(&input.title).into());
        }

        let book = Self::insert(&mut tx, input)
            .await
            .map_err(|e| classify_title_violation(e, || vec![input.title.clone()]))?;

        tx.commit().await?;
        Ok(book)
    }

    /// Insert every book in `inputs` or none of them.
    ///
    /// 1. Titles repeated within `inputs` (exact match) fail with
    ///    `DuplicateTitleInBatch`.
    /// 2. Titles colliding with a live book (ignoring case) fail with
    ///    `DuplicateTitle` naming all of them.
    /// 3. Otherwise all rows are inserted in input order in one transaction.
    ///
    /// Titles that differ only in case pass step 1 and are rejected by the
    /// storage constraint during step 3, rolling back the whole batch.
    pub async fn create_bulk(pool: &PgPool, inputs: &[CreateBook]) -> StoreResult<Vec<Book>> {
        let duplicates = batch_duplicate_titles(inputs.iter().map(|b| b.title.as_str()));
        if !duplicates.is_empty() {
            return Err(CoreError::DuplicateTitleInBatch { titles: duplicates }.into());
        }
        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        let titles: Vec<String> = inputs.iter().map(|b| b.title.clone()).collect();

        let mut tx = pool.begin().await?;

        let collisions = live_title_collisions(&mut tx, &titles).await?;
        if !collisions.is_empty() {
            return Err(CoreError::DuplicateTitle { titles: collisions }.into());
        }

        let mut books = Vec::with_capacity(inputs.len());
        for input in inputs {
            let book = Self::insert(&mut tx, input)
                .await
                .map_err(|e| classify_title_violation(e, || vec![input.title.clone()]))?;
            books.push(book);
        }

        tx.commit().await?;
        Ok(books)
    }

    /// Titles of live books, most viewed first, ties broken by ascending id.
    pub async fn list_titles(pool: &PgPool, page: PageRequest) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT title FROM books \
             WHERE is_deleted = false \
             ORDER BY views_count DESC, id ASC \
             LIMIT $1 OFFSET $2",
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await
    }

    /// Record a view of a live book and return it with the new count.
    ///
    /// This is not a read-only lookup: each call persists `views_count + 1`.
    /// Returns `None` if no live book has this id.
    pub async fn get_by_id(pool: &PgPool, id: DbId) -> Result<Option<Book>, sqlx::Error> {
        let query = format!(
            "UPDATE books SET views_count = views_count + 1 \
             WHERE id = $1 AND is_deleted = false \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a live book without recording a view.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Book>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM books WHERE id = $1 AND is_deleted = false");
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite a live book's title, author and year and reset its views.
    ///
    /// The title check runs first and, under
    /// [`TitleCollisionPolicy::IncludeSelf`], counts the book itself: keeping
    /// the current title fails with `DuplicateTitle`. Returns `None` if no
    /// live book has this id.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBook,
        policy: TitleCollisionPolicy,
    ) -> StoreResult<Option<Book>> {
        let mut tx = pool.begin().await?;

        if live_title_exists(&mut tx, &input.title, policy.excluded_id(id)).await? {
            return Err(CoreError::duplicate_title(&input.title).into());
        }

        let query = format!(
            "UPDATE books SET \
                title = $2, \
                author_name = $3, \
                publication_year = $4, \
                views_count = 0 \
             WHERE id = $1 AND is_deleted = false \
             RETURNING {COLUMNS}"
        );
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.author_name)
            .bind(input.publication_year)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| classify_title_violation(e, || vec![input.title.clone()]))?;

        tx.commit().await?;
        Ok(book)
    }

    /// Soft-delete a live book. Returns `true` if a row was transitioned.
    pub async fn delete_one(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE books SET is_deleted = true WHERE id = $1 AND is_deleted = false")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Soft-delete every live book among `ids` in a single statement.
    ///
    /// Returns exactly the ids that moved from live to deleted, ascending.
    /// Unknown and already-deleted ids are skipped.
    pub async fn delete_bulk(pool: &PgPool, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut deleted = sqlx::query_scalar::<_, DbId>(
            "UPDATE books SET is_deleted = true \
             WHERE id = ANY($1) AND is_deleted = false \
             RETURNING id",
        )
        .bind(ids)
        .fetch_all(pool)
        .await?;
        deleted.sort_unstable();
        Ok(deleted)
    }

    /// Number of live books.
    pub async fn count_live(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM books WHERE is_deleted = false")
            .fetch_one(pool)
            .await
    }

    async fn insert(conn: &mut sqlx::PgConnection, input: &CreateBook) -> Result<Book, sqlx::Error> {
        let query = format!(
            "INSERT INTO books (title, author_name, publication_year) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(&input.title)
            .bind(&input.author_name)
            .bind(input.publication_year)
            .fetch_one(conn)
            .await
    }
}
