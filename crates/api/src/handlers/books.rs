//! Handlers for the `/books` resource.
//!
//! `create` and `list` are public; every other handler takes an
//! [`AuthUser`] and so requires a valid bearer token.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bookshelf_core::books::current_year;
use bookshelf_core::error::CoreError;
use bookshelf_core::pagination::PageRequest;
use bookshelf_core::types::DbId;
use bookshelf_db::models::book::{BookResponse, CreateBook, UpdateBook};
use bookshelf_db::repositories::BookRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::validate_body;
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::state::AppState;

/// Response for `DELETE /books/bulk`.
#[derive(Debug, Serialize)]
pub struct BulkDeleteResponse {
    pub deleted_ids: Vec<DbId>,
    pub deleted_count: usize,
    pub message: String,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Book", id })
}

/// POST /api/v1/books
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    validate_body(&input)?;

    let book = BookRepo::create(&state.pool, &input).await?;
    tracing::info!(book_id = book.id, title = %book.title, "Book created");

    Ok((
        StatusCode::CREATED,
        Json(BookResponse::from_book(book, current_year())),
    ))
}

/// POST /api/v1/books/bulk
pub async fn create_bulk(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(inputs): Json<Vec<CreateBook>>,
) -> AppResult<(StatusCode, Json<Vec<BookResponse>>)> {
    for input in &inputs {
        validate_body(input)?;
    }

    let books = BookRepo::create_bulk(&state.pool, &inputs).await?;
    tracing::info!(user_id = auth.user_id, count = books.len(), "Books created in bulk");

    let year = current_year();
    let body = books
        .into_iter()
        .map(|book| BookResponse::from_book(book, year))
        .collect();
    Ok((StatusCode::CREATED, Json(body)))
}

/// GET /api/v1/books?page_number=&page_size=
///
/// Returns titles only, most viewed first.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<Vec<String>>> {
    let page = PageRequest::new(params.page_number(), params.page_size())?;
    let titles = BookRepo::list_titles(&state.pool, page).await?;
    Ok(Json(titles))
}

/// GET /api/v1/books/{id}
///
/// Counts as a view: the stored `views_count` is incremented.
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<BookResponse>> {
    let book = BookRepo::get_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(BookResponse::from_book(book, current_year())))
}

/// PUT /api/v1/books/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBook>,
) -> AppResult<Json<BookResponse>> {
    validate_body(&input)?;

    let book = BookRepo::update(&state.pool, id, &input, state.config.title_collision_policy)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(user_id = auth.user_id, book_id = id, "Book updated");

    Ok(Json(BookResponse::from_book(book, current_year())))
}

/// DELETE /api/v1/books/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if BookRepo::delete_one(&state.pool, id).await? {
        tracing::info!(user_id = auth.user_id, book_id = id, "Book deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// DELETE /api/v1/books/bulk
///
/// Ids that are unknown or already deleted are skipped, so an empty result
/// is a success with a message rather than a 404.
pub async fn delete_bulk(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(ids): Json<Vec<DbId>>,
) -> AppResult<Json<BulkDeleteResponse>> {
    let deleted_ids = BookRepo::delete_bulk(&state.pool, &ids).await?;
    let deleted_count = deleted_ids.len();

    let message = if deleted_count == 0 {
        "All specified books were already deleted or not found.".to_string()
    } else {
        format!("Successfully deleted {deleted_count} books.")
    };
    tracing::info!(
        user_id = auth.user_id,
        requested = ids.len(),
        deleted = deleted_count,
        "Books deleted in bulk"
    );

    Ok(Json(BulkDeleteResponse {
        deleted_ids,
        deleted_count,
        message,
    }))
}
