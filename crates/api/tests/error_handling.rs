//! Tests for `AppError` to HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values and do not need a
//! database or HTTP server.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use bookshelf_api::error::AppError;
use bookshelf_core::error::CoreError;
use bookshelf_db::StoreError;
use http_body_util::BodyExt;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Book",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Book with id 42 not found");
}

#[tokio::test]
async fn duplicate_username_hides_the_name() {
    let err = AppError::Core(CoreError::DuplicateUsername("alice".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "DUPLICATE_USERNAME");
    assert_eq!(json["error"], "Username already exists");
}

#[tokio::test]
async fn single_duplicate_title_uses_generic_message() {
    let err = AppError::Core(CoreError::duplicate_title("Dune"));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "DUPLICATE_TITLE");
    assert_eq!(json["error"], "A book with this title already exists.");
}

#[tokio::test]
async fn duplicate_title_in_batch_returns_400() {
    let err = AppError::Core(CoreError::DuplicateTitleInBatch {
        titles: vec!["A".into(), "B".into()],
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "DUPLICATE_TITLE_IN_BATCH");
    assert_eq!(json["error"], "Duplicate titles found in the request: A, B");
}

#[tokio::test]
async fn invalid_credentials_returns_401() {
    let (status, json) = error_to_response(CoreError::InvalidCredentials.into()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("secret database credentials leaked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn storage_failure_returns_500_and_sanitizes_message() {
    let err = AppError::Database(sqlx::Error::PoolTimedOut);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "STORAGE_FAILURE");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn store_error_converts_to_matching_variant() {
    let err: AppError = StoreError::Core(CoreError::InvalidPagination("bad".into())).into();

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_PAGINATION");
    assert_eq!(json["error"], "bad");
}
