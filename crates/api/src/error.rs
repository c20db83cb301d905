use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bookshelf_core::error::CoreError;
use bookshelf_db::StoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `bookshelf_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A storage failure from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Core(core) => AppError::Core(core),
            StoreError::Database(db) => AppError::Database(db),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => classify_core_error(core),

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn classify_core_error(core: &CoreError) -> (StatusCode, &'static str, String) {
    match core {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::DuplicateUsername(_) => (
            StatusCode::CONFLICT,
            "DUPLICATE_USERNAME",
            "Username already exists".to_string(),
        ),
        CoreError::InvalidCredentials => (
            StatusCode::UNAUTHORIZED,
            "INVALID_CREDENTIALS",
            core.to_string(),
        ),
        CoreError::DuplicateTitle { titles } if titles.len() == 1 => (
            StatusCode::CONFLICT,
            "DUPLICATE_TITLE",
            "A book with this title already exists.".to_string(),
        ),
        CoreError::DuplicateTitle { .. } => {
            (StatusCode::CONFLICT, "DUPLICATE_TITLE", core.to_string())
        }
        CoreError::DuplicateTitleInBatch { .. } => (
            StatusCode::BAD_REQUEST,
            "DUPLICATE_TITLE_IN_BATCH",
            core.to_string(),
        ),
        CoreError::InvalidPagination(msg) => {
            (StatusCode::BAD_REQUEST, "INVALID_PAGINATION", msg.clone())
        }
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
    }
}

/// Every sqlx error that reaches this point is a storage failure: domain
/// violations were already classified by the repositories. The detail is
/// logged and the response carries a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    tracing::error!(error = %err, "Storage failure");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "STORAGE_FAILURE",
        "An internal error occurred".to_string(),
    )
}
