//! Root-level liveness probe.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use bookshelf_db::repositories::BookRepo;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` when the catalogue can be read, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Number of live books; absent when the database is unreachable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_books: Option<i64>,
}

/// GET /health
///
/// Counting live books doubles as the database round trip, so a healthy
/// response also proves the `books` table is readable.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let live_books = match BookRepo::count_live(&state.pool).await {
        Ok(count) => Some(count),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the catalogue");
            None
        }
    };
    let db_healthy = live_books.is_some();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        live_books,
    })
}

/// Mounted at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
