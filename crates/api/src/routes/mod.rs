pub mod auth;
pub mod books;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                  register (public)
/// /auth/login                     login (public)
///
/// /books                          list (public), create (public)
/// /books/bulk                     bulk create, bulk delete (auth required)
/// /books/{id}                     get, update, delete (auth required)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/books", books::router())
}
