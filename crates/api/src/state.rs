use std::sync::Arc;

use crate::auth::issuer::TokenIssuer;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: bookshelf_db::DbPool,
    /// Server configuration, loaded once at startup.
    pub config: Arc<ServerConfig>,
    /// Signs tokens on login and verifies them for protected routes.
    pub issuer: Arc<TokenIssuer>,
}

impl AppState {
    /// Build state from a pool and configuration, constructing the token
    /// issuer from the configured signing settings.
    pub fn new(pool: bookshelf_db::DbPool, config: ServerConfig) -> Self {
        let issuer = TokenIssuer::new(config.jwt.clone());
        Self {
            pool,
            config: Arc::new(config),
            issuer: Arc::new(issuer),
        }
    }
}
