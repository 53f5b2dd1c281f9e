//! Shared application state threaded through every handler.

use std::sync::Arc;

use campusmarket_db::DbPool;

use crate::config::ServerConfig;

/// Application state available to all handlers via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Postgres connection pool.
    pub pool: DbPool,
    /// Server configuration (JWT secret, upload paths, etc.).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(pool: DbPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }
}
