use std::sync::Arc;

use crate::config::ServerConfig;
use crate::middleware::rate_limit::RateLimiter;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool and limiter are reference-counted internally.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: ems_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Per-IP limiter for the public auth routes.
    pub rate_limiter: RateLimiter,
}

impl AppState {
    pub fn new(pool: ems_db::DbPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            rate_limiter: RateLimiter::new(),
        }
    }
}
