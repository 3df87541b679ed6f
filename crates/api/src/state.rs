use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool and HTTP client are reference-counted internally.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: webresources_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Client used to probe web resource URLs. Carries the URL check timeout.
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(pool: webresources_db::DbPool, config: ServerConfig) -> Self {
        let http = crate::url_check::build_client(config.url_check_timeout_secs);
        Self {
            pool,
            config: Arc::new(config),
            http,
        }
    }
}
