use std::sync::Arc;

use crate::config::ServerConfig;
use crate::service::EventService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the service holds a reference-counted pool and the
/// config is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Event operations over the database pool.
    pub events: EventService,
}

impl AppState {
    pub fn new(pool: calendar_db::DbPool, config: ServerConfig) -> Self {
        Self {
            events: EventService::new(pool),
            config: Arc::new(config),
        }
    }
}
