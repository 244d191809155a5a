use std::sync::Arc;

use slate_core::scene_conflict::ConflictDetector;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: slate_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// A conflict detector using the configured nominal window.
    pub fn conflict_detector(&self) -> ConflictDetector {
        ConflictDetector::new(self.config.duration_policy)
    }
}
