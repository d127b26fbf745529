use std::sync::Arc;

use designsight_ai::ScreenAnalyzer;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: designsight_db::DbPool,
    /// Server configuration (upload directory and size limit are read per request).
    pub config: Arc<ServerConfig>,
    /// Vision + suggestion pipeline run on every upload.
    pub analyzer: Arc<ScreenAnalyzer>,
}
