use std::path::Path;

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Liveness report for the review service.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHealth {
    /// `ok` when every dependency is usable, else `degraded`.
    pub status: &'static str,
    pub version: &'static str,
    pub database_reachable: bool,
    /// Whether new screenshots can be stored.
    pub upload_dir_writable: bool,
}

/// Write and remove a scratch file in `dir`.
async fn is_writable(dir: &Path) -> bool {
    let scratch = dir.join(format!(".write-check-{}", uuid::Uuid::new_v4()));
    if let Err(e) = tokio::fs::write(&scratch, b"").await {
        tracing::warn!(dir = %dir.display(), error = %e, "Upload directory is not writable");
        return false;
    }
    let _ = tokio::fs::remove_file(&scratch).await;
    true
}

/// GET /health
async fn service_health(State(state): State<AppState>) -> Json<ServiceHealth> {
    let (database, uploads) = tokio::join!(
        designsight_db::health_check(&state.pool),
        is_writable(&state.config.upload_dir),
    );
    let database_reachable = database.is_ok();

    Json(ServiceHealth {
        status: if database_reachable && uploads { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        database_reachable,
        upload_dir_writable: uploads,
    })
}

/// Root-level routes, mounted outside `/api`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(service_health))
}
