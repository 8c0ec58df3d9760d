//! Health check handler.

use axum::extract::State;
use axum::http::StatusCode;

use crate::state::AppState;

/// GET /health: upload directory present and credential store readable
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, &'static str) {
    let storage_ok = state.files.is_healthy().await;
    let store_ok = state.credentials.load().await.is_ok();

    if storage_ok && store_ok {
        (StatusCode::OK, "ok")
    } else {
        tracing::warn!(storage_ok, store_ok, "Health check failed");
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    }
}
