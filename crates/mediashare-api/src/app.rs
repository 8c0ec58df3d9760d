//! Application builder: wires router, cookie handling and tracing into an
//! Axum app.

use axum::Router;
use tower_cookies::CookieManagerLayer;
use tower_http::trace::TraceLayer;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
}
