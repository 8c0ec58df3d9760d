//! Route definitions for the mediashare web interface.
//!
//! Routes are grouped by domain. The router receives `AppState` and passes
//! it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with every route, the upload body limit and
/// request logging.
pub fn build_router(state: AppState) -> Router {
    let max_upload =
        usize::try_from(state.config.storage.max_upload_size_bytes).unwrap_or(usize::MAX);

    Router::new()
        .merge(auth_routes())
        .merge(browse_routes())
        .merge(file_routes())
        .merge(settings_routes())
        .merge(health_routes())
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Login, signup, logout
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/login",
            get(handlers::auth::login_page).post(handlers::auth::login_submit),
        )
        .route(
            "/signup",
            get(handlers::auth::signup_page).post(handlers::auth::signup_submit),
        )
        .route("/logout", get(handlers::auth::logout))
}

/// Home page and category listings
fn browse_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::browse::index))
        .route("/documents", get(handlers::browse::documents))
        .route("/images", get(handlers::browse::images))
        .route("/videos", get(handlers::browse::videos))
}

/// Upload, download, delete
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/upload", post(handlers::file::upload_file))
        .route("/uploads/{filename}", get(handlers::file::download_file))
        .route("/delete/{filename}", post(handlers::file::delete_file))
}

/// Password and display preferences
fn settings_routes() -> Router<AppState> {
    Router::new()
        .route("/settings", get(handlers::settings::settings_page))
        .route("/change-password", post(handlers::settings::change_password))
        .route("/change-theme", post(handlers::settings::change_theme))
        .route("/change-font", post(handlers::settings::change_font))
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}
