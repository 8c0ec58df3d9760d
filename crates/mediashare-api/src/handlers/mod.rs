//! Route handlers organized by domain.

pub mod auth;
pub mod browse;
pub mod file;
pub mod health;
pub mod settings;

use axum::http::HeaderMap;
use axum::http::header::REFERER;
use axum::response::Redirect;

/// Redirect back to the page that submitted the form, or home.
pub(crate) fn redirect_to_referrer(headers: &HeaderMap) -> Redirect {
    let target = headers
        .get(REFERER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .unwrap_or("/");
    Redirect::to(target)
}
