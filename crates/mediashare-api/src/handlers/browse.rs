//! Home page and category listings.

use axum::extract::State;
use axum::response::Html;

use mediashare_core::types::MediaCategory;

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;
use crate::templates;

/// GET /
pub async fn index(State(state): State<AppState>, auth: AuthUser) -> Html<String> {
    let is_admin = auth.is_admin(&state);
    Html(templates::home_page(auth.session.data(), &auth.username, is_admin))
}

async fn list_category(
    state: &AppState,
    auth: &AuthUser,
    category: MediaCategory,
) -> Result<Html<String>, ApiError> {
    let files = state.files.list_by_category(category).await?;
    Ok(Html(templates::category_page(
        auth.session.data(),
        category,
        &files,
        auth.is_admin(state),
    )))
}

/// GET /documents
pub async fn documents(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Html<String>, ApiError> {
    list_category(&state, &auth, MediaCategory::Documents).await
}

/// GET /images
pub async fn images(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Html<String>, ApiError> {
    list_category(&state, &auth, MediaCategory::Images).await
}

/// GET /videos
pub async fn videos(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Html<String>, ApiError> {
    list_category(&state, &auth, MediaCategory::Videos).await
}
