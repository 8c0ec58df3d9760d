//! Settings page: password change and display preferences.

use axum::Form;
use axum::extract::State;
use axum::response::{Html, Redirect};
use validator::Validate;

use mediashare_auth::session::Preference;
use mediashare_core::error::AppError;

use crate::dto::request::{ChangePasswordForm, FontForm, ThemeForm, first_message};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;
use crate::templates;

/// GET /settings
pub async fn settings_page(auth: AuthUser) -> Html<String> {
    Html(templates::settings_page(auth.session.data()))
}

/// POST /change-password
///
/// A wrong current password answers 403 and changes nothing.
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Form(form): Form<ChangePasswordForm>,
) -> Result<Redirect, ApiError> {
    form.validate()
        .map_err(|errors| AppError::validation(first_message(&errors)))?;

    state
        .credentials
        .change_password(&auth.username, &form.current_password, &form.new_password)
        .await?;

    Ok(Redirect::to("/settings"))
}

/// POST /change-theme
pub async fn change_theme(mut auth: AuthUser, Form(form): Form<ThemeForm>) -> Redirect {
    auth.session
        .update(|s| s.set_preference(Preference::Theme, form.theme));
    Redirect::to("/settings")
}

/// POST /change-font
pub async fn change_font(mut auth: AuthUser, Form(form): Form<FontForm>) -> Redirect {
    auth.session
        .update(|s| s.set_preference(Preference::Font, form.font));
    Redirect::to("/settings")
}
