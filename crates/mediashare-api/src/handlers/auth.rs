//! Auth handlers: login, signup, logout.

use axum::Form;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use tracing::{info, warn};
use validator::Validate;

use mediashare_core::error::{AppError, ErrorKind};

use crate::dto::request::{LoginForm, SignupForm, first_message};
use crate::error::ApiError;
use crate::extractors::WebSession;
use crate::state::AppState;
use crate::templates;

/// Drop the identity of a logged-in visitor and show the login form.
fn revoke_access(session: &mut WebSession) -> Response {
    if let Some(username) = session.data().username() {
        info!(username, "Signup visited while logged in; session identity revoked");
    }
    session.update(|s| s.logout());
    Html(templates::login_page(session.data(), Some(templates::ACCESS_REVOKED))).into_response()
}

/// GET /login
pub async fn login_page(session: WebSession) -> Response {
    if session.data().is_authenticated() {
        return Redirect::to("/").into_response();
    }
    Html(templates::login_page(session.data(), None)).into_response()
}

/// POST /login
pub async fn login_submit(
    State(state): State<AppState>,
    mut session: WebSession,
    Form(form): Form<LoginForm>,
) -> Result<Response, ApiError> {
    if session.data().is_authenticated() {
        return Ok(Redirect::to("/").into_response());
    }

    match state.credentials.verify(&form.username, &form.password).await {
        Ok(()) => {
            info!(username = %form.username, "Login succeeded");
            session.update(|s| s.login(form.username));
            Ok(Redirect::to("/").into_response())
        }
        Err(e) if e.is(ErrorKind::Authentication) => {
            warn!(username = %form.username, "Login failed");
            Ok(Html(templates::login_page(session.data(), Some(&e.message))).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /signup
pub async fn signup_page(mut session: WebSession) -> Response {
    if session.data().is_authenticated() {
        return revoke_access(&mut session);
    }
    Html(templates::signup_page(session.data(), None)).into_response()
}

/// POST /signup
pub async fn signup_submit(
    State(state): State<AppState>,
    mut session: WebSession,
    Form(form): Form<SignupForm>,
) -> Result<Response, ApiError> {
    if session.data().is_authenticated() {
        return Ok(revoke_access(&mut session));
    }

    let rejected = |message: &str| -> Result<Response, ApiError> {
        Ok(Html(templates::signup_page(session.data(), Some(message))).into_response())
    };

    let outcome = async {
        state
            .signup_policy
            .validate(
                &state.credentials,
                &form.username,
                &form.password,
                &form.confirm_password,
            )
            .await?;
        form.validate()
            .map_err(|errors| AppError::validation(first_message(&errors)))?;
        state
            .credentials
            .register(&form.username, &form.password)
            .await
    }
    .await;

    match outcome {
        Ok(()) => Ok(Redirect::to("/login").into_response()),
        Err(e) if matches!(e.kind, ErrorKind::Validation | ErrorKind::Conflict) => {
            info!(username = %form.username, reason = %e.message, "Signup rejected");
            rejected(&e.message)
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /logout
pub async fn logout(mut session: WebSession) -> Redirect {
    if let Some(username) = session.data().username() {
        info!(username, "Logged out");
        session.update(|s| s.logout());
    }
    Redirect::to("/login")
}
