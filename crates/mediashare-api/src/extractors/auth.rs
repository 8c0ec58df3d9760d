//! Guard extractors. They run before the request body is read and turn a
//! failed check into a redirect, so the guarded handler never executes.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use tracing::debug;

use mediashare_auth::guard::{Denial, require_administrator, require_authenticated};

use crate::extractors::session::WebSession;
use crate::state::AppState;

fn redirect_for(denial: Denial) -> Response {
    match denial {
        Denial::Login => Redirect::to("/login").into_response(),
        Denial::Home => Redirect::to("/").into_response(),
    }
}

/// Any logged-in user. Anonymous requests are redirected to `/login`.
pub struct AuthUser {
    /// The authenticated username.
    pub username: String,
    /// The session, for handlers that update preferences.
    pub session: WebSession,
}

impl AuthUser {
    /// Whether this user is the administrator.
    pub fn is_admin(&self, state: &AppState) -> bool {
        self.username == state.admin_username()
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = WebSession::from_request_parts(parts, state).await?;
        let username = require_authenticated(session.data())
            .map_err(|denial| {
                debug!(path = %parts.uri.path(), "Anonymous request redirected");
                redirect_for(denial)
            })?
            .to_string();
        Ok(Self { username, session })
    }
}

/// The administrator. Everyone else, anonymous included, is redirected to `/`.
pub struct AdminUser {
    /// The administrator's username.
    pub username: String,
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = WebSession::from_request_parts(parts, state).await?;
        let username = require_administrator(session.data(), state.admin_username())
            .map_err(|denial| {
                tracing::warn!(
                    path = %parts.uri.path(),
                    user = session.data().username().unwrap_or("-"),
                    "Administrator route refused"
                );
                redirect_for(denial)
            })?
            .to_string();
        Ok(Self { username })
    }
}
