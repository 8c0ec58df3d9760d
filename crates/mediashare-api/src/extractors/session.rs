//! `WebSession` extractor: loads [`SessionData`] from the signed session
//! cookie and writes it back when a handler changes it.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use tower_cookies::cookie::SameSite;
use tower_cookies::{Cookie, Cookies};
use tracing::debug;

use mediashare_auth::session::SessionData;

use crate::state::{AppState, SessionSettings};

/// The current request's session.
///
/// A missing, tampered or undecodable cookie yields an empty session.
pub struct WebSession {
    cookies: Cookies,
    settings: SessionSettings,
    data: SessionData,
}

impl WebSession {
    /// Read-only view of the session contents.
    pub fn data(&self) -> &SessionData {
        &self.data
    }

    /// Apply a change and re-issue the signed cookie.
    pub fn update(&mut self, change: impl FnOnce(&mut SessionData)) {
        change(&mut self.data);
        self.save();
    }

    fn save(&self) {
        let cookie = Cookie::build((self.settings.cookie_name.clone(), self.data.encode()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.settings.secure)
            .build();
        self.cookies.signed(&self.settings.key).add(cookie);
    }
}

impl FromRequestParts<AppState> for WebSession {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let cookies = Cookies::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;
        let settings = SessionSettings::clone(&state.session);

        let data = match cookies.signed(&settings.key).get(&settings.cookie_name) {
            Some(cookie) => SessionData::decode(cookie.value()).unwrap_or_else(|| {
                debug!("Discarding undecodable session cookie");
                SessionData::default()
            }),
            None => SessionData::default(),
        };

        Ok(Self {
            cookies,
            settings,
            data,
        })
    }
}
