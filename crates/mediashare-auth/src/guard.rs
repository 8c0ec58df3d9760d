//! Request gates evaluated before any handler logic runs.

use crate::session::SessionData;

/// Where a rejected request is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// No identity: go to the login page.
    Login,
    /// Not allowed here: go back to the home page.
    Home,
}

/// Passes when the session carries an identity; returns it.
pub fn require_authenticated(session: &SessionData) -> Result<&str, Denial> {
    session.username().ok_or(Denial::Login)
}

/// Passes only for the administrator.
///
/// Unlike [`require_authenticated`], an anonymous session is sent home
/// rather than to the login page.
pub fn require_administrator<'a>(
    session: &'a SessionData,
    admin_username: &str,
) -> Result<&'a str, Denial> {
    match require_authenticated(session) {
        Ok(username) if username == admin_username => Ok(username),
        _ => Err(Denial::Home),
    }
}
