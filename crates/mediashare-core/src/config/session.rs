//! Session cookie configuration.

use serde::{Deserialize, Serialize};

/// Placeholder secret shipped in the defaults. The server warns when it is in use.
pub const DEVELOPMENT_SECRET: &str = "change-me-development-secret";

/// Signed session cookie configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Secret used to derive the cookie signing key.
    #[serde(default = "default_secret")]
    pub secret: String,
    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Whether to set the `Secure` attribute (HTTPS only).
    #[serde(default)]
    pub secure_cookie: bool,
}

impl SessionConfig {
    /// Returns `true` if the shipped placeholder secret is still configured.
    pub fn uses_development_secret(&self) -> bool {
        self.secret == DEVELOPMENT_SECRET
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: default_secret(),
            cookie_name: default_cookie_name(),
            secure_cookie: false,
        }
    }
}

fn default_secret() -> String {
    DEVELOPMENT_SECRET.to_string()
}

fn default_cookie_name() -> String {
    "mediashare_session".to_string()
}
