//! Application state shared across all handlers and middleware.

use std::fmt;
use std::sync::Arc;

use sha2::{Digest, Sha512};
use tower_cookies::Key;

use mediashare_auth::credential::CredentialStore;
use mediashare_auth::policy::SignupPolicy;
use mediashare_core::config::AppConfig;
use mediashare_core::config::session::SessionConfig;
use mediashare_core::error::AppError;
use mediashare_storage::FileGateway;

/// Signing key and attributes for the session cookie.
#[derive(Clone)]
pub struct SessionSettings {
    /// Key used to sign the cookie.
    pub key: Key,
    /// Cookie name.
    pub cookie_name: String,
    /// Whether the cookie carries the `Secure` attribute.
    pub secure: bool,
}

impl SessionSettings {
    /// Derive the signing key from the configured secret.
    pub fn from_config(config: &SessionConfig) -> Result<Self, AppError> {
        let digest = Sha512::digest(config.secret.as_bytes());
        let key = Key::try_from(digest.as_slice())
            .map_err(|e| AppError::configuration(format!("Invalid session key: {e}")))?;
        Ok(Self {
            key,
            cookie_name: config.cookie_name.clone(),
            secure: config.secure_cookie,
        })
    }
}

impl fmt::Debug for SessionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionSettings")
            .field("cookie_name", &self.cookie_name)
            .field("secure", &self.secure)
            .finish_non_exhaustive()
    }
}

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Username → password record set
    pub credentials: Arc<CredentialStore>,
    /// Signup validation rules
    pub signup_policy: SignupPolicy,
    /// Shared upload directory
    pub files: Arc<FileGateway>,
    /// Session cookie signing
    pub session: Arc<SessionSettings>,
}

impl AppState {
    /// Assemble the state from its parts.
    pub fn new(
        config: AppConfig,
        credentials: Arc<CredentialStore>,
        files: Arc<FileGateway>,
    ) -> Result<Self, AppError> {
        let session = SessionSettings::from_config(&config.session)?;
        Ok(Self {
            config: Arc::new(config),
            credentials,
            signup_policy: SignupPolicy,
            files,
            session: Arc::new(session),
        })
    }

    /// The distinguished administrator username.
    pub fn admin_username(&self) -> &str {
        &self.config.auth.admin_username
    }
}
