//! Per-browser session state.
//!
//! The session never holds a password. It is carried by value in a signed
//! cookie; [`SessionData::encode`] and [`SessionData::decode`] produce the
//! cookie payload.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

/// A display preference stored in the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preference {
    /// Colour theme name.
    Theme,
    /// Font family name.
    Font,
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Theme => write!(f, "theme"),
            Self::Font => write!(f, "font"),
        }
    }
}

/// Session contents: optional identity plus display preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    font: Option<String>,
}

impl SessionData {
    /// The authenticated username, if any.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Whether an identity is present.
    pub fn is_authenticated(&self) -> bool {
        self.username.is_some()
    }

    /// Record a successful login.
    pub fn login(&mut self, username: impl Into<String>) {
        self.username = Some(username.into());
    }

    /// Clear the identity. Preferences are kept for the rest of the
    /// session's lifetime.
    pub fn logout(&mut self) {
        self.username = None;
    }

    /// Set a display preference without touching the identity.
    pub fn set_preference(&mut self, key: Preference, value: impl Into<String>) {
        let value = Some(value.into());
        match key {
            Preference::Theme => self.theme = value,
            Preference::Font => self.font = value,
        }
    }

    /// Read a display preference.
    pub fn preference(&self, key: Preference) -> Option<&str> {
        match key {
            Preference::Theme => self.theme.as_deref(),
            Preference::Font => self.font.as_deref(),
        }
    }

    /// Serialize into a cookie-safe string (base64url of JSON).
    pub fn encode(&self) -> String {
        // Serializing a struct of optional strings cannot fail.
        let json = serde_json::to_vec(self).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(json)
    }

    /// Parse a cookie payload. Anything undecodable yields `None`.
    pub fn decode(value: &str) -> Option<Self> {
        let json = URL_SAFE_NO_PAD.decode(value).ok()?;
        serde_json::from_slice(&json).ok()
    }
}
