//! Credential store configuration.

use serde::{Deserialize, Serialize};

/// Credential store and administrator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Path of the JSON record set mapping usernames to passwords.
    #[serde(default = "default_users_file")]
    pub users_file: String,
    /// The distinguished username allowed to upload and delete files.
    #[serde(default = "default_admin_username")]
    pub admin_username: String,
    /// Password written for the administrator when the record set is seeded.
    #[serde(default = "default_seed_password")]
    pub seed_admin_password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            users_file: default_users_file(),
            admin_username: default_admin_username(),
            seed_admin_password: default_seed_password(),
        }
    }
}

fn default_users_file() -> String {
    "users.json".to_string()
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_seed_password() -> String {
    "password".to_string()
}
