//! Request forms with validation.

use serde::Deserialize;
use validator::{Validate, ValidationErrors};

/// Login form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Signup form.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct SignupForm {
    /// Requested username.
    #[validate(length(min = 1, message = "Username is required."))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
    /// Password confirmation.
    pub confirm_password: String,
}

/// Password change form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordForm {
    /// The password currently on record.
    pub current_password: String,
    /// Replacement password.
    #[validate(length(min = 1, message = "New password is required."))]
    pub new_password: String,
}

/// Theme preference form.
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeForm {
    /// Theme name.
    pub theme: String,
}

/// Font preference form.
#[derive(Debug, Clone, Deserialize)]
pub struct FontForm {
    /// Font family name.
    pub font: String,
}

/// First human-readable message out of a set of validation errors.
pub fn first_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid input.".to_string())
}
