//! Signup rules.

use std::sync::LazyLock;

use regex::Regex;

use mediashare_core::error::AppError;

use crate::credential::CredentialStore;

/// `admin` or `administrateur` followed only by digits, in any case. A
/// single trailing newline is tolerated the way a `$` anchor allows in most
/// regex dialects.
static RESERVED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:admin|administrateur)\d+\n?$").expect("reserved name pattern is valid")
});

/// Returns `true` for names like `admin7` or `ADMINISTRATEUR42` that
/// impersonate the administrator.
///
/// Digits are any Unicode decimal digit. Dotless `ı` and dotted `İ` count
/// as `i`.
pub fn is_reserved(username: &str) -> bool {
    let folded: String = username
        .chars()
        .map(|c| if matches!(c, 'ı' | 'İ') { 'i' } else { c })
        .collect();
    RESERVED_NAME.is_match(&folded)
}

/// Validates signup submissions against the credential store.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignupPolicy;

impl SignupPolicy {
    /// Check a signup form. Rules are applied in order: reserved name,
    /// name already taken, password confirmation mismatch.
    ///
    /// Returns the first violation as a `Validation` or `Conflict` error.
    pub async fn validate(
        &self,
        store: &CredentialStore,
        username: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<(), AppError> {
        if is_reserved(username) {
            return Err(AppError::validation("This username is not allowed."));
        }

        if store.contains(username).await? {
            return Err(AppError::conflict("Username is already taken."));
        }

        if password != confirm_password {
            return Err(AppError::validation("Passwords do not match."));
        }

        Ok(())
    }
}
