//! Form payloads accepted by the page routes.

pub mod request;

pub use request::{ChangePasswordForm, FontForm, LoginForm, SignupForm, ThemeForm};
