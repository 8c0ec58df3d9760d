//! Custom Axum extractors.

pub mod auth;
pub mod session;

pub use auth::{AdminUser, AuthUser};
pub use session::WebSession;
