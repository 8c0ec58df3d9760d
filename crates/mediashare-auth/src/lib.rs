//! # mediashare-auth
//!
//! Authentication and authorization for mediashare.
//!
//! ## Modules
//!
//! - `credential`: JSON-backed username → password record set with a single writer
//! - `policy`: signup rules (reserved administrator names, confirmation)
//! - `session`: per-browser session state (identity and display preferences)
//! - `guard`: "is authenticated" and "is the administrator" request gates

pub mod credential;
pub mod guard;
pub mod policy;
pub mod session;

pub use credential::CredentialStore;
pub use guard::{Denial, require_administrator, require_authenticated};
pub use policy::SignupPolicy;
pub use session::{Preference, SessionData};
