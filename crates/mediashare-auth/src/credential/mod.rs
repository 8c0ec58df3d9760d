//! Durable credential record set.

pub mod store;

pub use store::{CredentialStore, Credentials};
