//! # mediashare-storage
//!
//! Storage for the shared upload directory: a local filesystem provider,
//! the upload filename sanitizer, and the [`FileGateway`] that applies the
//! extension allow-set, category filters and traversal guard.

pub mod filename;
pub mod gateway;
pub mod providers;

pub use gateway::{FileGateway, RetrievedFile, StoreOutcome};
pub use providers::LocalStorageProvider;
