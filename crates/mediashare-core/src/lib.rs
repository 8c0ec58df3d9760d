//! # mediashare-core
//!
//! Core crate for mediashare. Contains configuration schemas, the unified
//! error system, the storage provider trait and the media category type.
//!
//! This crate has **no** internal dependencies on other mediashare crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
