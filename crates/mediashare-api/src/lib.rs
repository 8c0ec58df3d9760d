//! # mediashare-api
//!
//! HTTP layer for mediashare built on Axum.
//!
//! Provides the page and file routes, the signed session extractor, the
//! authentication/administrator guards, request logging, HTML pages and
//! error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod templates;

pub use app::build_app;
pub use state::AppState;
