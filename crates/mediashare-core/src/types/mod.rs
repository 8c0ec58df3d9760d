//! Core type definitions used across the mediashare workspace.

pub mod category;

pub use category::MediaCategory;
