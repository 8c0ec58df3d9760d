//! Convenience result type alias for mediashare.

use crate::error::AppError;

/// A specialized `Result` type for mediashare operations.
pub type AppResult<T> = Result<T, AppError>;
