//! Convenience result type alias for Hungr.

use crate::error::AppError;

/// A specialized `Result` type for Hungr operations.
pub type AppResult<T> = Result<T, AppError>;
