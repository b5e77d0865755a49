//! Convenience result type alias for SmartPark.

use crate::error::AppError;

/// A specialized `Result` type for SmartPark operations.
pub type AppResult<T> = Result<T, AppError>;
