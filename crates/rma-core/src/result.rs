//! Convenience result type alias for the RMA portal.

use crate::error::AppError;

/// A specialized `Result` type for RMA portal operations.
pub type AppResult<T> = Result<T, AppError>;
