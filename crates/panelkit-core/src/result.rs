//! Common result alias.

use crate::error::AppError;

/// Result type used throughout the PanelKit crates.
pub type AppResult<T> = Result<T, AppError>;
