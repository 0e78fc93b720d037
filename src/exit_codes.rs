//! Process exit codes for CI callers

use crate::error::AppError;

/// Every explore passed (or there was nothing to validate)
pub const SUCCESS: i32 = 0;

/// At least one explore returned a SQL error
pub const VALIDATION_FAILED: i32 = 1;

/// Configuration, connection, or API failure
pub const ERROR: i32 = 2;

pub fn for_error(error: &AppError) -> i32 {
    match error {
        AppError::Validation(_) => VALIDATION_FAILED,
        _ => ERROR,
    }
}
