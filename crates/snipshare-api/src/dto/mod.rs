//! Request/response DTOs.

pub mod request;

use snipshare_core::error::AppError;
use validator::Validate;

/// Runs `validator` derive checks and maps failures to a 400.
pub fn validate_body<T: Validate>(body: &T) -> Result<(), AppError> {
    body.validate()
        .map_err(|e| AppError::validation(e.to_string()))
}
