//! Request handlers

pub mod users;
pub mod billing;
pub mod payments;
pub mod health;

use crate::error::ApiError;

/// Parses an unsigned decimal path segment into an id
///
/// Signs, blanks and values past `i64::MAX` all fail with `message`.
pub(crate) fn parse_path_id(raw: &str, message: &'static str) -> Result<i64, ApiError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::invalid_input(message));
    }
    raw.parse().map_err(|_| ApiError::invalid_input(message))
}
