//! Validation of short codes received in request paths.

use crate::error::AppError;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Characters the backend uses for generated codes.
static LINK_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").unwrap());

/// Rejects codes that could not have been issued by the backend.
///
/// Keeps arbitrary path segments out of the URLs built for backend calls.
///
/// # Errors
///
/// Returns [`AppError::Validation`] for an empty, over-long or
/// non-alphanumeric code.
pub fn validate_link_code(code: &str) -> Result<(), AppError> {
    if LINK_CODE_REGEX.is_match(code) {
        Ok(())
    } else {
        Err(AppError::bad_request(
            "Invalid short code",
            json!({ "code": code }),
        ))
    }
}
