//! Decoding of the backend's non-2xx responses into [`AppError`].

use reqwest::StatusCode;
use serde_json::{Value, json};

use crate::error::AppError;

/// Message used when the body carries nothing readable.
pub const GENERIC_FAILURE: &str = "Request failed";

/// Which family of endpoint produced the response.
///
/// A 401 from the token endpoints means the submitted credentials were
/// wrong; anywhere else it means the access token is no longer accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Token,
    Resource,
}

/// Extracts the human-readable message from an error body.
///
/// Prefers a `detail` field, then `message`, then the whole JSON document
/// re-serialized. A body that is not JSON yields `fallback`.
pub fn extract_message(body: &str, fallback: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return fallback.to_string();
    };

    for key in ["detail", "message"] {
        match value.get(key) {
            Some(Value::String(text)) if !text.is_empty() => return text.clone(),
            Some(Value::String(_) | Value::Null) | None => {}
            Some(other) => return other.to_string(),
        }
    }

    value.to_string()
}

/// Maps a failed response to the matching [`AppError`] variant.
pub fn classify(status: StatusCode, endpoint: Endpoint, message: String) -> AppError {
    let details = json!({ "status": status.as_u16() });

    match status {
        StatusCode::BAD_REQUEST => AppError::bad_request(message, details),
        StatusCode::UNAUTHORIZED if endpoint == Endpoint::Token => {
            AppError::authentication(message, details)
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::unauthorized(message, details),
        StatusCode::NOT_FOUND => AppError::not_found(message, details),
        _ => AppError::transport(message, details),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_prefers_detail() {
        let body = r#"{"detail": "Given token not valid", "message": "ignored"}"#;
        assert_eq!(extract_message(body, GENERIC_FAILURE), "Given token not valid");
    }

    #[test]
    fn test_extract_falls_back_to_message() {
        let body = r#"{"message": "Slow down"}"#;
        assert_eq!(extract_message(body, GENERIC_FAILURE), "Slow down");
    }

    #[test]
    fn test_extract_serializes_field_errors() {
        let body = r#"{"count": ["Ensure this value is less than or equal to 200."]}"#;
        assert_eq!(
            extract_message(body, GENERIC_FAILURE),
            r#"{"count":["Ensure this value is less than or equal to 200."]}"#
        );
    }

    #[test]
    fn test_extract_non_json_uses_fallback() {
        assert_eq!(extract_message("<html>502</html>", GENERIC_FAILURE), "Request failed");
        assert_eq!(extract_message("", "Failed to delete link"), "Failed to delete link");
    }

    #[test]
    fn test_classify() {
        let cases = [
            (StatusCode::BAD_REQUEST, Endpoint::Resource, "Validation"),
            (StatusCode::UNAUTHORIZED, Endpoint::Token, "Authentication"),
            (StatusCode::UNAUTHORIZED, Endpoint::Resource, "Unauthorized"),
            (StatusCode::FORBIDDEN, Endpoint::Resource, "Unauthorized"),
            (StatusCode::NOT_FOUND, Endpoint::Resource, "NotFound"),
            (StatusCode::TOO_MANY_REQUESTS, Endpoint::Resource, "Transport"),
            (StatusCode::INTERNAL_SERVER_ERROR, Endpoint::Token, "Transport"),
        ];

        for (status, endpoint, expected) in cases {
            let variant = match classify(status, endpoint, "x".to_string()) {
                AppError::Validation { .. } => "Validation",
                AppError::Authentication { .. } => "Authentication",
                AppError::Unauthorized { .. } => "Unauthorized",
                AppError::NotFound { .. } => "NotFound",
                AppError::Transport { .. } => "Transport",
                AppError::Internal { .. } => "Internal",
            };
            assert_eq!(variant, expected, "{status}");
        }
    }
}
