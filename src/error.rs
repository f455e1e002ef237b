//! Application error type shared by services, gateways and HTTP handlers.
//!
//! Every failure the console can observe originates at the backend boundary
//! (or in request validation before a backend call). The view-model functions
//! in [`crate::domain::view_model`] are total and never produce an [`AppError`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload returned by the JSON API.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Errors surfaced to the caller of a service or handler.
///
/// | Variant | Origin | HTTP |
/// |---|---|---|
/// | `Authentication` | bad username/password or refresh token | 401 |
/// | `Unauthorized` | access token missing, invalid or expired | 401 |
/// | `Validation` | rejected input (locally or by the backend) | 400 |
/// | `NotFound` | unknown short code | 404 |
/// | `Transport` | backend unreachable, timed out or misbehaving | 502 |
/// | `Internal` | console bug or misconfiguration | 500 |
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Authentication { message: String, details: Value },
    #[error("{message}")]
    Unauthorized { message: String, details: Value },
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Transport { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn authentication(message: impl Into<String>, details: Value) -> Self {
        Self::Authentication {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn transport(message: impl Into<String>, details: Value) -> Self {
        Self::Transport {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Human-readable message, suitable for a notification banner.
    pub fn message(&self) -> &str {
        match self {
            AppError::Authentication { message, .. }
            | AppError::Unauthorized { message, .. }
            | AppError::Validation { message, .. }
            | AppError::NotFound { message, .. }
            | AppError::Transport { message, .. }
            | AppError::Internal { message, .. } => message,
        }
    }

    /// Returns true when the error means the stored credentials are no longer usable.
    pub fn ends_session(&self) -> bool {
        matches!(
            self,
            AppError::Unauthorized { .. } | AppError::Authentication { .. }
        )
    }

    /// HTTP status the error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Authentication { .. } | AppError::Unauthorized { .. } => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Transport { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn parts(self) -> (StatusCode, ErrorInfo) {
        let status = self.status_code();
        let (code, message, details) = match self {
            AppError::Authentication { message, details } => {
                ("authentication_failed", message, details)
            }
            AppError::Unauthorized { message, details } => ("unauthorized", message, details),
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Transport { message, details } => ("backend_unavailable", message, details),
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        (
            status,
            ErrorInfo {
                code,
                message,
                details,
            },
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = self.parts();
        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        let reason = if e.is_timeout() {
            "timeout"
        } else if e.is_connect() {
            "connect"
        } else if e.is_decode() {
            "decode"
        } else {
            "request"
        };

        AppError::transport(
            "Backend request failed",
            json!({ "reason": reason, "detail": e.to_string() }),
        )
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<(String, Vec<String>)> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages = errs
                    .iter()
                    .map(|e| match &e.message {
                        Some(message) => message.to_string(),
                        None => e.code.to_string(),
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();
        fields.sort();

        let message = fields
            .first()
            .and_then(|(_, messages)| messages.first().cloned())
            .unwrap_or_else(|| "Invalid input".to_string());
        let details: serde_json::Map<String, Value> = fields
            .into_iter()
            .map(|(field, messages)| (field, json!(messages)))
            .collect();

        AppError::bad_request(message, json!({ "fields": details }))
    }
}
