//! Bulk link generation request and outcome.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::LinkRecord;

/// Maximum number of links a single bulk request may create.
pub const MAX_BULK_LINKS: u32 = 200;
/// Shortest code length the backend accepts.
pub const MIN_CODE_LENGTH: u32 = 4;
/// Longest code length the backend accepts.
pub const MAX_CODE_LENGTH: u32 = 32;
/// Number of links pre-filled in the generator form.
pub const DEFAULT_COUNT: u32 = 5;
/// Code length pre-filled in the generator form.
pub const DEFAULT_CODE_LENGTH: u32 = 7;

/// Request to generate `count` short links pointing at `target_url`.
///
/// Serializes to the backend's payload shape:
/// `{ "url", "count", "code_length", "expires_at"? }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct BulkRequest {
    #[serde(rename = "url")]
    #[validate(url(message = "Destination must be a valid URL"))]
    pub target_url: String,

    #[validate(range(min = 1, max = MAX_BULK_LINKS, message = "Number of links must be between 1 and 200"))]
    pub count: u32,

    #[validate(range(min = MIN_CODE_LENGTH, max = MAX_CODE_LENGTH, message = "Code length must be between 4 and 32"))]
    pub code_length: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl BulkRequest {
    pub fn new(target_url: impl Into<String>, count: u32, code_length: u32) -> Self {
        Self {
            target_url: target_url.into(),
            count,
            code_length,
            expires_at: None,
        }
    }
}

/// Links created by one bulk request.
///
/// `partial` is set when the backend created fewer links than requested
/// (it answers `207 Multi-Status` and explains in `message`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkOutcome {
    pub links: Vec<LinkRecord>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub partial: bool,
}

impl BulkOutcome {
    /// Notification text for the outcome, preferring the backend's own message.
    pub fn summary(&self) -> String {
        match &self.message {
            Some(message) => message.clone(),
            None => format!("Created {} new links.", self.links.len()),
        }
    }

    /// Short URLs of the batch joined by newlines, ready to copy.
    pub fn short_urls(&self) -> String {
        self.links
            .iter()
            .map(|link| link.short_url.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Target URL shared by the batch, if any link was created.
    pub fn target_url(&self) -> Option<&str> {
        self.links.first().map(|link| link.target_url.as_str())
    }
}
