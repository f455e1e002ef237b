//! Link entity as reported by the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One short link owned by the signed-in user.
///
/// `click_count` never decreases over the life of a record. `code` and `id`
/// are unique across the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub id: i64,
    pub code: String,
    pub short_url: String,
    pub target_url: String,
    pub is_active: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub click_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LinkRecord {
    /// Creates an active, never-clicked link without expiry.
    pub fn new(
        id: i64,
        code: impl Into<String>,
        short_url: impl Into<String>,
        target_url: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            code: code.into(),
            short_url: short_url.into(),
            target_url: target_url.into(),
            is_active: true,
            expires_at: None,
            click_count: 0,
            created_at,
            updated_at: created_at,
        }
    }

    pub fn with_clicks(mut self, click_count: u64) -> Self {
        self.click_count = click_count;
        self
    }

    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Returns true if the link has passed its expiry time at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| now >= e)
    }

    /// Status shown next to the link: `Active`, `Inactive` or `Expired`.
    pub fn status_label(&self, now: DateTime<Utc>) -> &'static str {
        if !self.is_active {
            "Inactive"
        } else if self.is_expired_at(now) {
            "Expired"
        } else {
            "Active"
        }
    }
}
