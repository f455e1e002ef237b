//! Backend credentials and the console session that holds them.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;

/// Bearer tokens issued by the backend's token endpoint.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub access: String,
    pub refresh: String,
}

// Tokens never reach the logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access", &"***")
            .field("refresh", &"***")
            .finish()
    }
}

/// A signed-in console user.
///
/// `refreshed_at` is the moment the current access token was obtained; it
/// starts equal to `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub credentials: Credentials,
    pub created_at: DateTime<Utc>,
    pub refreshed_at: DateTime<Utc>,
}

impl Session {
    pub fn new(username: impl Into<String>, credentials: Credentials, now: DateTime<Utc>) -> Self {
        Self {
            username: username.into(),
            credentials,
            created_at: now,
            refreshed_at: now,
        }
    }

    pub fn access_token(&self) -> &str {
        &self.credentials.access
    }
}
