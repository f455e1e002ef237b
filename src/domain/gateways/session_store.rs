//! Storage trait for console sessions.

use crate::domain::entities::{Credentials, Session};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Server-side storage of signed-in sessions keyed by an opaque id.
///
/// The id is what the browser holds in its cookie; the backend tokens never
/// leave the server.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert(&self, id: String, session: Session);

    async fn get(&self, id: &str) -> Option<Session>;

    /// Replaces the token pair of a session and stamps `refreshed_at`.
    ///
    /// Returns false if the session no longer exists.
    async fn update_credentials(
        &self,
        id: &str,
        credentials: Credentials,
        refreshed_at: DateTime<Utc>,
    ) -> bool;

    /// Removes a session, returning it if it existed.
    async fn remove(&self, id: &str) -> Option<Session>;

    /// Drops every session created before `cutoff` and returns how many were removed.
    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> usize;
}
