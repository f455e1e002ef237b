//! In-process session storage.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::{Credentials, Session};
use crate::domain::gateways::SessionStore;

/// Sessions kept in a `HashMap` behind a Tokio `RwLock`.
///
/// Sessions are lost on restart; users simply sign in again.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, id: String, session: Session) {
        self.sessions.write().await.insert(id, session);
    }

    async fn get(&self, id: &str) -> Option<Session> {
        self.sessions.read().await.get(id).cloned()
    }

    async fn update_credentials(
        &self,
        id: &str,
        credentials: Credentials,
        refreshed_at: DateTime<Utc>,
    ) -> bool {
        match self.sessions.write().await.get_mut(id) {
            Some(session) => {
                session.credentials = credentials;
                session.refreshed_at = refreshed_at;
                true
            }
            None => false,
        }
    }

    async fn remove(&self, id: &str) -> Option<Session> {
        self.sessions.write().await.remove(id)
    }

    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.created_at >= cutoff);
        let purged = before - sessions.len();

        if purged > 0 {
            debug!(purged, remaining = sessions.len(), "Purged expired sessions");
        }
        purged
    }
}
