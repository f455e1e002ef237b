//! Console sign-in, session lookup and access token refresh.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use tokio::sync::Mutex;

use crate::domain::entities::Session;
use crate::domain::gateways::{LinkGateway, SessionStore};
use crate::error::AppError;
use crate::utils::session_id::generate_session_id;

/// Service that turns backend credentials into console sessions.
///
/// The browser only ever sees the opaque session id. Access tokens are
/// refreshed when they are older than `access_ttl`; a session older than
/// `session_ttl` is dropped, matching the lifetime of the backend's refresh
/// token.
///
/// The backend rotates refresh tokens and blacklists the old one, so two
/// requests must never refresh with the same token. Refreshes run one at a
/// time and re-read the session once they hold `refresh_lock`.
pub struct AuthService<G: LinkGateway + ?Sized, S: SessionStore + ?Sized> {
    gateway: Arc<G>,
    sessions: Arc<S>,
    session_ttl: Duration,
    access_ttl: Duration,
    refresh_lock: Mutex<()>,
}

impl<G: LinkGateway + ?Sized, S: SessionStore + ?Sized> AuthService<G, S> {
    pub fn new(gateway: Arc<G>, sessions: Arc<S>, session_ttl: Duration, access_ttl: Duration) -> Self {
        Self {
            gateway,
            sessions,
            session_ttl,
            access_ttl,
            refresh_lock: Mutex::new(()),
        }
    }

    /// Authenticates against the backend and opens a session.
    ///
    /// Returns the new session id together with the session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the username or password is blank.
    /// Returns [`AppError::Authentication`] if the backend rejects the credentials.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<(String, Session), AppError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AppError::bad_request(
                "Username and password are required",
                json!({}),
            ));
        }

        let credentials = self.gateway.authenticate(username, password).await?;
        let session = Session::new(username, credentials, now);
        let id = generate_session_id();

        self.sessions.insert(id.clone(), session.clone()).await;
        tracing::info!(username, "Session started");

        Ok((id, session))
    }

    /// Looks up a session, refreshing its access token when it is stale.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the session does not exist, has
    /// outlived `session_ttl`, or its refresh token was rejected. In the last
    /// two cases the session is removed.
    pub async fn resolve(&self, id: &str, now: DateTime<Utc>) -> Result<Session, AppError> {
        let session = self.live_session(id, now).await?;
        if now - session.refreshed_at < self.access_ttl {
            return Ok(session);
        }

        let _guard = self.refresh_lock.lock().await;

        // Another request may have refreshed while we waited.
        let mut session = self.live_session(id, now).await?;
        if now - session.refreshed_at < self.access_ttl {
            return Ok(session);
        }

        match self.gateway.refresh_access(&session.credentials.refresh).await {
            Ok(credentials) => {
                let rotated = credentials.refresh != session.credentials.refresh;
                self.sessions
                    .update_credentials(id, credentials.clone(), now)
                    .await;
                session.credentials = credentials;
                session.refreshed_at = now;
                tracing::debug!(username = %session.username, rotated, "Access token refreshed");
                Ok(session)
            }
            Err(e) => {
                self.sessions.remove(id).await;
                tracing::warn!(username = %session.username, error = %e, "Token refresh failed");
                Err(AppError::unauthorized(
                    "Your session has expired. Please sign in again.",
                    json!({ "reason": "refresh_failed" }),
                ))
            }
        }
    }

    /// Fetches a session, dropping it if it has outlived `session_ttl`.
    async fn live_session(&self, id: &str, now: DateTime<Utc>) -> Result<Session, AppError> {
        let session = self
            .sessions
            .get(id)
            .await
            .ok_or_else(|| AppError::unauthorized("Please sign in", json!({})))?;

        if now - session.created_at >= self.session_ttl {
            self.sessions.remove(id).await;
            tracing::info!(username = %session.username, "Session expired");
            return Err(AppError::unauthorized(
                "Your session has expired. Please sign in again.",
                json!({ "reason": "session_expired" }),
            ));
        }

        Ok(session)
    }

    /// Ends a session. Returns false if there was nothing to end.
    pub async fn logout(&self, id: &str) -> bool {
        match self.sessions.remove(id).await {
            Some(session) => {
                tracing::info!(username = %session.username, "Session ended");
                true
            }
            None => false,
        }
    }

    /// Drops every session older than `session_ttl` at `now`.
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        self.sessions.purge_older_than(now - self.session_ttl).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Credentials;
    use crate::domain::gateways::{MockLinkGateway, MockSessionStore};
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap()
    }

    fn credentials() -> Credentials {
        Credentials {
            access: "access-1".to_string(),
            refresh: "refresh-1".to_string(),
        }
    }

    fn service(
        gateway: MockLinkGateway,
        sessions: MockSessionStore,
    ) -> AuthService<MockLinkGateway, MockSessionStore> {
        AuthService::new(
            Arc::new(gateway),
            Arc::new(sessions),
            Duration::days(7),
            Duration::minutes(30),
        )
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut gateway = MockLinkGateway::new();
        gateway
            .expect_authenticate()
            .withf(|user, pass| user == "alice" && pass == "secret")
            .times(1)
            .returning(|_, _| Ok(credentials()));

        let mut sessions = MockSessionStore::new();
        sessions
            .expect_insert()
            .withf(|id, session| id.len() == 64 && session.username == "alice")
            .times(1)
            .returning(|_, _| ());

        let (id, session) = service(gateway, sessions)
            .login(" alice ", "secret", now())
            .await
            .unwrap();

        assert_eq!(id.len(), 64);
        assert_eq!(session.access_token(), "access-1");
        assert_eq!(session.refreshed_at, now());
    }

    #[tokio::test]
    async fn test_login_rejected() {
        let mut gateway = MockLinkGateway::new();
        gateway
            .expect_authenticate()
            .times(1)
            .returning(|_, _| Err(AppError::authentication("No active account", json!({}))));

        let sessions = MockSessionStore::new();

        let result = service(gateway, sessions).login("alice", "wrong", now()).await;

        assert!(matches!(result, Err(AppError::Authentication { .. })));
    }

    #[tokio::test]
    async fn test_login_blank_fields_skip_backend() {
        let service = service(MockLinkGateway::new(), MockSessionStore::new());

        let result = service.login("  ", "secret", now()).await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_resolve_fresh_session() {
        let mut sessions = MockSessionStore::new();
        sessions
            .expect_get()
            .returning(|_| Some(Session::new("alice", credentials(), now() - Duration::minutes(5))));

        let session = service(MockLinkGateway::new(), sessions)
            .resolve("id", now())
            .await
            .unwrap();

        assert_eq!(session.access_token(), "access-1");
    }

    #[tokio::test]
    async fn test_resolve_unknown_session() {
        let mut sessions = MockSessionStore::new();
        sessions.expect_get().returning(|_| None);

        let result = service(MockLinkGateway::new(), sessions).resolve("id", now()).await;

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_resolve_refreshes_stale_access() {
        let mut gateway = MockLinkGateway::new();
        gateway
            .expect_refresh_access()
            .withf(|refresh| refresh == "refresh-1")
            .times(1)
            .returning(|_| {
                Ok(Credentials {
                    access: "access-2".to_string(),
                    refresh: "refresh-2".to_string(),
                })
            });

        let mut sessions = MockSessionStore::new();
        sessions
            .expect_get()
            .returning(|_| Some(Session::new("alice", credentials(), now() - Duration::hours(1))));
        sessions
            .expect_update_credentials()
            .withf(|id, credentials, at| {
                id == "id"
                    && credentials.access == "access-2"
                    && credentials.refresh == "refresh-2"
                    && *at == now()
            })
            .times(1)
            .returning(|_, _, _| true);

        let session = service(gateway, sessions).resolve("id", now()).await.unwrap();

        assert_eq!(session.access_token(), "access-2");
        assert_eq!(session.credentials.refresh, "refresh-2");
        assert_eq!(session.refreshed_at, now());
    }

    #[tokio::test]
    async fn test_resolve_uses_session_refreshed_while_waiting() {
        let stale = now() - Duration::hours(1);
        let reads = Arc::new(AtomicUsize::new(0));

        let mut sessions = MockSessionStore::new();
        let counter = reads.clone();
        sessions.expect_get().returning(move |_| {
            let mut session = Session::new("alice", credentials(), stale);
            // The second read sees the pair stored by a concurrent refresh.
            if counter.fetch_add(1, Ordering::SeqCst) > 0 {
                session.credentials = Credentials {
                    access: "access-2".to_string(),
                    refresh: "refresh-2".to_string(),
                };
                session.refreshed_at = now();
            }
            Some(session)
        });

        // No refresh expectation: calling the gateway would panic.
        let session = service(MockLinkGateway::new(), sessions)
            .resolve("id", now())
            .await
            .unwrap();

        assert_eq!(session.access_token(), "access-2");
        assert_eq!(reads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_resolve_failed_refresh_ends_session() {
        let mut gateway = MockLinkGateway::new();
        gateway
            .expect_refresh_access()
            .returning(|_| Err(AppError::authentication("Token is invalid", json!({}))));

        let mut sessions = MockSessionStore::new();
        sessions
            .expect_get()
            .returning(|_| Some(Session::new("alice", credentials(), now() - Duration::hours(1))));
        sessions.expect_remove().times(1).returning(|_| None);

        let result = service(gateway, sessions).resolve("id", now()).await;

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_resolve_expired_session() {
        let mut sessions = MockSessionStore::new();
        sessions
            .expect_get()
            .returning(|_| Some(Session::new("alice", credentials(), now() - Duration::days(8))));
        sessions.expect_remove().times(1).returning(|_| None);

        let result = service(MockLinkGateway::new(), sessions).resolve("id", now()).await;

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_purge_uses_session_ttl() {
        let mut sessions = MockSessionStore::new();
        sessions
            .expect_purge_older_than()
            .withf(|cutoff| *cutoff == now() - Duration::days(7))
            .times(1)
            .returning(|_| 3);

        let purged = service(MockLinkGateway::new(), sessions).purge_expired(now()).await;

        assert_eq!(purged, 3);
    }

    #[tokio::test]
    async fn test_logout() {
        let mut sessions = MockSessionStore::new();
        sessions
            .expect_remove()
            .times(1)
            .returning(|_| Some(Session::new("alice", credentials(), now())));

        assert!(service(MockLinkGateway::new(), sessions).logout("id").await);
    }
}
