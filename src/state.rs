//! Shared application state injected into every handler.

use std::sync::Arc;

use chrono::Duration;

use crate::application::services::{AuthService, LinkService, StatsService};
use crate::config::Config;
use crate::domain::gateways::{LinkGateway, SessionStore};

/// Session lifetimes and cookie attributes.
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub session_ttl: Duration,
    pub access_ttl: Duration,
    pub cookie_secure: bool,
}

impl SessionSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            session_ttl: config.session_ttl(),
            access_ttl: config.access_token_ttl(),
            cookie_secure: config.cookie_secure,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            session_ttl: Duration::days(7),
            access_ttl: Duration::minutes(30),
            cookie_secure: false,
        }
    }
}

/// Services and settings shared across requests.
///
/// Cloning is cheap: every service sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService<dyn LinkGateway, dyn SessionStore>>,
    pub link_service: Arc<LinkService<dyn LinkGateway>>,
    pub stats_service: Arc<StatsService<dyn LinkGateway>>,
    /// Backend location with credentials masked, for display.
    pub backend_url: String,
    pub session: SessionSettings,
}

impl AppState {
    pub fn new(
        gateway: Arc<dyn LinkGateway>,
        sessions: Arc<dyn SessionStore>,
        settings: SessionSettings,
        backend_url: impl Into<String>,
    ) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(
                gateway.clone(),
                sessions,
                settings.session_ttl,
                settings.access_ttl,
            )),
            link_service: Arc::new(LinkService::new(gateway.clone())),
            stats_service: Arc::new(StatsService::new(gateway)),
            backend_url: backend_url.into(),
            session: settings,
        }
    }
}
