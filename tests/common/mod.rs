#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use link_console::domain::entities::{
    BulkOutcome, BulkRequest, ClickEvent, Credentials, LinkRecord, LinkStats,
};
use link_console::domain::gateways::{LinkGateway, SessionStore};
use link_console::error::AppError;
use link_console::infrastructure::session::InMemorySessionStore;
use link_console::routes::router;
use link_console::state::{AppState, SessionSettings};

pub const USERNAME: &str = "alice";
pub const PASSWORD: &str = "correct horse";
pub const ACCESS: &str = "access-1";
pub const REFRESH: &str = "refresh-1";

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap()
}

pub fn link(id: i64, code: &str, target: &str, clicks: u64, created_at: DateTime<Utc>) -> LinkRecord {
    LinkRecord::new(id, code, format!("https://s.test/{code}"), target, created_at)
        .with_clicks(clicks)
}

/// The three-link fixture used across handler tests.
pub fn sample_links() -> Vec<LinkRecord> {
    vec![
        link(1, "abc", "https://a.com", 3, base_time()),
        link(2, "xyz", "https://a.com", 5, base_time() + Duration::days(1)),
        link(3, "qrs", "https://b.com", 1, base_time() - Duration::days(1)),
    ]
}

/// In-memory stand-in for the link backend.
///
/// Accepts one user and a set of access tokens; every other token is
/// rejected the way the backend rejects an expired one. Refresh tokens are
/// rotated on every refresh and the previous one stops working.
pub struct FakeGateway {
    pub links: Mutex<Vec<LinkRecord>>,
    pub clicks: Mutex<HashMap<String, Vec<ClickEvent>>>,
    pub valid_tokens: Mutex<Vec<String>>,
    pub valid_refresh: Mutex<String>,
    pub refresh_calls: Mutex<u32>,
    pub offline: Mutex<bool>,
}

impl FakeGateway {
    pub fn new(links: Vec<LinkRecord>) -> Self {
        Self {
            links: Mutex::new(links),
            clicks: Mutex::new(HashMap::new()),
            valid_tokens: Mutex::new(vec![ACCESS.to_string()]),
            valid_refresh: Mutex::new(REFRESH.to_string()),
            refresh_calls: Mutex::new(0),
            offline: Mutex::new(false),
        }
    }

    pub fn with_clicks(self, code: &str, events: Vec<ClickEvent>) -> Self {
        self.clicks.lock().unwrap().insert(code.to_string(), events);
        self
    }

    pub fn revoke_all(&self) {
        self.valid_tokens.lock().unwrap().clear();
    }

    /// Makes every link call fail the way an unreachable backend does.
    pub fn go_offline(&self) {
        *self.offline.lock().unwrap() = true;
    }

    pub fn refresh_count(&self) -> u32 {
        *self.refresh_calls.lock().unwrap()
    }

    pub fn link_codes(&self) -> Vec<String> {
        self.links
            .lock()
            .unwrap()
            .iter()
            .map(|link| link.code.clone())
            .collect()
    }

    fn check(&self, access: &str) -> Result<(), AppError> {
        if *self.offline.lock().unwrap() {
            return Err(AppError::transport(
                "Backend unavailable",
                json!({ "error": "connection refused" }),
            ));
        }
        if self.valid_tokens.lock().unwrap().iter().any(|t| t == access) {
            Ok(())
        } else {
            Err(AppError::unauthorized(
                "Given token not valid for any token type",
                json!({ "status": 401 }),
            ))
        }
    }
}

#[async_trait]
impl LinkGateway for FakeGateway {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Credentials, AppError> {
        if username == USERNAME && password == PASSWORD {
            Ok(Credentials {
                access: ACCESS.to_string(),
                refresh: REFRESH.to_string(),
            })
        } else {
            Err(AppError::authentication(
                "No active account found with the given credentials",
                json!({ "status": 401 }),
            ))
        }
    }

    async fn refresh_access(&self, refresh: &str) -> Result<Credentials, AppError> {
        // Let concurrent callers interleave like real network calls.
        tokio::task::yield_now().await;

        let mut calls = self.refresh_calls.lock().unwrap();
        *calls += 1;

        let mut valid_refresh = self.valid_refresh.lock().unwrap();
        if refresh != *valid_refresh {
            return Err(AppError::authentication(
                "Token is blacklisted",
                json!({ "status": 401 }),
            ));
        }

        let credentials = Credentials {
            access: format!("access-{}", *calls + 1),
            refresh: format!("refresh-{}", *calls + 1),
        };
        *valid_refresh = credentials.refresh.clone();
        self.valid_tokens.lock().unwrap().push(credentials.access.clone());
        Ok(credentials)
    }

    async fn list_links(&self, access: &str) -> Result<Vec<LinkRecord>, AppError> {
        self.check(access)?;
        Ok(self.links.lock().unwrap().clone())
    }

    async fn fetch_stats(&self, access: &str, code: &str) -> Result<LinkStats, AppError> {
        self.check(access)?;

        let link = self
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|link| link.code == code)
            .cloned()
            .ok_or_else(|| AppError::not_found("Not found.", json!({ "status": 404 })))?;

        Ok(LinkStats {
            total_clicks: link.click_count,
            recent_clicks: self
                .clicks
                .lock()
                .unwrap()
                .get(code)
                .cloned()
                .unwrap_or_default(),
            link,
        })
    }

    async fn create_links_bulk(
        &self,
        access: &str,
        request: BulkRequest,
    ) -> Result<BulkOutcome, AppError> {
        self.check(access)?;

        let mut links = self.links.lock().unwrap();
        let start = links.len() as i64 + 1;
        let created: Vec<LinkRecord> = (0..request.count as i64)
            .map(|i| {
                let code = format!("gen{:0width$}", start + i, width = request.code_length as usize - 3);
                let mut record = link(start + i, &code, &request.target_url, 0, Utc::now());
                record.expires_at = request.expires_at;
                record
            })
            .collect();
        links.extend(created.iter().cloned());

        Ok(BulkOutcome {
            links: created,
            message: None,
            partial: false,
        })
    }

    async fn delete_link(&self, access: &str, code: &str) -> Result<(), AppError> {
        self.check(access)?;

        let mut links = self.links.lock().unwrap();
        let before = links.len();
        links.retain(|link| link.code != code);
        if links.len() == before {
            return Err(AppError::not_found("Not found.", json!({ "status": 404 })));
        }
        Ok(())
    }
}

pub fn create_test_state(gateway: Arc<FakeGateway>) -> AppState {
    let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let gateway: Arc<dyn LinkGateway> = gateway;
    AppState::new(gateway, sessions, SessionSettings::default(), "http://backend.test")
}

/// Full router without per-IP rate limiting.
pub fn create_test_server(gateway: Arc<FakeGateway>) -> TestServer {
    TestServer::new(router(create_test_state(gateway), false)).unwrap()
}
